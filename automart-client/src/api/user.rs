//! The signed-in account.

use serde_json::Value;
use shared::models::{Envelope, ShowUserResponse, UpdatePasswordRequest, UserRecord};

use super::{Notice, notice};
use crate::{error::ApiError, gateway::Gateway};

/// `/user` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Fetch the profile of the token holder.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn current_user(&self) -> Result<UserRecord, ApiError> {
        let response: ShowUserResponse = self.gateway.get("/user/showUser").await?;
        Ok(response.user)
    }

    /// Change the password of the signed-in account.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn update_password(
        &self,
        request: &UpdatePasswordRequest,
    ) -> Result<Notice, ApiError> {
        let envelope: Envelope<Value> =
            self.gateway.patch("/user/update-password", request).await?;
        Ok(notice(&envelope))
    }
}
