//! Reports against listings.

use serde_json::Value;
use shared::models::{CreateFlagRequest, Envelope};

use super::{Notice, notice};
use crate::{error::ApiError, gateway::Gateway};

/// `/flag` endpoint.
#[derive(Debug, Clone, Copy)]
pub struct FlagApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> FlagApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Report a listing.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn create(&self, request: &CreateFlagRequest) -> Result<Notice, ApiError> {
        let envelope: Envelope<Value> = self.gateway.post("/flag", request).await?;
        Ok(notice(&envelope))
    }
}
