//! Registration, login and password recovery.

use serde_json::Value;
use shared::models::{
    AuthPayload, Envelope, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest,
};

use super::{Notice, notice, require_data};
use crate::{error::ApiError, gateway::Gateway};

const REGISTER: &str = "/auth/register";
const LOGIN: &str = "/auth/login";
const FORGOT_PASSWORD: &str = "/auth/forgot-password";
const RESET_PASSWORD: &str = "/auth/reset-password";

/// `/auth` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Create an account; the payload carries a token for it.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        let envelope: Envelope<AuthPayload> = self.gateway.post(REGISTER, request).await?;
        require_data(envelope, REGISTER)
    }

    /// Exchange credentials for a token and the account profile.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let envelope: Envelope<AuthPayload> = self.gateway.post(LOGIN, request).await?;
        require_data(envelope, LOGIN)
    }

    /// Ask for a reset link to be mailed to `email`.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn forgot_password(&self, email: &str) -> Result<Notice, ApiError> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        let envelope: Envelope<Value> = self.gateway.post(FORGOT_PASSWORD, &request).await?;
        Ok(notice(&envelope))
    }

    /// Set a new password with a token from the reset link.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<Notice, ApiError> {
        let envelope: Envelope<Value> = self.gateway.post(RESET_PASSWORD, request).await?;
        Ok(notice(&envelope))
    }
}
