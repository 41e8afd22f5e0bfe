//! Request bodies and payloads of the authentication endpoints.

use serde::{Deserialize, Serialize};

use super::UserRecord;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password, sent over the configured transport.
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Postal address.
    pub address: String,
}

/// Body of `POST /auth/forgot-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Address the reset link is mailed to.
    pub email: String,
}

/// Body of `POST /auth/reset-password`, built from the emailed reset link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// One-time token from the reset link.
    pub token: String,
    /// Account email from the reset link.
    pub email: String,
    /// Replacement password.
    pub new_password: String,
}

/// Body of `PATCH /user/update-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    /// Password currently on the account.
    pub current_password: String,
    /// Replacement password.
    pub new_password: String,
    /// Must repeat `new_password`.
    pub confirm_password: String,
}

/// `data` of a successful login or registration: the bearer token and the
/// profile to cache with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    /// Opaque bearer token.
    pub token: String,
    /// Profile of the signed-in account.
    pub user: UserRecord,
}
