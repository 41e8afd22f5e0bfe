//! Per-resource façades over the [`Gateway`]: fixed paths, methods and body
//! shapes, no business logic.

pub mod auth;
pub mod car;
pub mod flag;
pub mod order;
pub mod user;

use shared::models::Envelope;

use crate::{error::ApiError, gateway::Gateway};

pub use auth::AuthApi;
pub use car::{CarApi, Photo};
pub use flag::FlagApi;
pub use order::OrderApi;
pub use user::UserApi;

/// Server notice (`msg` or `message`) attached to a mutation response.
pub type Notice = Option<String>;

impl Gateway {
    /// Authentication endpoints.
    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Account endpoints.
    #[must_use]
    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// Listing endpoints.
    #[must_use]
    pub fn car(&self) -> CarApi<'_> {
        CarApi::new(self)
    }

    /// Offer endpoints.
    #[must_use]
    pub fn order(&self) -> OrderApi<'_> {
        OrderApi::new(self)
    }

    /// Report endpoint.
    #[must_use]
    pub fn flag(&self) -> FlagApi<'_> {
        FlagApi::new(self)
    }
}

fn require_data<T>(envelope: Envelope<T>, path: &str) -> Result<T, ApiError> {
    envelope.into_data().ok_or_else(|| ApiError::MissingData {
        path: path.to_string(),
    })
}

fn notice<T>(envelope: &Envelope<T>) -> Notice {
    envelope.notice().map(str::to_string)
}
