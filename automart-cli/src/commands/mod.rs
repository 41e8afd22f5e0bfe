//! One module per command group.

pub mod account;
pub mod admin;
pub mod cars;
pub mod completion;
pub mod config;
pub mod offers;
mod prompt;

use anyhow::{Error, anyhow};
use client::{AuthFailure, ErrorKind, SessionManager};
use thiserror::Error as ThisError;
use tracing::warn;

/// Generic fallback for account flows.
pub const TRY_AGAIN: &str = "Something went wrong. Please try again.";

/// A session guard stopped the command. The navigator has already printed
/// what to do next.
#[derive(Debug, ThisError)]
#[error("stopped by session guard")]
pub struct Halted;

/// Stop unless someone is signed in.
pub fn guard_auth(session: &SessionManager) -> Result<(), Halted> {
    if session.require_auth() {
        Ok(())
    } else {
        Err(Halted)
    }
}

/// Stop unless an admin is signed in.
pub fn guard_admin(session: &SessionManager) -> Result<(), Halted> {
    guard_auth(session)?;
    if session.require_admin() {
        Ok(())
    } else {
        Err(Halted)
    }
}

/// The server's own message for rejections, `fallback` when the request
/// never produced one.
pub fn failure(err: impl Into<AuthFailure>, fallback: &str) -> Error {
    let failure = err.into();
    match failure.kind {
        ErrorKind::RequestFailed | ErrorKind::ValidationFailure | ErrorKind::InFlight
            if !failure.message.is_empty() =>
        {
            anyhow!(failure.message)
        }
        _ => {
            warn!(kind = ?failure.kind, error = %failure.message, "command failed");
            anyhow!(fallback.to_string())
        }
    }
}

/// Always `message`; the underlying error only goes to the log.
pub fn failed_to(err: impl Into<AuthFailure>, message: &str) -> Error {
    let failure = err.into();
    warn!(kind = ?failure.kind, error = %failure.message, "command failed");
    anyhow!(message.to_string())
}
