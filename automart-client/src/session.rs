//! Login, registration, password flows and page guards.
//!
//! The session state is never cached: every check reads the store again, so
//! the admin flag cannot go stale after a profile refresh or logout.

use std::sync::Arc;

use shared::models::{
    AuthPayload, LoginRequest, RegisterRequest, ResetPasswordRequest, UpdatePasswordRequest,
    UserRecord,
};
use tracing::{info, warn};

use crate::{
    api::Notice,
    error::{AuthFailure, AuthResult},
    gateway::Gateway,
    inflight::{InFlight, InFlightGuard},
    navigator::{Destination, Navigator},
    store::SessionStore,
};

/// Shown when a non-admin opens an admin page.
pub const ADMIN_REQUIRED_MESSAGE: &str = "Access denied. Admin privileges required.";

/// Observable session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No credential stored.
    Anonymous,
    /// Credential stored; the cached role is not `admin`.
    Authenticated,
    /// Credential stored and the cached role is `admin`.
    AuthenticatedAdmin,
}

/// Session context handed to every page controller.
#[derive(Debug)]
pub struct SessionManager {
    gateway: Gateway,
    navigator: Arc<dyn Navigator>,
    in_flight: InFlight,
}

impl SessionManager {
    /// A manager issuing requests through `gateway` and sending the user
    /// around through `navigator`.
    #[must_use]
    pub fn new(gateway: Gateway, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            gateway,
            navigator,
            in_flight: InFlight::new(),
        }
    }

    /// Gateway for direct façade calls.
    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// The persisted credential and cached user.
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        self.gateway.store()
    }

    /// Redirect and alert sink.
    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Claim `operation` for the caller until the guard is dropped.
    ///
    /// # Errors
    /// Returns an [`ErrorKind::InFlight`](crate::ErrorKind::InFlight) failure
    /// when the operation is already running.
    pub fn begin(&self, operation: &'static str) -> AuthResult<InFlightGuard<'_>> {
        self.in_flight
            .begin(operation)
            .ok_or_else(|| AuthFailure::in_flight(operation))
    }

    /// Current state, derived from the store on every call.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.is_admin() {
            SessionState::AuthenticatedAdmin
        } else if self.is_logged_in() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// A credential is present. Its validity is not checked.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.store().credential().is_some()
    }

    /// The cached profile, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.store().cached_user()
    }

    /// Signed in with a cached `admin` role. A cached profile left behind
    /// without a credential grants nothing.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_logged_in() && self.current_user().is_some_and(|user| user.is_admin())
    }

    /// Sign in and persist the credential with the returned profile.
    ///
    /// # Errors
    /// Returns the server message on rejection, or a storage/transport
    /// failure.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<UserRecord> {
        let _guard = self.begin("login")?;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let payload = self.gateway.auth().login(&request).await?;
        self.establish(payload)
    }

    /// Create an account; the new user is signed in on success.
    ///
    /// # Errors
    /// Returns the server message on rejection, or a storage/transport
    /// failure.
    pub async fn register(&self, request: &RegisterRequest) -> AuthResult<UserRecord> {
        let _guard = self.begin("register")?;
        let payload = self.gateway.auth().register(request).await?;
        self.establish(payload)
    }

    /// Ask the server to email a reset link.
    ///
    /// # Errors
    /// Returns the server message on rejection.
    pub async fn forgot_password(&self, email: &str) -> AuthResult<Notice> {
        let _guard = self.begin("forgot-password")?;
        Ok(self.gateway.auth().forgot_password(email).await?)
    }

    /// Set a new password with the token and email from a reset link.
    ///
    /// # Errors
    /// Returns the server message on rejection.
    pub async fn reset_password(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
    ) -> AuthResult<Notice> {
        let _guard = self.begin("reset-password")?;
        let request = ResetPasswordRequest {
            token: token.to_string(),
            email: email.to_string(),
            new_password: new_password.to_string(),
        };
        Ok(self.gateway.auth().reset_password(&request).await?)
    }

    /// Change the password of the signed-in account.
    ///
    /// # Errors
    /// Returns the server message on rejection.
    pub async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> AuthResult<Notice> {
        let _guard = self.begin("update-password")?;
        let request = UpdatePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
            confirm_password: confirm_password.to_string(),
        };
        Ok(self.gateway.user().update_password(&request).await?)
    }

    /// Forget the credential and the cached user, then go home.
    pub fn logout(&self) {
        if let Err(err) = self.store().clear() {
            warn!(error = %err, "failed to clear session storage during logout");
        }
        info!("signed out");
        self.navigator.redirect(Destination::Home);
    }

    /// Confirm a stored credential with the server.
    ///
    /// Refreshes the cached profile on success. Any failure signs the user
    /// out. Does nothing without a credential.
    pub async fn verify(&self) -> SessionState {
        if !self.is_logged_in() {
            return SessionState::Anonymous;
        }

        match self.gateway.user().current_user().await {
            Ok(user) => {
                if let Err(err) = self.store().cache_user(&user) {
                    warn!(error = %err, "failed to refresh cached user");
                }
            }
            Err(err) => {
                warn!(error = %err, "session check failed; signing out");
                self.logout();
            }
        }
        self.state()
    }

    /// Guard for pages that need a signed-in user. Redirects to the login
    /// page and returns `false` otherwise; callers must stop on `false`.
    #[must_use]
    pub fn require_auth(&self) -> bool {
        if self.is_logged_in() {
            return true;
        }
        self.navigator.redirect(Destination::Login);
        false
    }

    /// Guard for admin pages. Alerts, redirects home and returns `false`
    /// unless [`SessionManager::is_admin`] holds.
    #[must_use]
    pub fn require_admin(&self) -> bool {
        if self.is_admin() {
            return true;
        }
        self.navigator.alert(ADMIN_REQUIRED_MESSAGE);
        self.navigator.redirect(Destination::Home);
        false
    }

    // Token first, then profile; a failed profile write takes the token back
    // out so the pair never half-exists.
    fn establish(&self, payload: AuthPayload) -> AuthResult<UserRecord> {
        let AuthPayload { token, user } = payload;
        self.store().set_credential(&token)?;
        if let Err(err) = self.store().cache_user(&user) {
            if let Err(rollback) = self.store().clear_credential() {
                warn!(error = %rollback, "failed to roll back credential");
            }
            return Err(err.into());
        }
        info!(email = %user.email, role = %user.role, "session established");
        Ok(user)
    }
}
