//! Wires the persisted store, gateway and session manager together.

use std::sync::Arc;

use anyhow::{Context, Result};
use client::{FileStorage, Gateway, SessionManager, SessionStore};
use shared::config::client::Config;
use tracing::debug;

use crate::navigator::TerminalNavigator;

/// Everything a command needs: the resolved configuration and the session.
#[derive(Debug)]
pub struct AppContext {
    /// Resolved configuration.
    pub config: Config,
    /// Session over the persisted store.
    pub session: SessionManager,
}

impl AppContext {
    /// Open the session file named by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let session_path = config.session_path();
        debug!(path = %session_path.display(), api = %config.api_base_url, "opening session");

        let store = SessionStore::new(Arc::new(FileStorage::new(session_path)));
        let gateway = Gateway::new(&config, store).context("failed to build HTTP client")?;
        let session = SessionManager::new(gateway, Arc::new(TerminalNavigator));
        Ok(Self { config, session })
    }

    /// Gateway for direct API calls.
    pub fn api(&self) -> &Gateway {
        self.session.gateway()
    }
}
