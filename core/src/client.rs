//! `TacheClient` bundles the auth and task clients over one session.
//!
//! # Design
//! Both clients share a single `RequestHelper`, and through it one
//! `SessionStore` and one transport, so a login through `auth()` is visible
//! to `tasks()` immediately. No process-wide state is involved: each
//! `TacheClient` is constructed explicitly with its storage and transport.

use std::sync::Arc;

use crate::auth::AuthClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{ReqwestTransport, Transport};
use crate::request::RequestHelper;
use crate::session::{FileStorage, SessionStore, TokenStorage};
use crate::tasks::TaskClient;

#[derive(Debug, Clone)]
pub struct TacheClient {
    auth: AuthClient,
    tasks: TaskClient,
    session: SessionStore,
}

impl TacheClient {
    /// Client for `base_url` using the default reqwest transport.
    pub fn new(base_url: &str, storage: Arc<dyn TokenStorage>) -> Result<Self> {
        let transport = ReqwestTransport::new(ClientConfig::default().timeout)?;
        Ok(Self::with_transport(base_url, SessionStore::new(storage), Arc::new(transport)))
    }

    /// Client built from `config`, persisting the session under `config.session_dir`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        let storage = FileStorage::new(&config.session_dir);
        Ok(Self::with_transport(
            &config.base_url,
            SessionStore::new(Arc::new(storage)),
            Arc::new(transport),
        ))
    }

    pub fn with_transport(base_url: &str, session: SessionStore, transport: Arc<dyn Transport>) -> Self {
        let helper = RequestHelper::new(base_url, session.clone(), transport);
        Self {
            auth: AuthClient::new(helper.clone()),
            tasks: TaskClient::new(helper),
            session,
        }
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn tasks(&self) -> &TaskClient {
        &self.tasks
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
