//! Login, registration and logout.

use crate::error::Result;
use crate::http::HttpMethod;
use crate::request::RequestHelper;
use crate::types::{AuthResponse, LoginData, RegisterData};

const LOGIN_FAILED: &str = "Erreur de connexion";
const REGISTER_FAILED: &str = "Erreur d'inscription";

/// Authenticates against `/auth/*` and keeps the returned token in the session store.
#[derive(Debug, Clone)]
pub struct AuthClient {
    helper: RequestHelper,
}

impl AuthClient {
    pub fn new(helper: RequestHelper) -> Self {
        Self { helper }
    }

    /// Log in with `data`. The token is persisted before this returns.
    pub async fn login(&self, data: &LoginData) -> Result<AuthResponse> {
        data.validate()?;
        let request = self
            .helper
            .build(HttpMethod::Post, "/auth/login", Some(data), false)?;
        let auth: AuthResponse = self.helper.send_json(request, LOGIN_FAILED).await?;
        self.helper.session().set_token(&auth.token)?;
        tracing::info!(username = %auth.user.username, "logged in");
        Ok(auth)
    }

    /// Create an account. On success the new session is persisted, exactly as for `login`.
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse> {
        data.validate()?;
        let request = self
            .helper
            .build(HttpMethod::Post, "/auth/register", Some(data), false)?;
        let auth: AuthResponse = self.helper.send_json(request, REGISTER_FAILED).await?;
        self.helper.session().set_token(&auth.token)?;
        tracing::info!(username = %auth.user.username, "registered");
        Ok(auth)
    }

    /// Drop the stored token. No network call is made.
    pub fn logout(&self) {
        if let Err(e) = self.helper.session().clear() {
            tracing::warn!(error = %e, "failed to clear session token");
        }
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.helper.session().token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.helper.session().is_authenticated()
    }
}
