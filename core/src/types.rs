//! Domain DTOs for the tache API.
//!
//! # Design
//! Field names follow Rust conventions; the wire keys the server expects
//! (`titre` for a task title) are mapped with serde attributes. The types are
//! defined independently from the mock-server crate, and the integration tests
//! catch any schema drift between the two.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Account returned by the server alongside a token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

impl LoginData {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterData {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl RegisterData {
    pub fn validate(&self) -> Result<()> {
        require("username", &self.username)?;
        require("password", &self.password)?;
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(ApiError::Invalid(format!("invalid email address: {}", self.email)));
        }
        Ok(())
    }
}

/// Token and account returned by login and register.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// A task owned by the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "titre")]
    pub title: String,
    pub description: String,
    pub complete: bool,
}

/// Request payload for creating a task. The server assigns the id and starts
/// the task as incomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)
    }
}

/// Request payload for updating a task. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskUpdate {
    #[serde(rename = "titre", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

impl TaskUpdate {
    pub fn complete(complete: bool) -> Self {
        Self {
            complete: Some(complete),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.complete.is_none()
    }
}

/// Error envelope returned by the server on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Invalid(format!("{field} is required")));
    }
    Ok(())
}
