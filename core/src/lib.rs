//! Async API client core for the tache task service.
//!
//! # Overview
//! Authenticates against the remote API, keeps the bearer token in a
//! pluggable session store, and exposes create/list/get/update/delete on
//! tasks. Every failure comes back as one `ApiError` carrying a
//! human-readable message.
//!
//! # Design
//! - `SessionStore` sits on a `TokenStorage` key-value seam (memory or files).
//! - `RequestHelper` builds plain-data `HttpRequest`s, and a `Transport` executes
//!   them. Swapping the transport is how tests observe and count calls.
//! - `AuthClient` and `TaskClient` are thin wrappers over the helper, and
//!   `TacheClient` wires both to one session.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod session;
pub mod tasks;
pub mod types;

pub use auth::AuthClient;
pub use client::TacheClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use request::RequestHelper;
pub use session::{FileStorage, MemoryStorage, SessionStore, TokenStorage};
pub use tasks::TaskClient;
pub use types::{AuthResponse, LoginData, NewTask, RegisterData, Task, TaskUpdate, User};
