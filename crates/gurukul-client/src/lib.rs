//! Async HTTP client for the remote feedback-service collaborator.
//!
//! Implements the `gurukul-core` store and auth traits over the
//! collaborator's JSON REST API. Everything here is transport; all list
//! and edit semantics live in the core controllers.

mod api;
mod auth;

pub mod error;

pub use api::{ApiClient, ApiConfig, FeedbackApi, ImprovementsApi};
pub use auth::AuthApi;
pub use error::{ApiError, Result};
