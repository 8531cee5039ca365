//! Client bindings for the checklist backend.
//!
//! Wraps the REST endpoints in typed async calls, keeps a Basic auth
//! credential in memory, and broadcasts an auth-required event whenever
//! the backend answers 401.

pub mod api;
pub mod config;

pub use api::client::ApiClient;
pub use api::error::ApiError;
pub use api::events::AuthEvent;
pub use config::ClientConfig;
