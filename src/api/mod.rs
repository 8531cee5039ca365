//! API client module for the checklist backend.
//!
//! Provides the HTTP client with Basic auth injection, the in-memory
//! credential store, 401 interception with auth-required notifications,
//! and typed wrappers for the user and checklist endpoints.

pub mod checklists;
pub mod client;
pub mod credentials;
pub mod error;
pub mod events;
pub mod middleware;
pub mod transport;
pub mod types;
pub mod users;
