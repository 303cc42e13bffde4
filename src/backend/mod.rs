//! Course backend integration
//!
//! Provides the REST client, token storage, payload schemas and the
//! fire-and-forget progress synchronizer.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod sync;

// Re-export commonly used types
pub use auth::TokenStore;
pub use client::BackendClient;
pub use error::BackendError;
pub use models::{LearnerOverview, LoginEntry};
pub use sync::{ProgressSynchronizer, SyncCommand};
