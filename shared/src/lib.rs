//! Shared types for the appliance storefront
//!
//! Error codes, API response envelope and the domain models exchanged
//! between the storefront service and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
