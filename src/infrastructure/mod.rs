//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - Alloy-based chain reader and wallet implementations
//! - Tokio runtime bridge for async operations

pub mod ethereum;
pub mod runtime;
