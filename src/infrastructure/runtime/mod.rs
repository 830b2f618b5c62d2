//! Runtime infrastructure - Tokio runtime bridge for async operations

mod bridge;
mod worker;

pub use bridge::{Operation, RuntimeBridge, RuntimeCommand, RuntimeEvent};
pub use worker::alloy_readers;
