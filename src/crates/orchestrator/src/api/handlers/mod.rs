//! API request handlers
//!
//! Provides handler functions for all API endpoints organized by resource.

pub mod health;
pub mod reasoning;

pub use health::health;
pub use reasoning::{cancel_reasoning_agent, run_reasoning_agent};
