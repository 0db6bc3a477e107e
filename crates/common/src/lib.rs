//! ScreenGuard Common Utilities
//!
//! Shared infrastructure for all ScreenGuard crates:
//! - Error types and result aliases
//! - Observation clock for stamping face-width samples
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
