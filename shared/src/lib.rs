//! Shared types for the bill splitter
//!
//! Restaurant catalog models, the persisted party snapshot, and the unified
//! error type used by the engine and whatever presentation layer drives it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AlertLevel, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
