//! Unified error system
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`AlertLevel`]: Banner severity the presentation layer renders
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::InvalidPrice, "Price must be positive")
//!     .with_detail("field", "price");
//! assert_eq!(err.code.code(), 6002);
//! ```

mod category;
mod codes;
mod types;

pub use category::{AlertLevel, ErrorCategory};
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
