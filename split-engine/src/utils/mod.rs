//! 工具模块 - 日志、文本校验与名称归一化

pub mod logger;
pub mod validation;

pub use validation::{normalize_name, sanitize_text};
