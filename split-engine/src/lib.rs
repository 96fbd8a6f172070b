//! Split Engine - 聚餐分账计算引擎
//!
//! # 架构概述
//!
//! 表现层（外部协作者）只通过本 crate 调用核心逻辑：
//!
//! - **菜单目录** (`catalog`): 餐厅参考数据与当前菜单解析
//! - **点单存储** (`orders`): 每位食客的点单行与共享餐桌池，redb 快照持久化
//! - **计价引擎** (`pricing`): 按份计价与套餐分级计价、餐桌均摊
//! - **会话** (`session`): 显式的会话状态，所有操作都作用于它
//!
//! # 模块结构
//!
//! ```text
//! split-engine/src/
//! ├── core/          # 配置
//! ├── catalog/       # 菜单目录
//! ├── orders/        # 点单存储 + 快照持久化
//! ├── pricing/       # 计价引擎
//! ├── money/         # 金额运算与价格校验
//! ├── session.rs     # 会话状态
//! ├── summary.rs     # 纯文本账单导出
//! ├── notify.rs      # 状态消息自动清除
//! └── utils/         # 日志、文本校验
//! ```

pub mod catalog;
pub mod core;
pub mod money;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod session;
pub mod summary;
pub mod utils;

// Re-export 公共类型
pub use catalog::{Catalog, MenuContext};
pub use core::Config;
pub use notify::{StatusBoard, StatusMessage};
pub use orders::{AddOutcome, KvStorage, OrderBook, OrderTarget, PartyRepository};
pub use pricing::{BillSummary, CourseBreakdown, DinerBill};
pub use session::Session;
pub use summary::{EmailDraft, bill_summary_text, email_draft};

// Re-export unified error types from shared
pub use shared::error::{AlertLevel, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_from_config, init_logger, init_logger_with_file};
