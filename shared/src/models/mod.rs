//! Data models
//!
//! Reference data (restaurants and their menus) and the per-session
//! order/party types persisted to local storage.

pub mod category;
pub mod menu_item;
pub mod order_item;
pub mod party;
pub mod restaurant;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use order_item::*;
pub use party::Party;
pub use restaurant::*;
