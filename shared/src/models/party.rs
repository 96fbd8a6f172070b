//! Party Model - persisted snapshot of one bill-splitting session

use super::menu_item::MenuItem;
use super::order_item::OrderItem;
use super::restaurant::CUSTOM_RESTAURANT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Party snapshot
///
/// `total_cost` is cached at save time and never re-validated on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub restaurant_name: String,
    #[serde(default = "default_selected_restaurant")]
    pub selected_restaurant: String,
    /// Menu of a pure custom restaurant
    #[serde(default)]
    pub custom_menu_items: Vec<MenuItem>,
    /// User-added items per catalog restaurant, keyed by restaurant name
    #[serde(default)]
    pub restaurant_custom_items: HashMap<String, Vec<MenuItem>>,
    pub friends: Vec<String>,
    pub orders: HashMap<String, Vec<OrderItem>>,
    #[serde(default)]
    pub table_orders: Vec<OrderItem>,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub total_cost: f64,
}

fn default_selected_restaurant() -> String {
    CUSTOM_RESTAURANT.to_string()
}
