//! Order Item Model

use super::category::Category;
use super::menu_item::MenuItem;
use serde::{Deserialize, Serialize};

/// One line of a diner's (or the table's) order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Unique per line, generated when the line is created
    pub id: String,
    pub name: String,
    /// Unit cost copied from the menu item's price
    pub cost: f64,
    /// Always >= 1; a line driven to 0 is removed
    pub quantity: u32,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_course_item: bool,
    #[serde(default)]
    pub custom: bool,
}

impl OrderItem {
    /// New line with quantity 1 for the given menu item
    pub fn from_menu_item(id: impl Into<String>, item: &MenuItem) -> Self {
        Self {
            id: id.into(),
            name: item.name.clone(),
            cost: item.price,
            quantity: 1,
            category: item.category,
            is_course_item: item.is_course_item,
            custom: item.custom,
        }
    }
}
