//! Menu Item Model

use super::category::Category;
use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// Built-in items come from the restaurant catalog and usually carry no id;
/// custom items are added by the user and always have one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Unit price, rounded to 2 decimal places on entry
    pub price: f64,
    #[serde(default)]
    pub category: Category,
    /// Part of the fixed-price course structure
    #[serde(default)]
    pub is_course_item: bool,
    #[serde(default)]
    pub custom: bool,
}

/// Create/update payload for a custom menu item
///
/// `price` is raw user input; it is parsed and validated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_course_item: bool,
}

impl MenuItemDraft {
    pub fn new(name: impl Into<String>, price: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            category,
            is_course_item: false,
        }
    }

    pub fn course(mut self) -> Self {
        self.is_course_item = true;
        self
    }
}
