//! Menu Category Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu category
///
/// `Table` items are never ordered by an individual diner; they go to the
/// shared table pool and are split across the whole party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Starter,
    Main,
    Dessert,
    Drink,
    #[default]
    Other,
    Table,
}

impl Category {
    /// All categories in menu display order
    pub const ALL: [Category; 6] = [
        Category::Starter,
        Category::Main,
        Category::Dessert,
        Category::Drink,
        Category::Other,
        Category::Table,
    ];

    /// Categories that count toward a course menu
    pub fn is_course_category(&self) -> bool {
        matches!(self, Category::Starter | Category::Main | Category::Dessert)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Starter => "Starter",
            Category::Main => "Main",
            Category::Dessert => "Dessert",
            Category::Drink => "Drink",
            Category::Other => "Other",
            Category::Table => "Table",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
