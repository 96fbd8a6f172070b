use crate::utils::validation::names_match;
use shared::models::{Category, MenuItem, Restaurant};
use std::collections::HashMap;

/// Active menu for the selected restaurant.
///
/// Catalog restaurant: built-in items followed by that restaurant's custom
/// items, in insertion order. Pure custom restaurant: the custom items only.
pub fn resolve_menu(
    restaurant: Option<&Restaurant>,
    custom_menu_items: &[MenuItem],
    restaurant_custom_items: &HashMap<String, Vec<MenuItem>>,
) -> Vec<MenuItem> {
    match restaurant {
        Some(r) => {
            let extra = restaurant_custom_items
                .get(&r.name)
                .map(Vec::as_slice)
                .unwrap_or_default();
            r.menu.iter().chain(extra).cloned().collect()
        }
        None => custom_menu_items.to_vec(),
    }
}

/// Whether `name` collides with an item on `menu` (case, diacritic and
/// whitespace insensitive). `exclude_id` skips the item being edited.
pub fn name_exists(menu: &[MenuItem], name: &str, exclude_id: Option<&str>) -> bool {
    menu.iter()
        .filter(|item| match (exclude_id, item.id.as_deref()) {
            (Some(excluded), Some(id)) => excluded != id,
            _ => true,
        })
        .any(|item| names_match(&item.name, name))
}

/// Items a diner can order individually (everything except `Table`)
pub fn orderable_items(menu: &[MenuItem]) -> Vec<&MenuItem> {
    menu.iter().filter(|i| i.category != Category::Table).collect()
}

/// Items that only go to the shared table pool
pub fn table_items(menu: &[MenuItem]) -> Vec<&MenuItem> {
    menu.iter().filter(|i| i.category == Category::Table).collect()
}

/// Selected restaurant plus its resolved menu.
///
/// Course detection always resolves against this menu, both when adding
/// items and when pricing, so editing an item's course flag is reflected
/// consistently.
#[derive(Debug, Clone)]
pub struct MenuContext<'a> {
    pub restaurant: Option<&'a Restaurant>,
    pub menu: Vec<MenuItem>,
}

impl<'a> MenuContext<'a> {
    pub fn new(restaurant: Option<&'a Restaurant>, menu: Vec<MenuItem>) -> Self {
        Self { restaurant, menu }
    }

    pub fn is_course_based(&self) -> bool {
        self.restaurant.is_some_and(Restaurant::is_course_based)
    }

    /// Menu entry by exact name
    pub fn lookup(&self, name: &str) -> Option<&MenuItem> {
        self.menu.iter().find(|i| i.name == name)
    }

    /// Whether `name` is a course dish (course-flagged Starter/Main/Dessert)
    /// on a course-based menu. Unknown names are not course dishes.
    pub fn is_course_dish(&self, name: &str) -> bool {
        self.is_course_based() && self.lookup(name).is_some_and(is_course_entry)
    }

    /// Same as [`Self::is_course_dish`], falling back to the item's own flags
    /// when it is not on the current menu.
    pub fn is_course_menu_item(&self, item: &MenuItem) -> bool {
        self.is_course_based() && is_course_entry(self.lookup(&item.name).unwrap_or(item))
    }
}

fn is_course_entry(item: &MenuItem) -> bool {
    item.is_course_item && item.category.is_course_category()
}
