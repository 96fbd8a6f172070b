//! Order Store
//!
//! Per-diner order lines plus the shared table pool. All mutations are
//! all-or-nothing: a rejected call leaves the book untouched.

use crate::catalog::MenuContext;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, OrderItem};
use shared::util::new_line_id;
use std::collections::HashMap;
use std::fmt;

/// Whose order a mutation applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderTarget {
    Friend(String),
    Table,
}

impl OrderTarget {
    pub fn friend(name: impl Into<String>) -> Self {
        Self::Friend(name.into())
    }
}

impl fmt::Display for OrderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderTarget::Friend(name) => write!(f, "{name}'s order"),
            OrderTarget::Table => f.write_str("the table"),
        }
    }
}

/// Result of [`OrderBook::add_item`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// New line created with quantity 1
    Created { id: String },
    /// Existing line for the same name incremented
    Incremented { id: String, quantity: u32 },
}

impl AddOutcome {
    pub fn line_id(&self) -> &str {
        match self {
            AddOutcome::Created { id } | AddOutcome::Incremented { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Diner name → order lines (at most one line per item name)
    pub orders: HashMap<String, Vec<OrderItem>>,
    /// Shared pool split across the whole party
    pub table_orders: Vec<OrderItem>,
}

impl OrderBook {
    pub fn new(orders: HashMap<String, Vec<OrderItem>>, table_orders: Vec<OrderItem>) -> Self {
        Self {
            orders,
            table_orders,
        }
    }

    /// A diner's lines (empty if they have not ordered)
    pub fn friend_lines(&self, friend: &str) -> &[OrderItem] {
        self.orders.get(friend).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn lines(&self, target: &OrderTarget) -> &[OrderItem] {
        match target {
            OrderTarget::Friend(name) => self.friend_lines(name),
            OrderTarget::Table => &self.table_orders,
        }
    }

    /// Add one unit of `item` to `target`.
    ///
    /// An existing line with the same name is incremented, except course
    /// dishes on a course-based restaurant, which are single-instance and
    /// rejected with [`ErrorCode::DuplicateCourseItem`].
    pub fn add_item(
        &mut self,
        target: &OrderTarget,
        item: &MenuItem,
        ctx: &MenuContext<'_>,
    ) -> AppResult<AddOutcome> {
        if let Some(existing) = self.lines(target).iter().find(|l| l.name == item.name) {
            if ctx.is_course_menu_item(item) {
                return Err(AppError::with_message(
                    ErrorCode::DuplicateCourseItem,
                    format!("{} is a course item and is already on {}", item.name, target),
                )
                .with_detail("item", item.name.clone())
                .with_detail("line_id", existing.id.clone()));
            }
        }

        let lines = self.lines_entry(target);
        if let Some(line) = lines.iter_mut().find(|l| l.name == item.name) {
            let Some(quantity) = line.quantity.checked_add(1) else {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!("{} on {} cannot be increased further", item.name, target),
                )
                .with_detail("line_id", line.id.clone()));
            };
            line.quantity = quantity;
            tracing::debug!(target = %target, item = %item.name, quantity = line.quantity, "Order line incremented");
            return Ok(AddOutcome::Incremented {
                id: line.id.clone(),
                quantity: line.quantity,
            });
        }

        let line = OrderItem::from_menu_item(new_line_id(), item);
        let id = line.id.clone();
        lines.push(line);
        tracing::debug!(target = %target, item = %item.name, line_id = %id, "Order line created");
        Ok(AddOutcome::Created { id })
    }

    /// Set a line's quantity; zero or below removes the line.
    ///
    /// No upper bound and no course-dish check here: callers gate the
    /// controls with `pricing::can_adjust_quantity`.
    pub fn set_quantity(
        &mut self,
        target: &OrderTarget,
        line_id: &str,
        new_quantity: i64,
    ) -> AppResult<()> {
        if new_quantity <= 0 {
            self.remove_item(target, line_id)?;
            return Ok(());
        }
        let quantity = u32::try_from(new_quantity).map_err(|_| {
            AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("quantity {new_quantity} is too large"),
            )
        })?;

        let line = self
            .lines_mut(target)
            .and_then(|lines| lines.iter_mut().find(|l| l.id == line_id))
            .ok_or_else(|| line_not_found(target, line_id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove a line. A diner whose order becomes empty loses their entry;
    /// the table pool keeps an empty list.
    pub fn remove_item(&mut self, target: &OrderTarget, line_id: &str) -> AppResult<OrderItem> {
        let lines = self
            .lines_mut(target)
            .ok_or_else(|| line_not_found(target, line_id))?;
        let pos = lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| line_not_found(target, line_id))?;
        let removed = lines.remove(pos);

        if let OrderTarget::Friend(name) = target
            && self.orders.get(name).is_some_and(Vec::is_empty)
        {
            self.orders.remove(name);
        }
        Ok(removed)
    }

    /// Drop a diner's whole order
    pub fn remove_diner(&mut self, friend: &str) -> Option<Vec<OrderItem>> {
        self.orders.remove(friend)
    }

    /// Total units ordered across all diners and the table
    pub fn total_items(&self) -> u64 {
        self.orders
            .values()
            .flatten()
            .chain(&self.table_orders)
            .map(|l| u64::from(l.quantity))
            .sum()
    }

    pub fn clear(&mut self) {
        self.orders.clear();
        self.table_orders.clear();
    }

    fn lines_mut(&mut self, target: &OrderTarget) -> Option<&mut Vec<OrderItem>> {
        match target {
            OrderTarget::Friend(name) => self.orders.get_mut(name),
            OrderTarget::Table => Some(&mut self.table_orders),
        }
    }

    fn lines_entry(&mut self, target: &OrderTarget) -> &mut Vec<OrderItem> {
        match target {
            OrderTarget::Friend(name) => self.orders.entry(name.clone()).or_default(),
            OrderTarget::Table => &mut self.table_orders,
        }
    }
}

fn line_not_found(target: &OrderTarget, line_id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::OrderItemNotFound,
        format!("Order item not found on {target}"),
    )
    .with_detail("line_id", line_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Category, CoursePricing, PricingModel, Restaurant};

    fn menu_item(name: &str, price: f64, category: Category, course: bool) -> MenuItem {
        MenuItem {
            id: None,
            name: name.to_string(),
            price,
            category,
            is_course_item: course,
            custom: false,
        }
    }

    fn course_restaurant() -> Restaurant {
        Restaurant {
            name: "Le Jardin".to_string(),
            cuisine: "French".to_string(),
            pricing_model: PricingModel::CourseBased,
            menu: vec![
                menu_item("Soup", 0.0, Category::Starter, true),
                menu_item("Lobster", 20.0, Category::Main, true),
                menu_item("Champagne", 35.0, Category::Drink, false),
            ],
            course_pricing: Some(CoursePricing {
                one: 99.0,
                two: 149.0,
                three_plus: 189.0,
            }),
        }
    }

    fn ana() -> OrderTarget {
        OrderTarget::friend("Ana")
    }

    #[test]
    fn test_repeat_adds_increment_on_flat_menu() {
        let pasta = menu_item("Pasta", 12.0, Category::Main, false);
        let ctx = MenuContext::new(None, vec![pasta.clone()]);
        let mut book = OrderBook::default();

        for n in 1..=5u32 {
            let outcome = book.add_item(&ana(), &pasta, &ctx).unwrap();
            if n > 1 {
                assert_eq!(outcome.line_id(), book.friend_lines("Ana")[0].id);
            }
        }
        let lines = book.friend_lines("Ana");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[0].cost, 12.0);
    }

    #[test]
    fn test_course_dish_readd_rejected() {
        let r = course_restaurant();
        let ctx = MenuContext::new(Some(&r), r.menu.clone());
        let mut book = OrderBook::default();

        book.add_item(&ana(), &r.menu[1], &ctx).unwrap();
        let before = book.clone();
        let err = book.add_item(&ana(), &r.menu[1], &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateCourseItem);
        assert_eq!(book, before);
        assert_eq!(book.friend_lines("Ana")[0].quantity, 1);
    }

    #[test]
    fn test_non_course_item_on_course_menu_increments() {
        let r = course_restaurant();
        let ctx = MenuContext::new(Some(&r), r.menu.clone());
        let mut book = OrderBook::default();

        book.add_item(&ana(), &r.menu[2], &ctx).unwrap();
        let outcome = book.add_item(&ana(), &r.menu[2], &ctx).unwrap();
        assert!(matches!(outcome, AddOutcome::Incremented { quantity: 2, .. }));
    }

    #[test]
    fn test_course_flag_resolved_against_menu() {
        let mut r = course_restaurant();
        // Menu edited after the line was ordered: Lobster is no longer a course dish
        let stale = r.menu[1].clone();
        r.menu[1].is_course_item = false;
        let ctx = MenuContext::new(Some(&r), r.menu.clone());
        let mut book = OrderBook::default();

        book.add_item(&ana(), &stale, &ctx).unwrap();
        let outcome = book.add_item(&ana(), &stale, &ctx).unwrap();
        assert!(matches!(outcome, AddOutcome::Incremented { quantity: 2, .. }));
    }

    #[test]
    fn test_same_item_on_different_targets() {
        let bread = menu_item("Bread", 6.0, Category::Table, false);
        let ctx = MenuContext::new(None, vec![bread.clone()]);
        let mut book = OrderBook::default();

        book.add_item(&OrderTarget::Table, &bread, &ctx).unwrap();
        book.add_item(&OrderTarget::Table, &bread, &ctx).unwrap();
        assert_eq!(book.table_orders.len(), 1);
        assert_eq!(book.table_orders[0].quantity, 2);
        assert!(book.orders.is_empty());
    }

    #[test]
    fn test_set_quantity() {
        let cola = menu_item("Cola", 3.5, Category::Drink, false);
        let ctx = MenuContext::new(None, vec![cola.clone()]);
        let mut book = OrderBook::default();
        let id = book.add_item(&ana(), &cola, &ctx).unwrap().line_id().to_string();

        book.set_quantity(&ana(), &id, 4).unwrap();
        assert_eq!(book.friend_lines("Ana")[0].quantity, 4);

        let err = book.set_quantity(&ana(), "missing", 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderItemNotFound);
        let err = book.set_quantity(&OrderTarget::friend("Ben"), &id, 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderItemNotFound);
    }

    #[test]
    fn test_set_quantity_zero_removes_only_line_and_entry() {
        let cola = menu_item("Cola", 3.5, Category::Drink, false);
        let ctx = MenuContext::new(None, vec![cola.clone()]);
        let mut book = OrderBook::default();
        let id = book.add_item(&ana(), &cola, &ctx).unwrap().line_id().to_string();

        book.set_quantity(&ana(), &id, 0).unwrap();
        assert!(!book.orders.contains_key("Ana"));
    }

    #[test]
    fn test_remove_item_keeps_other_lines() {
        let cola = menu_item("Cola", 3.5, Category::Drink, false);
        let fries = menu_item("Fries", 4.0, Category::Other, false);
        let ctx = MenuContext::new(None, vec![cola.clone(), fries.clone()]);
        let mut book = OrderBook::default();
        let cola_id = book.add_item(&ana(), &cola, &ctx).unwrap().line_id().to_string();
        book.add_item(&ana(), &fries, &ctx).unwrap();

        let removed = book.remove_item(&ana(), &cola_id).unwrap();
        assert_eq!(removed.name, "Cola");
        assert_eq!(book.friend_lines("Ana").len(), 1);
        assert!(book.orders.contains_key("Ana"));
    }

    #[test]
    fn test_table_pool_stays_after_last_removal() {
        let bread = menu_item("Bread", 6.0, Category::Table, false);
        let ctx = MenuContext::new(None, vec![bread.clone()]);
        let mut book = OrderBook::default();
        let id = book
            .add_item(&OrderTarget::Table, &bread, &ctx)
            .unwrap()
            .line_id()
            .to_string();
        book.remove_item(&OrderTarget::Table, &id).unwrap();
        assert!(book.table_orders.is_empty());
    }

    #[test]
    fn test_total_items() {
        let cola = menu_item("Cola", 3.5, Category::Drink, false);
        let bread = menu_item("Bread", 6.0, Category::Table, false);
        let ctx = MenuContext::new(None, vec![cola.clone(), bread.clone()]);
        let mut book = OrderBook::default();
        book.add_item(&ana(), &cola, &ctx).unwrap();
        book.add_item(&ana(), &cola, &ctx).unwrap();
        book.add_item(&OrderTarget::friend("Ben"), &cola, &ctx).unwrap();
        book.add_item(&OrderTarget::Table, &bread, &ctx).unwrap();
        assert_eq!(book.total_items(), 4);
    }

    #[test]
    fn test_add_at_max_quantity_is_rejected() {
        let cola = menu_item("Cola", 3.5, Category::Drink, false);
        let ctx = MenuContext::new(None, vec![cola.clone()]);
        let mut book = OrderBook::default();
        let id = book.add_item(&ana(), &cola, &ctx).unwrap().line_id().to_string();
        book.set_quantity(&ana(), &id, i64::from(u32::MAX)).unwrap();

        let before = book.clone();
        let err = book.add_item(&ana(), &cola, &ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert_eq!(book, before);
        assert_eq!(book.friend_lines("Ana")[0].quantity, u32::MAX);
    }

    #[test]
    fn test_total_items_beyond_u32() {
        let cola = menu_item("Cola", 3.5, Category::Drink, false);
        let ctx = MenuContext::new(None, vec![cola.clone()]);
        let mut book = OrderBook::default();
        let id = book.add_item(&ana(), &cola, &ctx).unwrap().line_id().to_string();
        book.set_quantity(&ana(), &id, i64::from(u32::MAX)).unwrap();
        book.add_item(&OrderTarget::friend("Ben"), &cola, &ctx).unwrap();
        book.add_item(&OrderTarget::friend("Ben"), &cola, &ctx).unwrap();

        assert_eq!(book.total_items(), u64::from(u32::MAX) + 2);
    }
}
