//! Session state
//!
//! The single aggregate the presentation layer drives. Every operation takes
//! the session explicitly and either applies completely or returns an
//! [`AppError`] with the session unchanged.

use crate::catalog::{Catalog, MenuContext, name_exists, resolve_menu};
use crate::money::parse_price;
use crate::orders::{AddOutcome, OrderBook, OrderTarget};
use crate::pricing::{self, BillSummary};
use crate::utils::validation::{names_match, validate_name};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CUSTOM_RESTAURANT, Category, MenuItem, MenuItemDraft, Party, Restaurant};
use shared::util::{new_line_id, new_party_id};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque id, generated once per session
    pub id: String,
    /// Party name
    pub name: String,
    pub restaurant_name: String,
    /// Catalog restaurant name or [`CUSTOM_RESTAURANT`]
    pub selected_restaurant: String,
    pub custom_menu_items: Vec<MenuItem>,
    pub restaurant_custom_items: HashMap<String, Vec<MenuItem>>,
    /// Roster in insertion order, unique under normalised comparison
    pub friends: Vec<String>,
    pub book: OrderBook,
    /// Set by the first save
    pub created: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: new_party_id(),
            name: String::new(),
            restaurant_name: String::new(),
            selected_restaurant: CUSTOM_RESTAURANT.to_string(),
            custom_menu_items: Vec::new(),
            restaurant_custom_items: HashMap::new(),
            friends: Vec::new(),
            book: OrderBook::default(),
            created: None,
        }
    }

    /// Restore a session from a stored snapshot
    pub fn from_party(party: &Party) -> Self {
        Self {
            id: party.id.clone(),
            name: party.name.clone(),
            restaurant_name: party.restaurant_name.clone(),
            selected_restaurant: party.selected_restaurant.clone(),
            custom_menu_items: party.custom_menu_items.clone(),
            restaurant_custom_items: party.restaurant_custom_items.clone(),
            friends: party.friends.clone(),
            book: OrderBook::new(party.orders.clone(), party.table_orders.clone()),
            created: Some(party.created),
        }
    }

    /// Discard everything and start a new party with a fresh id
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::info!(party_id = %self.id, "Party reset");
    }

    pub fn set_party_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_restaurant_name(&mut self, name: impl Into<String>) {
        self.restaurant_name = name.into();
    }

    pub fn is_custom_restaurant(&self) -> bool {
        self.selected_restaurant == CUSTOM_RESTAURANT
    }

    /// Name shown on the bill
    pub fn display_restaurant_name(&self) -> &str {
        if self.restaurant_name.trim().is_empty() {
            &self.selected_restaurant
        } else {
            &self.restaurant_name
        }
    }

    /// The selected catalog restaurant, if any
    pub fn restaurant<'c>(&self, catalog: &'c Catalog) -> Option<&'c Restaurant> {
        catalog.find(&self.selected_restaurant)
    }

    /// Selected restaurant and its resolved menu
    pub fn menu<'c>(&self, catalog: &'c Catalog) -> MenuContext<'c> {
        let restaurant = self.restaurant(catalog);
        let menu = resolve_menu(
            restaurant,
            &self.custom_menu_items,
            &self.restaurant_custom_items,
        );
        MenuContext::new(restaurant, menu)
    }

    /// Switch restaurant. Orders and the pure-custom menu are cleared; custom
    /// items added to catalog restaurants are kept per restaurant.
    pub fn select_restaurant(&mut self, catalog: &Catalog, name: &str) -> AppResult<()> {
        if name != CUSTOM_RESTAURANT {
            if catalog.find(name).is_none() {
                return Err(AppError::with_message(
                    ErrorCode::RestaurantNotFound,
                    format!("Restaurant {name} not found"),
                ));
            }
            self.restaurant_name = name.to_string();
        }
        self.selected_restaurant = name.to_string();
        self.custom_menu_items.clear();
        self.book.clear();
        tracing::info!(party_id = %self.id, restaurant = %name, "Restaurant selected");
        Ok(())
    }

    // ========== Friends ==========

    pub fn add_friend(&mut self, name: &str) -> AppResult<String> {
        let name = validate_name(name, "friend name")?;
        if self.friends.iter().any(|f| names_match(f, &name)) {
            return Err(AppError::new(ErrorCode::FriendAlreadyExists).with_detail("name", name));
        }
        self.friends.push(name.clone());
        tracing::info!(party_id = %self.id, friend = %name, "Friend added");
        Ok(name)
    }

    /// Remove a friend and delete their order entirely
    pub fn remove_friend(&mut self, name: &str) -> AppResult<()> {
        let pos = self
            .friends
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| {
                AppError::new(ErrorCode::FriendNotFound).with_detail("name", name.to_string())
            })?;
        self.friends.remove(pos);
        self.book.remove_diner(name);
        tracing::info!(party_id = %self.id, friend = %name, "Friend removed");
        Ok(())
    }

    // ========== Custom menu ==========

    /// Add a user-defined menu item to the active menu
    pub fn add_custom_item(&mut self, catalog: &Catalog, draft: &MenuItemDraft) -> AppResult<MenuItem> {
        let (name, price) = self.validate_draft(catalog, draft, None)?;
        let item = MenuItem {
            id: Some(new_line_id()),
            name,
            price,
            category: draft.category,
            is_course_item: draft.is_course_item,
            custom: true,
        };
        self.custom_items_mut(catalog).push(item.clone());
        tracing::info!(party_id = %self.id, item = %item.name, price = item.price, "Custom menu item added");
        Ok(item)
    }

    /// Edit a custom item in place. Lines already ordered keep their cost.
    pub fn update_custom_item(
        &mut self,
        catalog: &Catalog,
        id: &str,
        draft: &MenuItemDraft,
    ) -> AppResult<MenuItem> {
        if !self.custom_items(catalog).iter().any(|i| i.id.as_deref() == Some(id)) {
            return Err(menu_item_not_found(id));
        }
        let (name, price) = self.validate_draft(catalog, draft, Some(id))?;
        let item = self
            .custom_items_mut(catalog)
            .iter_mut()
            .find(|i| i.id.as_deref() == Some(id))
            .ok_or_else(|| menu_item_not_found(id))?;
        item.name = name;
        item.price = price;
        item.category = draft.category;
        item.is_course_item = draft.is_course_item;
        Ok(item.clone())
    }

    pub fn remove_custom_item(&mut self, catalog: &Catalog, id: &str) -> AppResult<MenuItem> {
        let items = self.custom_items_mut(catalog);
        let pos = items
            .iter()
            .position(|i| i.id.as_deref() == Some(id))
            .ok_or_else(|| menu_item_not_found(id))?;
        Ok(items.remove(pos))
    }

    fn validate_draft(
        &self,
        catalog: &Catalog,
        draft: &MenuItemDraft,
        editing: Option<&str>,
    ) -> AppResult<(String, f64)> {
        let name = validate_name(&draft.name, "item name")?;
        // Course dishes may carry no surcharge
        let price = parse_price(&draft.price, draft.is_course_item)?;
        if name_exists(&self.menu(catalog).menu, &name, editing) {
            return Err(AppError::new(ErrorCode::MenuItemNameExists).with_detail("name", name));
        }
        Ok((name, price))
    }

    fn custom_items(&self, catalog: &Catalog) -> &[MenuItem] {
        match self.restaurant(catalog) {
            Some(r) => self
                .restaurant_custom_items
                .get(&r.name)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            None => &self.custom_menu_items,
        }
    }

    fn custom_items_mut(&mut self, catalog: &Catalog) -> &mut Vec<MenuItem> {
        match self.restaurant(catalog) {
            Some(r) => self.restaurant_custom_items.entry(r.name.clone()).or_default(),
            None => &mut self.custom_menu_items,
        }
    }

    // ========== Orders ==========

    /// Add one unit of a menu item. `Table` items always go to the shared
    /// pool, whatever target was asked for.
    pub fn add_item(
        &mut self,
        catalog: &Catalog,
        target: &OrderTarget,
        item: &MenuItem,
    ) -> AppResult<AddOutcome> {
        let table = OrderTarget::Table;
        let target = if item.category == Category::Table {
            &table
        } else {
            self.require_target(target)?;
            target
        };
        let ctx = self.menu(catalog);
        match self.book.add_item(target, item, &ctx) {
            Ok(outcome) => {
                tracing::info!(party_id = %self.id, item = %item.name, target = %target, "Item added");
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(party_id = %self.id, item = %item.name, target = %target, error = %e, "Item rejected");
                Err(e)
            }
        }
    }

    pub fn set_quantity(
        &mut self,
        target: &OrderTarget,
        line_id: &str,
        new_quantity: i64,
    ) -> AppResult<()> {
        self.require_target(target)?;
        self.book.set_quantity(target, line_id, new_quantity)
    }

    pub fn remove_item(&mut self, target: &OrderTarget, line_id: &str) -> AppResult<()> {
        self.require_target(target)?;
        let removed = self.book.remove_item(target, line_id)?;
        tracing::info!(party_id = %self.id, item = %removed.name, target = %target, "Item removed");
        Ok(())
    }

    fn require_target(&self, target: &OrderTarget) -> AppResult<()> {
        match target {
            OrderTarget::Friend(name) if !self.friends.contains(name) => Err(
                AppError::new(ErrorCode::FriendNotFound).with_detail("name", name.clone()),
            ),
            _ => Ok(()),
        }
    }

    // ========== Totals ==========

    /// Whether the quantity controls apply to a line of this session
    pub fn can_adjust_quantity(&self, catalog: &Catalog, category: Category, is_course_item: bool) -> bool {
        pricing::can_adjust_quantity(category, is_course_item, self.restaurant(catalog))
    }

    pub fn friend_total(&self, catalog: &Catalog, friend: &str) -> Decimal {
        pricing::friend_total(friend, &self.book, self.friends.len(), &self.menu(catalog))
    }

    pub fn total_bill(&self, catalog: &Catalog) -> Decimal {
        pricing::total_bill(&self.book, &self.friends, &self.menu(catalog))
    }

    pub fn bill(&self, catalog: &Catalog) -> BillSummary {
        pricing::bill_summary(&self.book, &self.friends, &self.menu(catalog))
    }

    pub fn total_items(&self) -> u64 {
        self.book.total_items()
    }
}

fn menu_item_not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id.to_string())
}
