//! Persistence Adapter
//!
//! Party snapshots live as one JSON array under a single storage key. Saves
//! are last-writer-wins upserts by party id. Reads tolerate hand-edited or
//! corrupted storage: bad entries are dropped and free text is re-sanitised.

use super::storage::{KvStorage, StorageError, StorageResult};
use crate::catalog::Catalog;
use crate::core::Config;
use crate::money::to_f64;
use crate::session::Session;
use crate::utils::validation::{MAX_NAME_LEN, names_match, sanitize_text};
use chrono::{DateTime, Utc};
use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, OrderItem, Party};
use std::collections::HashMap;

/// Party collection under one namespaced key
#[derive(Clone)]
pub struct PartyRepository {
    storage: KvStorage,
    key: String,
}

impl PartyRepository {
    pub fn new(storage: KvStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Open the on-disk store described by `config`
    pub fn open(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            tracing::error!(path = %config.data_dir.display(), error = %e, "Failed to create data directory");
            StorageError::from(e)
        })?;
        let storage = KvStorage::open(config.database_path())?;
        tracing::info!(path = %config.database_path().display(), key = %config.storage_key, "Party store opened");
        Ok(Self::new(storage, config.storage_key.clone()))
    }

    /// Snapshot the session and upsert it by id.
    ///
    /// `created` is kept from an earlier save of the same party; `last_updated`
    /// and `total_cost` are stamped now. The session's `created` is updated.
    pub fn save_party(&self, session: &mut Session, catalog: &Catalog) -> AppResult<Party> {
        let name = session.name.trim();
        if name.is_empty() {
            return Err(AppError::new(ErrorCode::PartyNameRequired));
        }
        let name = name.to_string();
        let now = Utc::now();
        let total_cost = to_f64(session.total_bill(catalog));

        let mut saved = None;
        let result = self.storage.update(&self.key, |current| {
            let mut entries = decode_entries(current);
            let pos = entries.iter().position(|e| entry_id(e) == Some(session.id.as_str()));
            let stored_created = pos
                .and_then(|i| entries[i].get("created"))
                .and_then(|v| serde_json::from_value::<DateTime<Utc>>(v.clone()).ok());

            let party = Party {
                id: session.id.clone(),
                name,
                restaurant_name: session.restaurant_name.clone(),
                selected_restaurant: session.selected_restaurant.clone(),
                custom_menu_items: session.custom_menu_items.clone(),
                restaurant_custom_items: session.restaurant_custom_items.clone(),
                friends: session.friends.clone(),
                orders: session.book.orders.clone(),
                table_orders: session.book.table_orders.clone(),
                created: stored_created.or(session.created).unwrap_or(now),
                last_updated: now,
                total_cost,
            };
            let value = serde_json::to_value(&party)?;
            match pos {
                Some(i) => entries[i] = value,
                None => entries.push(value),
            }
            saved = Some(party);
            Ok(serde_json::to_vec(&entries)?)
        });

        if let Err(e) = result {
            tracing::error!(party_id = %session.id, error = %e, "Failed to save party");
            return Err(e.into());
        }
        let party = saved.ok_or_else(|| AppError::internal("Party snapshot was not built"))?;
        session.created = Some(party.created);
        tracing::info!(party_id = %party.id, name = %party.name, total_cost = party.total_cost, "Party saved");
        Ok(party)
    }

    /// All stored parties that pass structural validation, sanitised
    pub fn list_parties(&self) -> AppResult<Vec<Party>> {
        let raw = self.read_raw().inspect_err(|e| {
            tracing::error!(error = %e, "Failed to read saved parties");
        })?;
        let entries = decode_entries(raw.as_deref());
        let total = entries.len();
        let parties: Vec<Party> = entries.into_iter().filter_map(parse_entry).collect();
        if parties.len() < total {
            tracing::warn!(dropped = total - parties.len(), "Dropped malformed party snapshots");
        }
        Ok(parties)
    }

    /// Restore a session from a snapshot returned by [`Self::list_parties`]
    pub fn load_party(&self, party: &Party) -> Session {
        tracing::info!(party_id = %party.id, name = %party.name, "Party loaded");
        Session::from_party(party)
    }

    fn read_raw(&self) -> StorageResult<Option<Vec<u8>>> {
        self.storage.get(&self.key)
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

/// The stored array, or empty when absent or not an array
fn decode_entries(raw: Option<&[u8]>) -> Vec<Value> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            tracing::warn!("Saved parties are not a list, ignoring");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Saved parties are not valid JSON, ignoring");
            Vec::new()
        }
    }
}

/// Structural check, typed decode, then sanitising
fn parse_entry(entry: Value) -> Option<Party> {
    let obj = entry.as_object()?;
    let has_text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    };
    if !has_text("id") || !has_text("name") {
        return None;
    }
    if !obj.get("friends").is_some_and(Value::is_array) || !obj.get("orders").is_some_and(Value::is_object) {
        return None;
    }
    let id = entry_id(&entry).unwrap_or_default().to_string();
    match serde_json::from_value::<Party>(entry) {
        Ok(party) => Some(sanitize_party(party)),
        Err(e) => {
            tracing::warn!(party_id = %id, error = %e, "Dropping unreadable party snapshot");
            None
        }
    }
}

fn clean(value: &str) -> String {
    sanitize_text(value, MAX_NAME_LEN)
}

fn sanitize_party(mut party: Party) -> Party {
    party.name = clean(&party.name);
    party.restaurant_name = clean(&party.restaurant_name);
    party.selected_restaurant = clean(&party.selected_restaurant);

    let mut friends: Vec<String> = Vec::with_capacity(party.friends.len());
    for friend in party.friends.iter().map(|f| clean(f)) {
        if !friend.is_empty() && !friends.iter().any(|f| names_match(f, &friend)) {
            friends.push(friend);
        }
    }
    party.friends = friends;

    // Orders of a name folded into an earlier roster entry move with it;
    // orders with no diner on the roster could never be priced.
    let mut stored: Vec<(String, Vec<OrderItem>)> = party.orders.into_iter().collect();
    stored.sort_by(|a, b| a.0.cmp(&b.0));
    let mut orders: HashMap<String, Vec<OrderItem>> = HashMap::new();
    for (key, lines) in stored {
        let key = clean(&key);
        let Some(owner) = party.friends.iter().find(|f| names_match(f, &key)) else {
            tracing::warn!(party_id = %party.id, diner = %key, "Dropping orders of a diner not on the roster");
            continue;
        };
        let lines = sanitize_lines(lines);
        if lines.is_empty() {
            continue;
        }
        merge_lines(orders.entry(owner.clone()).or_default(), lines);
    }
    party.orders = orders;
    party.table_orders = sanitize_lines(party.table_orders);

    party.custom_menu_items = sanitize_menu(party.custom_menu_items);
    party.restaurant_custom_items = party
        .restaurant_custom_items
        .into_iter()
        .map(|(restaurant, items)| (clean(&restaurant), sanitize_menu(items)))
        .filter(|(restaurant, _)| !restaurant.is_empty())
        .collect();
    party
}

/// Append `lines`, folding any whose name is already present into that line
fn merge_lines(into: &mut Vec<OrderItem>, lines: Vec<OrderItem>) {
    for line in lines {
        match into.iter_mut().find(|l| l.name == line.name) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => into.push(line),
        }
    }
}

fn sanitize_lines(lines: Vec<OrderItem>) -> Vec<OrderItem> {
    lines
        .into_iter()
        .filter(|l| l.quantity > 0)
        .map(|mut l| {
            l.name = clean(&l.name);
            l
        })
        .filter(|l| !l.name.is_empty())
        .collect()
}

fn sanitize_menu(items: Vec<MenuItem>) -> Vec<MenuItem> {
    items
        .into_iter()
        .map(|mut i| {
            i.name = clean(&i.name);
            i
        })
        .filter(|i| !i.name.is_empty())
        .collect()
}
