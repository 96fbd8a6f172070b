//! Menu Catalog
//!
//! Restaurant reference data loaded once at startup, and the resolution of
//! the active menu (built-in items plus user-added custom items).

mod menu;

pub use menu::*;

use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CUSTOM_RESTAURANT, Restaurant};
use std::path::Path;

/// Catalog document: `{ "restaurants": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
}

impl Catalog {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        let catalog = Self { restaurants };
        catalog.warn_incomplete();
        catalog
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> AppResult<Self> {
        let catalog: Catalog = serde_json::from_str(json).map_err(|e| {
            AppError::with_message(ErrorCode::CatalogLoadFailed, "Error loading restaurants data")
                .with_detail("reason", e.to_string())
        })?;
        catalog.warn_incomplete();
        Ok(catalog)
    }

    /// Read and parse the catalog file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_message(ErrorCode::CatalogLoadFailed, "Error loading restaurants data")
                .with_detail("path", path.display().to_string())
                .with_detail("reason", e.to_string())
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            restaurants = catalog.restaurants.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Load the catalog, degrading to an empty one (custom-restaurant-only
    /// mode) on failure. The error is returned alongside so the caller can
    /// show it.
    pub fn load_or_empty(path: impl AsRef<Path>) -> (Self, Option<AppError>) {
        match Self::load(path) {
            Ok(catalog) => (catalog, None),
            Err(e) => {
                tracing::error!(error = %e, details = ?e.details, "Catalog unavailable, using custom restaurants only");
                (Self::default(), Some(e))
            }
        }
    }

    /// Look up a restaurant by exact name. The custom selection never matches.
    pub fn find(&self, name: &str) -> Option<&Restaurant> {
        if name == CUSTOM_RESTAURANT {
            return None;
        }
        self.restaurants.iter().find(|r| r.name == name)
    }

    fn warn_incomplete(&self) {
        for r in &self.restaurants {
            if r.is_course_based() && r.course_pricing.is_none() {
                tracing::warn!(restaurant = %r.name, "Course-based restaurant has no course pricing, base price is 0");
            }
        }
    }
}
