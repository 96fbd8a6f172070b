//! Restaurant Model

use super::menu_item::MenuItem;
use serde::{Deserialize, Serialize};

/// Selection value meaning "no catalog restaurant, menu built by the user"
pub const CUSTOM_RESTAURANT: &str = "Custom Restaurant";

/// How a restaurant charges its diners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    /// Every line is charged `cost * quantity`
    #[default]
    Flat,
    /// Fixed tier price by number of distinct courses, plus surcharges
    CourseBased,
}

/// Tier prices for a course menu
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoursePricing {
    pub one: f64,
    pub two: f64,
    #[serde(rename = "threePlus")]
    pub three_plus: f64,
}

impl CoursePricing {
    /// Base price for a diner who chose `course_count` distinct courses
    pub fn base_price(&self, course_count: usize) -> f64 {
        match course_count {
            0 => 0.0,
            1 => self.one,
            2 => self.two,
            _ => self.three_plus,
        }
    }
}

/// Restaurant reference data (immutable once loaded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub pricing_model: PricingModel,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_pricing: Option<CoursePricing>,
}

impl Restaurant {
    pub fn is_course_based(&self) -> bool {
        self.pricing_model == PricingModel::CourseBased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_price_tiers() {
        let pricing = CoursePricing {
            one: 99.0,
            two: 149.0,
            three_plus: 189.0,
        };
        assert_eq!(pricing.base_price(0), 0.0);
        assert_eq!(pricing.base_price(1), 99.0);
        assert_eq!(pricing.base_price(2), 149.0);
        assert_eq!(pricing.base_price(3), 189.0);
        assert_eq!(pricing.base_price(7), 189.0);
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "name": "Le Jardin",
            "cuisine": "French",
            "pricing_model": "course_based",
            "course_pricing": {"one": 99, "two": 149, "threePlus": 189},
            "menu": [
                {"name": "Soup", "price": 0, "category": "Starter", "is_course_item": true},
                {"name": "Water", "price": 4.5, "category": "Drink"}
            ]
        }"#;
        let r: Restaurant = serde_json::from_str(json).unwrap();
        assert!(r.is_course_based());
        assert_eq!(r.course_pricing.unwrap().three_plus, 189.0);
        assert_eq!(r.menu.len(), 2);
        assert!(!r.menu[1].is_course_item);
        assert!(!r.menu[1].custom);
    }

    #[test]
    fn test_pricing_model_defaults_to_flat() {
        let r: Restaurant = serde_json::from_str(r#"{"name": "Diner"}"#).unwrap();
        assert_eq!(r.pricing_model, PricingModel::Flat);
        assert!(r.menu.is_empty());
    }
}
