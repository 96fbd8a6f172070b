//! Plain-text bill export
//!
//! Pure functions of an already computed [`BillSummary`].

use crate::money::{format_money, to_decimal};
use crate::pricing::BillSummary;
use chrono::NaiveDate;
use serde::Serialize;
use shared::models::Party;

/// Email compose hand-off
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Bill as plain text. Diners whose total is zero are left out.
pub fn bill_summary_text(
    party_name: &str,
    date: NaiveDate,
    restaurant_name: &str,
    bill: &BillSummary,
) -> String {
    let mut lines = vec![
        party_name.to_string(),
        format!("Date: {}", date.format("%Y-%m-%d")),
        format!("Restaurant: {restaurant_name}"),
        String::new(),
    ];
    lines.extend(
        bill.diners
            .iter()
            .filter(|d| !d.total.is_zero())
            .map(|d| format!("{}: {}", d.name, format_money(d.total))),
    );
    lines.push(String::new());
    lines.push(format!("Total: {}", format_money(bill.total)));
    lines.join("\n")
}

pub fn email_draft(
    party_name: &str,
    date: NaiveDate,
    restaurant_name: &str,
    bill: &BillSummary,
) -> EmailDraft {
    EmailDraft {
        subject: format!("Bill split: {party_name} at {restaurant_name}"),
        body: bill_summary_text(party_name, date, restaurant_name, bill),
    }
}

/// One-line caption for a saved party: `"<restaurant> - $<total> - <date>"`
pub fn party_caption(party: &Party) -> String {
    let restaurant = if party.restaurant_name.trim().is_empty() {
        &party.selected_restaurant
    } else {
        &party.restaurant_name
    };
    format!(
        "{} - {} - {}",
        restaurant,
        format_money(to_decimal(party.total_cost)),
        party.last_updated.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DinerBill;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn diner(name: &str, total: Decimal) -> DinerBill {
        DinerBill {
            name: name.to_string(),
            items: Vec::new(),
            course: None,
            subtotal: total,
            table_share: Decimal::ZERO,
            total,
        }
    }

    fn bill() -> BillSummary {
        let ana = Decimal::new(12250, 2);
        let cleo = Decimal::new(10, 0) / Decimal::from(3);
        BillSummary {
            diners: vec![
                diner("Ana", ana),
                diner("Ben", Decimal::ZERO),
                diner("Cleo", cleo),
            ],
            table_items: Vec::new(),
            table_total: Decimal::ZERO,
            table_share: Decimal::ZERO,
            total: ana + cleo,
            item_count: 3,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_summary_text() {
        let text = bill_summary_text("Friday dinner", date(), "Trattoria", &bill());
        let expected = "Friday dinner\n\
                        Date: 2026-10-18\n\
                        Restaurant: Trattoria\n\
                        \n\
                        Ana: $122.50\n\
                        Cleo: $3.33\n\
                        \n\
                        Total: $125.83";
        assert_eq!(text, expected);
        assert!(!text.contains("Ben"));
    }

    #[test]
    fn test_email_draft() {
        let draft = email_draft("Friday dinner", date(), "Trattoria", &bill());
        assert_eq!(draft.subject, "Bill split: Friday dinner at Trattoria");
        assert!(draft.body.ends_with("Total: $125.83"));
    }

    #[test]
    fn test_party_caption() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 18, 20, 0, 0).unwrap();
        let mut party = Party {
            id: "p1".to_string(),
            name: "Friday".to_string(),
            restaurant_name: String::new(),
            selected_restaurant: "Custom Restaurant".to_string(),
            custom_menu_items: Vec::new(),
            restaurant_custom_items: HashMap::new(),
            friends: Vec::new(),
            orders: HashMap::new(),
            table_orders: Vec::new(),
            created: ts,
            last_updated: ts,
            total_cost: 42.5,
        };
        assert_eq!(party_caption(&party), "Custom Restaurant - $42.50 - 2026-10-18");
        party.restaurant_name = "Noodle Bar".to_string();
        assert!(party_caption(&party).starts_with("Noodle Bar - "));
    }
}
