use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Category, MenuItemDraft};
use split_engine::{
    AlertLevel, Catalog, Config, ErrorCode, OrderTarget, PartyRepository, Session, StatusBoard,
    bill_summary_text, init_from_config,
};
use std::time::Duration;

const CATALOG: &str = r#"{
    "restaurants": [
        {
            "name": "Le Jardin",
            "cuisine": "French",
            "pricing_model": "course_based",
            "course_pricing": {"one": 99, "two": 149, "threePlus": 189},
            "menu": [
                {"name": "Soup", "price": 0, "category": "Starter", "is_course_item": true},
                {"name": "Steak", "price": 20, "category": "Main", "is_course_item": true},
                {"name": "Wine", "price": 35, "category": "Drink"},
                {"name": "Bread basket", "price": 12, "category": "Table"}
            ]
        }
    ]
}"#;

fn setup() -> (tempfile::TempDir, Config, Catalog) {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("restaurants.json");
    std::fs::write(&catalog_path, CATALOG).unwrap();

    let mut config = Config::with_overrides(dir.path().join("data"));
    config.catalog_path = catalog_path;
    config.storage_key = "restaurant_parties".to_string();
    config.log_level = "debug".to_string();
    config.log_dir = None;
    init_from_config(&config);

    let (catalog, err) = Catalog::load_or_empty(&config.catalog_path);
    assert!(err.is_none());
    (dir, config, catalog)
}

#[test]
fn test_course_dinner_end_to_end() {
    let (_dir, config, catalog) = setup();
    let repo = PartyRepository::open(&config).unwrap();

    let mut session = Session::new();
    session.set_party_name("Anniversary");
    session.select_restaurant(&catalog, "Le Jardin").unwrap();
    for name in ["Ana", "Ben", "Cleo"] {
        session.add_friend(name).unwrap();
    }

    let menu = session.menu(&catalog);
    let soup = menu.lookup("Soup").cloned().unwrap();
    let steak = menu.lookup("Steak").cloned().unwrap();
    let wine = menu.lookup("Wine").cloned().unwrap();
    let bread = menu.lookup("Bread basket").cloned().unwrap();
    let ana = OrderTarget::friend("Ana");

    session.add_item(&catalog, &ana, &soup).unwrap();
    session.add_item(&catalog, &ana, &steak).unwrap();
    session.add_item(&catalog, &ana, &wine).unwrap();
    session.add_item(&catalog, &ana, &wine).unwrap();
    assert_eq!(
        session.add_item(&catalog, &ana, &steak).unwrap_err().code,
        ErrorCode::DuplicateCourseItem
    );
    session.add_item(&catalog, &OrderTarget::Table, &bread).unwrap();

    let bill = session.bill(&catalog);
    let ana_bill = &bill.diners[0];
    assert_eq!(ana_bill.subtotal, Decimal::from(239));
    assert_eq!(ana_bill.table_share, Decimal::from(4));
    assert_eq!(bill.total, Decimal::from(251));
    assert_eq!(bill.item_count, 5);

    let saved = repo.save_party(&mut session, &catalog).unwrap();
    assert_eq!(saved.total_cost, 251.0);

    let parties = repo.list_parties().unwrap();
    assert_eq!(parties.len(), 1);
    let restored = repo.load_party(&parties[0]);
    assert_eq!(restored.friends, session.friends);
    assert_eq!(restored.book, session.book);
    assert_eq!(restored.bill(&catalog), bill);

    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let text = bill_summary_text(&restored.name, date, restored.display_restaurant_name(), &bill);
    assert!(text.contains("Ana: $243.00"));
    assert!(text.contains("Ben: $4.00"));
    assert!(text.ends_with("Total: $251.00"));
}

#[test]
fn test_custom_restaurant_survives_reopen() {
    let (_dir, config, catalog) = setup();

    let id = {
        let repo = PartyRepository::open(&config).unwrap();
        let mut session = Session::new();
        session.set_party_name("Picnic");
        session.set_restaurant_name("Backyard");
        session.add_friend("Ana").unwrap();
        let cake = session
            .add_custom_item(&catalog, &MenuItemDraft::new("Cake", "45.50", Category::Other))
            .unwrap();
        let ana = OrderTarget::friend("Ana");
        let line = session.add_item(&catalog, &ana, &cake).unwrap();
        session.set_quantity(&ana, line.line_id(), 3).unwrap();
        repo.save_party(&mut session, &catalog).unwrap();
        session.id
    };

    let repo = PartyRepository::open(&config).unwrap();
    let parties = repo.list_parties().unwrap();
    assert_eq!(parties.len(), 1);
    assert_eq!(parties[0].id, id);
    assert_eq!(parties[0].total_cost, 136.5);

    let session = repo.load_party(&parties[0]);
    assert!(session.is_custom_restaurant());
    assert_eq!(session.custom_menu_items.len(), 1);
    assert_eq!(session.total_items(), 3);
}

#[tokio::test]
async fn test_rejections_reach_the_status_board() {
    let (_dir, _config, catalog) = setup();
    let board = StatusBoard::new(Duration::from_millis(50));
    let mut session = Session::new();
    session.add_friend("Zoë").unwrap();

    match session.add_friend("zoe") {
        Err(e) => board.show_error(&e),
        Ok(_) => panic!("duplicate friend accepted"),
    }
    let message = board.current().unwrap();
    assert_eq!(message.level, AlertLevel::Warning);
    assert_eq!(session.friends.len(), 1);

    let (_, err) = Catalog::load_or_empty("/nonexistent/restaurants.json");
    board.show_error(&err.unwrap());
    assert_eq!(board.current().unwrap().level, AlertLevel::Danger);
    assert!(catalog.find("Le Jardin").is_some());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(board.current().is_none());
}
