//! Integration tests for list screens over the in-memory backend.

mod helpers;

use std::sync::Arc;

use helpers::{TestScreen, roster, student};

use schoolhub_client::SeedData;
use schoolhub_core::error::ErrorKind;
use schoolhub_core::traits::ResourceApi;
use schoolhub_entity::{Book, HostelRoom, InventoryItem, Student, StudentStatus};
use schoolhub_view::{CollectingNotifier, ListScreen};

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let t = TestScreen::loaded(
        vec![
            student("1", "John Doe", StudentStatus::Active, "10"),
            student("2", "Jane Roe", StudentStatus::Inactive, "10"),
        ],
        10,
    )
    .await;
    let mut screen = t.screen;

    screen.set_search("jo");
    let names: Vec<_> = screen.view().page.items.iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, ["John Doe"]);

    screen.set_search("JANE");
    assert_eq!(screen.view().page.items[0].id, "2");
}

#[tokio::test]
async fn test_third_page_of_twenty_five() {
    let mut t = TestScreen::loaded(roster(25), 10).await;

    assert_eq!(t.screen.go_to_page(3), 3);
    let view = t.screen.view();
    assert_eq!(view.page.total_pages, 3);
    let ids: Vec<_> = view.page.items.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["s20", "s21", "s22", "s23", "s24"]);
}

#[tokio::test]
async fn test_search_and_filter_compose() {
    let mut records = roster(6);
    records.push(student("x1", "Student 99", StudentStatus::Suspended, "10"));
    let mut t = TestScreen::loaded(records, 10).await;

    t.screen.set_search("student 9");
    t.screen.set_filter("class_name", "10").unwrap();
    t.screen.set_filter("status", "suspended").unwrap();

    let view = t.screen.view();
    assert_eq!(view.filtered.len(), 1);
    assert_eq!(view.filtered[0].id, "x1");

    t.screen.set_filter("status", "all").unwrap();
    assert_eq!(t.screen.view().filtered.len(), 1);
}

#[tokio::test]
async fn test_filter_change_returns_to_first_page() {
    let mut t = TestScreen::loaded(roster(25), 10).await;
    t.screen.next_page();
    t.screen.next_page();
    assert_eq!(t.screen.view().page.page, 3);

    t.screen.set_filter("class_name", "9").unwrap();
    assert_eq!(t.screen.view().page.page, 1);

    t.screen.go_to_page(2);
    t.screen.set_search("Student");
    assert_eq!(t.screen.view().page.page, 1);
}

#[tokio::test]
async fn test_navigation_clamps() {
    let mut t = TestScreen::loaded(roster(25), 10).await;
    assert_eq!(t.screen.previous_page(), 1);
    assert_eq!(t.screen.go_to_page(99), 3);
    assert_eq!(t.screen.next_page(), 3);
    assert_eq!(t.screen.go_to_page(0), 1);
}

#[tokio::test]
async fn test_no_matches_is_single_empty_page() {
    let mut t = TestScreen::loaded(roster(5), 10).await;
    t.screen.set_search("nobody");
    let view = t.screen.view();
    assert!(view.is_empty());
    assert_eq!(view.page.page, 1);
    assert_eq!(view.page.total_pages, 1);
}

#[tokio::test]
async fn test_unknown_filter_field_is_rejected() {
    let mut t = TestScreen::loaded(roster(3), 10).await;
    let err = t.screen.set_filter("guardian_phone", "123").unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_filter_options_list_all_first() {
    let t = TestScreen::loaded(roster(4), 10).await;
    assert_eq!(t.screen.filter_options("class_name"), ["all", "10", "9"]);
}

#[tokio::test]
async fn test_create_refetches_and_closes_dialog() {
    let mut t = TestScreen::loaded(roster(3), 10).await;

    t.screen.open_create();
    t.screen.set_field("admission_no", "ADM-100").unwrap();
    t.screen.set_field("name", "John Doe").unwrap();
    t.screen.set_field("class_name", "10").unwrap();
    t.screen.submit().await.expect("submit");

    assert!(!t.screen.dialog().is_open());
    assert_eq!(t.screen.items().len(), 4);
    assert_eq!(t.api.list_calls(), 2);
    assert_eq!(t.toast_messages(), ["Student added successfully"]);
}

#[tokio::test]
async fn test_failed_create_keeps_dialog_and_collection() {
    let mut t = TestScreen::loaded(roster(3), 10).await;

    t.screen.open_create();
    t.screen.set_field("admission_no", "ADM-100").unwrap();
    t.screen.set_field("name", "John Doe").unwrap();
    t.screen.set_field("class_name", "10").unwrap();
    t.api.fail_next("503 Service Unavailable");

    let err = t.screen.submit().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
    assert!(t.screen.dialog().is_open());
    assert_eq!(t.screen.dialog().values.get("name"), "John Doe");
    assert_eq!(t.screen.items().len(), 3);
    assert_eq!(t.api.len().await, 3);
    assert_eq!(t.toast_messages(), ["Failed to add student"]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_loaded_records() {
    let mut t = TestScreen::loaded(roster(12), 10).await;
    t.screen.go_to_page(2);

    t.api.fail_next("timeout");
    assert!(t.screen.refresh().await.is_err());
    assert_eq!(t.screen.items().len(), 12);
    assert_eq!(t.screen.view().page.page, 2);
    assert_eq!(t.toast_messages(), ["Failed to load student data"]);
}

#[tokio::test]
async fn test_refresh_after_shrink_clamps_page() {
    let mut t = TestScreen::loaded(roster(25), 10).await;
    t.screen.go_to_page(3);
    for i in 10..25 {
        t.api.delete(&format!("s{i:02}")).await.unwrap();
    }

    t.screen.refresh().await.unwrap();
    assert_eq!(t.screen.view().page.page, 1);
}

#[tokio::test]
async fn test_numeric_fields_are_checked_before_the_api() {
    let mut t = TestScreen::<InventoryItem>::loaded(Vec::new(), 10).await;
    t.screen.open_create();
    t.screen.set_field("sku", "CHALK-01").unwrap();
    t.screen.set_field("name", "Chalk box").unwrap();
    t.screen.set_field("category", "stationery").unwrap();
    t.screen.set_field("unit_price", "").unwrap();

    let err = t.screen.submit().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(t.api.create_calls(), 0);
    assert!(t.screen.dialog().is_open());

    t.screen.set_field("unit_price", "2.5").unwrap();
    let item = t.screen.submit().await.expect("valid item");
    assert_eq!(item.quantity, 0);
    assert_eq!(t.api.create_calls(), 1);
}

#[tokio::test]
async fn test_room_capacity_must_be_a_number() {
    let mut t = TestScreen::<HostelRoom>::loaded(Vec::new(), 10).await;
    t.screen.open_create();
    t.screen.set_field("room_no", "A-101").unwrap();
    t.screen.set_field("block", "A").unwrap();
    t.screen.set_field("capacity", "two").unwrap();
    t.screen.set_field("monthly_fee", "1200").unwrap();

    assert!(t.screen.submit().await.unwrap_err().is_validation());
    assert_eq!(t.screen.items().len(), 0);
}

#[tokio::test]
async fn test_export_covers_every_filtered_page() {
    let mut t = TestScreen::loaded(roster(25), 10).await;
    t.screen.set_filter("class_name", "9").unwrap();

    let csv = t.screen.export_csv().unwrap();
    assert_eq!(csv.lines().count(), 1 + 12);
    assert!(csv.lines().next().unwrap().starts_with("id,admission_no,name"));

    let json: Vec<Student> = serde_json::from_str(&t.screen.export_json().unwrap()).unwrap();
    assert_eq!(json.len(), 12);
    assert!(json.iter().all(|s| s.class_name == "9"));
}

#[tokio::test]
async fn test_empty_catalogue_exports_nothing() {
    let t = TestScreen::<Book>::loaded(Vec::new(), 10).await;
    assert_eq!(t.screen.export_csv().unwrap(), "");
    assert_eq!(t.screen.export_json().unwrap(), "[]");
}

#[tokio::test]
async fn test_unloaded_rows_do_not_fail_the_load() {
    let seed = SeedData::from_json(
        r#"{"students": [
            null,
            {"id": "s1", "name": "John Doe", "status": "active", "class_name": "10"},
            null,
            {"id": "s2", "name": "Jane Roe", "status": "inactive", "class_name": "9"}
        ]}"#,
    )
    .unwrap();
    let toasts = Arc::new(CollectingNotifier::new());
    let mut screen = ListScreen::new(Arc::new(seed.api::<Student>().unwrap()), toasts.clone(), 10);

    assert_eq!(screen.refresh().await.unwrap(), 2);
    screen.set_search("jo");
    assert_eq!(screen.view().page.items[0].id, "s1");
    assert!(toasts.drain().is_empty());
}
