//! Admin console flows against the mock API

mod helpers;

use helpers::*;
use serde_json::json;
use serial_test::serial;

use eventr::handlers::admin;
use eventr::models::{Decision, EventUpdate, NewEvent, Role};
use eventr::router::Route;
use eventr::views::ToastKind;

fn queue() -> serde_json::Value {
    json!([
        registration_json("r1", event_json("e1", "Rust Conf", "2026-05-01"), "PENDING"),
        registration_json("r2", event_json("e1", "Rust Conf", "2026-05-01"), "PENDING"),
        registration_json("r3", event_json("e2", "Startup Expo", "2026-06-01"), "REJECTED")
    ])
}

fn row<'a>(body: &'a str, id: &str) -> &'a str {
    body.lines()
        .find(|line| line.starts_with(id))
        .unwrap_or_else(|| panic!("no row for {}", id))
}

#[tokio::test]
#[serial]
async fn test_approve_updates_only_that_row() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_all_registrations(queue()).await;
    test.api.mock_decision("approve", "r1", 1).await;

    let page = admin::decide(&test.ctx, "r1", Decision::Approve).await.unwrap();

    assert_eq!(page.toast.as_ref().map(|t| t.kind), Some(ToastKind::Success));
    assert!(row(&page.body, "r1").contains("APPROVED"));
    assert!(row(&page.body, "r1").contains("Status Locked"));
    assert!(row(&page.body, "r2").contains("PENDING"));
    assert!(row(&page.body, "r3").contains("REJECTED"));
    assert!(page.body.contains("Pending: 1"));
}

#[tokio::test]
#[serial]
async fn test_decided_rows_are_locked() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_all_registrations(queue()).await;
    test.api.mock_decision("approve", "r3", 0).await;

    let page = admin::decide(&test.ctx, "r3", Decision::Approve).await.unwrap();

    assert_eq!(page.toast.as_ref().map(|t| t.kind), Some(ToastKind::Error));
    assert!(row(&page.body, "r3").contains("REJECTED"));
}

#[tokio::test]
#[serial]
async fn test_dashboard_counts_live_data() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api
        .mock_events(json!([
            event_json("e1", "Rust Conf", "2026-05-01"),
            event_json("e2", "Startup Expo", "2026-06-01")
        ]))
        .await;
    test.api
        .mock_users(json!([user_json("u1", "user"), user_json("a1", "admin"), user_json("u2", "user")]))
        .await;
    test.api.mock_all_registrations(queue()).await;

    let page = admin::dashboard(&test.ctx).await.unwrap();

    assert!(page.toast.is_none());
    assert!(page.body.contains("Total events: 2"));
    assert!(page.body.contains("Total users: 3"));
    assert!(page.body.contains("Registrations: 3"));
    assert!(page.body.contains("Pending requests: 2"));
}

#[tokio::test]
#[serial]
async fn test_dashboard_failure_becomes_toast() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_events(json!([])).await;
    test.api.mock_all_registrations(json!([])).await;
    // no /users mock: the server answers 404

    let page = admin::dashboard(&test.ctx).await.unwrap();

    let toast = page.toast.expect("toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Failed to load dashboard data");
}

#[tokio::test]
#[serial]
async fn test_analytics_revenue_from_approved_registrations() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_events(json!([event_json("e1", "Rust Conf", "2026-05-01")])).await;
    test.api.mock_users(json!([user_json("u1", "user")])).await;
    test.api
        .mock_all_registrations(json!([
            registration_json("r1", event_json("e1", "Rust Conf", "2026-05-01"), "approved"),
            registration_json("r2", event_json("e1", "Rust Conf", "2026-05-01"), "approved"),
            registration_json("r3", event_json("e1", "Rust Conf", "2026-05-01"), "pending")
        ]))
        .await;

    let page = admin::analytics(&test.ctx).await.unwrap();

    assert!(page.body.contains("Tickets issued: 2"));
    assert!(page.body.contains("Revenue: 500 BDT"));
    assert!(page.body.contains("Active events: 1"));
}

#[tokio::test]
#[serial]
async fn test_users_are_sent_away_from_admin_actions() {
    let test = TestContext::new().await;
    test.sign_in(Role::User);
    test.api.mock_decision("approve", "r1", 0).await;

    let page = admin::decide(&test.ctx, "r1", Decision::Approve).await.unwrap();

    assert_eq!(page.redirect, Some(Route::dashboard_for(Role::User)));
    assert_eq!(page.toast.map(|t| t.kind), Some(ToastKind::Error));
}

fn expo_form(date: &str) -> NewEvent {
    NewEvent {
        title: "Startup Expo".to_string(),
        category: "Business".to_string(),
        date: date.to_string(),
        time: "10:00".to_string(),
        location: "Dhaka".to_string(),
        description: "Founders meet investors".to_string(),
        price: 500.0,
        available_seats: 200,
        ..Default::default()
    }
}

#[tokio::test]
#[serial]
async fn test_create_event_redirects_to_manage_events() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_create_event("Startup Expo", 1).await;

    let page = admin::create_event(&test.ctx, &expo_form("2026-06-01")).await.unwrap();

    assert_eq!(page.toast.expect("toast").message, "Event created successfully");
    assert_eq!(page.redirect.as_ref().map(|r| r.path()), Some("/admin/manage-events"));
}

#[tokio::test]
#[serial]
async fn test_create_event_with_unreadable_date_is_not_sent() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_create_event("Startup Expo", 0).await;

    let page = admin::create_event(&test.ctx, &expo_form("TBA")).await.unwrap();

    let toast = page.toast.expect("toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert!(toast.message.contains("YYYY-MM-DD"));
    assert!(page.redirect.is_none());
}

#[tokio::test]
#[serial]
async fn test_update_event_sends_changed_fields() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_events(json!([event_json("e1", "Rust Conf 2026", "2026-05-02")])).await;
    test.api
        .mock_update_event("e1", json!({ "title": "Rust Conf 2026", "date": "2026-05-02" }), 1)
        .await;

    let update = EventUpdate {
        title: Some("Rust Conf 2026".to_string()),
        date: Some("2026-05-02".to_string()),
        ..Default::default()
    };
    let page = admin::update_event(&test.ctx, "e1", &update, None).await.unwrap();

    assert_eq!(page.toast.expect("toast").message, "Event updated");
    assert!(page.body.contains("Rust Conf 2026"));
}

#[tokio::test]
#[serial]
async fn test_update_event_with_image_uses_multipart() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_events(json!([event_json("e1", "Rust Conf", "2026-05-01")])).await;
    test.api.mock_update_event_with_image("e1").await;

    let image = test.temp_dir.path().join("banner.png");
    std::fs::write(&image, "not really a png").unwrap();
    let update = EventUpdate {
        category: Some("Tech".to_string()),
        ..Default::default()
    };

    let page = admin::update_event(&test.ctx, "e1", &update, Some(image.as_path())).await.unwrap();

    assert_eq!(page.toast.expect("toast").kind, ToastKind::Success);
}

#[tokio::test]
#[serial]
async fn test_update_event_with_unreadable_date_is_not_sent() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_events(json!([event_json("e1", "Rust Conf", "2026-05-01")])).await;
    test.api.mock_update_event("e1", json!({}), 0).await;

    let update = EventUpdate {
        date: Some("05/02/2026".to_string()),
        ..Default::default()
    };
    let page = admin::update_event(&test.ctx, "e1", &update, None).await.unwrap();

    assert_eq!(page.toast.expect("toast").kind, ToastKind::Error);
}

#[tokio::test]
#[serial]
async fn test_delete_event() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_events(json!([])).await;
    test.api.mock_delete_event("e1").await;

    let page = admin::delete_event(&test.ctx, "e1").await.unwrap();

    assert_eq!(page.toast.expect("toast").message, "Event deleted");
    assert_eq!(page.body, "No events found.\n");
}

#[tokio::test]
#[serial]
async fn test_set_role_sends_role_body() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_users(json!([user_json("u2", "admin")])).await;
    test.api.mock_set_role("u2", "admin").await;

    let page = admin::set_role(&test.ctx, "u2", Role::Admin).await.unwrap();

    assert_eq!(page.toast.expect("toast").message, "Role changed to admin");
    assert!(row(&page.body, "u2").contains("admin"));
}

#[tokio::test]
#[serial]
async fn test_toggle_block() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    let mut blocked = user_json("u2", "user");
    blocked["isBlocked"] = json!(true);
    test.api.mock_users(json!([blocked])).await;
    test.api.mock_toggle_block("u2").await;

    let page = admin::toggle_block(&test.ctx, "u2").await.unwrap();

    assert_eq!(page.toast.expect("toast").message, "User status updated");
    assert!(row(&page.body, "u2").contains("blocked"));
}

#[tokio::test]
#[serial]
async fn test_delete_user() {
    let test = TestContext::new().await;
    test.sign_in(Role::Admin);
    test.api.mock_users(json!([user_json("u3", "user")])).await;
    test.api.mock_delete_user("u2").await;

    let page = admin::delete_user(&test.ctx, "u2").await.unwrap();

    assert_eq!(page.toast.expect("toast").message, "User deleted");
    assert!(!page.body.contains("u2"));
}
