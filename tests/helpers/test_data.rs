//! Test data helpers for building API fixtures

use chrono::{DateTime, Local, TimeZone};
use serde_json::{json, Value};

use eventr::models::{Role, User};

pub const TEST_TOKEN: &str = "test-token";

/// Instant every test context's clock is frozen at
pub fn test_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
        .earliest()
        .expect("valid local time")
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("Test {}", id),
        "email": format!("{}@example.com", id),
        "role": role,
        "isBlocked": false
    })
}

pub fn test_user(role: Role) -> User {
    serde_json::from_value(user_json("u1", role.as_str())).expect("valid user fixture")
}

pub fn event_json(id: &str, title: &str, date: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "category": "Tech",
        "date": format!("{}T00:00:00.000Z", date),
        "time": "18:00",
        "location": "Dhaka",
        "description": "A test event",
        "price": 250,
        "availableSeats": 100
    })
}

/// Registration with its event populated
pub fn registration_json(id: &str, event: Value, status: &str) -> Value {
    json!({
        "_id": id,
        "event": event,
        "name": "Test u1",
        "email": "u1@example.com",
        "status": status,
        "createdAt": "2026-03-02T09:30:00.000Z"
    })
}
