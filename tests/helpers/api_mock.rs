//! Mock EVENTR API server for testing
//!
//! Wraps a wiremock server with canned responses for the endpoints the
//! client calls. Expectations set with `expect` are verified when the
//! server is dropped.

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::test_data::TEST_TOKEN;

pub struct ApiMockServer {
    pub server: MockServer,
    pub base_url: String,
}

impl ApiMockServer {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    pub async fn mock_events(&self, events: Value) {
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events))
            .mount(&self.server)
            .await;
    }

    /// `GET /registrations/my`, expected exactly `times` times
    pub async fn mock_my_registrations(&self, registrations: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path("/registrations/my"))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(registrations))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_all_registrations(&self, registrations: Value) {
        Mock::given(method("GET"))
            .and(path("/registrations"))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(registrations))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_users(&self, users: Value) {
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_signup_success(&self, token: &str, user: Value) {
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .and(body_partial_json(json!({ "role": "user" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "token": token, "user": user })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_signup_rejected(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_login(&self, token: &str, user: Value) {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token, "user": user })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// `PUT /registrations/{approve|reject}/:id`, expected `times` times
    pub async fn mock_decision(&self, segment: &str, id: &str, times: u64) {
        Mock::given(method("PUT"))
            .and(path(format!("/registrations/{}/{}", segment, id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// `DELETE /registrations/:id`, expected `times` times
    pub async fn mock_cancel(&self, id: &str, times: u64) {
        Mock::given(method("DELETE"))
            .and(path(format!("/registrations/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Registration cancelled" })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_create_registration(&self, event_id: &str) {
        Mock::given(method("POST"))
            .and(path("/registrations"))
            .and(body_partial_json(json!({ "eventId": event_id })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "created" })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// `POST /events`, matched on the title in the body
    pub async fn mock_create_event(&self, title: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/events"))
            .and(body_partial_json(json!({ "title": title })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Event created" })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// JSON `PUT /events/:id` whose body contains `fields`
    pub async fn mock_update_event(&self, id: &str, fields: Value, times: u64) {
        Mock::given(method("PUT"))
            .and(path(format!("/events/{}", id)))
            .and(body_partial_json(fields))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Event updated" })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Multipart `PUT /events/:id` carrying an `image` part
    pub async fn mock_update_event_with_image(&self, id: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/events/{}", id)))
            .and(body_string_contains("name=\"image\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Event updated" })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_delete_event(&self, id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/events/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Event deleted" })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// `PUT /users/:id/role` with `{ role }`
    pub async fn mock_set_role(&self, id: &str, role: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/users/{}/role", id)))
            .and(body_partial_json(json!({ "role": role })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Role updated" })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_toggle_block(&self, id: &str) {
        Mock::given(method("PUT"))
            .and(path(format!("/users/{}/block", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "User updated" })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_delete_user(&self, id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/users/{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "User deleted" })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_profile(&self, user: Value) {
        Mock::given(method("GET"))
            .and(path("/users/profile"))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(user))
            .mount(&self.server)
            .await;
    }

    /// `PUT /users/profile` whose body contains `fields`, answering with `response`
    pub async fn mock_update_profile(&self, fields: Value, response: Value) {
        Mock::given(method("PUT"))
            .and(path("/users/profile"))
            .and(body_partial_json(fields))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Multipart `PUT /users/avatar` carrying an `avatar` part
    pub async fn mock_avatar_upload(&self, avatar: &str) {
        Mock::given(method("PUT"))
            .and(path("/users/avatar"))
            .and(body_string_contains("name=\"avatar\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "avatar": avatar })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// `POST /event-requests`, matched on the title in the body
    pub async fn mock_event_request(&self, title: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/event-requests"))
            .and(body_partial_json(json!({ "title": title })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Request submitted" })))
            .expect(times)
            .mount(&self.server)
            .await;
    }
}
