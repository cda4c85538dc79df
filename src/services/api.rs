//! HTTP client for the EVENTR REST API
//!
//! Wraps `reqwest` with the configured timeout and user agent, attaches the
//! bearer token when a session carries one, and maps every failure into the
//! typed [`ApiError`] taxonomy. Responses are decoded into typed records at
//! this boundary.

use std::time::{Duration, Instant};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::session::Session;
use crate::utils::errors::{ApiError, ApiResult, EventrError, Result};
use crate::utils::logging;

/// Error body shape the API uses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| EventrError::Api(ApiError::from(e)))?;

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// Resolve an API path such as `/registrations/my` against the base URL
    pub fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Transport(format!("invalid endpoint {}: {}", path, e)))
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut builder = self.client.request(method, url);
        if let Some(token) = session.and_then(Session::token) {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, session: Option<&Session>) -> ApiResult<T> {
        let builder = self.request(Method::GET, path, session)?;
        let body = self.execute("GET", path, builder).await?;
        decode(path, &body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, session: Option<&Session>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path, session)?.json(body);
        let body = self.execute("POST", path, builder).await?;
        decode(path, &body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, session: Option<&Session>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path, session)?.json(body);
        let body = self.execute("PUT", path, builder).await?;
        decode(path, &body)
    }

    /// PUT whose response body is not needed
    pub async fn put_unit<B>(&self, path: &str, body: &B, session: Option<&Session>) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path, session)?.json(body);
        self.execute("PUT", path, builder).await.map(|_| ())
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        session: Option<&Session>,
    ) -> ApiResult<T> {
        let builder = self.request(Method::PUT, path, session)?.multipart(form);
        let body = self.execute("PUT", path, builder).await?;
        decode(path, &body)
    }

    /// Multipart PUT whose response body is not needed
    pub async fn put_multipart_unit(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        session: Option<&Session>,
    ) -> ApiResult<()> {
        let builder = self.request(Method::PUT, path, session)?.multipart(form);
        self.execute("PUT", path, builder).await.map(|_| ())
    }

    /// POST whose response body is not needed
    pub async fn post_unit<B>(&self, path: &str, body: &B, session: Option<&Session>) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path, session)?.json(body);
        self.execute("POST", path, builder).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str, session: Option<&Session>) -> ApiResult<()> {
        let builder = self.request(Method::DELETE, path, session)?;
        self.execute("DELETE", path, builder).await.map(|_| ())
    }

    /// Send the request and return the raw body of a successful response
    async fn execute(&self, method: &str, path: &str, builder: RequestBuilder) -> ApiResult<Vec<u8>> {
        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            logging::log_api_error(path, &e.to_string(), Some(method));
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from)?;
        logging::log_api_request(method, path, status.as_u16(), started.elapsed().as_millis() as u64);

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let error = classify(status, &body);
        logging::log_api_error(path, &error.to_string(), Some(method));
        Err(error)
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(path = path, error = %e, "Failed to decode API response");
        ApiError::Decode(format!("{}: {}", path, e))
    })
}

/// Map a non-success status and its body onto the error taxonomy
pub(crate) fn classify(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        s if s.is_client_error() => ApiError::Validation(message),
        s => ApiError::Server {
            status: s.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn config(base: &str) -> ApiConfig {
        ApiConfig {
            base_url: base.to_string(),
            timeout_seconds: 5,
            user_agent: "test".to_string(),
        }
    }

    #[test]
    fn test_endpoint_join_keeps_base_path() {
        let client = ApiClient::new(&config("http://localhost:5000/api")).unwrap();
        assert_eq!(
            client.endpoint("/registrations/my").unwrap().as_str(),
            "http://localhost:5000/api/registrations/my"
        );

        let root = ApiClient::new(&config("https://example.com")).unwrap();
        assert_eq!(root.endpoint("events").unwrap().as_str(), "https://example.com/events");
    }

    #[test]
    fn test_classify_statuses() {
        let body = br#"{"message":"User already exists"}"#;
        assert_matches!(
            classify(StatusCode::BAD_REQUEST, body),
            ApiError::Validation(m) if m == "User already exists"
        );
        assert_matches!(classify(StatusCode::UNAUTHORIZED, b""), ApiError::Unauthorized(_));
        assert_matches!(classify(StatusCode::FORBIDDEN, b""), ApiError::Unauthorized(_));
        assert_matches!(classify(StatusCode::NOT_FOUND, b"<html>"), ApiError::NotFound(m) if m.is_empty());
        assert_matches!(
            classify(StatusCode::BAD_GATEWAY, b""),
            ApiError::Server { status: 502, .. }
        );
    }
}
