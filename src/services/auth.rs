//! Authentication service implementation
//!
//! Handles signup, login and logout against the API and keeps the local
//! session store in step with the outcome. A failed signup or login leaves
//! the stored session untouched.

use tracing::{info, warn};

use crate::models::{AuthResponse, LoginRequest, Role, SignupRequest};
use crate::session::{Session, SessionStore};
use crate::utils::errors::{EventrError, Result};
use crate::utils::helpers;
use super::api::ApiClient;

#[derive(Clone, Debug)]
pub struct AuthService {
    api: ApiClient,
    store: SessionStore,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Current stored session
    pub fn session(&self) -> Result<Session> {
        self.store.read()
    }

    /// Register a new account; self-service signups always get the `user` role
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        if name.trim().is_empty() || password.is_empty() {
            return Err(EventrError::InvalidInput("Name, email and password are required".to_string()));
        }
        if !helpers::is_valid_email(email) {
            return Err(EventrError::InvalidInput(format!("Invalid email address: {}", email)));
        }

        let request = SignupRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            role: Role::User,
        };

        let response: AuthResponse = self.api.post("/auth/signup", &request, None).await?;
        self.establish(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(EventrError::InvalidInput("Email and password are required".to_string()));
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self.api.post("/auth/login", &request, None).await?;
        self.establish(response)
    }

    /// Clear everything stored locally
    pub fn logout(&self) -> Result<()> {
        let session = self.store.read()?;
        if !session.is_authenticated() {
            warn!("Logout requested without an active session");
        }
        self.store.clear()?;
        info!(user_id = session.user_id(), "User logged out");
        Ok(())
    }

    fn establish(&self, response: AuthResponse) -> Result<Session> {
        let session = Session::new(response.token, response.user);
        self.store.write(&session)?;
        info!(user_id = session.user_id(), role = ?session.role(), "User authenticated");
        Ok(session)
    }
}
