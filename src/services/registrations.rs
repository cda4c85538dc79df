//! Registration service

use tracing::debug;

use crate::models::{CreateRegistrationRequest, Decision, Registration};
use crate::session::Session;
use crate::utils::errors::{EventrError, Result};
use crate::utils::helpers;
use super::api::ApiClient;

#[derive(Clone, Debug)]
pub struct RegistrationService {
    api: ApiClient,
}

impl RegistrationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every registration, admin only
    pub async fn list_all(&self, session: &Session) -> Result<Vec<Registration>> {
        let registrations: Vec<Registration> = self.api.get("/registrations", Some(session)).await?;
        debug!(count = registrations.len(), "Fetched registration queue");
        Ok(registrations)
    }

    /// The signed-in user's registrations
    pub async fn list_mine(&self, session: &Session) -> Result<Vec<Registration>> {
        let registrations: Vec<Registration> = self.api.get("/registrations/my", Some(session)).await?;
        debug!(count = registrations.len(), "Fetched own registrations");
        Ok(registrations)
    }

    pub async fn create(&self, session: &Session, request: &CreateRegistrationRequest) -> Result<()> {
        if request.name.trim().is_empty() {
            return Err(EventrError::InvalidInput("Full name is required".to_string()));
        }
        if !helpers::is_valid_email(&request.email) {
            return Err(EventrError::InvalidInput(format!("Invalid email address: {}", request.email)));
        }

        self.api.post_unit("/registrations", request, Some(session)).await?;
        Ok(())
    }

    /// Approve or reject a registration
    pub async fn decide(&self, session: &Session, id: &str, decision: Decision) -> Result<()> {
        let path = format!("/registrations/{}/{}", decision.path_segment(), id);
        self.api.put_unit(&path, &serde_json::json!({}), Some(session)).await?;
        Ok(())
    }

    /// Withdraw a registration
    pub async fn cancel(&self, session: &Session, id: &str) -> Result<()> {
        self.api.delete(&format!("/registrations/{}", id), Some(session)).await?;
        Ok(())
    }
}
