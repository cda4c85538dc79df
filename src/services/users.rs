//! User service
//!
//! Admin user management plus the signed-in user's own profile.

use std::path::Path;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::models::{AvatarResponse, ChangeRoleRequest, Role, UpdateProfileRequest, User};
use crate::session::Session;
use crate::utils::errors::{EventrError, Result};
use crate::utils::helpers;
use super::api::ApiClient;

#[derive(Clone, Debug)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<User>> {
        let users: Vec<User> = self.api.get("/users", Some(session)).await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    pub async fn change_role(&self, session: &Session, id: &str, role: Role) -> Result<()> {
        let path = format!("/users/{}/role", id);
        self.api.put_unit(&path, &ChangeRoleRequest { role }, Some(session)).await?;
        Ok(())
    }

    /// Flip the blocked flag; the server decides the new value
    pub async fn toggle_block(&self, session: &Session, id: &str) -> Result<()> {
        let path = format!("/users/{}/block", id);
        self.api.put_unit(&path, &serde_json::json!({}), Some(session)).await?;
        Ok(())
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.api.delete(&format!("/users/{}", id), Some(session)).await?;
        Ok(())
    }

    pub async fn profile(&self, session: &Session) -> Result<User> {
        Ok(self.api.get("/users/profile", Some(session)).await?)
    }

    pub async fn update_profile(&self, session: &Session, form: &UpdateProfileRequest) -> Result<User> {
        if form.name.trim().is_empty() {
            return Err(EventrError::InvalidInput("Full name is required".to_string()));
        }
        if !form.phone.is_empty() && !helpers::is_valid_phone(&form.phone) {
            return Err(EventrError::InvalidInput(format!("Invalid phone number: {}", form.phone)));
        }

        Ok(self.api.put("/users/profile", form, Some(session)).await?)
    }

    /// Upload a new profile picture, returning the stored avatar reference
    pub async fn upload_avatar(&self, session: &Session, file: &Path) -> Result<String> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "avatar".to_string());

        let form = Form::new().part("avatar", Part::bytes(bytes).file_name(file_name));
        let response: AvatarResponse = self.api.put_multipart("/users/avatar", form, Some(session)).await?;
        Ok(response.avatar)
    }
}
