//! Event service
//!
//! Listing is public; create, update and delete require an admin token.

use std::path::Path;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::models::wire::calendar_date;
use crate::models::{Event, EventUpdate, NewEvent};
use crate::session::Session;
use crate::utils::errors::{EventrError, Result};
use super::api::ApiClient;

#[derive(Clone, Debug)]
pub struct EventService {
    api: ApiClient,
}

impl EventService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, session: Option<&Session>) -> Result<Vec<Event>> {
        let events: Vec<Event> = self.api.get("/events", session).await?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    pub async fn create(&self, session: &Session, event: &NewEvent) -> Result<()> {
        let missing = event.missing_fields();
        if !missing.is_empty() {
            return Err(EventrError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        require_date(&event.date)?;

        self.api.post_unit("/events", event, Some(session)).await?;
        Ok(())
    }

    /// Update title, category and date; an image file switches the request to multipart
    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        update: &EventUpdate,
        image: Option<&Path>,
    ) -> Result<()> {
        let path = format!("/events/{}", id);
        if let Some(date) = &update.date {
            require_date(date)?;
        }

        match image {
            Some(image_path) => {
                let form = multipart_update(update, image_path).await?;
                self.api.put_multipart_unit(&path, form, Some(session)).await?;
            }
            None => {
                if update.is_empty() {
                    return Err(EventrError::InvalidInput("Nothing to update".to_string()));
                }
                self.api.put_unit(&path, update, Some(session)).await?;
            }
        }

        Ok(())
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        self.api.delete(&format!("/events/{}", id), Some(session)).await?;
        Ok(())
    }
}

/// Reject dates the client could not read back from the event list
pub(crate) fn require_date(date: &str) -> Result<()> {
    calendar_date::parse(date.trim())
        .map(|_| ())
        .map_err(|_| EventrError::InvalidInput(format!("Date must be YYYY-MM-DD, got {:?}", date)))
}

async fn multipart_update(update: &EventUpdate, image_path: &Path) -> Result<Form> {
    let bytes = tokio::fs::read(image_path).await?;
    let file_name = image_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let mut form = Form::new();
    if let Some(title) = &update.title {
        form = form.text("title", title.clone());
    }
    if let Some(category) = &update.category {
        form = form.text("category", category.clone());
    }
    if let Some(date) = &update.date {
        form = form.text("date", date.clone());
    }

    Ok(form.part("image", Part::bytes(bytes).file_name(file_name)))
}
