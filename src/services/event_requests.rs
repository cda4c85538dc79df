//! Event request submission

use crate::models::EventRequest;
use crate::session::Session;
use crate::utils::errors::{EventrError, Result};
use super::api::ApiClient;
use super::events::require_date;

#[derive(Clone, Debug)]
pub struct EventRequestService {
    api: ApiClient,
}

impl EventRequestService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn submit(&self, session: &Session, request: &EventRequest) -> Result<()> {
        if !request.is_complete() {
            return Err(EventrError::InvalidInput(
                "Title, description, date and location are required".to_string(),
            ));
        }
        require_date(&request.date)?;

        self.api.post_unit("/event-requests", request, Some(session)).await?;
        Ok(())
    }
}
