//! Event request model
//!
//! A user's proposal for a new event. Creation is fire-and-forget; the API
//! exposes no further lifecycle to the client.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

impl EventRequest {
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.description, &self.date, &self.location]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}
