//! Event model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::wire;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Legacy field some events carry instead of `title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, with = "wire::calendar_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "wire::lenient_number")]
    pub price: Option<f64>,
    #[serde(rename = "availableSeats", default, deserialize_with = "wire::lenient_number")]
    pub available_seats: Option<u32>,
}

impl Event {
    /// Title shown to users
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("Untitled Event")
    }

    /// Raw image reference, preferring the explicit URL
    pub fn image_ref(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.image.as_deref().filter(|i| !i.is_empty()))
    }

    pub fn price_or_free(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

/// Body of the admin "create event" form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub price: f64,
    #[serde(rename = "availableSeats")]
    pub available_seats: u32,
}

impl NewEvent {
    /// Check the fields the form marks as required
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if self.date.trim().is_empty() {
            missing.push("date");
        }
        if self.time.trim().is_empty() {
            missing.push("time");
        }
        if self.location.trim().is_empty() {
            missing.push("location");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        missing
    }
}

/// Body of the admin "edit event" modal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.date.is_none()
    }
}
