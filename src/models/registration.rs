//! Registration model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::event::Event;

/// Admission state of a registration
///
/// The wire value is matched case-insensitively; anything unrecognised
/// becomes `Unknown` rather than failing the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
    #[default]
    Unknown,
}

impl RegistrationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "PENDING" => RegistrationStatus::Pending,
            "APPROVED" => RegistrationStatus::Approved,
            "REJECTED" => RegistrationStatus::Rejected,
            _ => RegistrationStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "PENDING",
            RegistrationStatus::Approved => "APPROVED",
            RegistrationStatus::Rejected => "REJECTED",
            RegistrationStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn is_pending(&self) -> bool {
        *self == RegistrationStatus::Pending
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RegistrationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RegistrationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// The `event` field is either populated or a bare id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
    Populated(Box<Event>),
    Id(String),
}

impl EventRef {
    pub fn id(&self) -> &str {
        match self {
            EventRef::Populated(event) => &event.id,
            EventRef::Id(id) => id,
        }
    }

    pub fn event(&self) -> Option<&Event> {
        match self {
            EventRef::Populated(event) => Some(event.as_ref()),
            EventRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub event: Option<EventRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub status: RegistrationStatus,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Registration {
    pub fn event_id(&self) -> Option<&str> {
        self.event.as_ref().map(EventRef::id)
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref().and_then(EventRef::event)
    }
}

/// Body of the "confirm registration" form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub name: String,
    pub email: String,
}

/// Admin decision on a pending registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Path segment of the matching endpoint
    pub fn path_segment(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }

    /// Status the registration holds once the decision succeeds
    pub fn resulting_status(&self) -> RegistrationStatus {
        match self {
            Decision::Approve => RegistrationStatus::Approved,
            Decision::Reject => RegistrationStatus::Rejected,
        }
    }
}
