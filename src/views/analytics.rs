//! Admin analytics derived from live API data

use std::collections::{BTreeMap, HashMap};
use chrono::{DateTime, Datelike, Local, Weekday};

use crate::models::{Event, Registration, RegistrationStatus, User};
use super::ticket;

/// Headline counters on the admin console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_events: usize,
    pub total_users: usize,
    pub registrations: usize,
    pub pending_requests: usize,
}

impl DashboardStats {
    pub fn compute(events: &[Event], users: &[User], registrations: &[Registration]) -> Self {
        Self {
            total_events: events.len(),
            total_users: users.len(),
            registrations: registrations.len(),
            pending_requests: registrations.iter().filter(|r| r.status.is_pending()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Registrations per event category, alphabetical
    pub by_category: BTreeMap<String, usize>,
    /// Registrations per weekday of creation, Monday first
    pub by_weekday: [(Weekday, usize); 7],
    pub tickets_issued: usize,
    pub revenue: f64,
    pub active_events: usize,
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl Report {
    pub fn compute(events: &[Event], registrations: &[Registration], now: DateTime<Local>) -> Self {
        let by_id: HashMap<&str, &Event> = events.iter().map(|e| (e.id.as_str(), e)).collect();
        // populated registrations carry their own event snapshot
        let event_of = |r: &Registration| -> Option<Event> {
            r.event()
                .cloned()
                .or_else(|| r.event_id().and_then(|id| by_id.get(id).map(|e| (*e).clone())))
        };

        let mut by_category = BTreeMap::new();
        let mut weekday_counts = [0usize; 7];
        let mut tickets_issued = 0;
        let mut revenue = 0.0;

        for registration in registrations {
            let event = event_of(registration);
            let category = event
                .as_ref()
                .and_then(|e| e.category.clone())
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Uncategorized".to_string());
            *by_category.entry(category).or_insert(0) += 1;

            if let Some(created) = registration.created_at {
                let weekday = created.with_timezone(&Local).weekday();
                weekday_counts[weekday.num_days_from_monday() as usize] += 1;
            }

            if registration.status == RegistrationStatus::Approved {
                tickets_issued += 1;
                revenue += event.as_ref().map(Event::price_or_free).unwrap_or(0.0);
            }
        }

        let mut by_weekday = [(Weekday::Mon, 0); 7];
        for (slot, day) in by_weekday.iter_mut().zip(WEEK) {
            *slot = (day, weekday_counts[day.num_days_from_monday() as usize]);
        }

        let active_events = events.iter().filter(|e| !ticket::is_expired(e.date, now)).count();

        Self {
            by_category,
            by_weekday,
            tickets_issued,
            revenue,
            active_events,
        }
    }
}
