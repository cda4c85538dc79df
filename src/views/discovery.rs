//! Event discovery: search, filters and per-event registration status

use std::collections::HashMap;

use crate::models::{Event, Registration, RegistrationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Server order
    #[default]
    Default,
    /// Earliest date first, undated events last
    Date,
    /// Most registrations first
    Popularity,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(SortOrder::Default),
            "date" => Ok(SortOrder::Date),
            "popularity" => Ok(SortOrder::Popularity),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilters {
    pub query: String,
    pub category: Option<String>,
    pub sort: SortOrder,
}

impl EventFilters {
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Case-insensitive substring match on title or location
    pub fn matches(&self, event: &Event) -> bool {
        let query = self.query.trim().to_lowercase();
        let text_match = query.is_empty()
            || event.display_title().to_lowercase().contains(&query)
            || event
                .location
                .as_deref()
                .map(|l| l.to_lowercase().contains(&query))
                .unwrap_or(false);

        let category_match = match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(wanted) => event
                .category
                .as_deref()
                .map(|c| c.eq_ignore_ascii_case(wanted))
                .unwrap_or(false),
        };

        text_match && category_match
    }

    /// Filter then sort; `popularity` maps event id to registration count
    pub fn apply<'a>(&self, events: &'a [Event], popularity: &HashMap<String, usize>) -> Vec<&'a Event> {
        let mut selected: Vec<&Event> = events.iter().filter(|e| self.matches(e)).collect();

        match self.sort {
            SortOrder::Default => {}
            SortOrder::Date => selected.sort_by_key(|e| (e.date.is_none(), e.date)),
            SortOrder::Popularity => selected.sort_by(|a, b| {
                let count = |e: &Event| popularity.get(&e.id).copied().unwrap_or(0);
                count(b).cmp(&count(a))
            }),
        }

        selected
    }
}

/// Event id to the user's registration status for that event
pub fn status_map(registrations: &[Registration]) -> HashMap<String, RegistrationStatus> {
    registrations
        .iter()
        .filter_map(|r| r.event_id().map(|id| (id.to_string(), r.status)))
        .collect()
}

/// Registration count per event id
pub fn popularity(registrations: &[Registration]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for id in registrations.iter().filter_map(Registration::event_id) {
        *counts.entry(id.to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<Event> {
        serde_json::from_str(
            r#"[
                {"_id":"e1","title":"Rust Conf","location":"Dhaka","category":"Tech","date":"2026-05-01"},
                {"_id":"e2","title":"Startup Meetup","location":"Chittagong","category":"Business","date":"2026-02-01"},
                {"_id":"e3","name":"Art Walk","location":"Rustic Hall","category":"Art"}
            ]"#,
        )
        .unwrap()
    }

    fn ids(selected: &[&Event]) -> Vec<String> {
        selected.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_search_matches_title_or_location() {
        let events = events();
        let hits = EventFilters::search("RUST").apply(&events, &HashMap::new());
        assert_eq!(ids(&hits), vec!["e1", "e3"]);

        let all = EventFilters::search("  ").apply(&events, &HashMap::new());
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_category_filter() {
        let events = events();
        let filters = EventFilters {
            category: Some("business".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&events, &HashMap::new())), vec!["e2"]);
    }

    #[test]
    fn test_sort_by_date_puts_undated_last() {
        let events = events();
        let filters = EventFilters { sort: SortOrder::Date, ..Default::default() };
        assert_eq!(ids(&filters.apply(&events, &HashMap::new())), vec!["e2", "e1", "e3"]);
    }

    #[test]
    fn test_sort_by_popularity() {
        let events = events();
        let counts = HashMap::from([("e3".to_string(), 5), ("e2".to_string(), 2)]);
        let filters = EventFilters { sort: SortOrder::Popularity, ..Default::default() };
        assert_eq!(ids(&filters.apply(&events, &counts)), vec!["e3", "e2", "e1"]);
    }

    #[test]
    fn test_status_map_and_popularity() {
        let regs: Vec<Registration> = serde_json::from_str(
            r#"[
                {"_id":"r1","event":{"_id":"e1","title":"Rust Conf"},"status":"pending"},
                {"_id":"r2","event":"e2","status":"APPROVED"},
                {"_id":"r3","event":"e2","status":"rejected"},
                {"_id":"r4","event":null,"status":"approved"}
            ]"#,
        )
        .unwrap();

        let map = status_map(&regs);
        assert_eq!(map.get("e1"), Some(&RegistrationStatus::Pending));
        assert_eq!(map.len(), 2);

        let counts = popularity(&regs);
        assert_eq!(counts.get("e2"), Some(&2));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("Date".parse::<SortOrder>(), Ok(SortOrder::Date));
        assert_eq!("".parse::<SortOrder>(), Ok(SortOrder::Default));
        assert!("random".parse::<SortOrder>().is_err());
    }
}
