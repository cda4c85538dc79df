//! Plain-text rendering of typed snapshots

use std::collections::HashMap;
use std::fmt::Write;
use chrono::{DateTime, Local};

use crate::models::{Event, Registration, RegistrationStatus, User};
use crate::utils::helpers::{fallback_avatar_url, format_optional_date, format_price, format_timestamp, resolve_image, truncate_text};
use super::analytics::{DashboardStats, Report};
use super::registrations::action_label;
use super::ticket::{self, TicketView};

const RULE: &str = "----------------------------------------";

/// Renders cards and tables; knows where relative images live
#[derive(Debug, Clone)]
pub struct Renderer {
    base_url: String,
    placeholder: String,
}

impl Renderer {
    pub fn new(base_url: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn image(&self, reference: Option<&str>) -> String {
        resolve_image(reference, &self.base_url, &self.placeholder)
    }

    /// Discovery card; a known registration status replaces the Register action
    pub fn event_card(&self, event: &Event, status: Option<RegistrationStatus>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "{}  [{}]", event.display_title(), event.category.as_deref().unwrap_or("General"));
        let _ = writeln!(
            out,
            "  {} {} @ {}",
            format_optional_date(event.date),
            event.time.as_deref().unwrap_or(""),
            event.location.as_deref().unwrap_or("TBA")
        );
        if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "  {}", truncate_text(description, 80));
        }
        let _ = writeln!(out, "  Price: {}", format_price(event.price_or_free()));
        if let Some(seats) = event.available_seats {
            let _ = writeln!(out, "  Seats: {}", seats);
        }
        let _ = writeln!(out, "  Image: {}", self.image(event.image_ref()));
        match status {
            Some(status) => {
                let _ = writeln!(out, "  Status: {}", status);
            }
            None => {
                let _ = writeln!(out, "  Action: Register (eventr register {})", event.id);
            }
        }
        out
    }

    pub fn event_list(&self, events: &[&Event], statuses: &HashMap<String, RegistrationStatus>) -> String {
        if events.is_empty() {
            return "No events found.\n".to_string();
        }
        events
            .iter()
            .map(|e| self.event_card(e, statuses.get(&e.id).copied()))
            .collect()
    }

    /// Admin event table
    pub fn event_table(&self, events: &[Event]) -> String {
        if events.is_empty() {
            return "No events found.\n".to_string();
        }
        let mut out = format!("{:<26} {:<30} {:<12} {:<14} {}\n", "ID", "TITLE", "CATEGORY", "DATE", "PRICE");
        for event in events {
            let _ = writeln!(
                out,
                "{:<26} {:<30} {:<12} {:<14} {}",
                event.id,
                truncate_text(event.display_title(), 30),
                event.category.as_deref().unwrap_or("-"),
                format_optional_date(event.date),
                format_price(event.price_or_free())
            );
        }
        out
    }

    /// One row of "my events" with its derived ticket state
    pub fn registration_row(&self, registration: &Registration, view: &TicketView) -> String {
        let event = registration.event();
        let title = event.map(Event::display_title).unwrap_or("Unknown event");
        let date = format_optional_date(event.and_then(|e| e.date));

        let mut actions = Vec::new();
        if view.can_view_ticket {
            actions.push(format!("View Ticket (eventr ticket {})", registration.id));
        }
        if view.can_cancel {
            actions.push(format!("Cancel (eventr cancel {})", registration.id));
        }

        let mut out = format!("{} | {} | {}", title, date, view.label);
        if !actions.is_empty() {
            let _ = write!(out, " | {}", actions.join(", "));
        }
        out.push('\n');
        out
    }

    pub fn registration_list(&self, registrations: &[Registration], now: DateTime<Local>) -> String {
        if registrations.is_empty() {
            return "You have not registered for any events yet.\n".to_string();
        }
        registrations
            .iter()
            .map(|r| {
                let view = ticket::derive(r.status, r.event().and_then(|e| e.date), now);
                self.registration_row(r, &view)
            })
            .collect()
    }

    /// Digital ticket for a confirmed registration
    pub fn ticket_card(&self, registration: &Registration, holder: &str) -> String {
        let event = registration.event();
        let mut out = String::new();
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "  EVENTR TICKET");
        let _ = writeln!(out, "  {}", event.map(Event::display_title).unwrap_or("Unknown event"));
        let _ = writeln!(
            out,
            "  {} {}",
            format_optional_date(event.and_then(|e| e.date)),
            event.and_then(|e| e.time.as_deref()).unwrap_or("")
        );
        let _ = writeln!(out, "  {}", event.and_then(|e| e.location.as_deref()).unwrap_or("TBA"));
        let _ = writeln!(out, "  Holder: {}", registration.name.as_deref().unwrap_or(holder));
        let _ = writeln!(out, "  Ticket ID: {}", registration.id);
        let _ = writeln!(out, "{}", RULE);
        out
    }

    /// Admin registration queue
    pub fn registration_queue(&self, registrations: &[Registration]) -> String {
        if registrations.is_empty() {
            return "No registrations yet.\n".to_string();
        }
        let mut out = format!("{:<26} {:<20} {:<28} {:<10} {}\n", "ID", "NAME", "EVENT", "STATUS", "ACTION");
        for registration in registrations {
            let _ = writeln!(
                out,
                "{:<26} {:<20} {:<28} {:<10} {}",
                registration.id,
                truncate_text(registration.name.as_deref().unwrap_or("-"), 20),
                truncate_text(registration.event().map(Event::display_title).unwrap_or("-"), 28),
                registration.status,
                action_label(registration.status)
            );
        }
        out
    }

    pub fn user_table(&self, users: &[User]) -> String {
        if users.is_empty() {
            return "No users found.\n".to_string();
        }
        let mut out = format!("{:<26} {:<20} {:<28} {:<6} {}\n", "ID", "NAME", "EMAIL", "ROLE", "STATE");
        for user in users {
            let _ = writeln!(
                out,
                "{:<26} {:<20} {:<28} {:<6} {}",
                user.id,
                truncate_text(&user.name, 20),
                truncate_text(&user.email, 28),
                user.role,
                if user.is_blocked { "blocked" } else { "active" }
            );
        }
        out
    }

    pub fn profile(&self, user: &User, completeness: u8) -> String {
        let avatar = match user.avatar.as_deref().filter(|a| !a.is_empty()) {
            Some(reference) => self.image(Some(reference)),
            None => fallback_avatar_url(&user.name),
        };

        let mut out = String::new();
        let _ = writeln!(out, "{} <{}>", user.name, user.email);
        let _ = writeln!(out, "  Role: {}", user.role);
        let _ = writeln!(out, "  Phone: {}", user.phone.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "  Address: {}", user.address.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "  Bio: {}", user.bio.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "  Avatar: {}", avatar);
        let _ = writeln!(out, "  Profile completeness: {}%", completeness);
        out
    }

    pub fn dashboard_stats(&self, stats: &DashboardStats) -> String {
        format!(
            "Total events: {}\nTotal users: {}\nRegistrations: {}\nPending requests: {}\n",
            stats.total_events, stats.total_users, stats.registrations, stats.pending_requests
        )
    }

    pub fn report(&self, report: &Report, generated_at: DateTime<Local>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Tickets issued: {}", report.tickets_issued);
        let _ = writeln!(out, "Revenue: {}", format_price(report.revenue));
        let _ = writeln!(out, "Active events: {}", report.active_events);
        let _ = writeln!(out, "\nRegistrations by category:");
        if report.by_category.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for (category, count) in &report.by_category {
            let _ = writeln!(out, "  {:<16} {}", category, count);
        }
        let _ = writeln!(out, "\nRegistrations by weekday:");
        for (day, count) in &report.by_weekday {
            let _ = writeln!(out, "  {:<4} {:>4} {}", day.to_string(), count, "#".repeat((*count).min(40)));
        }
        let _ = writeln!(out, "\nGenerated {}", format_timestamp(generated_at));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn renderer() -> Renderer {
        Renderer::new("https://api.example.com", "/placeholder.png")
    }

    fn event() -> Event {
        serde_json::from_str(
            r#"{"_id":"e1","title":"Rust Conf","category":"Tech","date":"2026-05-01","location":"Dhaka","imageUrl":"/uploads/rust.png","price":0}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_event_card_shows_register_or_status() {
        let r = renderer();
        let card = r.event_card(&event(), None);
        assert!(card.contains("Rust Conf"));
        assert!(card.contains("FREE"));
        assert!(card.contains("https://api.example.com/uploads/rust.png"));
        assert!(card.contains("Register"));

        let card = r.event_card(&event(), Some(RegistrationStatus::Pending));
        assert!(card.contains("Status: PENDING"));
        assert!(!card.contains("Register"));
    }

    #[test]
    fn test_empty_lists_render_placeholders() {
        let r = renderer();
        assert_eq!(r.event_list(&[], &HashMap::new()), "No events found.\n");
        assert!(r.user_table(&[]).starts_with("No users"));
    }

    #[test]
    fn test_registration_rows() {
        let r = renderer();
        let regs: Vec<Registration> = serde_json::from_str(
            r#"[
                {"_id":"r1","event":{"_id":"e1","title":"Rust Conf","date":"2026-05-01"},"status":"pending"},
                {"_id":"r2","event":{"_id":"e2","title":"Old Expo","date":"2025-01-01"},"status":"approved"}
            ]"#,
        )
        .unwrap();
        let now = Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).earliest().unwrap();
        let text = r.registration_list(&regs, now);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains("Waiting for approval"));
        assert!(lines[0].contains("eventr cancel r1"));
        assert!(lines[1].contains("Expired"));
        assert!(!lines[1].contains("View Ticket"));
    }

    #[test]
    fn test_queue_locks_decided_rows() {
        let regs: Vec<Registration> =
            serde_json::from_str(r#"[{"_id":"r9","name":"Ana","status":"APPROVED"}]"#).unwrap();
        assert!(renderer().registration_queue(&regs).contains("Status Locked"));
    }

    #[test]
    fn test_weekday_histogram_columns_align() {
        let now = Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).earliest().unwrap();
        let text = renderer().report(&Report::compute(&[], &[], now), now);

        assert!(text.contains("  Mon     0 \n"));
        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with("  ") && l.trim_end().ends_with('0')).collect();
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|row| row.find('0') == Some(10)));
    }
}
