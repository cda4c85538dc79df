//! Registration status and ticket validity
//!
//! A ticket stays valid through the last millisecond of its event day in
//! local time. Nothing here is persisted; callers re-derive on every render
//! from the current clock.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::models::RegistrationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketState {
    Confirmed,
    Expired,
    Waiting,
    Declined,
    Unknown,
}

/// What a registration row shows and which actions it offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketView {
    pub state: TicketState,
    pub label: &'static str,
    pub can_view_ticket: bool,
    pub can_cancel: bool,
}

fn end_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_milli_opt(23, 59, 59, 999)
}

/// `now > event_date at 23:59:59.999` local time; an unknown date never expires
pub fn is_expired(event_date: Option<NaiveDate>, now: DateTime<Local>) -> bool {
    event_date
        .and_then(end_of_day)
        .map(|end| now.naive_local() > end)
        .unwrap_or(false)
}

pub fn derive(status: RegistrationStatus, event_date: Option<NaiveDate>, now: DateTime<Local>) -> TicketView {
    match status {
        RegistrationStatus::Approved if is_expired(event_date, now) => TicketView {
            state: TicketState::Expired,
            label: "Expired",
            can_view_ticket: false,
            can_cancel: false,
        },
        RegistrationStatus::Approved => TicketView {
            state: TicketState::Confirmed,
            label: "Confirmed",
            can_view_ticket: true,
            can_cancel: false,
        },
        RegistrationStatus::Pending => TicketView {
            state: TicketState::Waiting,
            label: "Waiting for approval",
            can_view_ticket: false,
            can_cancel: true,
        },
        RegistrationStatus::Rejected => TicketView {
            state: TicketState::Declined,
            label: "Declined",
            can_view_ticket: false,
            can_cancel: false,
        },
        RegistrationStatus::Unknown => TicketView {
            state: TicketState::Unknown,
            label: "Unknown",
            can_view_ticket: false,
            can_cancel: false,
        },
    }
}
