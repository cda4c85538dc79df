//! Admin registration queue

use crate::models::{Decision, Registration, RegistrationStatus};

/// Action column for a queue row; decided rows are locked
pub fn action_label(status: RegistrationStatus) -> &'static str {
    if status.is_pending() {
        "Approve / Reject"
    } else {
        "Status Locked"
    }
}

/// Record a successful decision in the local list
///
/// Only the row with `id` changes; returns false when no row matched.
pub fn apply_decision(registrations: &mut [Registration], id: &str, decision: Decision) -> bool {
    match registrations.iter_mut().find(|r| r.id == id) {
        Some(row) => {
            row.status = decision.resulting_status();
            true
        }
        None => false,
    }
}

pub fn pending_count(registrations: &[Registration]) -> usize {
    registrations.iter().filter(|r| r.status.is_pending()).count()
}
