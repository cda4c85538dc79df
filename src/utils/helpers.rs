//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the client.

use std::sync::OnceLock;
use chrono::{DateTime, Local, NaiveDate};
use regex::Regex;

const AVATAR_SERVICE_URL: &str = "https://ui-avatars.com/api/";

/// Format a calendar date for display
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format an optional date, falling back to a dash
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Format a timestamp in the local timezone
pub fn format_timestamp(timestamp: DateTime<Local>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a ticket price, zero meaning free entry
pub fn format_price(price: f64) -> String {
    if price > 0.0 {
        format!("{} BDT", price)
    } else {
        "FREE".to_string()
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
        })
        .is_match(email)
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && phone.len() >= 10
}

/// Generated avatar URL used when a user has not uploaded a picture
pub fn fallback_avatar_url(name: &str) -> String {
    format!("{}?name={}", AVATAR_SERVICE_URL, urlencoding::encode(name))
}

/// Resolve an image reference against the API base URL
///
/// Absolute http(s) URLs are kept as is, relative paths are joined onto the
/// base, and a missing reference yields the placeholder.
pub fn resolve_image(reference: Option<&str>, base_url: &str, placeholder: &str) -> String {
    match reference.map(str::trim) {
        Some(r) if r.starts_with("http://") || r.starts_with("https://") => r.to_string(),
        Some(r) if !r.is_empty() => {
            let base = base_url.trim_end_matches('/');
            if r.starts_with('/') {
                format!("{}{}", base, r)
            } else {
                format!("{}/{}", base, r)
            }
        }
        _ => placeholder.to_string(),
    }
}
