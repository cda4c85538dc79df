//! Profile completeness

use crate::models::User;

/// Percentage of the six profile fields that are filled in
pub fn completeness(user: &User) -> u8 {
    fn filled(value: Option<&str>) -> bool {
        value.map(|v| !v.is_empty()).unwrap_or(false)
    }

    let fields = [
        filled(Some(&user.name)),
        filled(Some(&user.email)),
        filled(user.phone.as_deref()),
        filled(user.bio.as_deref()),
        filled(user.address.as_deref()),
        filled(user.avatar.as_deref()),
    ];
    let count = fields.iter().filter(|f| **f).count();
    ((count as f64 / fields.len() as f64) * 100.0).round() as u8
}
