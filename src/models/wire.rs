//! Serde helpers for the loosely typed fields the API returns

use std::str::FromStr;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Calendar dates arrive either as `YYYY-MM-DD` or as a full ISO timestamp;
/// the date part is authoritative. Anything else decodes as no date.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use tracing::warn;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };
        match text.trim() {
            "" => Ok(None),
            s => match parse(s) {
                Ok(date) => Ok(Some(date)),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable date");
                    Ok(None)
                }
            },
        }
    }

    /// Parse the date part of a date or timestamp string
    pub fn parse(s: &str) -> Result<NaiveDate, String> {
        let date_part = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|e| format!("invalid date {:?}: {}", s, e))
    }
}

/// Accept a number, a numeric string, an empty string or null.
/// Values that do not fit `T` (negative seats, free text) decode as `None`.
pub fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s,
        Some(other) => {
            warn!(value = %other, "Ignoring non-numeric value");
            return Ok(None);
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<T>() {
        Ok(n) => Ok(Some(n)),
        Err(e) => {
            warn!(value = text, error = %e, "Ignoring unreadable number");
            Ok(None)
        }
    }
}
