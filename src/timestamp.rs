//! Serde helpers for backend timestamps
//!
//! Most endpoints emit ISO `2025-01-31T10:15:00` but sales and suppliers use
//! `2025-01-31 10:15:00`. Both are accepted; values are written back as ISO.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub(crate) fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// `Option<NaiveDateTime>` fields
pub(crate) mod optional {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(at) => serializer.serialize_str(&at.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
        }
    }
}

/// Display form used in list rows, `-` when absent
pub fn format_date(value: Option<&NaiveDateTime>) -> String {
    value
        .map(|at| at.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}
