//! Coercion of raw form input into typed request fields

use chrono::NaiveDate;
use std::str::FromStr;

use crate::error::{Error, Result};

pub(crate) fn required_text(value: &str, label: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{} is required", label)));
    }
    Ok(value.to_string())
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn required_number<T: FromStr>(value: &str, label: &str) -> Result<T> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{} is required", label)));
    }
    value
        .parse()
        .map_err(|_| Error::validation(format!("{} must be a number", label)))
}

pub(crate) fn optional_number<T: FromStr>(value: &str, label: &str) -> Result<Option<T>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    required_number(value, label).map(Some)
}

pub(crate) fn positive_amount(value: &str, label: &str) -> Result<f64> {
    let amount: f64 = required_number(value, label)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::validation(format!(
            "{} must be greater than zero",
            label
        )));
    }
    Ok(amount)
}

pub(crate) fn non_negative(value: &str, label: &str) -> Result<i64> {
    let number: i64 = required_number(value, label)?;
    if number < 0 {
        return Err(Error::validation(format!("{} cannot be negative", label)));
    }
    Ok(number)
}

pub(crate) fn at_least_one(value: &str, label: &str) -> Result<i64> {
    let number: i64 = required_number(value, label)?;
    if number < 1 {
        return Err(Error::validation(format!("{} must be at least 1", label)));
    }
    Ok(number)
}

/// Accepts `YYYY-MM-DD`, the format of a date input
pub(crate) fn optional_date(value: &str, label: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| Error::validation(format!("{} must be a date (YYYY-MM-DD)", label)))
}

/// Render a number the way an input field shows it
pub(crate) fn number_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// `-` for absent or blank display values
pub fn display_or_dash(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => "-".to_string(),
    }
}
