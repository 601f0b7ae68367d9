//! Turns a raw activity payload into a [`NewActivity`].
//!
//! Dates are reduced to UTC midnight of their calendar day. For timestamps
//! that carry an offset, the calendar day as written wins; the offset is
//! dropped rather than applied, so every caller shares one day boundary.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::activity::{ActivityKind, DateInput, NewActivity, RawActivity};
use crate::time_utils::{date_to_ms, day_start_ms};

const MAX_ACTIVITY_TYPE_LEN: usize = 64;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("A signed-in user is required")]
    MissingUser,

    #[error("Activity type must not be empty")]
    EmptyActivityType,

    #[error("Activity type must be at most 64 characters")]
    ActivityTypeTooLong,

    #[error("Amount must be a finite number")]
    NonFiniteAmount,

    #[error("Unrecognized date: {0}")]
    InvalidDate(String),
}

pub fn normalize(user_id: &str, raw: &RawActivity) -> Result<NewActivity, ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::MissingUser);
    }

    let activity_type = raw.activity.trim();
    if activity_type.is_empty() {
        return Err(ValidationError::EmptyActivityType);
    }
    if activity_type.chars().count() > MAX_ACTIVITY_TYPE_LEN {
        return Err(ValidationError::ActivityTypeTooLong);
    }

    if !raw.scalar.is_finite() {
        return Err(ValidationError::NonFiniteAmount);
    }

    Ok(NewActivity {
        user_id: user_id.to_string(),
        activity_type: activity_type.to_string(),
        date: normalize_date(&raw.date)?,
        kind: ActivityKind::from_amount(raw.scalar),
    })
}

/// Epoch ms at UTC midnight of the day `input` names.
pub fn normalize_date(input: &DateInput) -> Result<i64, ValidationError> {
    match input {
        DateInput::Millis(ms) => {
            day_start_ms(*ms).ok_or_else(|| ValidationError::InvalidDate(ms.to_string()))
        }
        // `as` saturates, and a saturated value is outside chrono's range
        DateInput::Fractional(ms) if ms.is_finite() => day_start_ms(ms.floor() as i64)
            .ok_or_else(|| ValidationError::InvalidDate(ms.to_string())),
        DateInput::Fractional(ms) => Err(ValidationError::InvalidDate(ms.to_string())),
        DateInput::Text(text) => parse_date_text(text.trim())
            .ok_or_else(|| ValidationError::InvalidDate(text.clone())),
    }
}

fn parse_date_text(text: &str) -> Option<i64> {
    if let Ok(ms) = text.parse::<i64>() {
        return day_start_ms(ms);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date_to_ms(date));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(date_to_ms(dt.date_naive()));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| date_to_ms(dt.date()))
}
