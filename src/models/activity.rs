use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of `ActivityTable`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Activity {
    #[sqlx(rename = "rowIdNum")]
    #[serde(rename = "rowIdNum")]
    pub row_id: i64,
    #[sqlx(rename = "userId")]
    #[serde(rename = "userId")]
    pub user_id: String,
    #[sqlx(rename = "activity")]
    #[serde(rename = "activity")]
    pub activity_type: String,
    /// Epoch ms, UTC midnight.
    pub date: i64,
    pub amount: f64,
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        ActivityKind::from_amount(self.amount)
    }
}

/// Completed log entry or planned reminder.
///
/// Storage has no status column: a non-positive amount marks a planned
/// entry. `from_amount` and `amount` are the only places that rule lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityKind {
    Completed(f64),
    Planned(f64),
}

impl ActivityKind {
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            Self::Completed(amount)
        } else {
            Self::Planned(amount)
        }
    }

    pub fn amount(self) -> f64 {
        match self {
            Self::Completed(a) | Self::Planned(a) => a,
        }
    }

    pub fn is_planned(self) -> bool {
        matches!(self, Self::Planned(_))
    }
}

/// A validated activity ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: String,
    pub activity_type: String,
    pub date: i64,
    pub kind: ActivityKind,
}

/// POST body for logging or planning an activity.
#[derive(Debug, Clone, Deserialize)]
pub struct RawActivity {
    #[serde(alias = "activityType", alias = "type")]
    pub activity: String,
    pub date: DateInput,
    #[serde(alias = "amount")]
    pub scalar: f64,
}

/// Dates arrive either as epoch ms or as a date/datetime string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

/// A resolved planned activity, in the shape clients expect.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reminder {
    pub activity: String,
    pub date: i64,
    pub scalar: f64,
}

/// Result of the `MAX(date)` aggregate over planned rows. Every column is
/// NULL when nothing matched.
#[derive(Debug, FromRow)]
pub struct PlannedRow {
    #[sqlx(rename = "rowIdNum")]
    pub row_id: Option<i64>,
    pub activity: Option<String>,
    #[sqlx(rename = "maxDate")]
    pub max_date: Option<i64>,
    pub amount: Option<f64>,
}

impl PlannedRow {
    pub fn into_reminder(self) -> Option<Reminder> {
        self.row_id?;
        Some(Reminder {
            activity: self.activity?,
            date: self.max_date?,
            scalar: self.amount?,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct WeekBucket {
    pub date: i64,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub date: Option<i64>,
    pub activity: Option<String>,
}
