//! Recurrence policy value object

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::weekday_set::{WeekdayParseError, WeekdaySet};

/// Unit a recurrence repeats in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl FromStr for RecurrenceKind {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(RecurrenceError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

/// How a recurring task repeats and when it stops.
///
/// `occurrences_created` is a running counter owned by occurrence
/// materialization; nothing outside this crate can change it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePolicy {
    kind: RecurrenceKind,
    interval: u32,
    #[serde(default, skip_serializing_if = "WeekdaySet::is_empty")]
    weekdays: WeekdaySet,
    end_date: Option<NaiveDate>,
    occurrence_limit: Option<u32>,
    #[serde(default)]
    occurrences_created: u32,
}

impl RecurrencePolicy {
    /// Repeat every `interval` units of `kind`
    pub fn new(kind: RecurrenceKind, interval: u32) -> Result<Self, RecurrenceError> {
        if interval == 0 {
            return Err(RecurrenceError::NonPositiveInterval);
        }

        Ok(Self {
            kind,
            interval,
            weekdays: WeekdaySet::EMPTY,
            end_date: None,
            occurrence_limit: None,
            occurrences_created: 0,
        })
    }

    pub fn daily(interval: u32) -> Result<Self, RecurrenceError> {
        Self::new(RecurrenceKind::Daily, interval)
    }

    pub fn weekly(interval: u32) -> Result<Self, RecurrenceError> {
        Self::new(RecurrenceKind::Weekly, interval)
    }

    pub fn monthly(interval: u32) -> Result<Self, RecurrenceError> {
        Self::new(RecurrenceKind::Monthly, interval)
    }

    pub fn yearly(interval: u32) -> Result<Self, RecurrenceError> {
        Self::new(RecurrenceKind::Yearly, interval)
    }

    /// Restrict a weekly policy to specific weekdays; ignored for other kinds
    pub fn on_weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = weekdays;
        self
    }

    /// Inclusive last date an occurrence may fall on
    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Inclusive cap on the number of occurrences
    pub fn limit(mut self, count: u32) -> Self {
        self.occurrence_limit = Some(count);
        self
    }

    pub fn kind(&self) -> RecurrenceKind { self.kind }
    pub fn interval(&self) -> u32 { self.interval }
    pub fn weekdays(&self) -> &WeekdaySet { &self.weekdays }
    pub fn end_date(&self) -> Option<NaiveDate> { self.end_date }
    pub fn occurrence_limit(&self) -> Option<u32> { self.occurrence_limit }
    pub fn occurrences_created(&self) -> u32 { self.occurrences_created }

    /// Check the invariants `new` enforces; policies read back from storage
    /// bypass the constructor.
    pub fn validate(&self) -> Result<(), RecurrenceError> {
        if self.interval == 0 {
            return Err(RecurrenceError::NonPositiveInterval);
        }
        Ok(())
    }

    /// True once the occurrence limit has been reached
    pub fn limit_reached(&self) -> bool {
        self.occurrence_limit
            .is_some_and(|limit| self.occurrences_created >= limit)
    }

    pub(crate) fn record_occurrence(&mut self) {
        self.occurrences_created += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurrenceError {
    #[error("unknown recurrence type: {0}")]
    UnknownKind(String),

    #[error("recurrence interval must be at least 1")]
    NonPositiveInterval,

    #[error(transparent)]
    Weekday(#[from] WeekdayParseError),

    #[error("next occurrence after {0} is outside the supported calendar range")]
    DateOutOfRange(NaiveDate),
}
