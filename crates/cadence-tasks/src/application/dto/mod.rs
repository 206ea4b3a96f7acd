//! Data Transfer Objects (DTOs)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::Task;
use crate::domain::value_objects::{RecurrenceError, RecurrenceKind, RecurrencePolicy, WeekdaySet};

// =============================================================================
// Task Commands
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateTaskCommand {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    /// Defaults to today for recurring tasks
    pub due_date: Option<NaiveDate>,
    pub project_id: Option<String>,
    pub goal_id: Option<String>,
    pub recurrence: Option<RecurrenceSpec>,
}

/// Recurrence settings as supplied by a caller, before validation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecurrenceSpec {
    pub kind: String,
    pub interval: i64,
    /// Comma-delimited weekday labels, e.g. `"mon,wed,fri"`
    pub weekdays: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub occurrence_limit: Option<u32>,
}

impl RecurrenceSpec {
    pub fn new(kind: impl Into<String>, interval: i64) -> Self {
        Self {
            kind: kind.into(),
            interval,
            weekdays: None,
            end_date: None,
            occurrence_limit: None,
        }
    }

    /// Validate into a fresh policy with a zero occurrence counter
    pub fn to_policy(&self) -> Result<RecurrencePolicy, RecurrenceError> {
        let kind: RecurrenceKind = self.kind.parse()?;
        let interval = u32::try_from(self.interval).map_err(|_| RecurrenceError::NonPositiveInterval)?;
        let mut policy = RecurrencePolicy::new(kind, interval)?;

        if let Some(labels) = &self.weekdays {
            policy = policy.on_weekdays(labels.parse::<WeekdaySet>()?);
        }
        if let Some(end) = self.end_date {
            policy = policy.until(end);
        }
        if let Some(limit) = self.occurrence_limit {
            policy = policy.limit(limit);
        }

        Ok(policy)
    }
}

// =============================================================================
// Results
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct CreatedTask {
    pub task: Task,
    pub occurrences: Vec<Task>,
    /// Eager materialization stopped at the safety cap
    pub capped: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct MaterializeResult {
    pub parent: Task,
    pub occurrences: Vec<Task>,
    pub capped: bool,
}

impl MaterializeResult {
    pub fn created(&self) -> usize {
        self.occurrences.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_input_to_policy() {
        let spec = RecurrenceSpec {
            weekdays: Some("fri,sun".into()),
            occurrence_limit: Some(6),
            ..RecurrenceSpec::new("weekly", 1)
        };

        let policy = spec.to_policy().unwrap();
        assert_eq!(policy.kind(), RecurrenceKind::Weekly);
        assert_eq!(policy.weekdays().to_string(), "fri,sun");
        assert_eq!(policy.occurrence_limit(), Some(6));
    }

    #[test]
    fn test_recurrence_input_rejects_bad_values() {
        assert_eq!(
            RecurrenceSpec::new("hourly", 1).to_policy(),
            Err(RecurrenceError::UnknownKind("hourly".into()))
        );
        assert_eq!(
            RecurrenceSpec::new("daily", 0).to_policy(),
            Err(RecurrenceError::NonPositiveInterval)
        );
        assert_eq!(
            RecurrenceSpec::new("daily", -2).to_policy(),
            Err(RecurrenceError::NonPositiveInterval)
        );

        let spec = RecurrenceSpec {
            weekdays: Some("mon,someday".into()),
            ..RecurrenceSpec::new("weekly", 1)
        };
        assert!(matches!(spec.to_policy(), Err(RecurrenceError::Weekday(_))));
    }
}
