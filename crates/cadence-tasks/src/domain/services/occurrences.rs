//! Occurrence planning
//!
//! Decides which occurrences a recurring task should gain next and builds
//! them, without touching storage. The caller persists the parent (whose
//! counter has moved) together with the returned occurrences.

use chrono::NaiveDate;

use crate::domain::aggregates::{Task, TaskError};
use crate::domain::services::RecurrenceCalculator;
use crate::domain::value_objects::{RecurrenceError, RecurrencePolicy};

/// Occurrences produced by one planning pass
#[derive(Debug, Default)]
pub struct OccurrencePlan {
    pub occurrences: Vec<Task>,
    /// The pass stopped at the safety cap while the policy still had dates left
    pub capped: bool,
}

impl OccurrencePlan {
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn last_due_date(&self) -> Option<NaiveDate> {
        self.occurrences.last().and_then(Task::due_date)
    }
}

pub struct OccurrencePlanner;

impl OccurrencePlanner {
    /// Whether the series may produce another occurrence after `cursor`,
    /// the due date of the latest occurrence (or of the parent when none exist).
    pub fn should_continue(policy: &RecurrencePolicy, cursor: NaiveDate) -> bool {
        if policy.limit_reached() {
            return false;
        }
        if policy.end_date().is_some_and(|end| cursor >= end) {
            return false;
        }
        true
    }

    /// Due date of the next occurrence after `cursor`, or `None` when the
    /// series is finished.
    pub fn next_due_date(policy: &RecurrencePolicy, cursor: NaiveDate) -> Result<Option<NaiveDate>, RecurrenceError> {
        if !Self::should_continue(policy, cursor) {
            return Ok(None);
        }

        let next = RecurrenceCalculator::next_date(cursor, policy)?;
        if policy.end_date().is_some_and(|end| next > end) {
            return Ok(None);
        }

        Ok(Some(next))
    }

    /// Build the single next occurrence after `cursor`
    pub fn plan_next(parent: &mut Task, cursor: NaiveDate) -> Result<Option<Task>, PlanError> {
        let policy = parent.recurrence().ok_or(PlanError::NotRecurring)?;

        match Self::next_due_date(policy, cursor)? {
            Some(due) => Ok(Some(parent.spawn_occurrence(due)?)),
            None => Ok(None),
        }
    }

    /// Build occurrences after `cursor` until the policy stops or `accept`
    /// rejects a candidate date, creating at most `safety_cap`.
    pub fn plan_while(
        parent: &mut Task,
        cursor: NaiveDate,
        safety_cap: usize,
        mut accept: impl FnMut(NaiveDate) -> bool,
    ) -> Result<OccurrencePlan, PlanError> {
        let mut plan = OccurrencePlan::default();
        let mut cursor = cursor;

        loop {
            let policy = parent.recurrence().ok_or(PlanError::NotRecurring)?;
            let Some(due) = Self::next_due_date(policy, cursor)? else {
                break;
            };
            if !accept(due) {
                break;
            }
            if plan.occurrences.len() >= safety_cap {
                plan.capped = true;
                break;
            }

            plan.occurrences.push(parent.spawn_occurrence(due)?);
            cursor = due;
        }

        Ok(plan)
    }

    /// Build every remaining occurrence after `cursor`, up to `safety_cap`
    pub fn plan_all(parent: &mut Task, cursor: NaiveDate, safety_cap: usize) -> Result<OccurrencePlan, PlanError> {
        Self::plan_while(parent, cursor, safety_cap, |_| true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("task is not recurring")]
    NotRecurring,

    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),

    #[error(transparent)]
    Task(#[from] TaskError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Priority;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parent(start: NaiveDate, policy: RecurrencePolicy) -> Task {
        Task::create_recurring("Water plants", Priority::Low, start, policy)
    }

    #[test]
    fn test_should_continue_respects_limit_and_end_date() {
        let start = date(2025, 3, 1);
        let policy = RecurrencePolicy::daily(1).unwrap().until(date(2025, 3, 5));
        assert!(OccurrencePlanner::should_continue(&policy, start));
        assert!(!OccurrencePlanner::should_continue(&policy, date(2025, 3, 5)));

        let capped = RecurrencePolicy::daily(1).unwrap().limit(0);
        assert!(!OccurrencePlanner::should_continue(&capped, start));
    }

    #[test]
    fn test_plan_next_chains_from_cursor() {
        let start = date(2025, 3, 1);
        let mut task = parent(start, RecurrencePolicy::weekly(1).unwrap());

        let first = OccurrencePlanner::plan_next(&mut task, start).unwrap().unwrap();
        let second = OccurrencePlanner::plan_next(&mut task, first.due_date().unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(first.due_date(), Some(date(2025, 3, 8)));
        assert_eq!(second.due_date(), Some(date(2025, 3, 15)));
        assert_eq!(task.recurrence().unwrap().occurrences_created(), 2);
    }

    #[test]
    fn test_plan_next_stops_past_end_date() {
        let start = date(2025, 3, 1);
        let mut task = parent(start, RecurrencePolicy::weekly(1).unwrap().until(date(2025, 3, 7)));

        assert!(OccurrencePlanner::plan_next(&mut task, start).unwrap().is_none());
        assert_eq!(task.recurrence().unwrap().occurrences_created(), 0);
    }

    #[test]
    fn test_plan_all_with_limit() {
        let start = date(2025, 1, 31);
        let mut task = parent(start, RecurrencePolicy::monthly(1).unwrap().limit(3));

        let plan = OccurrencePlanner::plan_all(&mut task, start, 100).unwrap();
        let dates: Vec<_> = plan.occurrences.iter().filter_map(Task::due_date).collect();

        assert_eq!(dates, vec![date(2025, 2, 28), date(2025, 3, 28), date(2025, 4, 28)]);
        assert!(!plan.capped);
        assert_eq!(task.recurrence().unwrap().occurrences_created(), 3);
    }

    #[test]
    fn test_plan_all_end_date_inclusive() {
        let start = date(2025, 6, 1);
        let mut task = parent(start, RecurrencePolicy::daily(2).unwrap().until(date(2025, 6, 7)));

        let plan = OccurrencePlanner::plan_all(&mut task, start, 100).unwrap();
        assert_eq!(plan.occurrences.len(), 3);
        assert_eq!(plan.last_due_date(), Some(date(2025, 6, 7)));
    }

    #[test]
    fn test_end_date_before_start_creates_nothing() {
        let start = date(2025, 6, 1);
        let mut task = parent(start, RecurrencePolicy::daily(1).unwrap().until(date(2025, 5, 1)));

        let plan = OccurrencePlanner::plan_all(&mut task, start, 100).unwrap();
        assert!(plan.is_empty());
        assert!(!plan.capped);
    }

    #[test]
    fn test_unbounded_policy_hits_safety_cap() {
        let start = date(2025, 6, 1);
        let mut task = parent(start, RecurrencePolicy::daily(1).unwrap());

        let plan = OccurrencePlanner::plan_all(&mut task, start, 25).unwrap();
        assert_eq!(plan.occurrences.len(), 25);
        assert!(plan.capped);
        assert_eq!(task.recurrence().unwrap().occurrences_created(), 25);
    }

    #[test]
    fn test_plan_while_stops_at_predicate() {
        let start = date(2025, 6, 1);
        let mut task = parent(start, RecurrencePolicy::daily(1).unwrap());
        let horizon = date(2025, 6, 4);

        let plan = OccurrencePlanner::plan_while(&mut task, start, 100, |due| due <= horizon).unwrap();
        assert_eq!(plan.occurrences.len(), 3);
        assert!(!plan.capped);
    }

    #[test]
    fn test_one_off_task_is_rejected() {
        let mut task = Task::create("Buy stamps", Priority::Low);
        assert_eq!(
            OccurrencePlanner::plan_next(&mut task, date(2025, 1, 1)).unwrap_err(),
            PlanError::NotRecurring
        );
    }

    proptest! {
        #[test]
        fn prop_limit_bounds_occurrence_count(
            limit in 0u32..30,
            span in 0i64..60,
            interval in 1u32..4,
        ) {
            let start = date(2025, 1, 1);
            let end = start + chrono::Duration::days(span);
            let policy = RecurrencePolicy::daily(interval).unwrap().until(end).limit(limit);
            let mut task = parent(start, policy);

            let plan = OccurrencePlanner::plan_all(&mut task, start, 100).unwrap();

            // Dates strictly after start and on/before end
            let available = (span / i64::from(interval)) as usize;
            prop_assert_eq!(plan.occurrences.len(), available.min(limit as usize));
            prop_assert!(plan.occurrences.len() <= limit as usize);
        }
    }
}
