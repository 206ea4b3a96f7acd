//! Domain services module

pub mod occurrences;
pub mod recurrence;

pub use occurrences::{OccurrencePlan, OccurrencePlanner, PlanError};
pub use recurrence::RecurrenceCalculator;
