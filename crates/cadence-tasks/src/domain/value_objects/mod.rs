//! Value Objects module

pub mod recurrence;
pub mod weekday_set;

pub use recurrence::{RecurrenceError, RecurrenceKind, RecurrencePolicy};
pub use weekday_set::{WeekdayParseError, WeekdaySet};
pub use cadence_common::EntityId;
