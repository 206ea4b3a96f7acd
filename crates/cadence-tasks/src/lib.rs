//! Cadence recurring tasks
//!
//! Turns a task's recurrence policy into concrete, dated occurrences.
//!
//! ## Architecture
//!
//! - **Domain Layer**: the [`Task`] aggregate, [`RecurrencePolicy`] and
//!   [`WeekdaySet`] value objects, and two pure services:
//!   [`RecurrenceCalculator`] (next date) and [`OccurrencePlanner`]
//!   (stop conditions and occurrence construction)
//! - **Application Layer**: [`TaskService`], which resolves series, persists
//!   a parent with its new occurrences as one unit and publishes events
//! - **Ports Layer**: [`TaskUseCases`] inbound, [`TaskRepository`] and
//!   [`EventPublisher`] outbound
//! - **Infrastructure Layer**: a single-lock in-memory store
//!
//! Materialization is either eager (every remaining occurrence, bounded by a
//! safety cap) or lazy (one at a time, plus `advance` to catch up to a date).

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

// Re-exports for convenience
pub use domain::aggregates::{Priority, Task, TaskError, TaskStatus};
pub use domain::value_objects::{EntityId, RecurrenceError, RecurrenceKind, RecurrencePolicy, WeekdaySet};
pub use domain::events::TaskEvent;
pub use domain::services::{OccurrencePlan, OccurrencePlanner, PlanError, RecurrenceCalculator};
pub use application::dto::{CreateTaskCommand, CreatedTask, MaterializeResult, RecurrenceSpec};
pub use application::TaskService;
pub use ports::inbound::{TaskUseCases, UseCaseError};
pub use ports::outbound::{EventPublisher, TaskRepository};
pub use infrastructure::events::{NoOpEventPublisher, RecordingEventPublisher};
pub use infrastructure::persistence::{InMemoryTaskStore, TaskTables};
