//! Inbound ports (Use case traits)

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::application::dto::{CreateTaskCommand, CreatedTask, MaterializeResult};
use crate::domain::aggregates::Task;
use crate::domain::value_objects::EntityId;

/// Task scheduling use cases
#[async_trait]
pub trait TaskUseCases: Send + Sync {
    /// Create a task; recurring tasks get their occurrences materialized
    async fn create_task(&self, command: CreateTaskCommand) -> Result<CreatedTask, UseCaseError>;

    /// Materialize the single next occurrence of a series
    async fn materialize_next(&self, task_id: &EntityId) -> Result<Option<Task>, UseCaseError>;

    /// Materialize every remaining occurrence of a series, up to the safety cap
    async fn materialize_all(&self, task_id: &EntityId) -> Result<MaterializeResult, UseCaseError>;

    /// Materialize lazily until the series has an occurrence on or after `today`
    async fn advance(&self, task_id: &EntityId, today: NaiveDate) -> Result<MaterializeResult, UseCaseError>;

    /// Mark a task done
    async fn complete_task(&self, task_id: &EntityId) -> Result<Task, UseCaseError>;

    /// Delete a recurring parent and all its occurrences
    async fn delete_series(&self, task_id: &EntityId) -> Result<usize, UseCaseError>;

    async fn get_task(&self, task_id: &EntityId) -> Result<Task, UseCaseError>;

    async fn list_occurrences(&self, task_id: &EntityId) -> Result<Vec<Task>, UseCaseError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, UseCaseError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UseCaseError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid recurrence policy: {0}")]
    InvalidPolicy(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("domain error: {0}")]
    Domain(String),

    #[error("repository error: {0}")]
    Repository(String),
}

impl From<cadence_common::RepositoryError> for UseCaseError {
    fn from(err: cadence_common::RepositoryError) -> Self {
        match err {
            cadence_common::RepositoryError::NotFound(what) => UseCaseError::NotFound(what),
            other => UseCaseError::Repository(other.to_string()),
        }
    }
}

impl From<crate::domain::services::PlanError> for UseCaseError {
    fn from(err: crate::domain::services::PlanError) -> Self {
        use crate::domain::services::PlanError;

        match err {
            PlanError::NotRecurring => UseCaseError::Validation(err.to_string()),
            PlanError::Recurrence(e) => UseCaseError::InvalidPolicy(e.to_string()),
            PlanError::Task(e) => UseCaseError::Domain(e.to_string()),
        }
    }
}
