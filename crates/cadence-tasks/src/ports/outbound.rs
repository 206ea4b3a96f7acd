//! Outbound ports (Repository traits)

use async_trait::async_trait;
use cadence_common::RepoResult;

use crate::domain::aggregates::Task;
use crate::domain::events::TaskEvent;
use crate::domain::value_objects::EntityId;

/// Task repository port
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> RepoResult<Option<Task>>;

    /// Occurrences generated from `parent_id`, ordered by due date
    async fn find_occurrences(&self, parent_id: &EntityId) -> RepoResult<Vec<Task>>;

    /// Every task, ordered by due date with undated tasks last
    async fn list(&self) -> RepoResult<Vec<Task>>;

    /// Insert or replace a single task
    async fn save(&self, task: &Task) -> RepoResult<()>;

    /// Save a recurring parent together with newly generated occurrences.
    ///
    /// All-or-nothing: either the parent and every occurrence are stored, or
    /// nothing changes.
    async fn save_series(&self, parent: &Task, occurrences: &[Task]) -> RepoResult<()>;

    /// Remove a recurring parent and every occurrence pointing at it, as one
    /// unit. Returns the number of tasks removed.
    async fn delete_series(&self, parent_id: &EntityId) -> RepoResult<usize>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<TaskEvent>) -> RepoResult<()>;
}
