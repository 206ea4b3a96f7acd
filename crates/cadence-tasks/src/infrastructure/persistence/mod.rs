//! In-memory task store
//!
//! All tasks live in one table behind a single lock, so multi-record writes
//! (a parent plus its occurrences, or a whole series delete) are applied
//! under one write guard and are never observed half-done.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use cadence_common::{RepoResult, RepositoryError};

use crate::domain::aggregates::Task;
use crate::domain::value_objects::EntityId;
use crate::ports::outbound::TaskRepository;

/// Serializable table of tasks keyed by id
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskTables {
    tasks: HashMap<EntityId, Task>,
}

impl TaskTables {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn ordered(mut tasks: Vec<Task>) -> Vec<Task> {
        // Undated tasks sort last
        tasks.sort_by(|a, b| {
            (a.due_date().is_none(), a.due_date(), a.created_at())
                .cmp(&(b.due_date().is_none(), b.due_date(), b.created_at()))
        });
        tasks
    }
}

#[derive(Default)]
pub struct InMemoryTaskStore {
    tables: RwLock<TaskTables>,
    fail_next_commit: AtomicBool,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(tables: TaskTables) -> Self {
        Self {
            tables: RwLock::new(tables),
            fail_next_commit: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> TaskTables {
        self.tables.read().clone()
    }

    /// Make the next multi-record write fail before anything is applied
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    fn check_commit(&self) -> RepoResult<()> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(RepositoryError::Storage("commit rejected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn find_by_id(&self, id: &EntityId) -> RepoResult<Option<Task>> {
        Ok(self.tables.read().tasks.get(id).cloned())
    }

    async fn find_occurrences(&self, parent_id: &EntityId) -> RepoResult<Vec<Task>> {
        let tables = self.tables.read();
        let occurrences = tables
            .tasks
            .values()
            .filter(|t| t.parent_task_id() == Some(parent_id))
            .cloned()
            .collect();
        Ok(TaskTables::ordered(occurrences))
    }

    async fn list(&self) -> RepoResult<Vec<Task>> {
        let tables = self.tables.read();
        Ok(TaskTables::ordered(tables.tasks.values().cloned().collect()))
    }

    async fn save(&self, task: &Task) -> RepoResult<()> {
        self.tables.write().tasks.insert(task.id().clone(), task.clone());
        Ok(())
    }

    async fn save_series(&self, parent: &Task, occurrences: &[Task]) -> RepoResult<()> {
        let mut tables = self.tables.write();

        for occurrence in occurrences {
            if occurrence.parent_task_id() != Some(parent.id()) {
                return Err(RepositoryError::Conflict(format!(
                    "task {} does not belong to series {}",
                    occurrence.id(),
                    parent.id()
                )));
            }
            if tables.tasks.contains_key(occurrence.id()) {
                return Err(RepositoryError::DuplicateKey(occurrence.id().to_string()));
            }
        }
        self.check_commit()?;

        tables.tasks.insert(parent.id().clone(), parent.clone());
        for occurrence in occurrences {
            tables.tasks.insert(occurrence.id().clone(), occurrence.clone());
        }
        Ok(())
    }

    async fn delete_series(&self, parent_id: &EntityId) -> RepoResult<usize> {
        let mut tables = self.tables.write();

        if !tables.tasks.contains_key(parent_id) {
            return Err(RepositoryError::NotFound(format!("task {parent_id}")));
        }
        self.check_commit()?;

        let before = tables.tasks.len();
        tables
            .tasks
            .retain(|id, task| id != parent_id && task.parent_task_id() != Some(parent_id));
        Ok(before - tables.tasks.len())
    }
}
