//! Command handlers
//!
//! Application services that orchestrate use cases.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use cadence_common::{Clock, SchedulingConfig};

use crate::application::dto::*;
use crate::domain::aggregates::{Priority, Task};
use crate::domain::events::TaskEvent;
use crate::domain::services::{OccurrencePlan, OccurrencePlanner};
use crate::domain::value_objects::EntityId;
use crate::ports::inbound::{TaskUseCases, UseCaseError};
use crate::ports::outbound::{EventPublisher, TaskRepository};

/// Task application service
pub struct TaskService {
    task_repo: Arc<dyn TaskRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    config: SchedulingConfig,
}

impl TaskService {
    pub fn new(
        task_repo: Arc<dyn TaskRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        config: SchedulingConfig,
    ) -> Self {
        Self {
            task_repo,
            event_publisher,
            clock,
            config,
        }
    }

    async fn load(&self, task_id: &EntityId) -> Result<Task, UseCaseError> {
        self.task_repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("task {task_id}")))
    }

    /// Resolve a task id (parent or occurrence) to the recurring parent
    async fn load_series_parent(&self, task_id: &EntityId) -> Result<Task, UseCaseError> {
        let task = self.load(task_id).await?;
        if task.is_recurring() {
            return Ok(task);
        }

        match task.parent_task_id() {
            Some(parent_id) => self.load(parent_id).await,
            None => Err(UseCaseError::Validation(format!("task {task_id} is not recurring"))),
        }
    }

    /// Due date new occurrences chain from: the latest existing occurrence,
    /// or the parent's own due date when none exist.
    async fn series_cursor(&self, parent: &Task) -> Result<NaiveDate, UseCaseError> {
        let latest = self
            .task_repo
            .find_occurrences(parent.id())
            .await?
            .iter()
            .filter_map(Task::due_date)
            .max();

        latest
            .or(parent.due_date())
            .ok_or_else(|| UseCaseError::Validation(format!("recurring task {} has no due date", parent.id())))
    }

    /// Persist a parent with its new occurrences as one unit, then publish
    async fn commit_plan(&self, mut parent: Task, plan: OccurrencePlan) -> Result<MaterializeResult, UseCaseError> {
        if plan.capped {
            tracing::warn!(
                parent_id = %parent.id(),
                safety_cap = self.config.materialize_safety_cap,
                "occurrence materialization stopped at safety cap"
            );
        }

        self.task_repo.save_series(&parent, &plan.occurrences).await?;

        let mut occurrences = plan.occurrences;
        let mut events = parent.take_events();
        for occurrence in &mut occurrences {
            events.extend(occurrence.take_events());
        }
        self.publish(events).await?;

        tracing::info!(
            parent_id = %parent.id(),
            created = occurrences.len(),
            last_due = ?occurrences.last().and_then(Task::due_date),
            "materialized occurrences"
        );

        Ok(MaterializeResult {
            parent,
            occurrences,
            capped: plan.capped,
        })
    }

    async fn publish(&self, events: Vec<TaskEvent>) -> Result<(), UseCaseError> {
        if events.is_empty() {
            return Ok(());
        }
        self.event_publisher.publish(events).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskUseCases for TaskService {
    async fn create_task(&self, command: CreateTaskCommand) -> Result<CreatedTask, UseCaseError> {
        let title = command.title.trim();
        if title.is_empty() {
            return Err(UseCaseError::Validation("title must not be empty".into()));
        }

        let priority = match &command.priority {
            Some(label) => label
                .parse::<Priority>()
                .map_err(|e| UseCaseError::Validation(e.to_string()))?,
            None => Priority::default(),
        };

        let policy = command
            .recurrence
            .as_ref()
            .map(RecurrenceSpec::to_policy)
            .transpose()
            .map_err(|e| UseCaseError::InvalidPolicy(e.to_string()))?;

        let mut task = match policy {
            Some(policy) => {
                let due = command.due_date.unwrap_or_else(|| self.clock.today());
                Task::create_recurring(title, priority, due, policy)
            }
            None => {
                let mut task = Task::create(title, priority);
                if let Some(due) = command.due_date {
                    task.set_due_date(due);
                }
                task
            }
        };

        if let Some(description) = command.description {
            task.set_description(description);
        }
        if let Some(project_id) = command.project_id {
            task.link_project(EntityId::from_string(project_id));
        }
        if let Some(goal_id) = command.goal_id {
            task.link_goal(EntityId::from_string(goal_id));
        }

        if !task.is_recurring() {
            self.task_repo.save(&task).await?;
            self.publish(task.take_events()).await?;
            tracing::info!(task_id = %task.id(), "created task");
            return Ok(CreatedTask {
                task,
                occurrences: vec![],
                capped: false,
            });
        }

        let cursor = self.series_cursor(&task).await?;
        let plan = if self.config.eager_materialization {
            OccurrencePlanner::plan_all(&mut task, cursor, self.config.materialize_safety_cap)?
        } else {
            OccurrencePlan {
                occurrences: OccurrencePlanner::plan_next(&mut task, cursor)?.into_iter().collect(),
                capped: false,
            }
        };

        let result = self.commit_plan(task, plan).await?;
        tracing::info!(
            task_id = %result.parent.id(),
            occurrences = result.created(),
            eager = self.config.eager_materialization,
            "created recurring task"
        );

        Ok(CreatedTask {
            task: result.parent,
            occurrences: result.occurrences,
            capped: result.capped,
        })
    }

    async fn materialize_next(&self, task_id: &EntityId) -> Result<Option<Task>, UseCaseError> {
        let mut parent = self.load_series_parent(task_id).await?;
        let cursor = self.series_cursor(&parent).await?;

        let Some(occurrence) = OccurrencePlanner::plan_next(&mut parent, cursor)? else {
            tracing::debug!(parent_id = %parent.id(), %cursor, "series finished, nothing to materialize");
            return Ok(None);
        };

        let plan = OccurrencePlan {
            occurrences: vec![occurrence],
            capped: false,
        };
        let mut result = self.commit_plan(parent, plan).await?;
        Ok(result.occurrences.pop())
    }

    async fn materialize_all(&self, task_id: &EntityId) -> Result<MaterializeResult, UseCaseError> {
        let mut parent = self.load_series_parent(task_id).await?;
        let cursor = self.series_cursor(&parent).await?;

        let plan = OccurrencePlanner::plan_all(&mut parent, cursor, self.config.materialize_safety_cap)?;
        self.commit_plan(parent, plan).await
    }

    async fn advance(&self, task_id: &EntityId, today: NaiveDate) -> Result<MaterializeResult, UseCaseError> {
        let mut parent = self.load_series_parent(task_id).await?;
        let cursor = self.series_cursor(&parent).await?;

        // Keep going until the series has one occurrence on or after today
        let mut caught_up = cursor >= today;
        let plan = OccurrencePlanner::plan_while(&mut parent, cursor, self.config.materialize_safety_cap, |due| {
            if caught_up {
                return false;
            }
            caught_up = due >= today;
            true
        })?;

        self.commit_plan(parent, plan).await
    }

    async fn complete_task(&self, task_id: &EntityId) -> Result<Task, UseCaseError> {
        let mut task = self.load(task_id).await?;

        task.complete(self.clock.now())
            .map_err(|e| UseCaseError::Domain(e.to_string()))?;

        self.task_repo.save(&task).await?;
        self.publish(task.take_events()).await?;

        tracing::info!(task_id = %task.id(), "completed task");
        Ok(task)
    }

    async fn delete_series(&self, task_id: &EntityId) -> Result<usize, UseCaseError> {
        let parent = self.load_series_parent(task_id).await?;

        let removed = self.task_repo.delete_series(parent.id()).await?;
        self.publish(vec![TaskEvent::SeriesDeleted {
            parent_id: parent.id().clone(),
            removed,
        }])
        .await?;

        tracing::info!(parent_id = %parent.id(), removed, "deleted recurring series");
        Ok(removed)
    }

    async fn get_task(&self, task_id: &EntityId) -> Result<Task, UseCaseError> {
        self.load(task_id).await
    }

    async fn list_occurrences(&self, task_id: &EntityId) -> Result<Vec<Task>, UseCaseError> {
        let parent = self.load_series_parent(task_id).await?;
        Ok(self.task_repo.find_occurrences(parent.id()).await?)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, UseCaseError> {
        Ok(self.task_repo.list().await?)
    }
}
