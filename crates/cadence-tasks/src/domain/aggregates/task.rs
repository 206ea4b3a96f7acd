//! Task Aggregate
//!
//! A task is either a one-off item, a recurring parent carrying a
//! [`RecurrencePolicy`], or an occurrence generated from such a parent.
//! Occurrences never carry a policy of their own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::TaskEvent;
use crate::domain::value_objects::{EntityId, RecurrencePolicy};

/// Task aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    id: EntityId,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    status: TaskStatus,
    priority: Priority,
    project_id: Option<EntityId>,
    goal_id: Option<EntityId>,
    recurrence: Option<RecurrencePolicy>,
    parent_task_id: Option<EntityId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    events: Vec<TaskEvent>,
}

impl Task {
    /// Create a new one-off task
    pub fn create(title: impl Into<String>, priority: Priority) -> Self {
        let now = Utc::now();
        let id = EntityId::new();
        let title = title.into();

        let mut task = Self {
            id: id.clone(),
            title: title.clone(),
            description: None,
            due_date: None,
            status: TaskStatus::Todo,
            priority,
            project_id: None,
            goal_id: None,
            recurrence: None,
            parent_task_id: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
            events: vec![],
        };

        task.raise_event(TaskEvent::Created {
            task_id: id,
            title,
            recurring: false,
            created_at: now,
        });

        task
    }

    /// Create a recurring parent task due on `due_date`
    pub fn create_recurring(
        title: impl Into<String>,
        priority: Priority,
        due_date: NaiveDate,
        policy: RecurrencePolicy,
    ) -> Self {
        let mut task = Self::create(title, priority);
        task.due_date = Some(due_date);
        task.recurrence = Some(policy);
        for event in &mut task.events {
            if let TaskEvent::Created { recurring, .. } = event {
                *recurring = true;
            }
        }
        task
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
    pub fn due_date(&self) -> Option<NaiveDate> { self.due_date }
    pub fn status(&self) -> TaskStatus { self.status }
    pub fn priority(&self) -> Priority { self.priority }
    pub fn project_id(&self) -> Option<&EntityId> { self.project_id.as_ref() }
    pub fn goal_id(&self) -> Option<&EntityId> { self.goal_id.as_ref() }
    pub fn recurrence(&self) -> Option<&RecurrencePolicy> { self.recurrence.as_ref() }
    pub fn parent_task_id(&self) -> Option<&EntityId> { self.parent_task_id.as_ref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn completed_at(&self) -> Option<DateTime<Utc>> { self.completed_at }

    pub fn is_recurring(&self) -> bool { self.recurrence.is_some() }
    pub fn is_occurrence(&self) -> bool { self.parent_task_id.is_some() }

    /// Id of the recurring series this task belongs to, if any
    pub fn series_id(&self) -> Option<&EntityId> {
        if self.is_recurring() {
            Some(&self.id)
        } else {
            self.parent_task_id.as_ref()
        }
    }

    // =========================================================================
    // Business Operations
    // =========================================================================

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
        self.touch();
    }

    pub fn set_due_date(&mut self, due_date: NaiveDate) {
        self.due_date = Some(due_date);
        self.touch();
    }

    pub fn link_project(&mut self, project_id: EntityId) {
        self.project_id = Some(project_id);
        self.touch();
    }

    pub fn link_goal(&mut self, goal_id: EntityId) {
        self.goal_id = Some(goal_id);
        self.touch();
    }

    /// Mark the task done
    pub fn complete(&mut self, at: DateTime<Utc>) -> Result<(), TaskError> {
        if self.status == TaskStatus::Done {
            return Err(TaskError::AlreadyCompleted);
        }

        self.status = TaskStatus::Done;
        self.completed_at = Some(at);
        self.touch();

        self.raise_event(TaskEvent::Completed {
            task_id: self.id.clone(),
            completed_at: at,
        });

        Ok(())
    }

    /// Build the occurrence of this recurring task due on `due_date` and
    /// count it against the policy.
    ///
    /// The occurrence copies title, description, priority and the project and
    /// goal links, and points back at this task.
    pub fn spawn_occurrence(&mut self, due_date: NaiveDate) -> Result<Task, TaskError> {
        let policy = self.recurrence.as_mut().ok_or(TaskError::NotRecurring)?;
        policy.record_occurrence();
        let sequence = policy.occurrences_created();

        let now = Utc::now();
        let occurrence = Task {
            id: EntityId::new(),
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: Some(due_date),
            status: TaskStatus::Todo,
            priority: self.priority,
            project_id: self.project_id.clone(),
            goal_id: self.goal_id.clone(),
            recurrence: None,
            parent_task_id: Some(self.id.clone()),
            created_at: now,
            updated_at: now,
            completed_at: None,
            events: vec![],
        };
        self.touch();

        self.raise_event(TaskEvent::OccurrenceMaterialized {
            parent_id: self.id.clone(),
            occurrence_id: occurrence.id.clone(),
            due_date,
            sequence,
        });

        Ok(occurrence)
    }

    /// Get and clear accumulated domain events
    pub fn take_events(&mut self) -> Vec<TaskEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: TaskEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Supporting Types
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Cancelled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl std::str::FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(TaskError::UnknownPriority(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task is not recurring")]
    NotRecurring,

    #[error("task is already completed")]
    AlreadyCompleted,

    #[error("unknown priority: {0}")]
    UnknownPriority(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recurring_task() -> Task {
        let mut task = Task::create_recurring(
            "Weekly review",
            Priority::High,
            date(2025, 11, 21),
            RecurrencePolicy::weekly(1).unwrap(),
        );
        task.set_description("Inbox zero, plan next week");
        task.link_project(EntityId::from_string("project-ops"));
        task
    }

    #[test]
    fn test_one_off_task() {
        let mut task = Task::create("Call accountant", Priority::default());
        assert!(!task.is_recurring());
        assert!(!task.is_occurrence());
        assert!(task.series_id().is_none());
        assert!(matches!(
            task.take_events()[0],
            TaskEvent::Created { recurring: false, .. }
        ));
    }

    #[test]
    fn test_recurring_created_event_flags_recurrence() {
        let mut task = recurring_task();
        assert!(task.is_recurring());
        assert_eq!(task.series_id(), Some(task.id()));
        assert!(matches!(
            task.take_events()[0],
            TaskEvent::Created { recurring: true, .. }
        ));
    }

    #[test]
    fn test_spawn_occurrence_copies_fields_and_counts() {
        let mut parent = recurring_task();
        parent.take_events();

        let occurrence = parent.spawn_occurrence(date(2025, 11, 28)).unwrap();

        assert_eq!(occurrence.title(), "Weekly review");
        assert_eq!(occurrence.description(), Some("Inbox zero, plan next week"));
        assert_eq!(occurrence.priority(), Priority::High);
        assert_eq!(occurrence.project_id(), parent.project_id());
        assert_eq!(occurrence.parent_task_id(), Some(parent.id()));
        assert_eq!(occurrence.due_date(), Some(date(2025, 11, 28)));
        assert!(occurrence.recurrence().is_none());
        assert_eq!(occurrence.series_id(), Some(parent.id()));

        assert_eq!(parent.recurrence().unwrap().occurrences_created(), 1);
        assert!(matches!(
            parent.take_events()[0],
            TaskEvent::OccurrenceMaterialized { sequence: 1, .. }
        ));
    }

    #[test]
    fn test_one_off_task_cannot_spawn() {
        let mut task = Task::create("Renew domain", Priority::Low);
        assert_eq!(
            task.spawn_occurrence(date(2025, 1, 1)).unwrap_err(),
            TaskError::NotRecurring
        );
    }

    #[test]
    fn test_complete_twice() {
        let mut task = Task::create("Send invoice", Priority::Urgent);
        task.complete(Utc::now()).unwrap();
        assert_eq!(task.status(), TaskStatus::Done);
        assert_eq!(task.complete(Utc::now()), Err(TaskError::AlreadyCompleted));
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("URGENT".parse::<Priority>(), Ok(Priority::Urgent));
        assert!("someday".parse::<Priority>().is_err());
    }
}
