//! Domain Events

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::value_objects::EntityId;

/// Events raised by task aggregates and the occurrence materializer
#[derive(Clone, Debug, PartialEq)]
pub enum TaskEvent {
    Created {
        task_id: EntityId,
        title: String,
        recurring: bool,
        created_at: DateTime<Utc>,
    },

    OccurrenceMaterialized {
        parent_id: EntityId,
        occurrence_id: EntityId,
        due_date: NaiveDate,
        sequence: u32,
    },

    Completed {
        task_id: EntityId,
        completed_at: DateTime<Utc>,
    },

    SeriesDeleted {
        parent_id: EntityId,
        removed: usize,
    },
}

impl TaskEvent {
    pub fn aggregate_id(&self) -> &EntityId {
        match self {
            TaskEvent::Created { task_id, .. } => task_id,
            TaskEvent::OccurrenceMaterialized { parent_id, .. } => parent_id,
            TaskEvent::Completed { task_id, .. } => task_id,
            TaskEvent::SeriesDeleted { parent_id, .. } => parent_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            TaskEvent::Created { .. } => "task.created",
            TaskEvent::OccurrenceMaterialized { .. } => "task.occurrence_materialized",
            TaskEvent::Completed { .. } => "task.completed",
            TaskEvent::SeriesDeleted { .. } => "task.series_deleted",
        }
    }
}
