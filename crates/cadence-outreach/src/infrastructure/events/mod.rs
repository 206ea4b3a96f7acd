//! Event publisher implementations

use async_trait::async_trait;
use parking_lot::Mutex;

use cadence_common::RepoResult;

use crate::domain::events::OutreachEvent;
use crate::ports::outbound::EventPublisher;

/// Logs events at debug level and drops them
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, events: Vec<OutreachEvent>) -> RepoResult<()> {
        for event in &events {
            tracing::debug!(
                event_type = event.event_type(),
                aggregate_id = %event.aggregate_id(),
                "outreach event"
            );
        }
        Ok(())
    }
}

/// Keeps every published event in memory
#[derive(Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<OutreachEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OutreachEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(OutreachEvent::event_type).collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, events: Vec<OutreachEvent>) -> RepoResult<()> {
        self.events.lock().extend(events);
        Ok(())
    }
}
