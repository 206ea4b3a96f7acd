//! CLI Commands

pub mod campaigns;
pub mod config;
pub mod prospects;
pub mod recur;
pub mod tasks;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use cadence_common::{CadenceConfig, Clock, FixedClock, SystemClock};
use cadence_outreach::{InMemoryOutreachStore, OutreachService};
use cadence_tasks::{InMemoryTaskStore, TaskService};

use crate::state::Snapshot;

/// Engines wired over the state file for one invocation
pub struct Context {
    pub tasks: TaskService,
    pub outreach: OutreachService,
    pub today: NaiveDate,
    task_store: Arc<InMemoryTaskStore>,
    outreach_store: Arc<InMemoryOutreachStore>,
    state_path: PathBuf,
}

impl Context {
    pub fn open(config: &CadenceConfig, state_path: PathBuf, today: Option<NaiveDate>) -> anyhow::Result<Self> {
        let snapshot = Snapshot::load(&state_path)?;
        let clock: Arc<dyn Clock> = match today {
            Some(date) => Arc::new(FixedClock::on(date)),
            None => Arc::new(SystemClock),
        };

        let task_store = Arc::new(InMemoryTaskStore::from_snapshot(snapshot.tasks));
        let outreach_store = Arc::new(InMemoryOutreachStore::from_snapshot(snapshot.outreach));

        let tasks = TaskService::new(
            task_store.clone(),
            Arc::new(cadence_tasks::NoOpEventPublisher),
            clock.clone(),
            config.scheduling.clone(),
        );
        let outreach = OutreachService::new(
            outreach_store.clone(),
            outreach_store.clone(),
            outreach_store.clone(),
            outreach_store.clone(),
            Arc::new(cadence_outreach::NoOpEventPublisher),
            clock.clone(),
            config.outreach.clone(),
        );

        Ok(Self {
            tasks,
            outreach,
            today: clock.today(),
            task_store,
            outreach_store,
            state_path,
        })
    }

    /// Write both engines' tables back to the state file
    pub fn persist(&self) -> anyhow::Result<()> {
        let snapshot = Snapshot {
            tasks: self.task_store.snapshot(),
            outreach: self.outreach_store.snapshot(),
        };
        snapshot.save(&self.state_path)
    }
}
