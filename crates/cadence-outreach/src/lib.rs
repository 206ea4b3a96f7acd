//! Cadence outreach
//!
//! Drip-sequence engine for cold outreach.
//!
//! ## Architecture
//!
//! - **Domain Layer**: [`Campaign`] with its [`StepPolicy`], the [`Prospect`]
//!   state machine, the [`ConversionExecutor`] and the
//!   [`CampaignStatsCalculator`]
//! - **Application Layer**: [`OutreachService`]
//! - **Ports Layer**: campaign and prospect use cases inbound; repositories,
//!   the atomic [`ConversionStore`] and [`EventPublisher`] outbound
//! - **Infrastructure Layer**: an in-memory store that keeps outreach and CRM
//!   tables under one lock
//!
//! ## Prospect lifecycle
//!
//! Prospects enroll QUEUED at step 1 and due today. Each sent step advances
//! them and schedules the next contact from the campaign's delays; the fifth
//! unanswered step closes them as NOT_INTERESTED. A reply always ends the
//! sequence, and an interested reply converts the prospect into a CRM
//! contact, deal and interaction exactly once.

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

// Re-exports for convenience
pub use domain::aggregates::{
    Campaign, CampaignError, CampaignStatus, Prospect, ProspectError, ProspectStatus, ResponseKind, SendOutcome,
};
pub use domain::value_objects::{EntityId, StepPolicy, StepPolicyError, MAX_STEPS};
pub use domain::events::{CampaignEvent, OutreachEvent, ProspectEvent};
pub use domain::services::{CampaignStats, CampaignStatsCalculator, Conversion, ConversionExecutor, ConversionRecords};
pub use application::dto::{CreateCampaignCommand, EnrollProspectCommand, ReplyResult, SentResult};
pub use application::OutreachService;
pub use ports::inbound::{CampaignUseCases, ProspectUseCases, UseCaseError};
pub use ports::outbound::{CampaignRepository, ConversionStore, EventPublisher, ProspectRepository};
pub use infrastructure::events::{NoOpEventPublisher, RecordingEventPublisher};
pub use infrastructure::persistence::{InMemoryOutreachStore, OutreachTables};
