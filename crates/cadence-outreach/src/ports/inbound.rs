//! Inbound ports (Use case traits)

use async_trait::async_trait;
use chrono::NaiveDate;

use cadence_common::RepositoryError;

use crate::application::dto::*;
use crate::domain::aggregates::{Campaign, CampaignError, Prospect, ProspectError, ResponseKind};
use crate::domain::services::CampaignStats;
use crate::domain::value_objects::EntityId;

/// Campaign management use cases
#[async_trait]
pub trait CampaignUseCases: Send + Sync {
    async fn create_campaign(&self, command: CreateCampaignCommand) -> Result<Campaign, UseCaseError>;

    async fn update_step_delays(&self, campaign_id: &EntityId, delays: Vec<u32>) -> Result<Campaign, UseCaseError>;

    async fn archive_campaign(&self, campaign_id: &EntityId) -> Result<Campaign, UseCaseError>;

    async fn get_campaign(&self, campaign_id: &EntityId) -> Result<Campaign, UseCaseError>;

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, UseCaseError>;

    async fn get_campaign_stats(&self, campaign_id: &EntityId) -> Result<CampaignStats, UseCaseError>;

    /// Non-terminal prospects due on or before `as_of` (default today),
    /// earliest first
    async fn get_due_prospects(
        &self,
        campaign_id: &EntityId,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<Prospect>, UseCaseError>;
}

/// Prospect sequencing use cases
#[async_trait]
pub trait ProspectUseCases: Send + Sync {
    async fn enroll_prospect(&self, command: EnrollProspectCommand) -> Result<Prospect, UseCaseError>;

    async fn mark_prospect_sent(&self, prospect_id: &EntityId) -> Result<SentResult, UseCaseError>;

    async fn mark_prospect_replied(
        &self,
        prospect_id: &EntityId,
        response: ResponseKind,
        notes: Option<String>,
    ) -> Result<ReplyResult, UseCaseError>;

    async fn get_prospect(&self, prospect_id: &EntityId) -> Result<Prospect, UseCaseError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UseCaseError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("repository error: {0}")]
    Repository(String),
}

impl From<RepositoryError> for UseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => UseCaseError::NotFound(what),
            other => UseCaseError::Repository(other.to_string()),
        }
    }
}

impl From<ProspectError> for UseCaseError {
    fn from(err: ProspectError) -> Self {
        match err {
            ProspectError::InvalidTransition { .. } | ProspectError::ConversionRequired => {
                UseCaseError::InvalidTransition(err.to_string())
            }
            ProspectError::UnknownResponse(_) | ProspectError::DateOutOfRange(_) => {
                UseCaseError::Validation(err.to_string())
            }
        }
    }
}

impl From<CampaignError> for UseCaseError {
    fn from(err: CampaignError) -> Self {
        UseCaseError::Validation(err.to_string())
    }
}
