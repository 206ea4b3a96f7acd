//! Outbound ports (Repository traits)
//!
//! Deal lookups for pipeline value go through `cadence_crm::DealRepository`.

use async_trait::async_trait;
use cadence_common::RepoResult;

use crate::domain::aggregates::{Campaign, Prospect};
use crate::domain::events::OutreachEvent;
use crate::domain::services::ConversionRecords;
use crate::domain::value_objects::{Email, EntityId};

/// Campaign repository port
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn find_campaign(&self, id: &EntityId) -> RepoResult<Option<Campaign>>;

    /// Every campaign, oldest first
    async fn list_campaigns(&self) -> RepoResult<Vec<Campaign>>;

    async fn save_campaign(&self, campaign: &Campaign) -> RepoResult<()>;
}

/// Prospect repository port
#[async_trait]
pub trait ProspectRepository: Send + Sync {
    async fn find_prospect(&self, id: &EntityId) -> RepoResult<Option<Prospect>>;

    /// Every prospect enrolled in a campaign
    async fn find_prospects_by_campaign(&self, campaign_id: &EntityId) -> RepoResult<Vec<Prospect>>;

    async fn find_prospect_by_email(&self, campaign_id: &EntityId, email: &Email) -> RepoResult<Option<Prospect>>;

    async fn save_prospect(&self, prospect: &Prospect) -> RepoResult<()>;
}

/// Writes a conversion as one unit
#[async_trait]
pub trait ConversionStore: Send + Sync {
    /// Persist the stamped prospect together with its contact, deal and
    /// interaction. Either all four land or none do.
    async fn commit_conversion(&self, prospect: &Prospect, records: &ConversionRecords) -> RepoResult<()>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<OutreachEvent>) -> RepoResult<()>;
}
