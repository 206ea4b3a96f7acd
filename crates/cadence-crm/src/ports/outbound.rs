//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must implement.

use async_trait::async_trait;
use cadence_common::RepoResult;

use crate::domain::aggregates::{Contact, Deal, Interaction};
use crate::domain::value_objects::{Email, EntityId};

/// Contact repository port
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn find_contact(&self, id: &EntityId) -> RepoResult<Option<Contact>>;

    async fn find_contact_by_email(&self, email: &Email) -> RepoResult<Option<Contact>>;
}

/// Deal repository port
#[async_trait]
pub trait DealRepository: Send + Sync {
    async fn find_deal(&self, id: &EntityId) -> RepoResult<Option<Deal>>;

    /// Fetch every deal whose id is in `ids`; unknown ids are skipped
    async fn find_deals(&self, ids: &[EntityId]) -> RepoResult<Vec<Deal>>;
}

/// Interaction repository port
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Interactions with a contact, oldest first
    async fn find_interactions_for_contact(&self, contact_id: &EntityId) -> RepoResult<Vec<Interaction>>;
}
