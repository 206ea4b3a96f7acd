//! In-memory outreach store
//!
//! Campaigns, prospects and the CRM tables share one lock. A conversion
//! (prospect stamp plus contact, deal and interaction) is validated in full
//! and then applied under a single write guard.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use cadence_common::{RepoResult, RepositoryError};
use cadence_crm::{
    Contact, ContactRepository, CrmTables, Deal, DealRepository, Interaction, InteractionRepository,
};

use crate::domain::aggregates::{Campaign, Prospect};
use crate::domain::services::ConversionRecords;
use crate::domain::value_objects::{Email, EntityId};
use crate::ports::outbound::{CampaignRepository, ConversionStore, ProspectRepository};

/// Serializable table set behind the store's lock
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OutreachTables {
    campaigns: HashMap<EntityId, Campaign>,
    prospects: HashMap<EntityId, Prospect>,
    pub crm: CrmTables,
}

impl OutreachTables {
    pub fn campaign_count(&self) -> usize {
        self.campaigns.len()
    }

    pub fn prospect_count(&self) -> usize {
        self.prospects.len()
    }
}

#[derive(Default)]
pub struct InMemoryOutreachStore {
    tables: RwLock<OutreachTables>,
    fail_next_commit: AtomicBool,
}

impl InMemoryOutreachStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(tables: OutreachTables) -> Self {
        Self {
            tables: RwLock::new(tables),
            fail_next_commit: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> OutreachTables {
        self.tables.read().clone()
    }

    /// Make the next conversion commit fail before anything is applied
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CampaignRepository for InMemoryOutreachStore {
    async fn find_campaign(&self, id: &EntityId) -> RepoResult<Option<Campaign>> {
        Ok(self.tables.read().campaigns.get(id).cloned())
    }

    async fn list_campaigns(&self) -> RepoResult<Vec<Campaign>> {
        let mut campaigns: Vec<Campaign> = self.tables.read().campaigns.values().cloned().collect();
        campaigns.sort_by_key(Campaign::created_at);
        Ok(campaigns)
    }

    async fn save_campaign(&self, campaign: &Campaign) -> RepoResult<()> {
        self.tables.write().campaigns.insert(campaign.id().clone(), campaign.clone());
        Ok(())
    }
}

#[async_trait]
impl ProspectRepository for InMemoryOutreachStore {
    async fn find_prospect(&self, id: &EntityId) -> RepoResult<Option<Prospect>> {
        Ok(self.tables.read().prospects.get(id).cloned())
    }

    async fn find_prospects_by_campaign(&self, campaign_id: &EntityId) -> RepoResult<Vec<Prospect>> {
        let tables = self.tables.read();
        let mut prospects: Vec<Prospect> = tables
            .prospects
            .values()
            .filter(|p| p.campaign_id() == campaign_id)
            .cloned()
            .collect();
        prospects.sort_by_key(Prospect::created_at);
        Ok(prospects)
    }

    async fn find_prospect_by_email(&self, campaign_id: &EntityId, email: &Email) -> RepoResult<Option<Prospect>> {
        let tables = self.tables.read();
        Ok(tables
            .prospects
            .values()
            .find(|p| p.campaign_id() == campaign_id && p.email() == email)
            .cloned())
    }

    async fn save_prospect(&self, prospect: &Prospect) -> RepoResult<()> {
        let mut tables = self.tables.write();
        if !tables.campaigns.contains_key(prospect.campaign_id()) {
            return Err(RepositoryError::NotFound(format!("campaign {}", prospect.campaign_id())));
        }
        tables.prospects.insert(prospect.id().clone(), prospect.clone());
        Ok(())
    }
}

#[async_trait]
impl ConversionStore for InMemoryOutreachStore {
    async fn commit_conversion(&self, prospect: &Prospect, records: &ConversionRecords) -> RepoResult<()> {
        let mut tables = self.tables.write();

        let stored = tables
            .prospects
            .get(prospect.id())
            .ok_or_else(|| RepositoryError::NotFound(format!("prospect {}", prospect.id())))?;
        if stored.converted_ids().is_some() {
            return Err(RepositoryError::Conflict(format!("prospect {} is already converted", prospect.id())));
        }
        if prospect.converted_ids() != Some((records.contact_id(), records.deal_id())) {
            return Err(RepositoryError::Conflict(format!(
                "prospect {} is not stamped with the records being committed",
                prospect.id()
            )));
        }
        tables.crm.ensure_new(&records.contact, &records.deal, &records.interaction)?;

        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(RepositoryError::Storage("commit rejected".into()));
        }

        tables.crm.upsert_contact(records.contact.clone());
        tables.crm.upsert_deal(records.deal.clone());
        tables.crm.upsert_interaction(records.interaction.clone());
        tables.prospects.insert(prospect.id().clone(), prospect.clone());
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for InMemoryOutreachStore {
    async fn find_contact(&self, id: &EntityId) -> RepoResult<Option<Contact>> {
        Ok(self.tables.read().crm.contact(id).cloned())
    }

    async fn find_contact_by_email(&self, email: &Email) -> RepoResult<Option<Contact>> {
        Ok(self.tables.read().crm.contact_by_email(email).cloned())
    }
}

#[async_trait]
impl DealRepository for InMemoryOutreachStore {
    async fn find_deal(&self, id: &EntityId) -> RepoResult<Option<Deal>> {
        Ok(self.tables.read().crm.deal(id).cloned())
    }

    async fn find_deals(&self, ids: &[EntityId]) -> RepoResult<Vec<Deal>> {
        Ok(self.tables.read().crm.deals(ids))
    }
}

#[async_trait]
impl InteractionRepository for InMemoryOutreachStore {
    async fn find_interactions_for_contact(&self, contact_id: &EntityId) -> RepoResult<Vec<Interaction>> {
        Ok(self.tables.read().crm.interactions_for(contact_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{Conversion, ConversionExecutor};
    use crate::domain::value_objects::StepPolicy;
    use cadence_crm::{Money, Probability};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    async fn seeded() -> (InMemoryOutreachStore, Campaign, Prospect) {
        let store = InMemoryOutreachStore::new();
        let campaign = Campaign::create("Gyms", None, StepPolicy::new(vec![0, 2]).unwrap()).unwrap();
        let prospect = Prospect::enroll(
            campaign.id().clone(),
            "Iron Works Gym",
            Email::new("owner@ironworks.test").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        );
        store.save_campaign(&campaign).await.unwrap();
        store.save_prospect(&prospect).await.unwrap();
        (store, campaign, prospect)
    }

    fn convert(campaign: &Campaign, prospect: &mut Prospect) -> ConversionRecords {
        let executor = ConversionExecutor::new(Money::usd(Decimal::new(900, 0)), Probability::new(10));
        match executor.convert(prospect, campaign, None, Utc::now()).unwrap() {
            Conversion::New(records) => records,
            Conversion::Existing { .. } => panic!("expected new records"),
        }
    }

    #[tokio::test]
    async fn test_commit_conversion_writes_all_records() {
        let (store, campaign, mut prospect) = seeded().await;
        let records = convert(&campaign, &mut prospect);

        store.commit_conversion(&prospect, &records).await.unwrap();

        let tables = store.snapshot();
        assert_eq!(tables.crm.contact_count(), 1);
        assert_eq!(tables.crm.deal_count(), 1);
        assert_eq!(tables.crm.interaction_count(), 1);
        let stored = store.find_prospect(prospect.id()).await.unwrap().unwrap();
        assert_eq!(stored.converted_ids(), Some((records.contact_id(), records.deal_id())));
        assert!(store.find_contact_by_email(prospect.email()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_second_commit_is_rejected() {
        let (store, campaign, prospect) = seeded().await;
        let mut first = prospect.clone();
        let mut second = prospect;
        let a = convert(&campaign, &mut first);
        let b = convert(&campaign, &mut second);

        store.commit_conversion(&first, &a).await.unwrap();
        let err = store.commit_conversion(&second, &b).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.snapshot().crm.contact_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_writes_nothing() {
        let (store, campaign, mut prospect) = seeded().await;
        let records = convert(&campaign, &mut prospect);

        store.fail_next_commit();
        let err = store.commit_conversion(&prospect, &records).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Storage(_)));
        let tables = store.snapshot();
        assert_eq!(tables.crm.contact_count(), 0);
        assert_eq!(tables.crm.deal_count(), 0);
        assert_eq!(tables.crm.interaction_count(), 0);
        let stored = store.find_prospect(prospect.id()).await.unwrap().unwrap();
        assert!(stored.converted_ids().is_none());
    }

    #[tokio::test]
    async fn test_prospect_requires_campaign() {
        let store = InMemoryOutreachStore::new();
        let orphan = Prospect::enroll(
            EntityId::from_string("missing"),
            "Nobody",
            Email::new("nobody@nowhere.test").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        );
        let err = store.save_prospect(&orphan).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let (store, campaign, mut prospect) = seeded().await;
        let records = convert(&campaign, &mut prospect);
        store.commit_conversion(&prospect, &records).await.unwrap();

        let json = serde_json::to_string(&store.snapshot()).unwrap();
        let restored = InMemoryOutreachStore::from_snapshot(serde_json::from_str(&json).unwrap());

        assert_eq!(restored.snapshot().campaign_count(), 1);
        assert_eq!(restored.snapshot().prospect_count(), 1);
        let deals = restored.find_deals(&[records.deal_id().clone()]).await.unwrap();
        assert_eq!(deals.len(), 1);
        assert_eq!(
            restored.find_interactions_for_contact(records.contact_id()).await.unwrap().len(),
            1
        );
    }
}
