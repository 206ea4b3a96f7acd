//! Campaign Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{CampaignEvent, OutreachEvent};
use crate::domain::value_objects::{EntityId, StepPolicy, StepPolicyError};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Campaign {
    id: EntityId,
    name: String,
    niche: Option<String>,
    status: CampaignStatus,
    step_policy: StepPolicy,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<OutreachEvent>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    #[default]
    Active,
    Archived,
}

impl Campaign {
    pub fn create(name: impl Into<String>, niche: Option<String>, step_policy: StepPolicy) -> Result<Self, CampaignError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CampaignError::EmptyName);
        }

        let now = Utc::now();
        let id = EntityId::new();
        let mut campaign = Self {
            id: id.clone(),
            name: name.clone(),
            niche: niche.filter(|n| !n.trim().is_empty()),
            status: CampaignStatus::Active,
            step_policy,
            created_at: now,
            updated_at: now,
            events: vec![],
        };

        let steps = campaign.step_policy.steps();
        campaign.raise_event(CampaignEvent::Created { campaign_id: id, name, steps });
        Ok(campaign)
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn niche(&self) -> Option<&str> { self.niche.as_deref() }
    pub fn status(&self) -> CampaignStatus { self.status }
    pub fn step_policy(&self) -> &StepPolicy { &self.step_policy }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn is_active(&self) -> bool { self.status == CampaignStatus::Active }

    /// Replace the step delays. Prospects pick up the new delays the next
    /// time a step is sent; dates already scheduled are left alone.
    pub fn update_step_delays(&mut self, step_policy: StepPolicy) {
        self.step_policy = step_policy;
        self.touch();
        self.raise_event(CampaignEvent::StepDelaysUpdated {
            campaign_id: self.id.clone(),
            delays: self.step_policy.delays().to_vec(),
        });
    }

    pub fn archive(&mut self, at: DateTime<Utc>) -> Result<(), CampaignError> {
        if self.status == CampaignStatus::Archived {
            return Err(CampaignError::Archived);
        }
        self.status = CampaignStatus::Archived;
        self.touch();
        self.raise_event(CampaignEvent::Archived {
            campaign_id: self.id.clone(),
            archived_at: at,
        });
        Ok(())
    }

    /// New prospects may only join an active campaign
    pub fn ensure_accepts_prospects(&self) -> Result<(), CampaignError> {
        match self.status {
            CampaignStatus::Active => Ok(()),
            CampaignStatus::Archived => Err(CampaignError::Archived),
        }
    }

    pub fn take_events(&mut self) -> Vec<OutreachEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: CampaignEvent) {
        self.events.push(OutreachEvent::Campaign(event));
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CampaignError {
    #[error("campaign name must not be empty")]
    EmptyName,

    #[error("campaign is archived")]
    Archived,

    #[error(transparent)]
    Steps(#[from] StepPolicyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(delays: &[u32]) -> StepPolicy {
        StepPolicy::new(delays.to_vec()).unwrap()
    }

    #[test]
    fn test_create_campaign() {
        let mut campaign = Campaign::create(" Dentists Q3 ", Some("dental".into()), policy(&[0, 3, 5])).unwrap();
        assert_eq!(campaign.name(), "Dentists Q3");
        assert_eq!(campaign.niche(), Some("dental"));
        assert!(campaign.is_active());
        assert_eq!(campaign.take_events()[0].event_type(), "campaign.created");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            Campaign::create("  ", None, policy(&[0])).unwrap_err(),
            CampaignError::EmptyName
        );
    }

    #[test]
    fn test_archive_once() {
        let mut campaign = Campaign::create("Gyms", None, policy(&[0, 2])).unwrap();
        campaign.archive(Utc::now()).unwrap();
        assert_eq!(campaign.ensure_accepts_prospects(), Err(CampaignError::Archived));
        assert_eq!(campaign.archive(Utc::now()), Err(CampaignError::Archived));
    }

    #[test]
    fn test_update_step_delays() {
        let mut campaign = Campaign::create("Cafes", None, policy(&[0, 3])).unwrap();
        campaign.take_events();

        campaign.update_step_delays(policy(&[1, 1, 1]));
        assert_eq!(campaign.step_policy().delays(), &[1, 1, 1]);
        assert_eq!(
            campaign.take_events(),
            vec![OutreachEvent::Campaign(CampaignEvent::StepDelaysUpdated {
                campaign_id: campaign.id().clone(),
                delays: vec![1, 1, 1],
            })]
        );
    }
}
