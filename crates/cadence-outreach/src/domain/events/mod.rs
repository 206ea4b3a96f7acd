//! Domain Events

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::aggregates::ResponseKind;
use crate::domain::value_objects::EntityId;

/// All outreach domain events
#[derive(Clone, Debug, PartialEq)]
pub enum OutreachEvent {
    Campaign(CampaignEvent),
    Prospect(ProspectEvent),
    /// CRM records written by a conversion
    Crm(cadence_crm::DomainEvent),
}

#[derive(Clone, Debug, PartialEq)]
pub enum CampaignEvent {
    Created {
        campaign_id: EntityId,
        name: String,
        steps: usize,
    },
    StepDelaysUpdated {
        campaign_id: EntityId,
        delays: Vec<u32>,
    },
    Archived {
        campaign_id: EntityId,
        archived_at: DateTime<Utc>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProspectEvent {
    Enrolled {
        prospect_id: EntityId,
        campaign_id: EntityId,
        next_action_date: NaiveDate,
    },
    StepSent {
        prospect_id: EntityId,
        step_sent: u8,
        next_action_date: NaiveDate,
    },
    /// The final step went out without a reply
    SequenceExhausted {
        prospect_id: EntityId,
    },
    Replied {
        prospect_id: EntityId,
        response: ResponseKind,
    },
    Converted {
        prospect_id: EntityId,
        contact_id: EntityId,
        deal_id: EntityId,
    },
}

impl OutreachEvent {
    pub fn aggregate_id(&self) -> &EntityId {
        match self {
            OutreachEvent::Campaign(e) => match e {
                CampaignEvent::Created { campaign_id, .. } => campaign_id,
                CampaignEvent::StepDelaysUpdated { campaign_id, .. } => campaign_id,
                CampaignEvent::Archived { campaign_id, .. } => campaign_id,
            },
            OutreachEvent::Prospect(e) => match e {
                ProspectEvent::Enrolled { prospect_id, .. } => prospect_id,
                ProspectEvent::StepSent { prospect_id, .. } => prospect_id,
                ProspectEvent::SequenceExhausted { prospect_id } => prospect_id,
                ProspectEvent::Replied { prospect_id, .. } => prospect_id,
                ProspectEvent::Converted { prospect_id, .. } => prospect_id,
            },
            OutreachEvent::Crm(e) => e.aggregate_id(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            OutreachEvent::Campaign(e) => match e {
                CampaignEvent::Created { .. } => "campaign.created",
                CampaignEvent::StepDelaysUpdated { .. } => "campaign.step_delays_updated",
                CampaignEvent::Archived { .. } => "campaign.archived",
            },
            OutreachEvent::Prospect(e) => match e {
                ProspectEvent::Enrolled { .. } => "prospect.enrolled",
                ProspectEvent::StepSent { .. } => "prospect.step_sent",
                ProspectEvent::SequenceExhausted { .. } => "prospect.sequence_exhausted",
                ProspectEvent::Replied { .. } => "prospect.replied",
                ProspectEvent::Converted { .. } => "prospect.converted",
            },
            OutreachEvent::Crm(e) => e.event_type(),
        }
    }
}

impl From<cadence_crm::DomainEvent> for OutreachEvent {
    fn from(event: cadence_crm::DomainEvent) -> Self {
        OutreachEvent::Crm(event)
    }
}
