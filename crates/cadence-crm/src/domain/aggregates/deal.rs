//! Deal Aggregate
//!
//! Sales opportunity tied to a contact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{DealEvent, DomainEvent};
use crate::domain::value_objects::{EntityId, Money};

/// Deal aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deal {
    id: EntityId,
    name: String,
    amount: Money,
    stage: DealStage,
    probability: Probability,
    contact_id: EntityId,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Deal {
    /// Create a new deal at the lead stage
    pub fn create(
        name: impl Into<String>,
        amount: Money,
        contact_id: EntityId,
        probability: Probability,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut deal = Self {
            id: id.clone(),
            name: name.into(),
            amount: amount.clone(),
            stage: DealStage::Lead,
            probability,
            contact_id: contact_id.clone(),
            created_at: now,
            events: vec![],
        };

        deal.raise_event(DomainEvent::Deal(DealEvent::Created {
            deal_id: id,
            contact_id,
            name: deal.name.clone(),
            amount: amount.amount(),
            created_at: now,
        }));

        deal
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn amount(&self) -> &Money { &self.amount }
    pub fn stage(&self) -> DealStage { self.stage }
    pub fn probability(&self) -> Probability { self.probability }
    pub fn contact_id(&self) -> &EntityId { &self.contact_id }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }
}

// =============================================================================
// Supporting Types
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Lead => "lead",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// Probability value object (0-100%)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probability(u8);

impl Probability {
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(&self) -> u8 { self.0 }
}
