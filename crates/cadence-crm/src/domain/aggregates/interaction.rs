//! Interaction record
//!
//! A dated touchpoint with a contact, optionally tied to a deal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{DomainEvent, InteractionEvent};
use crate::domain::value_objects::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Email,
    Call,
    Meeting,
    Note,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    id: EntityId,
    contact_id: EntityId,
    deal_id: Option<EntityId>,
    kind: InteractionKind,
    summary: String,
    occurred_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Interaction {
    pub fn log(
        contact_id: EntityId,
        kind: InteractionKind,
        summary: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        let id = EntityId::new();
        let mut interaction = Self {
            id: id.clone(),
            contact_id: contact_id.clone(),
            deal_id: None,
            kind,
            summary: summary.into(),
            occurred_at,
            created_at: Utc::now(),
            events: vec![],
        };

        interaction.events.push(DomainEvent::Interaction(InteractionEvent::Logged {
            interaction_id: id,
            contact_id,
            kind,
            occurred_at,
        }));

        interaction
    }

    pub fn with_deal(mut self, deal_id: EntityId) -> Self {
        self.deal_id = Some(deal_id);
        self
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn contact_id(&self) -> &EntityId { &self.contact_id }
    pub fn deal_id(&self) -> Option<&EntityId> { self.deal_id.as_ref() }
    pub fn kind(&self) -> InteractionKind { self.kind }
    pub fn summary(&self) -> &str { &self.summary }
    pub fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_interaction() {
        let contact_id = EntityId::new();
        let deal_id = EntityId::new();
        let at = Utc::now();

        let mut interaction = Interaction::log(contact_id.clone(), InteractionKind::Email, "Replied: keen", at)
            .with_deal(deal_id.clone());

        assert_eq!(interaction.contact_id(), &contact_id);
        assert_eq!(interaction.deal_id(), Some(&deal_id));
        assert_eq!(interaction.occurred_at(), at);
        assert_eq!(interaction.take_events().len(), 1);
    }
}
