//! Domain Events
//!
//! Events raised by CRM aggregates to communicate state changes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::aggregates::{ContactSource, InteractionKind};
use crate::domain::value_objects::{Email, EntityId};

/// All domain events in the CRM bounded context
#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Contact(ContactEvent),
    Deal(DealEvent),
    Interaction(InteractionEvent),
}

/// Contact-related domain events
#[derive(Clone, Debug, PartialEq)]
pub enum ContactEvent {
    Created {
        contact_id: EntityId,
        email: Email,
        source: ContactSource,
        created_at: DateTime<Utc>,
    },
}

/// Deal-related domain events
#[derive(Clone, Debug, PartialEq)]
pub enum DealEvent {
    Created {
        deal_id: EntityId,
        contact_id: EntityId,
        name: String,
        amount: Decimal,
        created_at: DateTime<Utc>,
    },
}

/// Interaction-related domain events
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    Logged {
        interaction_id: EntityId,
        contact_id: EntityId,
        kind: InteractionKind,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Get the aggregate ID this event belongs to
    pub fn aggregate_id(&self) -> &EntityId {
        match self {
            DomainEvent::Contact(ContactEvent::Created { contact_id, .. }) => contact_id,
            DomainEvent::Deal(DealEvent::Created { deal_id, .. }) => deal_id,
            DomainEvent::Interaction(InteractionEvent::Logged { interaction_id, .. }) => {
                interaction_id
            }
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Contact(ContactEvent::Created { .. }) => "contact.created",
            DomainEvent::Deal(DealEvent::Created { .. }) => "deal.created",
            DomainEvent::Interaction(InteractionEvent::Logged { .. }) => "interaction.logged",
        }
    }
}
