//! Cadence CRM records
//!
//! The slice of the CRM that the outreach pipeline writes to when a prospect
//! converts. Plain list/detail/update handling of these records lives outside
//! this crate; what lives here is the shape of the records, their invariants,
//! and the persistence ports the conversion executor talks to.
//!
//! ## Key Aggregates
//!
//! - **Contact**: a person or agency we are in a relationship with
//! - **Deal**: a sales opportunity moving through pipeline stages
//! - **Interaction**: a dated touchpoint (email, call, reply) with a contact

pub mod domain;
pub mod ports;
pub mod infrastructure;

pub use domain::aggregates::{
    Contact, ContactSource, Deal, DealStage, Interaction, InteractionKind, Probability,
};
pub use domain::events::{ContactEvent, DealEvent, DomainEvent, InteractionEvent};
pub use domain::value_objects::{Currency, Email, EmailError, Money, MoneyError};
pub use infrastructure::persistence::CrmTables;
pub use ports::outbound::{ContactRepository, DealRepository, InteractionRepository};
