//! Aggregates module

pub mod campaign;
pub mod prospect;

pub use campaign::{Campaign, CampaignError, CampaignStatus};
pub use prospect::{Prospect, ProspectError, ProspectStatus, ResponseKind, SendOutcome};
