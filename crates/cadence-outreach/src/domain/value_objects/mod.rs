//! Value Objects module

pub mod step_policy;

pub use step_policy::{StepPolicy, StepPolicyError, MAX_STEPS};
pub use cadence_common::EntityId;
pub use cadence_crm::Email;
