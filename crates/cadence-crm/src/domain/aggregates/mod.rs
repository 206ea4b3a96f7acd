//! Aggregates module

pub mod contact;
pub mod deal;
pub mod interaction;

pub use contact::{Contact, ContactSource};
pub use deal::{Deal, DealStage, Probability};
pub use interaction::{Interaction, InteractionKind};
