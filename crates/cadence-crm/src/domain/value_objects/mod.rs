//! Value Objects module
//!
//! Immutable, validated domain primitives.

pub mod email;
pub mod money;

pub use email::{Email, EmailError};
pub use money::{Currency, Money, MoneyError};
pub use cadence_common::EntityId;
