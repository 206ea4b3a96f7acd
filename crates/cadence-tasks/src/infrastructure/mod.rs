//! Infrastructure layer

pub mod events;
pub mod persistence;
