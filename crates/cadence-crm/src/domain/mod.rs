//! Domain module

pub mod aggregates;
pub mod value_objects;
pub mod events;

pub use aggregates::*;
pub use value_objects::*;
pub use events::*;
