//! Ports module (Hexagonal Architecture)
//!
//! CRM records are only written by other bounded contexts, so only outbound
//! ports live here.

pub mod outbound;

pub use outbound::*;
