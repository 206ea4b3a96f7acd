//! Application Layer
//!
//! Use case orchestration and DTOs.

pub mod commands;
pub mod dto;

pub use commands::OutreachService;
