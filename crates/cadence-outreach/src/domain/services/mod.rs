//! Domain services module

pub mod conversion;
pub mod stats;

pub use conversion::{Conversion, ConversionExecutor, ConversionRecords};
pub use stats::{CampaignStats, CampaignStatsCalculator};
