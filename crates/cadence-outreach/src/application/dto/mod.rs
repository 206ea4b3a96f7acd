//! Data Transfer Objects (DTOs)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::Prospect;
use crate::domain::value_objects::EntityId;

// =============================================================================
// Campaign Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignCommand {
    pub name: String,
    pub niche: Option<String>,
    /// Days before each step, steps 1 through 5
    pub step_delays: Vec<u32>,
}

// =============================================================================
// Prospect Commands
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EnrollProspectCommand {
    pub campaign_id: String,
    pub agency_name: String,
    pub email: String,
    pub website: Option<String>,
    pub niche: Option<String>,
    pub contact_name: Option<String>,
    pub discovered_lead_id: Option<String>,
}

// =============================================================================
// Results
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct SentResult {
    pub prospect: Prospect,
    /// `None` once the sequence is over
    pub next_action_date: Option<NaiveDate>,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReplyResult {
    pub prospect: Prospect,
    pub contact_id: Option<EntityId>,
    pub deal_id: Option<EntityId>,
    pub message: String,
}
