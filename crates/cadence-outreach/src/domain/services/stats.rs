//! Campaign statistics
//!
//! Funnel counts, due prospects, response rate and realized pipeline value,
//! recomputed from the campaign's prospects on every call.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use cadence_crm::{Currency, Deal, Money};

use crate::domain::aggregates::{Prospect, ProspectStatus};
use crate::domain::value_objects::EntityId;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CampaignStats {
    pub campaign_id: EntityId,
    pub total: usize,
    pub queued: usize,
    pub in_sequence: usize,
    pub replied: usize,
    pub not_interested: usize,
    pub converted: usize,
    pub due_today: usize,
    /// `(replied + not_interested + converted) / (total - queued)`, as a
    /// percentage rounded to one decimal place; zero when nobody was contacted
    pub response_rate_percent: Decimal,
    /// Sum of the converted deals' amounts
    pub pipeline_value: Money,
}

pub struct CampaignStatsCalculator;

impl CampaignStatsCalculator {
    /// Compute stats for one campaign.
    ///
    /// `deals` are the deals referenced by converted prospects. Deals in a
    /// currency other than `currency` are left out of the pipeline value.
    pub fn compute(
        campaign_id: &EntityId,
        prospects: &[Prospect],
        deals: &[Deal],
        as_of: NaiveDate,
        currency: Currency,
    ) -> CampaignStats {
        let mut stats = CampaignStats {
            campaign_id: campaign_id.clone(),
            total: 0,
            queued: 0,
            in_sequence: 0,
            replied: 0,
            not_interested: 0,
            converted: 0,
            due_today: 0,
            response_rate_percent: Decimal::ZERO,
            pipeline_value: Money::zero(currency),
        };

        for prospect in prospects.iter().filter(|p| p.campaign_id() == campaign_id) {
            stats.total += 1;
            match prospect.status() {
                ProspectStatus::Queued => stats.queued += 1,
                ProspectStatus::InSequence => stats.in_sequence += 1,
                ProspectStatus::Replied => stats.replied += 1,
                ProspectStatus::NotInterested => stats.not_interested += 1,
                ProspectStatus::Converted => stats.converted += 1,
            }
            if prospect.is_due(as_of) {
                stats.due_today += 1;
            }
        }

        stats.response_rate_percent = Self::response_rate(
            stats.replied + stats.not_interested + stats.converted,
            stats.total - stats.queued,
        );

        for deal in deals {
            match stats.pipeline_value.add(deal.amount()) {
                Ok(sum) => stats.pipeline_value = sum,
                Err(e) => tracing::warn!(deal_id = %deal.id(), error = %e, "deal left out of pipeline value"),
            }
        }

        stats
    }

    /// Percentage of `contacted` that responded, rounded to one decimal
    pub fn response_rate(responded: usize, contacted: usize) -> Decimal {
        if contacted == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(responded as u64) * Decimal::ONE_HUNDRED / Decimal::from(contacted as u64)).round_dp(1)
    }

    /// Non-terminal prospects due on or before `as_of`, earliest first
    pub fn due_prospects(prospects: Vec<Prospect>, as_of: NaiveDate) -> Vec<Prospect> {
        let mut due: Vec<Prospect> = prospects.into_iter().filter(|p| p.is_due(as_of)).collect();
        due.sort_by_key(|p| (p.next_action_date(), p.created_at()));
        due
    }
}
