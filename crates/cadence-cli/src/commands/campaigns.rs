//! Campaign commands

use tabled::Tabled;

use cadence_outreach::{Campaign, CampaignStats, CampaignUseCases, CreateCampaignCommand, EntityId};

use super::prospects::prospect_rows;
use super::Context;
use crate::output::{label, or_dash, Field, OutputFormat};
use crate::CampaignCommands;

#[derive(Tabled)]
struct CampaignRow {
    id: String,
    name: String,
    niche: String,
    status: String,
    delays: String,
}

impl From<&Campaign> for CampaignRow {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id().to_string(),
            name: campaign.name().to_string(),
            niche: or_dash(campaign.niche()),
            status: label(&campaign.status()),
            delays: delays(campaign),
        }
    }
}

fn delays(campaign: &Campaign) -> String {
    campaign
        .step_policy()
        .delays()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn stats_fields(stats: &CampaignStats) -> Vec<Field> {
    vec![
        Field::new("campaign", &stats.campaign_id),
        Field::new("total", stats.total),
        Field::new("queued", stats.queued),
        Field::new("in sequence", stats.in_sequence),
        Field::new("replied", stats.replied),
        Field::new("not interested", stats.not_interested),
        Field::new("converted", stats.converted),
        Field::new("due today", stats.due_today),
        Field::new("response rate", format!("{}%", stats.response_rate_percent)),
        Field::new("pipeline value", &stats.pipeline_value),
    ]
}

pub async fn handle(action: CampaignCommands, ctx: &Context, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        CampaignCommands::List => {
            let campaigns = ctx.outreach.list_campaigns().await?;
            format.print(&campaigns, |c| c.iter().map(CampaignRow::from).collect())?;
        }
        CampaignCommands::Get { id } => {
            let campaign = ctx.outreach.get_campaign(&EntityId::from_string(id)).await?;
            format.print(&campaign, |c| vec![CampaignRow::from(c)])?;
        }
        CampaignCommands::Create { name, niche, delays } => {
            let campaign = ctx
                .outreach
                .create_campaign(CreateCampaignCommand {
                    name,
                    niche,
                    step_delays: delays,
                })
                .await?;
            ctx.persist()?;
            format.print(&campaign, |c| vec![CampaignRow::from(c)])?;
        }
        CampaignCommands::Delays { id, delays } => {
            let campaign = ctx.outreach.update_step_delays(&EntityId::from_string(id), delays).await?;
            ctx.persist()?;
            format.print(&campaign, |c| vec![CampaignRow::from(c)])?;
        }
        CampaignCommands::Archive { id } => {
            let campaign = ctx.outreach.archive_campaign(&EntityId::from_string(id)).await?;
            ctx.persist()?;
            format.print(&campaign, |c| vec![CampaignRow::from(c)])?;
        }
        CampaignCommands::Stats { id } => {
            let stats = ctx.outreach.get_campaign_stats(&EntityId::from_string(id)).await?;
            format.print(&stats, stats_fields)?;
        }
        CampaignCommands::Due { id, as_of } => {
            let due = ctx.outreach.get_due_prospects(&EntityId::from_string(id), as_of).await?;
            format.print(&due, |p| prospect_rows(p))?;
        }
    }
    Ok(())
}
