//! Prospect commands

use tabled::Tabled;

use cadence_outreach::{EnrollProspectCommand, EntityId, Prospect, ProspectUseCases, ResponseKind};

use super::Context;
use crate::output::{or_dash, Field, OutputFormat};
use crate::ProspectCommands;

#[derive(Tabled)]
pub(crate) struct ProspectRow {
    id: String,
    agency: String,
    email: String,
    status: String,
    step: u8,
    next_action: String,
}

impl From<&Prospect> for ProspectRow {
    fn from(prospect: &Prospect) -> Self {
        Self {
            id: prospect.id().to_string(),
            agency: prospect.agency_name().to_string(),
            email: prospect.email().to_string(),
            status: prospect.status().to_string(),
            step: prospect.current_step(),
            next_action: or_dash(prospect.next_action_date()),
        }
    }
}

pub(crate) fn prospect_rows(prospects: &[Prospect]) -> Vec<ProspectRow> {
    prospects.iter().map(ProspectRow::from).collect()
}

fn prospect_fields(prospect: &Prospect) -> Vec<Field> {
    vec![
        Field::new("id", prospect.id()),
        Field::new("campaign", prospect.campaign_id()),
        Field::new("agency", prospect.agency_name()),
        Field::optional("contact", prospect.contact_name()),
        Field::new("email", prospect.email()),
        Field::optional("website", prospect.website()),
        Field::optional("niche", prospect.niche()),
        Field::new("status", prospect.status()),
        Field::new("step", prospect.current_step()),
        Field::optional("next action", prospect.next_action_date()),
        Field::optional("last contacted", prospect.last_contacted_at()),
        Field::optional("contact id", prospect.converted_contact_id()),
        Field::optional("deal id", prospect.converted_deal_id()),
        Field::optional("notes", prospect.notes()),
    ]
}

pub async fn handle(action: ProspectCommands, ctx: &Context, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        ProspectCommands::Get { id } => {
            let prospect = ctx.outreach.get_prospect(&EntityId::from_string(id)).await?;
            format.print(&prospect, prospect_fields)?;
        }
        ProspectCommands::Enroll {
            campaign,
            agency,
            email,
            website,
            niche,
            contact,
            lead,
        } => {
            let prospect = ctx
                .outreach
                .enroll_prospect(EnrollProspectCommand {
                    campaign_id: campaign,
                    agency_name: agency,
                    email,
                    website,
                    niche,
                    contact_name: contact,
                    discovered_lead_id: lead,
                })
                .await?;
            ctx.persist()?;
            format.print(&prospect, |p| vec![ProspectRow::from(p)])?;
        }
        ProspectCommands::Sent { id } => {
            let result = ctx.outreach.mark_prospect_sent(&EntityId::from_string(id)).await?;
            ctx.persist()?;
            format.print(&result, |r| vec![ProspectRow::from(&r.prospect)])?;
            if matches!(format, OutputFormat::Table) {
                println!("{}", result.message);
            }
        }
        ProspectCommands::Replied { id, response, notes } => {
            let response: ResponseKind = response.parse()?;
            let result = ctx
                .outreach
                .mark_prospect_replied(&EntityId::from_string(id), response, notes)
                .await?;
            ctx.persist()?;
            format.print(&result, |r| {
                let mut fields = prospect_fields(&r.prospect);
                fields.retain(|f| matches!(f.field, "id" | "agency" | "status" | "contact id" | "deal id"));
                fields
            })?;
            if matches!(format, OutputFormat::Table) {
                println!("{}", result.message);
            }
        }
    }
    Ok(())
}
