//! Conversion side-effect executor
//!
//! Turns an interested prospect into CRM records: a contact carrying the
//! prospect's provenance, a lead-stage deal, and an interaction describing
//! the reply. The records are built here and committed, together with the
//! stamped prospect, by a single store write.

use chrono::{DateTime, Utc};

use cadence_common::OutreachConfig;
use cadence_crm::{Contact, ContactSource, Currency, Deal, Interaction, InteractionKind, Money, Probability};

use crate::domain::aggregates::{Campaign, Prospect, ProspectError};
use crate::domain::value_objects::EntityId;

/// CRM records produced by one conversion
#[derive(Debug, Clone)]
pub struct ConversionRecords {
    pub contact: Contact,
    pub deal: Deal,
    pub interaction: Interaction,
}

impl ConversionRecords {
    pub fn contact_id(&self) -> &EntityId {
        self.contact.id()
    }

    pub fn deal_id(&self) -> &EntityId {
        self.deal.id()
    }
}

#[derive(Debug, Clone)]
pub enum Conversion {
    /// The prospect was converted earlier; nothing new was built
    Existing { contact_id: EntityId, deal_id: EntityId },
    New(ConversionRecords),
}

impl Conversion {
    pub fn contact_id(&self) -> &EntityId {
        match self {
            Conversion::Existing { contact_id, .. } => contact_id,
            Conversion::New(records) => records.contact_id(),
        }
    }

    pub fn deal_id(&self) -> &EntityId {
        match self {
            Conversion::Existing { deal_id, .. } => deal_id,
            Conversion::New(records) => records.deal_id(),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Conversion::New(_))
    }
}

pub struct ConversionExecutor {
    deal_value: Money,
    win_probability: Probability,
}

impl ConversionExecutor {
    pub fn new(deal_value: Money, win_probability: Probability) -> Self {
        Self {
            deal_value,
            win_probability,
        }
    }

    pub fn from_config(config: &OutreachConfig) -> Self {
        Self::new(
            Money::new(config.default_deal_value, Currency::from_code(&config.currency)),
            Probability::new(config.default_win_probability),
        )
    }

    /// Convert `prospect`, stamping it with the new record ids.
    ///
    /// Idempotent: a prospect that already carries conversion ids yields
    /// [`Conversion::Existing`] and is left untouched.
    pub fn convert(
        &self,
        prospect: &mut Prospect,
        campaign: &Campaign,
        notes: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<Conversion, ProspectError> {
        if let Some((contact_id, deal_id)) = prospect.converted_ids() {
            return Ok(Conversion::Existing {
                contact_id: contact_id.clone(),
                deal_id: deal_id.clone(),
            });
        }
        prospect.ensure_active("convert")?;

        let contact = Self::build_contact(prospect, campaign);
        let deal = Deal::create(
            format!("{} - {}", prospect.agency_name(), campaign.name()),
            self.deal_value.clone(),
            contact.id().clone(),
            self.win_probability,
        );

        let mut summary = format!(
            "Interested reply to outreach campaign \"{}\" after step {}",
            campaign.name(),
            prospect.current_step()
        );
        if let Some(notes) = notes.filter(|n| !n.trim().is_empty()) {
            summary.push_str(": ");
            summary.push_str(notes);
        }
        let interaction = Interaction::log(contact.id().clone(), InteractionKind::Email, summary, at)
            .with_deal(deal.id().clone());

        prospect.mark_converted(contact.id().clone(), deal.id().clone(), notes, at)?;

        Ok(Conversion::New(ConversionRecords {
            contact,
            deal,
            interaction,
        }))
    }

    fn build_contact(prospect: &Prospect, campaign: &Campaign) -> Contact {
        let mut contact = Contact::create(prospect.agency_name(), prospect.email().clone(), ContactSource::Outreach);
        contact.set_company(prospect.agency_name());
        if let Some(website) = prospect.website() {
            contact.set_website(website);
        }

        contact.append_note(format!("Source: outreach campaign \"{}\"", campaign.name()));
        if let Some(niche) = prospect.niche().or(campaign.niche()) {
            contact.append_note(format!("Niche: {niche}"));
        }
        if let Some(website) = prospect.website() {
            contact.append_note(format!("Website: {website}"));
        }
        if let Some(name) = prospect.contact_name() {
            contact.append_note(format!("Contact person: {name}"));
        }
        contact.add_tag("outreach");

        contact
    }
}
