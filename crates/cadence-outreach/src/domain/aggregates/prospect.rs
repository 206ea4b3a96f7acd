//! Prospect Aggregate
//!
//! A prospect moves through a campaign's drip sequence:
//!
//! ```text
//! QUEUED ──sent──▶ IN_SEQUENCE ──sent (step < 5)──▶ IN_SEQUENCE
//!    │                  │
//!    │                  ├──sent (step 5)──────────▶ NOT_INTERESTED
//!    └──────replied─────┴──replied──▶ CONVERTED | NOT_INTERESTED | REPLIED
//! ```
//!
//! REPLIED, NOT_INTERESTED and CONVERTED are terminal for the sequencer.
//! `next_action_date` is only set while the prospect is QUEUED or
//! IN_SEQUENCE, and the conversion back-references are set exactly when the
//! prospect is CONVERTED.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::events::{OutreachEvent, ProspectEvent};
use crate::domain::value_objects::{Email, EntityId, StepPolicy, MAX_STEPS};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prospect {
    id: EntityId,
    campaign_id: EntityId,
    agency_name: String,
    contact_name: Option<String>,
    email: Email,
    website: Option<String>,
    niche: Option<String>,
    status: ProspectStatus,
    current_step: u8,
    next_action_date: Option<NaiveDate>,
    last_contacted_at: Option<DateTime<Utc>>,
    notes: Option<String>,
    discovered_lead_id: Option<EntityId>,
    converted_contact_id: Option<EntityId>,
    converted_deal_id: Option<EntityId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<OutreachEvent>,
}

impl Prospect {
    /// Enroll a prospect at step 1, due `today`
    pub fn enroll(campaign_id: EntityId, agency_name: impl Into<String>, email: Email, today: NaiveDate) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut prospect = Self {
            id: id.clone(),
            campaign_id: campaign_id.clone(),
            agency_name: agency_name.into(),
            contact_name: None,
            email,
            website: None,
            niche: None,
            status: ProspectStatus::Queued,
            current_step: 1,
            next_action_date: Some(today),
            last_contacted_at: None,
            notes: None,
            discovered_lead_id: None,
            converted_contact_id: None,
            converted_deal_id: None,
            created_at: now,
            updated_at: now,
            events: vec![],
        };

        prospect.raise_event(ProspectEvent::Enrolled {
            prospect_id: id,
            campaign_id,
            next_action_date: today,
        });

        prospect
    }

    pub fn with_contact_name(mut self, name: impl Into<String>) -> Self {
        self.contact_name = Some(name.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_niche(mut self, niche: impl Into<String>) -> Self {
        self.niche = Some(niche.into());
        self
    }

    pub fn with_discovered_lead(mut self, lead_id: EntityId) -> Self {
        self.discovered_lead_id = Some(lead_id);
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn campaign_id(&self) -> &EntityId { &self.campaign_id }
    pub fn agency_name(&self) -> &str { &self.agency_name }
    pub fn contact_name(&self) -> Option<&str> { self.contact_name.as_deref() }
    pub fn email(&self) -> &Email { &self.email }
    pub fn website(&self) -> Option<&str> { self.website.as_deref() }
    pub fn niche(&self) -> Option<&str> { self.niche.as_deref() }
    pub fn status(&self) -> ProspectStatus { self.status }
    pub fn current_step(&self) -> u8 { self.current_step }
    pub fn next_action_date(&self) -> Option<NaiveDate> { self.next_action_date }
    pub fn last_contacted_at(&self) -> Option<DateTime<Utc>> { self.last_contacted_at }
    pub fn notes(&self) -> Option<&str> { self.notes.as_deref() }
    pub fn discovered_lead_id(&self) -> Option<&EntityId> { self.discovered_lead_id.as_ref() }
    pub fn converted_contact_id(&self) -> Option<&EntityId> { self.converted_contact_id.as_ref() }
    pub fn converted_deal_id(&self) -> Option<&EntityId> { self.converted_deal_id.as_ref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    /// Contact and deal ids written at conversion
    pub fn converted_ids(&self) -> Option<(&EntityId, &EntityId)> {
        self.converted_contact_id.as_ref().zip(self.converted_deal_id.as_ref())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Awaiting automated contact on or before `as_of`
    pub fn is_due(&self, as_of: NaiveDate) -> bool {
        !self.is_terminal() && self.next_action_date.is_some_and(|date| date <= as_of)
    }

    // =========================================================================
    // Sequencer Transitions
    // =========================================================================

    /// Record that the current step went out.
    ///
    /// After the final step the prospect is marked not interested. Otherwise
    /// the step advances and the next contact is scheduled using the
    /// campaign's delay for the new step, or `default_delay` days when the
    /// policy has no entry for it.
    pub fn mark_sent(
        &mut self,
        policy: &StepPolicy,
        default_delay: u32,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<SendOutcome, ProspectError> {
        self.ensure_active("mark sent")?;
        let step_sent = self.current_step;

        if step_sent >= MAX_STEPS {
            self.last_contacted_at = Some(now);
            self.status = ProspectStatus::NotInterested;
            self.next_action_date = None;
            self.touch();
            self.raise_event(ProspectEvent::SequenceExhausted { prospect_id: self.id.clone() });
            return Ok(SendOutcome::Exhausted { step_sent });
        }

        let step = step_sent + 1;
        let (delay, fallback) = match policy.delay_for(step) {
            Some(days) => (days, false),
            None => (default_delay, true),
        };
        let next_action_date = today
            .checked_add_days(Days::new(u64::from(delay)))
            .ok_or(ProspectError::DateOutOfRange(today))?;

        self.last_contacted_at = Some(now);
        self.status = ProspectStatus::InSequence;
        self.current_step = step;
        self.next_action_date = Some(next_action_date);
        self.touch();
        self.raise_event(ProspectEvent::StepSent {
            prospect_id: self.id.clone(),
            step_sent,
            next_action_date,
        });

        Ok(SendOutcome::Scheduled {
            step,
            next_action_date,
            fallback_delay: fallback,
        })
    }

    /// Record a non-converting reply.
    ///
    /// Interested replies must go through conversion so that the prospect
    /// never reaches CONVERTED without its CRM back-references.
    pub fn record_reply(
        &mut self,
        response: ResponseKind,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), ProspectError> {
        self.ensure_active("record reply")?;

        self.status = match response {
            ResponseKind::Interested => return Err(ProspectError::ConversionRequired),
            ResponseKind::NotInterested => ProspectStatus::NotInterested,
            ResponseKind::Other => ProspectStatus::Replied,
        };
        self.close(notes, now);
        self.raise_event(ProspectEvent::Replied {
            prospect_id: self.id.clone(),
            response,
        });

        Ok(())
    }

    /// Stamp the CRM records an interested reply produced
    pub(crate) fn mark_converted(
        &mut self,
        contact_id: EntityId,
        deal_id: EntityId,
        notes: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), ProspectError> {
        self.ensure_active("convert")?;

        self.status = ProspectStatus::Converted;
        self.converted_contact_id = Some(contact_id.clone());
        self.converted_deal_id = Some(deal_id.clone());
        self.close(notes, now);

        self.raise_event(ProspectEvent::Replied {
            prospect_id: self.id.clone(),
            response: ResponseKind::Interested,
        });
        self.raise_event(ProspectEvent::Converted {
            prospect_id: self.id.clone(),
            contact_id,
            deal_id,
        });

        Ok(())
    }

    /// Fails with `InvalidTransition` once the sequence is over
    pub fn ensure_active(&self, action: &'static str) -> Result<(), ProspectError> {
        if self.is_terminal() {
            return Err(ProspectError::InvalidTransition {
                status: self.status,
                action,
            });
        }
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<OutreachEvent> {
        std::mem::take(&mut self.events)
    }

    fn close(&mut self, notes: Option<&str>, now: DateTime<Utc>) {
        self.next_action_date = None;
        if let Some(notes) = notes {
            self.notes = Some(notes.to_string());
        }
        self.updated_at = now;
    }

    fn raise_event(&mut self, event: ProspectEvent) {
        self.events.push(OutreachEvent::Prospect(event));
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Supporting Types
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProspectStatus {
    #[default]
    Queued,
    InSequence,
    Replied,
    NotInterested,
    Converted,
}

impl ProspectStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Replied | Self::NotInterested | Self::Converted)
    }
}

impl fmt::Display for ProspectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Queued => "QUEUED",
            Self::InSequence => "IN_SEQUENCE",
            Self::Replied => "REPLIED",
            Self::NotInterested => "NOT_INTERESTED",
            Self::Converted => "CONVERTED",
        };
        f.write_str(label)
    }
}

/// How a prospect answered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseKind {
    Interested,
    NotInterested,
    /// Anything needing a human to triage
    Other,
}

impl FromStr for ResponseKind {
    type Err = ProspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "interested" => Ok(Self::Interested),
            "not_interested" => Ok(Self::NotInterested),
            "other" => Ok(Self::Other),
            other => Err(ProspectError::UnknownResponse(other.to_string())),
        }
    }
}

/// Result of recording a sent step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Step advanced; next contact due on `next_action_date`
    Scheduled {
        step: u8,
        next_action_date: NaiveDate,
        fallback_delay: bool,
    },
    /// Final step sent with no reply
    Exhausted { step_sent: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProspectError {
    #[error("cannot {action} a prospect in status {status}")]
    InvalidTransition {
        status: ProspectStatus,
        action: &'static str,
    },

    #[error("interested replies must be recorded through conversion")]
    ConversionRequired,

    #[error("unknown response kind: {0}")]
    UnknownResponse(String),

    #[error("next action date after {0} is outside the supported calendar range")]
    DateOutOfRange(NaiveDate),
}
