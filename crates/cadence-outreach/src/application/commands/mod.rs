//! Command handlers
//!
//! Application services that orchestrate use cases.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use cadence_common::{Clock, OutreachConfig};
use cadence_crm::{Currency, DealRepository, Email};

use crate::application::dto::*;
use crate::domain::aggregates::{Campaign, Prospect, ResponseKind, SendOutcome};
use crate::domain::events::OutreachEvent;
use crate::domain::services::{CampaignStats, CampaignStatsCalculator, Conversion, ConversionExecutor};
use crate::domain::value_objects::{EntityId, StepPolicy};
use crate::ports::inbound::{CampaignUseCases, ProspectUseCases, UseCaseError};
use crate::ports::outbound::{CampaignRepository, ConversionStore, EventPublisher, ProspectRepository};

/// Outreach application service
pub struct OutreachService {
    campaign_repo: Arc<dyn CampaignRepository>,
    prospect_repo: Arc<dyn ProspectRepository>,
    conversion_store: Arc<dyn ConversionStore>,
    deal_repo: Arc<dyn DealRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    executor: ConversionExecutor,
    config: OutreachConfig,
}

impl OutreachService {
    pub fn new(
        campaign_repo: Arc<dyn CampaignRepository>,
        prospect_repo: Arc<dyn ProspectRepository>,
        conversion_store: Arc<dyn ConversionStore>,
        deal_repo: Arc<dyn DealRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        config: OutreachConfig,
    ) -> Self {
        Self {
            campaign_repo,
            prospect_repo,
            conversion_store,
            deal_repo,
            event_publisher,
            clock,
            executor: ConversionExecutor::from_config(&config),
            config,
        }
    }

    async fn load_campaign(&self, id: &EntityId) -> Result<Campaign, UseCaseError> {
        self.campaign_repo
            .find_campaign(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("campaign {id}")))
    }

    async fn load_prospect(&self, id: &EntityId) -> Result<Prospect, UseCaseError> {
        self.prospect_repo
            .find_prospect(id)
            .await?
            .ok_or_else(|| UseCaseError::NotFound(format!("prospect {id}")))
    }

    async fn publish(&self, events: Vec<OutreachEvent>) -> Result<(), UseCaseError> {
        if events.is_empty() {
            return Ok(());
        }
        self.event_publisher.publish(events).await?;
        Ok(())
    }

    async fn save_campaign(&self, mut campaign: Campaign) -> Result<Campaign, UseCaseError> {
        self.campaign_repo.save_campaign(&campaign).await?;
        self.publish(campaign.take_events()).await?;
        Ok(campaign)
    }

    async fn convert(
        &self,
        mut prospect: Prospect,
        notes: Option<&str>,
    ) -> Result<ReplyResult, UseCaseError> {
        let campaign = self.load_campaign(prospect.campaign_id()).await?;

        let mut records = match self.executor.convert(&mut prospect, &campaign, notes, self.clock.now())? {
            Conversion::Existing { contact_id, deal_id } => {
                return Ok(ReplyResult {
                    prospect,
                    contact_id: Some(contact_id),
                    deal_id: Some(deal_id),
                    message: "Prospect already converted; existing contact and deal returned.".into(),
                });
            }
            Conversion::New(records) => records,
        };

        self.conversion_store.commit_conversion(&prospect, &records).await?;

        let mut events = prospect.take_events();
        events.extend(records.contact.take_events().into_iter().map(OutreachEvent::from));
        events.extend(records.deal.take_events().into_iter().map(OutreachEvent::from));
        events.extend(records.interaction.take_events().into_iter().map(OutreachEvent::from));
        self.publish(events).await?;

        tracing::info!(
            prospect_id = %prospect.id(),
            contact_id = %records.contact_id(),
            deal_id = %records.deal_id(),
            "prospect converted"
        );

        Ok(ReplyResult {
            contact_id: Some(records.contact_id().clone()),
            deal_id: Some(records.deal_id().clone()),
            message: format!("{} converted: contact, deal and interaction created.", prospect.agency_name()),
            prospect,
        })
    }
}

#[async_trait]
impl CampaignUseCases for OutreachService {
    async fn create_campaign(&self, command: CreateCampaignCommand) -> Result<Campaign, UseCaseError> {
        let policy = StepPolicy::new(command.step_delays).map_err(|e| UseCaseError::Validation(e.to_string()))?;
        let campaign = Campaign::create(command.name, command.niche, policy)?;

        let campaign = self.save_campaign(campaign).await?;
        tracing::info!(campaign_id = %campaign.id(), name = campaign.name(), "created campaign");
        Ok(campaign)
    }

    async fn update_step_delays(&self, campaign_id: &EntityId, delays: Vec<u32>) -> Result<Campaign, UseCaseError> {
        let policy = StepPolicy::new(delays).map_err(|e| UseCaseError::Validation(e.to_string()))?;
        let mut campaign = self.load_campaign(campaign_id).await?;

        campaign.update_step_delays(policy);

        let campaign = self.save_campaign(campaign).await?;
        tracing::info!(
            campaign_id = %campaign.id(),
            delays = ?campaign.step_policy().delays(),
            "updated step delays"
        );
        Ok(campaign)
    }

    async fn archive_campaign(&self, campaign_id: &EntityId) -> Result<Campaign, UseCaseError> {
        let mut campaign = self.load_campaign(campaign_id).await?;

        campaign.archive(self.clock.now())?;

        let campaign = self.save_campaign(campaign).await?;
        tracing::info!(campaign_id = %campaign.id(), "archived campaign");
        Ok(campaign)
    }

    async fn get_campaign(&self, campaign_id: &EntityId) -> Result<Campaign, UseCaseError> {
        self.load_campaign(campaign_id).await
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, UseCaseError> {
        Ok(self.campaign_repo.list_campaigns().await?)
    }

    async fn get_campaign_stats(&self, campaign_id: &EntityId) -> Result<CampaignStats, UseCaseError> {
        let campaign = self.load_campaign(campaign_id).await?;
        let prospects = self.prospect_repo.find_prospects_by_campaign(campaign.id()).await?;

        let deal_ids: Vec<EntityId> = prospects
            .iter()
            .filter_map(|p| p.converted_deal_id().cloned())
            .collect();
        let deals = self.deal_repo.find_deals(&deal_ids).await?;

        let stats = CampaignStatsCalculator::compute(
            campaign.id(),
            &prospects,
            &deals,
            self.clock.today(),
            Currency::from_code(&self.config.currency),
        );

        tracing::debug!(
            campaign_id = %campaign.id(),
            total = stats.total,
            due_today = stats.due_today,
            response_rate = %stats.response_rate_percent,
            "computed campaign stats"
        );
        Ok(stats)
    }

    async fn get_due_prospects(
        &self,
        campaign_id: &EntityId,
        as_of: Option<NaiveDate>,
    ) -> Result<Vec<Prospect>, UseCaseError> {
        let campaign = self.load_campaign(campaign_id).await?;
        let as_of = as_of.unwrap_or_else(|| self.clock.today());

        let prospects = self.prospect_repo.find_prospects_by_campaign(campaign.id()).await?;
        Ok(CampaignStatsCalculator::due_prospects(prospects, as_of))
    }
}

#[async_trait]
impl ProspectUseCases for OutreachService {
    async fn enroll_prospect(&self, command: EnrollProspectCommand) -> Result<Prospect, UseCaseError> {
        let campaign = self.load_campaign(&EntityId::from_string(command.campaign_id)).await?;
        campaign.ensure_accepts_prospects()?;

        let agency_name = command.agency_name.trim();
        if agency_name.is_empty() {
            return Err(UseCaseError::Validation("agency name must not be empty".into()));
        }
        let email = Email::new(command.email).map_err(|e| UseCaseError::Validation(e.to_string()))?;

        if self
            .prospect_repo
            .find_prospect_by_email(campaign.id(), &email)
            .await?
            .is_some()
        {
            return Err(UseCaseError::Validation(format!(
                "{email} is already enrolled in campaign {}",
                campaign.name()
            )));
        }

        let mut prospect = Prospect::enroll(campaign.id().clone(), agency_name, email, self.clock.today());
        if let Some(website) = command.website {
            prospect = prospect.with_website(website);
        }
        if let Some(niche) = command.niche.or_else(|| campaign.niche().map(str::to_string)) {
            prospect = prospect.with_niche(niche);
        }
        if let Some(name) = command.contact_name {
            prospect = prospect.with_contact_name(name);
        }
        if let Some(lead_id) = command.discovered_lead_id {
            prospect = prospect.with_discovered_lead(EntityId::from_string(lead_id));
        }

        self.prospect_repo.save_prospect(&prospect).await?;
        self.publish(prospect.take_events()).await?;

        tracing::info!(prospect_id = %prospect.id(), campaign_id = %campaign.id(), "enrolled prospect");
        Ok(prospect)
    }

    async fn mark_prospect_sent(&self, prospect_id: &EntityId) -> Result<SentResult, UseCaseError> {
        let mut prospect = self.load_prospect(prospect_id).await?;
        let campaign = self.load_campaign(prospect.campaign_id()).await?;

        let outcome = prospect.mark_sent(
            campaign.step_policy(),
            self.config.default_step_delay_days,
            self.clock.now(),
            self.clock.today(),
        )?;

        self.prospect_repo.save_prospect(&prospect).await?;
        self.publish(prospect.take_events()).await?;

        let (next_action_date, message) = match outcome {
            SendOutcome::Scheduled {
                step,
                next_action_date,
                fallback_delay,
            } => {
                if fallback_delay {
                    tracing::warn!(
                        prospect_id = %prospect.id(),
                        campaign_id = %campaign.id(),
                        step,
                        default_delay = self.config.default_step_delay_days,
                        "campaign has no delay for step, using default"
                    );
                }
                tracing::info!(prospect_id = %prospect.id(), step, %next_action_date, "step sent");
                (
                    Some(next_action_date),
                    format!("Step {} sent. Step {step} is due on {next_action_date}.", step - 1),
                )
            }
            SendOutcome::Exhausted { step_sent } => {
                tracing::info!(prospect_id = %prospect.id(), step = step_sent, "sequence exhausted");
                (
                    None,
                    format!("Final step {step_sent} sent with no reply. Marked not interested."),
                )
            }
        };

        Ok(SentResult {
            prospect,
            next_action_date,
            message,
        })
    }

    async fn mark_prospect_replied(
        &self,
        prospect_id: &EntityId,
        response: ResponseKind,
        notes: Option<String>,
    ) -> Result<ReplyResult, UseCaseError> {
        let mut prospect = self.load_prospect(prospect_id).await?;

        if response == ResponseKind::Interested {
            return self.convert(prospect, notes.as_deref()).await;
        }

        prospect.record_reply(response, notes.as_deref(), self.clock.now())?;

        self.prospect_repo.save_prospect(&prospect).await?;
        self.publish(prospect.take_events()).await?;

        tracing::info!(prospect_id = %prospect.id(), status = %prospect.status(), "reply recorded");

        let message = match response {
            ResponseKind::NotInterested => "Marked not interested.",
            _ => "Reply recorded; needs manual follow-up.",
        };
        Ok(ReplyResult {
            prospect,
            contact_id: None,
            deal_id: None,
            message: message.into(),
        })
    }

    async fn get_prospect(&self, prospect_id: &EntityId) -> Result<Prospect, UseCaseError> {
        self.load_prospect(prospect_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::ProspectStatus;
    use crate::infrastructure::events::RecordingEventPublisher;
    use crate::infrastructure::persistence::InMemoryOutreachStore;
    use cadence_common::FixedClock;
    use cadence_crm::{ContactRepository, DealStage, InteractionRepository};
    use chrono::Days;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 21).unwrap()
    }

    struct Harness {
        service: OutreachService,
        store: Arc<InMemoryOutreachStore>,
        events: Arc<RecordingEventPublisher>,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryOutreachStore::new());
        let events = Arc::new(RecordingEventPublisher::new());
        let config = OutreachConfig {
            default_step_delay_days: 3,
            default_deal_value: Decimal::new(1500, 0),
            currency: "USD".into(),
            default_win_probability: 10,
        };
        let service = OutreachService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            events.clone(),
            Arc::new(FixedClock::on(today())),
            config,
        );
        Harness { service, store, events }
    }

    async fn campaign(h: &Harness, delays: &[u32]) -> Campaign {
        h.service
            .create_campaign(CreateCampaignCommand {
                name: "Dentists Q3".into(),
                niche: Some("dental".into()),
                step_delays: delays.to_vec(),
            })
            .await
            .unwrap()
    }

    async fn enroll(h: &Harness, campaign: &Campaign, email: &str) -> Prospect {
        h.service
            .enroll_prospect(EnrollProspectCommand {
                campaign_id: campaign.id().to_string(),
                agency_name: "Bright Smiles Dental".into(),
                email: email.into(),
                website: Some("https://brightsmiles.test".into()),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_enroll_defaults() {
        let h = harness();
        let c = campaign(&h, &[0, 3, 5, 7, 7]).await;

        let p = enroll(&h, &c, "hello@brightsmiles.test").await;

        assert_eq!(p.status(), ProspectStatus::Queued);
        assert_eq!(p.current_step(), 1);
        assert_eq!(p.next_action_date(), Some(today()));
        assert_eq!(p.niche(), Some("dental"));
    }

    #[tokio::test]
    async fn test_enroll_rejections() {
        let h = harness();
        let c = campaign(&h, &[0, 3]).await;
        enroll(&h, &c, "dup@agency.test").await;

        let duplicate = h
            .service
            .enroll_prospect(EnrollProspectCommand {
                campaign_id: c.id().to_string(),
                agency_name: "Dup Agency".into(),
                email: "DUP@agency.test".into(),
                ..Default::default()
            })
            .await;
        assert!(matches!(duplicate, Err(UseCaseError::Validation(_))));

        let bad_email = h
            .service
            .enroll_prospect(EnrollProspectCommand {
                campaign_id: c.id().to_string(),
                agency_name: "No Mail".into(),
                email: "not-an-email".into(),
                ..Default::default()
            })
            .await;
        assert!(matches!(bad_email, Err(UseCaseError::Validation(_))));

        h.service.archive_campaign(c.id()).await.unwrap();
        let archived = h
            .service
            .enroll_prospect(EnrollProspectCommand {
                campaign_id: c.id().to_string(),
                agency_name: "Late Agency".into(),
                email: "late@agency.test".into(),
                ..Default::default()
            })
            .await;
        assert!(matches!(archived, Err(UseCaseError::Validation(_))));

        let missing = h
            .service
            .enroll_prospect(EnrollProspectCommand {
                campaign_id: "nope".into(),
                agency_name: "Ghost".into(),
                email: "ghost@agency.test".into(),
                ..Default::default()
            })
            .await;
        assert!(matches!(missing, Err(UseCaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mark_sent_schedules_next_step() {
        let h = harness();
        let c = campaign(&h, &[0, 3, 5, 7, 7]).await;
        let p = enroll(&h, &c, "hello@brightsmiles.test").await;

        let sent = h.service.mark_prospect_sent(p.id()).await.unwrap();

        assert_eq!(sent.prospect.current_step(), 2);
        assert_eq!(sent.prospect.status(), ProspectStatus::InSequence);
        assert_eq!(sent.next_action_date, today().checked_add_days(Days::new(3)));
        assert!(sent.message.contains("Step 1 sent"));

        let stored = h.service.get_prospect(p.id()).await.unwrap();
        assert_eq!(stored.current_step(), 2);
    }

    #[tokio::test]
    async fn test_fifth_send_marks_not_interested() {
        let h = harness();
        let c = campaign(&h, &[0, 3, 5, 7, 7]).await;
        let p = enroll(&h, &c, "hello@brightsmiles.test").await;

        for _ in 0..4 {
            h.service.mark_prospect_sent(p.id()).await.unwrap();
        }
        let last = h.service.mark_prospect_sent(p.id()).await.unwrap();

        assert_eq!(last.prospect.status(), ProspectStatus::NotInterested);
        assert_eq!(last.prospect.current_step(), 5);
        assert_eq!(last.next_action_date, None);

        let again = h.service.mark_prospect_sent(p.id()).await;
        assert!(matches!(again, Err(UseCaseError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn test_shortened_campaign_uses_default_delay() {
        let h = harness();
        let c = campaign(&h, &[0, 3, 5, 7, 7]).await;
        let p = enroll(&h, &c, "hello@brightsmiles.test").await;
        h.service.mark_prospect_sent(p.id()).await.unwrap();

        h.service.update_step_delays(c.id(), vec![0, 1]).await.unwrap();
        let sent = h.service.mark_prospect_sent(p.id()).await.unwrap();

        assert_eq!(sent.prospect.current_step(), 3);
        assert_eq!(sent.next_action_date, today().checked_add_days(Days::new(3)));
    }

    #[tokio::test]
    async fn test_interested_reply_converts_once() {
        let h = harness();
        let c = campaign(&h, &[0, 3, 5, 7, 7]).await;
        let p = enroll(&h, &c, "hello@brightsmiles.test").await;
        h.service.mark_prospect_sent(p.id()).await.unwrap();

        let reply = h
            .service
            .mark_prospect_replied(p.id(), ResponseKind::Interested, Some("Wants a call Tuesday".into()))
            .await
            .unwrap();

        let contact_id = reply.contact_id.clone().unwrap();
        let deal_id = reply.deal_id.clone().unwrap();
        assert_eq!(reply.prospect.status(), ProspectStatus::Converted);
        assert_eq!(reply.prospect.next_action_date(), None);
        assert_eq!(reply.prospect.notes(), Some("Wants a call Tuesday"));

        let tables = h.store.snapshot();
        assert_eq!(tables.crm.contact_count(), 1);
        assert_eq!(tables.crm.deal_count(), 1);
        assert_eq!(tables.crm.interaction_count(), 1);

        let deal = h.store.find_deal(&deal_id).await.unwrap().unwrap();
        assert_eq!(deal.stage(), DealStage::Lead);
        assert_eq!(deal.contact_id(), &contact_id);
        let contact = h.store.find_contact(&contact_id).await.unwrap().unwrap();
        assert!(contact.notes().unwrap().contains("Dentists Q3"));
        assert_eq!(h.store.find_interactions_for_contact(&contact_id).await.unwrap().len(), 1);

        // Repeat is a no-op side-effect-wise
        let event_count = h.events.events().len();
        let repeat = h
            .service
            .mark_prospect_replied(p.id(), ResponseKind::Interested, None)
            .await
            .unwrap();

        assert_eq!(repeat.contact_id, Some(contact_id));
        assert_eq!(repeat.deal_id, Some(deal_id));
        let tables = h.store.snapshot();
        assert_eq!(tables.crm.contact_count(), 1);
        assert_eq!(tables.crm.deal_count(), 1);
        assert_eq!(tables.crm.interaction_count(), 1);
        assert_eq!(h.events.events().len(), event_count);
    }

    #[tokio::test]
    async fn test_conversion_rolls_back_on_storage_failure() {
        let h = harness();
        let c = campaign(&h, &[0, 3, 5, 7, 7]).await;
        let p = enroll(&h, &c, "hello@brightsmiles.test").await;

        h.store.fail_next_commit();
        let err = h
            .service
            .mark_prospect_replied(p.id(), ResponseKind::Interested, None)
            .await
            .unwrap_err();
        assert!(matches!(err, UseCaseError::Repository(_)));

        let tables = h.store.snapshot();
        assert_eq!(tables.crm.contact_count(), 0);
        assert_eq!(tables.crm.deal_count(), 0);
        assert_eq!(tables.crm.interaction_count(), 0);
        let stored = h.service.get_prospect(p.id()).await.unwrap();
        assert_eq!(stored.status(), ProspectStatus::Queued);
        assert!(stored.converted_ids().is_none());

        // Retry after the failure converts exactly once
        let reply = h
            .service
            .mark_prospect_replied(p.id(), ResponseKind::Interested, None)
            .await
            .unwrap();
        assert!(reply.contact_id.is_some());
        assert_eq!(h.store.snapshot().crm.contact_count(), 1);
    }

    #[tokio::test]
    async fn test_other_replies() {
        let h = harness();
        let c = campaign(&h, &[0, 3]).await;
        let maybe = enroll(&h, &c, "maybe@agency.test").await;
        let no = enroll(&h, &c, "no@agency.test").await;

        let r = h
            .service
            .mark_prospect_replied(maybe.id(), ResponseKind::Other, Some("Out of office until May".into()))
            .await
            .unwrap();
        assert_eq!(r.prospect.status(), ProspectStatus::Replied);
        assert_eq!(r.prospect.notes(), Some("Out of office until May"));
        assert!(r.contact_id.is_none());

        let r = h
            .service
            .mark_prospect_replied(no.id(), ResponseKind::NotInterested, None)
            .await
            .unwrap();
        assert_eq!(r.prospect.status(), ProspectStatus::NotInterested);

        // A terminal prospect cannot be converted afterwards
        let late = h
            .service
            .mark_prospect_replied(no.id(), ResponseKind::Interested, None)
            .await;
        assert!(matches!(late, Err(UseCaseError::InvalidTransition(_))));
        assert_eq!(h.store.snapshot().crm.contact_count(), 0);
    }

    #[tokio::test]
    async fn test_campaign_stats_and_due_list() {
        let h = harness();
        let c = campaign(&h, &[0, 0, 5, 7, 7]).await;
        let queued = enroll(&h, &c, "queued@agency.test").await;
        let sent = enroll(&h, &c, "sent@agency.test").await;
        let converted = enroll(&h, &c, "won@agency.test").await;
        let declined = enroll(&h, &c, "no@agency.test").await;

        // Step 2 delay is 0, so a sent prospect is due again today
        h.service.mark_prospect_sent(sent.id()).await.unwrap();
        h.service.mark_prospect_sent(converted.id()).await.unwrap();
        h.service
            .mark_prospect_replied(converted.id(), ResponseKind::Interested, None)
            .await
            .unwrap();
        h.service
            .mark_prospect_replied(declined.id(), ResponseKind::NotInterested, None)
            .await
            .unwrap();

        let stats = h.service.get_campaign_stats(c.id()).await.unwrap();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.queued, 1);
        assert_eq!(stats.in_sequence, 1);
        assert_eq!(stats.converted, 1);
        assert_eq!(stats.not_interested, 1);
        assert_eq!(stats.due_today, 2);
        // 2 responses from 3 contacted
        assert_eq!(stats.response_rate_percent, Decimal::new(667, 1));
        assert_eq!(stats.pipeline_value.amount(), Decimal::new(1500, 0));

        let due = h.service.get_due_prospects(c.id(), None).await.unwrap();
        let ids: Vec<_> = due.iter().map(|p| p.id().clone()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(queued.id()));
        assert!(ids.contains(sent.id()));

        let yesterday = today().pred_opt().unwrap();
        assert!(h.service.get_due_prospects(c.id(), Some(yesterday)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_campaign_validation() {
        let h = harness();
        let too_many = h
            .service
            .create_campaign(CreateCampaignCommand {
                name: "Long".into(),
                niche: None,
                step_delays: vec![1; 6],
            })
            .await;
        assert!(matches!(too_many, Err(UseCaseError::Validation(_))));

        let c = campaign(&h, &[0]).await;
        assert!(matches!(
            h.service.update_step_delays(c.id(), vec![]).await,
            Err(UseCaseError::Validation(_))
        ));
        h.service.archive_campaign(c.id()).await.unwrap();
        assert!(matches!(
            h.service.archive_campaign(c.id()).await,
            Err(UseCaseError::Validation(_))
        ));
        assert!(matches!(
            h.service.get_campaign_stats(&EntityId::from_string("nope")).await,
            Err(UseCaseError::NotFound(_))
        ));
        assert_eq!(h.service.list_campaigns().await.unwrap().len(), 1);
    }
}
