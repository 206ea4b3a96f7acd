//! In-memory CRM tables
//!
//! A plain table set with no locking of its own. Stores that need to write CRM
//! records in the same unit as their own rows embed a `CrmTables` behind their
//! lock and implement the CRM ports on top of it.

use std::collections::HashMap;

use cadence_common::{RepoResult, RepositoryError};
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{Contact, Deal, Interaction};
use crate::domain::value_objects::{Email, EntityId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrmTables {
    contacts: HashMap<EntityId, Contact>,
    deals: HashMap<EntityId, Deal>,
    interactions: HashMap<EntityId, Interaction>,
}

impl CrmTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contact(&self, id: &EntityId) -> Option<&Contact> {
        self.contacts.get(id)
    }

    pub fn contact_by_email(&self, email: &Email) -> Option<&Contact> {
        self.contacts.values().find(|c| c.email() == email)
    }

    pub fn deal(&self, id: &EntityId) -> Option<&Deal> {
        self.deals.get(id)
    }

    /// Deals for the given ids, in the order requested; unknown ids are skipped
    pub fn deals(&self, ids: &[EntityId]) -> Vec<Deal> {
        ids.iter().filter_map(|id| self.deals.get(id)).cloned().collect()
    }

    pub fn interactions_for(&self, contact_id: &EntityId) -> Vec<Interaction> {
        let mut found: Vec<Interaction> = self
            .interactions
            .values()
            .filter(|i| i.contact_id() == contact_id)
            .cloned()
            .collect();
        found.sort_by_key(|i| i.occurred_at());
        found
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn deal_count(&self) -> usize {
        self.deals.len()
    }

    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Check that none of the given records already exist.
    ///
    /// Multi-record writers call this before touching any table so that a
    /// rejected write leaves every table unchanged.
    pub fn ensure_new(&self, contact: &Contact, deal: &Deal, interaction: &Interaction) -> RepoResult<()> {
        if self.contacts.contains_key(contact.id()) {
            return Err(RepositoryError::DuplicateKey(format!("contact {}", contact.id())));
        }
        if self.deals.contains_key(deal.id()) {
            return Err(RepositoryError::DuplicateKey(format!("deal {}", deal.id())));
        }
        if self.interactions.contains_key(interaction.id()) {
            return Err(RepositoryError::DuplicateKey(format!("interaction {}", interaction.id())));
        }
        Ok(())
    }

    pub fn upsert_contact(&mut self, contact: Contact) {
        self.contacts.insert(contact.id().clone(), contact);
    }

    pub fn upsert_deal(&mut self, deal: Deal) {
        self.deals.insert(deal.id().clone(), deal);
    }

    pub fn upsert_interaction(&mut self, interaction: Interaction) {
        self.interactions.insert(interaction.id().clone(), interaction);
    }
}
