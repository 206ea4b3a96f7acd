//! Contact Aggregate
//!
//! A person or agency the operator has a relationship with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{ContactEvent, DomainEvent};
use crate::domain::value_objects::{Email, EntityId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    id: EntityId,
    name: String,
    email: Email,
    company: Option<String>,
    website: Option<String>,
    source: ContactSource,
    notes: Option<String>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Contact {
    /// New contact; raises `ContactEvent::Created`
    pub fn create(name: impl Into<String>, email: Email, source: ContactSource) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut contact = Self {
            id: id.clone(),
            name: name.into(),
            email: email.clone(),
            company: None,
            website: None,
            source: source.clone(),
            notes: None,
            tags: vec![],
            created_at: now,
            updated_at: now,
            events: vec![],
        };

        contact.raise_event(DomainEvent::Contact(ContactEvent::Created {
            contact_id: id,
            email,
            source,
            created_at: now,
        }));

        contact
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn email(&self) -> &Email { &self.email }
    pub fn company(&self) -> Option<&str> { self.company.as_deref() }
    pub fn website(&self) -> Option<&str> { self.website.as_deref() }
    pub fn source(&self) -> &ContactSource { &self.source }
    pub fn notes(&self) -> Option<&str> { self.notes.as_deref() }
    pub fn tags(&self) -> &[String] { &self.tags }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    // =========================================================================
    // Business Operations
    // =========================================================================

    pub fn set_company(&mut self, company: impl Into<String>) {
        self.company = Some(company.into());
        self.touch();
    }

    pub fn set_website(&mut self, website: impl Into<String>) {
        self.website = Some(website.into());
        self.touch();
    }

    /// Append a line to the free-text notes
    pub fn append_note(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        self.notes = Some(match self.notes.take() {
            Some(existing) if !existing.is_empty() => format!("{existing}\n{line}"),
            _ => line.to_string(),
        });
        self.touch();
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
            self.touch();
        }
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Supporting Types
// =============================================================================

/// Where a contact came from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSource {
    Manual,
    Import,
    /// Converted from an outreach prospect
    Outreach,
}
