//! Rendering capability for project cards.
//!
//! # Responsibility
//! - Define the collaborator the store drives to keep the visible cards in
//!   sync with its record list.
//! - Provide `CardView`, the markup-agnostic projection of one record.
//!
//! # Invariants
//! - `refresh_card` only rewrites title, description and technology tags; the
//!   card element itself is kept.
//! - Renderers never mutate records.

use crate::model::project::{ProjectId, ProjectRecord};
use std::collections::BTreeSet;

/// Badge text shown on store-managed cards.
pub const ADMIN_BADGE_LABEL: &str = "Admin Added";
/// Fixed action links appended to every card.
pub const CARD_ACTION_LINKS: &[&str] = &["Details", "Code", "Share"];

/// Everything a renderer needs to build one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ProjectId,
    /// Used by the category filter (`data-category`).
    pub category: String,
    pub badge: &'static str,
    pub date: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub tech_tags: Vec<String>,
    pub features: Vec<String>,
    pub links: &'static [&'static str],
}

impl CardView {
    /// Projects a record into card content.
    pub fn from_record(record: &ProjectRecord) -> Self {
        Self {
            id: record.id,
            category: record.category.clone(),
            badge: ADMIN_BADGE_LABEL,
            date: record.created_date.clone(),
            icon: record.icon.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            tech_tags: record.technologies.clone(),
            features: record.features.clone(),
            links: CARD_ACTION_LINKS,
        }
    }

    /// Rewrites the in-place mutable regions from `record`.
    pub fn refresh_from(&mut self, record: &ProjectRecord) {
        self.title = record.title.clone();
        self.description = record.description.clone();
        self.tech_tags = record.technologies.clone();
    }
}

/// View collaborator driven by the project store.
pub trait ProjectRenderer {
    /// Creates and appends a new card for `record`.
    fn render_card(&mut self, record: &ProjectRecord);
    /// Rewrites the mutable text regions of an existing card.
    fn refresh_card(&mut self, record: &ProjectRecord);
    /// Starts the removal animation. The card stays until `remove_card`.
    fn fade_card(&mut self, _id: ProjectId) {}
    /// Removes the card for `id`; unknown ids are ignored.
    fn remove_card(&mut self, id: ProjectId);
    /// Removes every admin card before a fresh render pass.
    fn clear(&mut self);
}

impl<T: ProjectRenderer + ?Sized> ProjectRenderer for &mut T {
    fn render_card(&mut self, record: &ProjectRecord) {
        (**self).render_card(record);
    }

    fn refresh_card(&mut self, record: &ProjectRecord) {
        (**self).refresh_card(record);
    }

    fn fade_card(&mut self, id: ProjectId) {
        (**self).fade_card(id);
    }

    fn remove_card(&mut self, id: ProjectId) {
        (**self).remove_card(id);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Headless renderer keeping card views in container order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    cards: Vec<CardView>,
    fading: BTreeSet<ProjectId>,
    refresh_count: usize,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards currently present, in container order.
    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn card(&self, id: ProjectId) -> Option<&CardView> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn has_card(&self, id: ProjectId) -> bool {
        self.card(id).is_some()
    }

    pub fn is_fading(&self, id: ProjectId) -> bool {
        self.fading.contains(&id)
    }

    /// Number of in-place refreshes performed so far.
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }
}

impl ProjectRenderer for MemoryRenderer {
    fn render_card(&mut self, record: &ProjectRecord) {
        self.cards.push(CardView::from_record(record));
    }

    fn refresh_card(&mut self, record: &ProjectRecord) {
        if let Some(card) = self.cards.iter_mut().find(|card| card.id == record.id) {
            card.refresh_from(record);
            self.refresh_count += 1;
        }
    }

    fn fade_card(&mut self, id: ProjectId) {
        if self.has_card(id) {
            self.fading.insert(id);
        }
    }

    fn remove_card(&mut self, id: ProjectId) {
        self.cards.retain(|card| card.id != id);
        self.fading.remove(&id);
    }

    fn clear(&mut self) {
        self.cards.clear();
        self.fading.clear();
    }
}
