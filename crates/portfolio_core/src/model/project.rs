//! Project record domain model.
//!
//! # Responsibility
//! - Define the canonical persisted shape of an admin-added project card.
//! - Define the add candidate (`ProjectDraft`) and partial update
//!   (`ProjectPatch`) shapes consumed by the record store.
//!
//! # Invariants
//! - `id` is unique within one store and never reused for another record.
//! - `is_admin_added` is `true` for every record created by the store.
//! - Persisted field names are camelCase to stay readable by the site scripts.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Integer identifier derived from the creation timestamp (epoch millis).
pub type ProjectId = i64;

/// Icon used when a record does not carry one.
pub const DEFAULT_PROJECT_ICON: &str = "fas fa-shield-alt";

/// Category tags offered by the admin add form.
pub const KNOWN_CATEGORIES: &[&str] = &["soc", "forensics", "automation", "research", "tools"];

/// Returns whether `value` is one of the category tags the site filters on.
pub fn is_known_category(value: &str) -> bool {
    KNOWN_CATEGORIES.contains(&value)
}

fn default_icon() -> String {
    DEFAULT_PROJECT_ICON.to_string()
}

/// Canonical persisted project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Primary key, strictly increasing in creation order.
    pub id: ProjectId,
    pub title: String,
    /// Filter tag such as `soc` or `forensics`.
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    /// Font Awesome class list.
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Human formatted month + year, e.g. `Oct 2026`.
    ///
    /// Older payloads stored this under `date`.
    #[serde(alias = "date", default)]
    pub created_date: String,
    /// Distinguishes store-managed records from statically authored cards.
    #[serde(default)]
    pub is_admin_added: bool,
}

impl ProjectRecord {
    /// Applies every field supplied by `patch`, leaving the others untouched.
    ///
    /// `id`, `created_date` and `is_admin_added` are never patched. A blank
    /// icon resets to `fallback_icon`.
    pub fn apply_patch(&mut self, patch: &ProjectPatch, fallback_icon: &str) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(technologies) = &patch.technologies {
            self.technologies = technologies.clone();
        }
        if let Some(features) = &patch.features {
            self.features = features.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = normalize_icon(icon, fallback_icon);
        }
    }
}

/// Candidate fields for a new record.
///
/// `id`, `createdDate` and `isAdminAdded` are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    /// `None` or blank falls back to the configured default icon.
    pub icon: Option<String>,
}

impl ProjectDraft {
    /// Creates a draft with the required text fields and no tags.
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Checks the add-form contract: non-empty title, known category and
    /// non-empty description.
    ///
    /// The record store does not call this; callers validate before `add`.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::EmptyTitle);
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ProjectValidationError::EmptyCategory);
        }
        if !is_known_category(category) {
            return Err(ProjectValidationError::UnknownCategory(category.to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(ProjectValidationError::EmptyDescription);
        }
        Ok(())
    }

    /// Effective icon: the draft icon, or `fallback` when absent or blank.
    pub fn resolved_icon(&self, fallback: &str) -> String {
        normalize_icon(self.icon.as_deref().unwrap_or_default(), fallback)
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub icon: Option<String>,
}

impl ProjectPatch {
    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.technologies.is_none()
            && self.features.is_none()
            && self.icon.is_none()
    }
}

fn normalize_icon(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validation failures for add-form candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyTitle,
    EmptyCategory,
    UnknownCategory(String),
    EmptyDescription,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "project title cannot be empty"),
            Self::EmptyCategory => write!(f, "project category cannot be empty"),
            Self::UnknownCategory(value) => write!(
                f,
                "unknown project category `{value}`; expected one of {}",
                KNOWN_CATEGORIES.join("|")
            ),
            Self::EmptyDescription => write!(f, "project description cannot be empty"),
        }
    }
}

impl Error for ProjectValidationError {}
