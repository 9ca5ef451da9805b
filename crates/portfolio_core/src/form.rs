//! Form field parsing and validation.
//!
//! # Responsibility
//! - Turn raw add/edit form values into `ProjectDraft` / `ProjectPatch`.
//! - Enforce the add-form required fields before the store is called.
//! - Check the visitor contact form before it is handed to a mail service.
//!
//! # Invariants
//! - Technologies are comma separated; features are one per line.
//! - Parsed lists never contain blank entries.
//! - Contact lengths are counted in characters after trimming.

use crate::model::project::{ProjectDraft, ProjectPatch, ProjectValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const CONTACT_NAME_MIN_CHARS: usize = 2;
pub const CONTACT_MESSAGE_MIN_CHARS: usize = 10;
pub const CONTACT_MESSAGE_MAX_CHARS: usize = 1000;

/// Raw values of the "add project" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddProjectForm {
    pub title: String,
    pub category: String,
    pub description: String,
    /// Comma separated, e.g. `Wazuh, ELK, Python`.
    pub technologies: String,
    /// One feature per line.
    pub features: String,
    pub icon: String,
}

/// Raw values of the "edit project" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditProjectForm {
    pub title: String,
    pub description: String,
    pub technologies: String,
}

pub fn parse_technologies(raw: &str) -> Vec<String> {
    split_trimmed(raw, ',')
}

pub fn parse_features(raw: &str) -> Vec<String> {
    split_trimmed(raw, '\n')
}

fn split_trimmed(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl ProjectDraft {
    /// Parses and validates the add form.
    pub fn from_form(form: &AddProjectForm) -> Result<Self, ProjectValidationError> {
        let icon = form.icon.trim();
        let draft = Self {
            title: form.title.trim().to_string(),
            category: form.category.trim().to_string(),
            description: form.description.trim().to_string(),
            technologies: parse_technologies(&form.technologies),
            features: parse_features(&form.features),
            icon: (!icon.is_empty()).then(|| icon.to_string()),
        };
        draft.validate()?;
        Ok(draft)
    }
}

impl ProjectPatch {
    /// Builds the patch submitted by the edit form.
    ///
    /// Values are applied as given; blank title or description is not
    /// rejected here.
    pub fn from_edit_form(form: &EditProjectForm) -> Self {
        Self {
            title: Some(form.title.clone()),
            description: Some(form.description.clone()),
            technologies: Some(parse_technologies(&form.technologies)),
            ..Self::default()
        }
    }
}

/// Raw values of the visitor contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Checks required fields and length bounds, reporting the first failure.
    ///
    /// Email is checked for presence only.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if name.chars().count() < CONTACT_NAME_MIN_CHARS {
            return Err(ContactValidationError::NameTooShort);
        }
        if self.email.trim().is_empty() {
            return Err(ContactValidationError::EmptyEmail);
        }
        if self.subject.trim().is_empty() {
            return Err(ContactValidationError::EmptySubject);
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ContactValidationError::EmptyMessage);
        }
        let length = message.chars().count();
        if length < CONTACT_MESSAGE_MIN_CHARS {
            return Err(ContactValidationError::MessageTooShort(length));
        }
        if length > CONTACT_MESSAGE_MAX_CHARS {
            return Err(ContactValidationError::MessageTooLong(length));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    NameTooShort,
    EmptyEmail,
    EmptySubject,
    EmptyMessage,
    /// Trimmed character count.
    MessageTooShort(usize),
    /// Trimmed character count.
    MessageTooLong(usize),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::NameTooShort => write!(
                f,
                "name must be at least {CONTACT_NAME_MIN_CHARS} characters"
            ),
            Self::EmptyEmail => write!(f, "email is required"),
            Self::EmptySubject => write!(f, "please select a subject"),
            Self::EmptyMessage => write!(f, "message is required"),
            Self::MessageTooShort(length) => write!(
                f,
                "message must be at least {CONTACT_MESSAGE_MIN_CHARS} characters (got {length})"
            ),
            Self::MessageTooLong(length) => write!(
                f,
                "message must be at most {CONTACT_MESSAGE_MAX_CHARS} characters (got {length})"
            ),
        }
    }
}

impl Error for ContactValidationError {}
