//! Admin project record store.
//!
//! # Responsibility
//! - Own the in-memory list of admin-added project records.
//! - Mirror every mutation into the key-value slot and the card renderer.
//! - Re-hydrate the list from the slot on `initialize()`.
//!
//! # Invariants
//! - Ids are unique and strictly greater than every existing id at `add`;
//!   `add` fails rather than reuse an id once `ProjectId::MAX` is taken.
//! - After every mutation the slot holds the full list (rewrite, never diff).
//! - Only `is_admin_added` records are written or re-hydrated.
//! - Persistence failures never roll back the in-memory mutation; they are
//!   reported through `Durability::PersistFailed`.
//! - `NotFound` leaves list, slot and cards untouched.

use crate::config::PortfolioConfig;
use crate::model::project::{ProjectDraft, ProjectId, ProjectPatch, ProjectRecord};
use crate::render::ProjectRenderer;
use crate::service::export::ProjectExport;
use crate::storage::{KeyValueStore, StorageError};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `createdDate` format, e.g. `Oct 2026`.
const CREATED_DATE_FORMAT: &str = "%b %Y";

/// Source of the current time for ids, created dates and export names.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F: Fn() -> DateTime<Utc>> Clock for F {
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Store operation error.
#[derive(Debug)]
pub enum StoreError {
    /// No record with this id exists in the list.
    NotFound(ProjectId),
    /// Writing the slot failed; the in-memory list still changed.
    PersistenceFailure(StorageError),
    /// The slot could not be read back as a record list.
    HydrationFailure(String),
    /// The record list could not be serialized.
    Serialization(String),
    /// No id above the current maximum fits in `ProjectId`.
    IdSpaceExhausted { max_id: ProjectId },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::PersistenceFailure(err) => write!(f, "failed to persist projects: {err}"),
            Self::HydrationFailure(message) => {
                write!(f, "failed to load saved projects: {message}")
            }
            Self::Serialization(message) => {
                write!(f, "failed to serialize projects: {message}")
            }
            Self::IdSpaceExhausted { max_id } => {
                write!(f, "no project id left above {max_id}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PersistenceFailure(err) => Some(err),
            _ => None,
        }
    }
}

/// Whether a mutation reached the key-value slot.
#[derive(Debug)]
pub enum Durability {
    Persisted,
    /// Soft failure: the session view is updated but the slot is stale.
    PersistFailed(StoreError),
}

/// Result of a mutation that completed in memory.
#[derive(Debug)]
pub struct MutationOutcome<T> {
    pub value: T,
    pub durability: Durability,
}

impl<T> MutationOutcome<T> {
    pub fn is_persisted(&self) -> bool {
        matches!(self.durability, Durability::Persisted)
    }

    /// Returns the persistence warning, if any.
    pub fn warning(&self) -> Option<&StoreError> {
        match &self.durability {
            Durability::Persisted => None,
            Durability::PersistFailed(err) => Some(err),
        }
    }
}

/// Summary of one `initialize()` pass.
#[derive(Debug, Default)]
pub struct HydrationReport {
    /// Records appended to the list and rendered.
    pub loaded: usize,
    /// Entries ignored because they are not admin records or repeat an id.
    pub skipped: usize,
    /// Set when the slot was unreadable and the list fell back to empty.
    pub warning: Option<StoreError>,
}

/// Removal whose card is fading out and awaits `finish_removal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PendingRemoval {
    id: ProjectId,
}

impl PendingRemoval {
    pub fn id(&self) -> ProjectId {
        self.id
    }
}

/// Single source of truth for admin-added project records.
pub struct ProjectRecordStore<S, R, C = SystemClock> {
    storage: S,
    renderer: R,
    clock: C,
    config: PortfolioConfig,
    records: Vec<ProjectRecord>,
}

impl<S: KeyValueStore, R: ProjectRenderer> ProjectRecordStore<S, R, SystemClock> {
    /// Creates an empty store using the wall clock.
    ///
    /// Call `initialize()` to load previously saved records.
    pub fn new(storage: S, renderer: R, config: PortfolioConfig) -> Self {
        Self::with_clock(storage, renderer, config, SystemClock)
    }
}

impl<S: KeyValueStore, R: ProjectRenderer, C: Clock> ProjectRecordStore<S, R, C> {
    pub fn with_clock(storage: S, renderer: R, config: PortfolioConfig, clock: C) -> Self {
        Self {
            storage,
            renderer,
            clock,
            config,
            records: Vec::new(),
        }
    }

    /// Loads saved records from the slot and renders one card per record.
    ///
    /// Never fails: an unreadable slot yields an empty list plus a warning.
    /// Re-running replaces the current list and its cards.
    pub fn initialize(&mut self) -> HydrationReport {
        self.records.clear();
        self.renderer.clear();

        let saved = match self.read_slot() {
            Ok(saved) => saved,
            Err(err) => {
                warn!(
                    "event=projects_hydrate module=store status=warn error_code=hydration_failed error={}",
                    err
                );
                return HydrationReport {
                    warning: Some(err),
                    ..HydrationReport::default()
                };
            }
        };

        let mut report = HydrationReport::default();
        let mut seen = HashSet::new();
        for record in saved {
            if !record.is_admin_added || !seen.insert(record.id) {
                report.skipped += 1;
                continue;
            }
            self.renderer.render_card(&record);
            self.records.push(record);
            report.loaded += 1;
        }

        info!(
            "event=projects_hydrate module=store status=ok loaded={} skipped={}",
            report.loaded, report.skipped
        );
        report
    }

    /// Creates a record from `draft`, persists the list and renders a card.
    ///
    /// The draft is not re-validated here; see `ProjectDraft::validate`.
    ///
    /// # Errors
    /// - `IdSpaceExhausted` when an existing record already holds the
    ///   largest representable id. Nothing is changed in that case.
    pub fn add(
        &mut self,
        draft: ProjectDraft,
    ) -> Result<MutationOutcome<ProjectRecord>, StoreError> {
        let now = self.clock.now();
        let id = self.next_id(now).ok_or_else(|| {
            let max_id = self.max_id().unwrap_or(ProjectId::MAX);
            error!(
                "event=project_add module=store status=error error_code=id_space_exhausted max_id={}",
                max_id
            );
            StoreError::IdSpaceExhausted { max_id }
        })?;
        let record = ProjectRecord {
            id,
            icon: draft.resolved_icon(&self.config.default_icon),
            title: draft.title,
            category: draft.category,
            description: draft.description,
            technologies: draft.technologies,
            features: draft.features,
            created_date: now.format(CREATED_DATE_FORMAT).to_string(),
            is_admin_added: true,
        };

        self.records.push(record.clone());
        let durability = self.persist("project_add");
        self.renderer.render_card(&record);

        info!(
            "event=project_add module=store status=ok project_id={} total={}",
            record.id,
            self.records.len()
        );
        Ok(MutationOutcome {
            value: record,
            durability,
        })
    }

    /// Overwrites the fields supplied by `patch` on record `id`.
    ///
    /// The card is refreshed in place rather than re-created.
    pub fn update(
        &mut self,
        id: ProjectId,
        patch: &ProjectPatch,
    ) -> Result<MutationOutcome<ProjectRecord>, StoreError> {
        let index = self.index_of(id).ok_or_else(|| not_found("project_update", id))?;

        self.records[index].apply_patch(patch, &self.config.default_icon);
        let updated = self.records[index].clone();
        let durability = self.persist("project_update");
        self.renderer.refresh_card(&updated);

        info!(
            "event=project_update module=store status=ok project_id={}",
            id
        );
        Ok(MutationOutcome {
            value: updated,
            durability,
        })
    }

    /// Removes record `id`, persists the list and removes its card.
    pub fn remove(&mut self, id: ProjectId) -> Result<MutationOutcome<ProjectRecord>, StoreError> {
        let index = self.index_of(id).ok_or_else(|| not_found("project_remove", id))?;

        let removed = self.records.remove(index);
        let durability = self.persist("project_remove");
        self.renderer.remove_card(id);

        info!(
            "event=project_remove module=store status=ok project_id={} total={}",
            id,
            self.records.len()
        );
        Ok(MutationOutcome {
            value: removed,
            durability,
        })
    }

    /// Starts a delayed removal: the card fades, the record stays.
    pub fn begin_removal(&mut self, id: ProjectId) -> Result<PendingRemoval, StoreError> {
        if self.index_of(id).is_none() {
            return Err(not_found("project_remove_begin", id));
        }
        self.renderer.fade_card(id);
        Ok(PendingRemoval { id })
    }

    /// Completes a delayed removal.
    ///
    /// Returns `None` when the record is already gone, e.g. removed by a
    /// later operation while the fade-out was pending.
    pub fn finish_removal(
        &mut self,
        pending: PendingRemoval,
    ) -> Option<MutationOutcome<ProjectRecord>> {
        if self.index_of(pending.id).is_none() {
            debug!(
                "event=project_remove_finish module=store status=skipped project_id={} reason=stale",
                pending.id
            );
            return None;
        }
        self.remove(pending.id).ok()
    }

    /// Builds a pretty-printed snapshot of the list for download.
    pub fn export(&self) -> Result<ProjectExport, StoreError> {
        ProjectExport::from_records(&self.records, &self.config.export_prefix, self.clock.now())
            .map_err(|err| StoreError::Serialization(err.to_string()))
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn get(&self, id: ProjectId) -> Option<&ProjectRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Releases the injected collaborators.
    pub fn into_parts(self) -> (S, R) {
        (self.storage, self.renderer)
    }

    fn index_of(&self, id: ProjectId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    fn max_id(&self) -> Option<ProjectId> {
        self.records.iter().map(|record| record.id).max()
    }

    /// `max(now_ms, max_id + 1)`, or `None` once `max_id + 1` overflows.
    fn next_id(&self, now: DateTime<Utc>) -> Option<ProjectId> {
        let candidate = now.timestamp_millis();
        match self.max_id() {
            Some(max) if max >= candidate => max.checked_add(1),
            _ => Some(candidate),
        }
    }

    fn read_slot(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        let bytes = self
            .storage
            .get(&self.config.storage_key)
            .map_err(|err| StoreError::HydrationFailure(err.to_string()))?;
        match bytes {
            None => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| StoreError::HydrationFailure(err.to_string())),
        }
    }

    fn persist(&mut self, event: &str) -> Durability {
        let payload = match serde_json::to_vec(&self.records) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event={} module=store status=error error_code=serialize_failed error={}",
                    event, err
                );
                return Durability::PersistFailed(StoreError::Serialization(err.to_string()));
            }
        };

        match self.storage.set(&self.config.storage_key, &payload) {
            Ok(()) => Durability::Persisted,
            Err(err) => {
                error!(
                    "event={} module=store status=error error_code=persist_failed bytes={} error={}",
                    event,
                    payload.len(),
                    err
                );
                Durability::PersistFailed(StoreError::PersistenceFailure(err))
            }
        }
    }
}

fn not_found(event: &str, id: ProjectId) -> StoreError {
    warn!(
        "event={} module=store status=error error_code=not_found project_id={}",
        event, id
    );
    StoreError::NotFound(id)
}
