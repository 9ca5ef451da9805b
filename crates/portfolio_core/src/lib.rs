//! Core logic for the portfolio site's admin-managed project cards.
//! This crate is the single source of truth for record invariants; UI
//! binding layers only call into it.

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod storage;

pub use config::{ConfigError, PortfolioConfig};
pub use form::{
    parse_features, parse_technologies, AddProjectForm, ContactForm, ContactValidationError,
    EditProjectForm,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{
    ProjectDraft, ProjectId, ProjectPatch, ProjectRecord, ProjectValidationError,
    DEFAULT_PROJECT_ICON, KNOWN_CATEGORIES,
};
pub use render::{CardView, MemoryRenderer, ProjectRenderer};
pub use service::catalog::{filter_projects, CatalogQuery, CategoryFilter, LoadMorePager};
pub use service::engagement::{project_slug_from_path, EngagementError, EngagementTracker};
pub use service::export::ProjectExport;
pub use service::project_store::{
    Clock, Durability, HydrationReport, MutationOutcome, PendingRemoval, ProjectRecordStore,
    StoreError, SystemClock,
};
pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
