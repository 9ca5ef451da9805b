//! Downloadable JSON snapshot of the project list.
//!
//! # Invariants
//! - Contents are pretty-printed (2-space indent) and keep list order.
//! - File name is `<prefix>-<YYYY-MM-DD>.json` in UTC.

use crate::model::project::ProjectRecord;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Export payload ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectExport {
    pub file_name: String,
    pub contents: String,
}

impl ProjectExport {
    pub fn from_records(
        records: &[ProjectRecord],
        prefix: &str,
        at: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            file_name: export_file_name(prefix, at),
            contents: serde_json::to_string_pretty(records)?,
        })
    }

    /// Parses the snapshot back into records.
    pub fn parse_records(&self) -> Result<Vec<ProjectRecord>, serde_json::Error> {
        serde_json::from_str(&self.contents)
    }

    /// Writes the snapshot into `dir` and returns the created path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, self.contents.as_bytes())?;
        Ok(path)
    }
}

pub fn export_file_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}-{}.json", at.format("%Y-%m-%d"))
}
