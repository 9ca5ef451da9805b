//! Category filter, text search and load-more paging over project records.
//!
//! # Responsibility
//! - Decide which records are visible for a filter tag and a search term.
//! - Track how many cards the "load more" control has revealed.
//!
//! # Invariants
//! - Filtering never reorders records.
//! - An empty (or whitespace) search term matches every record.
//! - `LoadMorePager::remaining()` never underflows.

use crate::model::project::ProjectRecord;

/// Filter tag value that shows every category.
pub const FILTER_ALL: &str = "all";

/// Category selection from the filter bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parses a filter tag value (`all`, `soc`, ...).
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(FILTER_ALL) {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    /// Parses the initial filter from a location hash such as `#forensics`.
    pub fn from_hash(hash: &str) -> Self {
        Self::parse(hash.trim_start_matches('#'))
    }

    /// Hash to publish for this filter; `All` leaves the hash untouched.
    pub fn to_hash(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Only(category) => Some(format!("#{category}")),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == category,
        }
    }
}

/// Combined filter bar + search box state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub search: String,
}

impl CatalogQuery {
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        self.category.matches(&record.category) && matches_search(record, &self.search)
    }
}

/// Case-insensitive substring match over title, description and tags.
pub fn matches_search(record: &ProjectRecord, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
        || record
            .technologies
            .iter()
            .any(|tech| tech.to_lowercase().contains(&needle))
}

/// Returns the records matching `query`, in list order.
pub fn filter_projects<'a>(
    records: &'a [ProjectRecord],
    query: &CatalogQuery,
) -> Vec<&'a ProjectRecord> {
    records.iter().filter(|record| query.matches(record)).collect()
}

/// "Load more" reveal state over a list of `total` cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMorePager {
    total: usize,
    visible: usize,
    step: usize,
}

impl LoadMorePager {
    /// Starts with `initial` cards visible; each `load_more` reveals `step`.
    pub fn new(total: usize, initial: usize, step: usize) -> Self {
        Self {
            total,
            visible: initial.min(total),
            step: step.max(1),
        }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.visible)
    }

    /// Whether the load-more control should be hidden.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Reveals the next batch and returns how many cards became visible.
    pub fn load_more(&mut self) -> usize {
        let revealed = self.step.min(self.remaining());
        self.visible += revealed;
        revealed
    }

    /// Label shown on the control, e.g. `Load More (4 remaining)`.
    pub fn label(&self) -> String {
        format!("Load More ({} remaining)", self.remaining())
    }

    /// Visible prefix of `items`.
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }
}
