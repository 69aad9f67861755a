//! Viewing policy: page size, type filters, pause gate and search.

use std::collections::BTreeSet;

use webio_protocol::constants::DEFAULT_PAGE_SIZE;
use webio_protocol::{ControlPatch, LogEntry};

use crate::error::ConsoleError;
use crate::search::SearchPattern;

/// Current viewing policy owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    page_size: usize,
    filters: BTreeSet<String>,
    paused: bool,
    search: Option<SearchPattern>,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            filters: BTreeSet::new(),
            paused: false,
            search: None,
        }
    }
}

impl Control {
    /// Applies every non-`clear` field of `patch`.
    ///
    /// The patch is validated as a whole first; on error nothing changes.
    pub fn apply(&mut self, patch: &ControlPatch) -> Result<(), ConsoleError> {
        if patch.page_size == Some(0) {
            return Err(ConsoleError::InvalidPageSize);
        }
        let search = match &patch.search {
            Some(Some(text)) => Some(SearchPattern::compile(text)?),
            Some(None) => Some(None),
            None => None,
        };

        if let Some(paused) = patch.paused {
            if paused != self.paused {
                tracing::debug!(paused, "console pause state changed");
            }
            self.paused = paused;
        }
        if let Some(filters) = &patch.filters {
            self.filters = filters.values().into_iter().collect();
        }
        if let Some(page_size) = patch.page_size {
            self.page_size = page_size;
        }
        if let Some(search) = search {
            self.search = search;
        }
        Ok(())
    }

    /// Replaces the search rule. `None` or empty text disables search.
    ///
    /// An invalid raw pattern is rejected and the previous rule kept.
    pub fn apply_search(&mut self, text: Option<&str>) -> Result<(), ConsoleError> {
        self.search = match text {
            Some(text) => SearchPattern::compile(text)?,
            None => None,
        };
        Ok(())
    }

    /// True when no type filter is set or `entry.kind` is allowed.
    pub fn is_filtered(&self, entry: &LogEntry) -> bool {
        self.filters.is_empty() || self.filters.contains(&entry.kind)
    }

    /// True when no search is active or the message matches it.
    pub fn is_search_filtered(&self, entry: &LogEntry) -> bool {
        self.search
            .as_ref()
            .is_none_or(|search| search.is_match(&entry.message))
    }

    /// Both predicates at once.
    pub fn accepts(&self, entry: &LogEntry) -> bool {
        self.is_filtered(entry) && self.is_search_filtered(entry)
    }

    /// Up to `page_size` accepted entries, newest first.
    ///
    /// Scans from the end and stops as soon as the page is full.
    pub fn select<'a>(&self, entries: &'a [LogEntry]) -> Vec<&'a LogEntry> {
        entries
            .iter()
            .rev()
            .filter(|entry| self.accepts(entry))
            .take(self.page_size)
            .collect()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filters(&self) -> &BTreeSet<String> {
        &self.filters
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn search(&self) -> Option<&SearchPattern> {
        self.search.as_ref()
    }
}
