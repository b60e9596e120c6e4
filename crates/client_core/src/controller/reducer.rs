//! Owned view state and its transition function.

use shared::{
    domain::{Document, ImportSummary},
    query::{FilterState, QueryParams},
};
use tracing::debug;

use super::events::{ViewError, ViewEvent};

/// Backend work requested by a transition. The caller runs it and feeds the
/// completion event back into [`ViewState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Load { seq: u64, params: QueryParams },
    Import,
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Load { .. } => "load_documents",
            Effect::Import => "import_documents",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Error,
    Importing,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    filters: FilterState,
    documents: Vec<Document>,
    loading: bool,
    importing: bool,
    error: Option<ViewError>,
    last_import: Option<ImportSummary>,
    // Sequence number of the most recently issued load.
    issued_seq: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Documents from the last successful fetch.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn last_import(&self) -> Option<ImportSummary> {
        self.last_import
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_importing(&self) -> bool {
        self.importing
    }

    pub fn latest_seq(&self) -> u64 {
        self.issued_seq
    }

    pub fn status(&self) -> ViewStatus {
        if self.importing {
            ViewStatus::Importing
        } else if self.loading {
            ViewStatus::Loading
        } else if self.error.is_some() {
            ViewStatus::Error
        } else {
            ViewStatus::Idle
        }
    }

    pub fn can_import(&self) -> bool {
        matches!(self.status(), ViewStatus::Idle | ViewStatus::Error)
    }

    pub fn apply(&mut self, event: ViewEvent) -> Option<Effect> {
        match event {
            ViewEvent::Initialize => {
                self.filters = FilterState::default();
                Some(self.begin_load())
            }
            ViewEvent::Refresh => Some(self.begin_load()),
            ViewEvent::SetCategory(category) => self.update_filters(|f| f.category = category),
            ViewEvent::SetActive(active) => self.update_filters(|f| f.active = active),
            ViewEvent::SetImportance(importance) => {
                self.update_filters(|f| f.importance = importance)
            }
            ViewEvent::SetSortField(field) => self.update_filters(|f| f.sort_field = field),
            ViewEvent::ToggleSortOrder => {
                self.update_filters(|f| f.sort_order = f.sort_order.toggled())
            }
            ViewEvent::SetCreatedFrom(date) => self.update_filters(|f| f.created_from = date),
            ViewEvent::SetCreatedTo(date) => self.update_filters(|f| f.created_to = date),
            ViewEvent::ResetFilters => self.update_filters(|f| *f = FilterState::default()),
            ViewEvent::ImportRequested => {
                if !self.can_import() {
                    debug!(status = ?self.status(), "import ignored while busy");
                    return None;
                }
                self.importing = true;
                self.error = None;
                Some(Effect::Import)
            }
            ViewEvent::DocumentsLoaded { seq, documents } => {
                if self.is_stale(seq) {
                    return None;
                }
                self.documents = documents;
                self.loading = false;
                None
            }
            ViewEvent::LoadFailed { seq, error } => {
                if self.is_stale(seq) {
                    return None;
                }
                self.loading = false;
                self.error = Some(error);
                None
            }
            ViewEvent::ImportFinished(summary) => {
                self.importing = false;
                self.last_import = Some(summary);
                Some(self.begin_load())
            }
            ViewEvent::ImportFailed(error) => {
                self.importing = false;
                self.error = Some(error);
                None
            }
        }
    }

    fn update_filters(&mut self, update: impl FnOnce(&mut FilterState)) -> Option<Effect> {
        let before = self.filters.clone();
        update(&mut self.filters);
        if self.filters == before {
            return None;
        }
        Some(self.begin_load())
    }

    fn begin_load(&mut self) -> Effect {
        self.issued_seq += 1;
        self.loading = true;
        self.error = None;
        Effect::Load {
            seq: self.issued_seq,
            params: self.filters.query_params(),
        }
    }

    fn is_stale(&self, seq: u64) -> bool {
        if seq == self.issued_seq {
            return false;
        }
        debug!(seq, latest = self.issued_seq, "discarding superseded list response");
        true
    }
}
