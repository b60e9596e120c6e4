//! Events fed to the document view and error modeling for what it displays.

use std::fmt;

use chrono::NaiveDate;
use shared::{
    domain::{Category, Document, ImportSummary, Importance},
    query::SortField,
};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// First load: filters reset to defaults, then fetch.
    Initialize,
    Refresh,
    SetCategory(Option<Category>),
    SetActive(Option<bool>),
    SetImportance(Option<Importance>),
    SetSortField(SortField),
    ToggleSortOrder,
    SetCreatedFrom(Option<NaiveDate>),
    SetCreatedTo(Option<NaiveDate>),
    ResetFilters,
    ImportRequested,
    DocumentsLoaded {
        seq: u64,
        documents: Vec<Document>,
    },
    LoadFailed {
        seq: u64,
        error: ViewError,
    },
    ImportFinished(ImportSummary),
    ImportFailed(ViewError),
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::Initialize => "initialize",
            ViewEvent::Refresh => "refresh",
            ViewEvent::SetCategory(_) => "set_category",
            ViewEvent::SetActive(_) => "set_active",
            ViewEvent::SetImportance(_) => "set_importance",
            ViewEvent::SetSortField(_) => "set_sort_field",
            ViewEvent::ToggleSortOrder => "toggle_sort_order",
            ViewEvent::SetCreatedFrom(_) => "set_created_from",
            ViewEvent::SetCreatedTo(_) => "set_created_to",
            ViewEvent::ResetFilters => "reset_filters",
            ViewEvent::ImportRequested => "import_requested",
            ViewEvent::DocumentsLoaded { .. } => "documents_loaded",
            ViewEvent::LoadFailed { .. } => "load_failed",
            ViewEvent::ImportFinished(_) => "import_finished",
            ViewEvent::ImportFailed(_) => "import_failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorKind {
    /// The backend answered with a non-2xx status.
    Fetch,
    /// The request never completed or the body could not be decoded.
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewErrorContext {
    Load,
    Import,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    kind: ViewErrorKind,
    context: ViewErrorContext,
    message: String,
    detail: Option<String>,
}

impl ViewError {
    pub fn from_client_error(context: ViewErrorContext, err: &ClientError) -> Self {
        let kind = if err.is_fetch() {
            ViewErrorKind::Fetch
        } else {
            ViewErrorKind::Transport
        };
        let mut message = err.to_string();
        if message.trim().is_empty() {
            message = match context {
                ViewErrorContext::Load => "unknown error while loading documents".to_string(),
                ViewErrorContext::Import => "unknown import error".to_string(),
            };
        }

        Self {
            kind,
            context,
            message,
            detail: err.detail().map(str::to_string),
        }
    }

    pub fn kind(&self) -> ViewErrorKind {
        self.kind
    }

    pub fn context(&self) -> ViewErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_message_is_http_status() {
        let err = ClientError::Fetch {
            status: 502,
            detail: Some("upstream XML unavailable".to_string()),
        };
        let view = ViewError::from_client_error(ViewErrorContext::Import, &err);

        assert_eq!(view.kind(), ViewErrorKind::Fetch);
        assert_eq!(view.context(), ViewErrorContext::Import);
        assert_eq!(view.message(), "HTTP 502");
        assert_eq!(view.detail(), Some("upstream XML unavailable"));
    }

    #[test]
    fn transport_error_keeps_message() {
        let err = ClientError::Transport("connection refused".to_string());
        let view = ViewError::from_client_error(ViewErrorContext::Load, &err);

        assert_eq!(view.kind(), ViewErrorKind::Transport);
        assert_eq!(view.to_string(), "connection refused");
        assert!(view.detail().is_none());
    }

    #[test]
    fn empty_transport_message_falls_back_to_context_text() {
        let err = ClientError::Transport(String::new());
        let view = ViewError::from_client_error(ViewErrorContext::Load, &err);
        assert_eq!(view.message(), "unknown error while loading documents");
    }
}
