//! Runs effects against the backend and drives the reducer to completion.

use tracing::{debug, warn};

use super::{
    events::{ViewError, ViewErrorContext, ViewEvent},
    reducer::{Effect, ViewState},
};
use crate::DocumentsApi;

pub struct ViewController<A> {
    api: A,
    state: ViewState,
}

impl<A: DocumentsApi> ViewController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ViewState::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Applies one event. Any returned effect is the caller's to run.
    pub fn dispatch(&mut self, event: ViewEvent) -> Option<Effect> {
        let name = event.name();
        let effect = self.state.apply(event);
        match &effect {
            Some(effect) => debug!(event = name, effect = effect.name(), "view transition"),
            None => debug!(event = name, "view transition"),
        }
        effect
    }

    /// Applies `event` and runs every follow-up effect in order until the
    /// view settles.
    pub async fn dispatch_and_settle(&mut self, event: ViewEvent) {
        let mut next = self.dispatch(event);
        while let Some(effect) = next {
            let completion = execute(&self.api, effect).await;
            next = self.dispatch(completion);
        }
    }
}

/// Performs the backend call behind `effect` and reports its outcome as an event.
pub async fn execute<A: DocumentsApi + ?Sized>(api: &A, effect: Effect) -> ViewEvent {
    match effect {
        Effect::Load { seq, params } => match api.list_documents(&params).await {
            Ok(documents) => ViewEvent::DocumentsLoaded { seq, documents },
            Err(err) => {
                warn!(seq, error = %err, detail = err.detail(), "document list request failed");
                ViewEvent::LoadFailed {
                    seq,
                    error: ViewError::from_client_error(ViewErrorContext::Load, &err),
                }
            }
        },
        Effect::Import => match api.import_documents().await {
            Ok(summary) => ViewEvent::ImportFinished(summary),
            Err(err) => {
                warn!(error = %err, detail = err.detail(), "import request failed");
                ViewEvent::ImportFailed(ViewError::from_client_error(
                    ViewErrorContext::Import,
                    &err,
                ))
            }
        },
    }
}
