use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Document, ImportSummary},
    error::ApiErrorBody,
    query::QueryParams,
};
use tracing::{debug, info};
use url::Url;

pub mod controller;
pub mod error;

pub use controller::{
    events::{ViewError, ViewErrorContext, ViewErrorKind, ViewEvent},
    orchestration::{execute, ViewController},
    reducer::{Effect, ViewState, ViewStatus},
};
pub use error::ClientError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// The two backend operations the document view depends on.
#[async_trait]
pub trait DocumentsApi: Send + Sync {
    async fn list_documents(&self, params: &QueryParams) -> Result<Vec<Document>, ClientError>;
    async fn import_documents(&self) -> Result<ImportSummary, ClientError>;
}

#[async_trait]
impl<T: DocumentsApi + ?Sized> DocumentsApi for Arc<T> {
    async fn list_documents(&self, params: &QueryParams) -> Result<Vec<Document>, ClientError> {
        (**self).list_documents(params).await
    }

    async fn import_documents(&self) -> Result<ImportSummary, ClientError> {
        (**self).import_documents().await
    }
}

/// HTTP binding of [`DocumentsApi`] against `{base}/documents` and `{base}/import`.
#[derive(Debug, Clone)]
pub struct DocumentsClient {
    http: Client,
    base_url: Url,
}

impl DocumentsClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: err.to_string(),
            })
    }
}

#[async_trait]
impl DocumentsApi for DocumentsClient {
    async fn list_documents(&self, params: &QueryParams) -> Result<Vec<Document>, ClientError> {
        let url = self.endpoint("documents")?;
        debug!(%url, query = %params.to_query_string(), "fetching documents");
        let response = self.http.get(url).query(params.as_pairs()).send().await?;
        let documents: Vec<Document> = decode_json(response).await?;
        debug!(count = documents.len(), "documents fetched");
        Ok(documents)
    }

    async fn import_documents(&self) -> Result<ImportSummary, ClientError> {
        let url = self.endpoint("import")?;
        debug!(%url, "triggering import");
        let response = self.http.post(url).send().await?;
        let summary: ImportSummary = decode_json(response).await?;
        info!(imported = summary.imported, "import finished");
        Ok(summary)
    }
}

/// Parses and validates the API base URL. The path always ends with `/` so
/// endpoint names join beneath it instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = ApiErrorBody::parse(&body).and_then(|body| body.message());
        return Err(ClientError::Fetch {
            status: status.as_u16(),
            detail,
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ClientError::Transport(format!("invalid response body: {err}")))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
