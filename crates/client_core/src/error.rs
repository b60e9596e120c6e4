use thiserror::Error;

/// Failure of a documents backend call.
///
/// `Display` is the message shown to the user: `HTTP <status>` for rejected
/// requests, the underlying transport message otherwise.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}")]
    Fetch { status: u16, detail: Option<String> },
    #[error("{0}")]
    Transport(String),
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, ClientError::Fetch { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend-provided explanation for a rejected request, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Fetch { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        ClientError::Transport(message)
    }
}
