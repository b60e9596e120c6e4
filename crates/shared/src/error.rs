use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the documents backend on non-2xx responses.
///
/// `detail` is usually a string, but request validation failures carry a
/// list of objects with a `msg` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: Value,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Value::String(detail.into()),
        }
    }

    /// Parses a response body, returning `None` when it is not a JSON error body.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let body = ApiErrorBody::parse(r#"{"detail":"invalid sort field 'author'"}"#)
            .expect("error body");
        assert_eq!(body.message().as_deref(), Some("invalid sort field 'author'"));
    }

    #[test]
    fn validation_detail_joins_messages() {
        let body = ApiErrorBody::parse(
            r#"{"detail":[{"loc":["query","limit"],"msg":"too large"},{"msg":"bad offset"}]}"#,
        )
        .expect("error body");
        assert_eq!(body.message().as_deref(), Some("too large; bad offset"));
    }

    #[test]
    fn non_json_body_is_not_an_error_body() {
        assert!(ApiErrorBody::parse("<html>502 Bad Gateway</html>").is_none());
        assert_eq!(ApiErrorBody::new("  ").message(), None);
    }
}
