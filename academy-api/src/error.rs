use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug)]
pub enum ApiError {
    /// Network unreachable, timeout or an unreadable response body.
    Transport(reqwest::Error),
    InvalidUrl(url::ParseError),
    /// A 401 that the session layer could not (or was not allowed to) recover from.
    Unauthorized { body: String },
    /// Any other 4xx. Login and registration surface field errors through this.
    Client { status: StatusCode, body: String },
    Server { status: StatusCode, body: String },
    Decode(serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn body(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { body }
            | ApiError::Client { body, .. }
            | ApiError::Server { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The server's `detail` message, if the body carries one.
    pub fn detail(&self) -> Option<String> {
        self.body()
            .and_then(|body| serde_json::from_str::<ErrorResponse>(body).ok())
            .and_then(|response| response.detail)
    }

    /// Field-level validation messages keyed by field name.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        self.body()
            .and_then(|body| serde_json::from_str::<ErrorResponse>(body).ok())
            .map(|response| {
                response
                    .fields
                    .into_iter()
                    .filter_map(|(field, value)| match value {
                        serde_json::Value::String(msg) => Some((field, vec![msg])),
                        serde_json::Value::Array(items) => Some((
                            field,
                            items
                                .into_iter()
                                .filter_map(|item| item.as_str().map(str::to_string))
                                .collect(),
                        )),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Transport(value)
    }
}

impl From<url::ParseError> for ApiError {
    fn from(value: url::ParseError) -> Self {
        ApiError::InvalidUrl(value)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::Decode(value)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Transport error: {}", e),
            ApiError::InvalidUrl(e) => write!(f, "Invalid URL: {}", e),
            ApiError::Decode(e) => write!(f, "Could not decode response: {}", e),
            ApiError::Unauthorized { .. } => match self.detail() {
                Some(detail) => write!(f, "(401 Unauthorized) {}", detail),
                None => write!(f, "(401 Unauthorized)"),
            },
            ApiError::Client { status, body } | ApiError::Server { status, body } => {
                match self.detail() {
                    Some(detail) => write!(f, "({}) {}", status, detail),
                    None => write!(f, "({}) {}", status, body),
                }
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            ApiError::InvalidUrl(e) => Some(e),
            ApiError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Error body as returned by the backend: either `{"detail": ...}` or a map of
/// field names to messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}
