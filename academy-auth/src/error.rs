use academy_api::ApiError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token storage error: {0}")]
    TokenStorage(String),

    #[error("Invalid session update: {0}")]
    InvalidSessionUpdate(&'static str),

    /// The refresh call failed; the stored session has been cleared.
    ///
    /// Shared because every request waiting on that refresh reports the same failure.
    #[error("Session expired, please log in again ({0})")]
    SessionInvalid(#[source] Arc<ApiError>),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// The underlying API error, for callers that render status or field errors.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            AuthError::Api(e) => Some(e),
            AuthError::SessionInvalid(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    pub fn is_session_invalid(&self) -> bool {
        matches!(self, AuthError::SessionInvalid(_))
    }
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
