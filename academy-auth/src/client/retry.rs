use academy_api::endpoints::{
    COURSES_PATH, CSRF_PATH, LOGIN_PATH, REFRESH_PATH, REGISTER_PATH, VIDEOS_PATH,
};
use academy_api::{RequestDescriptor, StatusCode};

/// Which submission of a logical request produced a response.
///
/// Retry derivations move `Initial` to `Retry`; nothing moves back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Initial,
    Retry,
}

impl Attempt {
    pub fn next(self) -> Option<Attempt> {
        match self {
            Attempt::Initial => Some(Attempt::Retry),
            Attempt::Retry => None,
        }
    }
}

/// What to do with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Not a 401: hand the response to the caller.
    PassThrough,
    /// A 401 that cannot be recovered from here.
    Propagate,
    /// Resubmit once with no credentials.
    RetryAnonymously,
    /// Refresh the access token, then resubmit once.
    RefreshAndRetry,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    public_prefixes: Vec<String>,
}

impl RetryPolicy {
    pub fn new(public_prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            public_prefixes: public_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn evaluate(
        &self,
        request: &RequestDescriptor,
        status: StatusCode,
        attempt: Attempt,
        has_refresh_token: bool,
    ) -> RetryDecision {
        if status != StatusCode::UNAUTHORIZED {
            return RetryDecision::PassThrough;
        }

        if attempt == Attempt::Retry {
            return RetryDecision::Propagate;
        }

        // Sent without credentials; neither dropping nor refreshing them changes anything.
        if request.skips_auth() {
            return RetryDecision::Propagate;
        }

        if request.is_safe_read() && self.is_public(request.path()) {
            return RetryDecision::RetryAnonymously;
        }

        if !is_auth_endpoint(request.path()) && has_refresh_token {
            return RetryDecision::RefreshAndRetry;
        }

        RetryDecision::Propagate
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new([VIDEOS_PATH, COURSES_PATH])
    }
}

/// Endpoints that establish credentials; a 401 from them never triggers a refresh.
pub fn is_auth_endpoint(path: &str) -> bool {
    [CSRF_PATH, LOGIN_PATH, REFRESH_PATH, REGISTER_PATH]
        .iter()
        .any(|endpoint| path.starts_with(endpoint))
}
