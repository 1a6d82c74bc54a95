//! Ingestion of the tokens or errors the backend appends to the landing URL
//! after a Google sign-in.

use crate::error::AuthError;
use crate::session::SessionStore;
use std::sync::Arc;
use url::{form_urlencoded, Url};

const CALLBACK_KEYS: [&str; 4] = ["access", "refresh", "error", "message"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthCallback {
    Tokens { access: String, refresh: String },
    Error { code: String, message: Option<String> },
}

/// Where in the URL the callback was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackChannel {
    Query,
    /// `#access=..&refresh=..`, kept for older backends.
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    SignedIn { landing: String },
    Failed { notice: String },
}

/// The application's notion of "the address bar".
pub trait History {
    fn current(&self) -> &Url;

    /// Rewrite the current entry without adding a new one.
    fn replace(&mut self, url: Url);
}

/// Query string first, then the fragment.
pub fn parse_callback(url: &Url) -> Option<(OAuthCallback, CallbackChannel)> {
    if let Some(callback) = url.query().and_then(parse_pairs) {
        return Some((callback, CallbackChannel::Query));
    }
    url.fragment()
        .and_then(parse_pairs)
        .map(|callback| (callback, CallbackChannel::Fragment))
}

fn parse_pairs(input: &str) -> Option<OAuthCallback> {
    let mut access = None;
    let mut refresh = None;
    let mut error = None;
    let mut message = None;

    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "access" => access = Some(value.into_owned()),
            "refresh" => refresh = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "message" => message = Some(value.into_owned()),
            _ => {}
        }
    }

    match (access, refresh, error) {
        (Some(access), Some(refresh), _) => Some(OAuthCallback::Tokens { access, refresh }),
        (_, _, Some(code)) => Some(OAuthCallback::Error { code, message }),
        // A lone token is not a sign-in.
        _ => None,
    }
}

/// Copy of `url` without the callback parameters in `channel`. Other
/// parameters keep their original encoding.
pub fn strip_callback_params(url: &Url, channel: CallbackChannel) -> Url {
    let mut cleaned = url.clone();
    let source = match channel {
        CallbackChannel::Query => url.query(),
        CallbackChannel::Fragment => url.fragment(),
    };

    let kept: Vec<&str> = source
        .unwrap_or_default()
        .split('&')
        .filter(|segment| !segment.is_empty() && !is_callback_segment(segment))
        .collect();
    let rest = (!kept.is_empty()).then(|| kept.join("&"));

    match channel {
        CallbackChannel::Query => cleaned.set_query(rest.as_deref()),
        CallbackChannel::Fragment => cleaned.set_fragment(rest.as_deref()),
    }
    cleaned
}

fn is_callback_segment(segment: &str) -> bool {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .is_some_and(|(key, _)| CALLBACK_KEYS.contains(&key.as_ref()))
}

/// Human-readable text for a backend error code.
pub fn error_message(code: &str, message: Option<&str>) -> String {
    let base = match code {
        "auth_failed" => "Authentication failed. Please try again.".to_string(),
        "google_auth_failed" => "Google sign-in failed. Please try again.".to_string(),
        "signup_closed" => "Sign-ups are currently closed.".to_string(),
        other => format!("Authentication error ({})", other),
    };
    match message {
        Some(message) if !message.trim().is_empty() => format!("{} {}", base, message.trim()),
        _ => base,
    }
}

/// `{api_url}/glogin/google/start/`
pub fn start_url(api_url: &str) -> String {
    format!("{}/glogin/google/start/", api_url.trim_end_matches('/'))
}

/// Open the Google sign-in page in the system browser.
pub fn open_login(start_url: &str) -> Result<(), AuthError> {
    tracing::info!(url = start_url, "Opening browser for Google sign-in");
    open::that(start_url).map_err(|e| {
        tracing::warn!(error = %e, "Failed to open browser");
        AuthError::Io(e)
    })
}

/// Consumes callback parameters from the landing URL exactly once.
pub struct OAuthCallbackHandler {
    session: Arc<SessionStore>,
    landing_route: String,
    last_consumed: Option<Url>,
}

impl OAuthCallbackHandler {
    pub fn new(session: Arc<SessionStore>, landing_route: impl Into<String>) -> Self {
        Self {
            session,
            landing_route: landing_route.into(),
            last_consumed: None,
        }
    }

    /// Returns `None` when the URL carries no callback or was already consumed.
    pub fn process(
        &mut self,
        history: &mut impl History,
    ) -> Result<Option<CallbackOutcome>, AuthError> {
        let url = history.current().clone();
        if self.last_consumed.as_ref() == Some(&url) {
            return Ok(None);
        }

        let Some((callback, channel)) = parse_callback(&url) else {
            return Ok(None);
        };

        let outcome = match callback {
            OAuthCallback::Tokens { access, refresh } => {
                self.session.set(&access, &refresh)?;
                tracing::info!(?channel, "Signed in from OAuth callback");
                CallbackOutcome::SignedIn {
                    landing: self.landing_route.clone(),
                }
            }
            OAuthCallback::Error { code, message } => {
                tracing::warn!(code = %code, ?channel, "OAuth callback reported an error");
                CallbackOutcome::Failed {
                    notice: error_message(&code, message.as_deref()),
                }
            }
        };

        history.replace(strip_callback_params(&url, channel));
        self.last_consumed = Some(url);
        Ok(Some(outcome))
    }
}
