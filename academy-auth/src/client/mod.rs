mod csrf;
mod interceptor;
mod retry;
mod settings;

pub use csrf::{cookie_value, CookieJarCsrf, CsrfSource};
pub use interceptor::RequestInterceptor;
pub use retry::{is_auth_endpoint, Attempt, RetryDecision, RetryPolicy};
pub use settings::Settings;

use crate::error::AuthError;
use crate::session::SessionStore;
use academy_api::endpoints::auth::{Login, RefreshResponse, RefreshToken};
use academy_api::endpoints::users::{Register, RegisteredUser};
use academy_api::{
    ApiError, ApiRequest, HttpTransport, Request, RequestDescriptor, Response, Transport,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

/// HTTP client that owns the credential lifecycle.
///
/// Every call runs decorate → send → evaluate; a 401 is retried at most once,
/// either anonymously (public reads) or after refreshing the access token.
pub struct SessionClient<T: Transport = HttpTransport> {
    transport: T,
    session: Arc<SessionStore>,
    interceptor: RequestInterceptor,
    policy: RetryPolicy,
    refresh_gate: Mutex<RefreshOutcome>,
    oauth_start_url: String,
}

impl SessionClient<HttpTransport> {
    /// Production client: reqwest transport whose cookie jar doubles as the CSRF source.
    pub fn from_settings(settings: &Settings, session: Arc<SessionStore>) -> Result<Self, AuthError> {
        let transport = HttpTransport::new(&settings.api_url, settings.request_timeout())?;
        let csrf = CookieJarCsrf::new(
            transport.cookie_jar(),
            transport.base_url().clone(),
            settings.csrf_cookie_name.clone(),
        );
        let interceptor =
            RequestInterceptor::new(session.clone(), Arc::new(csrf), &settings.csrf_header_name)?;
        let policy = RetryPolicy::new(settings.public_prefixes.clone());

        Ok(Self::new(transport, session, interceptor, policy)
            .with_oauth_start_url(settings.oauth_start_url()))
    }
}

impl<T: Transport> SessionClient<T> {
    pub fn new(
        transport: T,
        session: Arc<SessionStore>,
        interceptor: RequestInterceptor,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            session,
            interceptor,
            policy,
            refresh_gate: Mutex::new(RefreshOutcome::default()),
            oauth_start_url: Settings::default().oauth_start_url(),
        }
    }

    pub fn with_oauth_start_url(mut self, url: impl Into<String>) -> Self {
        self.oauth_start_url = url.into();
        self
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn oauth_start_url(&self) -> &str {
        &self.oauth_start_url
    }

    /// Send one logical request. Error statuses come back as `AuthError::Api`.
    pub async fn send(&self, request: RequestDescriptor) -> Result<Response, AuthError> {
        let span = tracing::debug_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = request.path(),
        );
        self.send_with_retry(request).instrument(span).await
    }

    pub async fn send_json<R: ApiRequest>(&self, request: &R) -> Result<R::Response, AuthError> {
        let response = self.send(request.descriptor()).await?;
        Ok(response.json()?)
    }

    async fn send_with_retry(&self, request: RequestDescriptor) -> Result<Response, AuthError> {
        let mut request = request;
        let mut attempt = Attempt::Initial;

        loop {
            let outgoing = self.interceptor.decorate(request.clone());
            let response = self.transport.execute(&outgoing).await?;

            let has_refresh_token = self.session.get().refresh_token().is_some();
            let decision =
                self.policy
                    .evaluate(&outgoing, response.status(), attempt, has_refresh_token);
            tracing::debug!(status = %response.status(), ?attempt, ?decision, "Response received");

            match decision {
                RetryDecision::PassThrough | RetryDecision::Propagate => {
                    return Ok(response.error_for_status()?);
                }
                RetryDecision::RetryAnonymously => {
                    request = request.anonymous();
                }
                RetryDecision::RefreshAndRetry => {
                    if !self.refresh_after(outgoing.bearer_token()).await? {
                        return Ok(response.error_for_status()?);
                    }
                }
            }

            attempt = match attempt.next() {
                Some(next) => next,
                None => return Ok(response.error_for_status()?),
            };
        }
    }

    /// Make sure the stored access token is newer than `sent_token`.
    ///
    /// Returns false when there is nothing left to refresh with (the session
    /// was cleared meanwhile); the original 401 should then propagate. A
    /// request that waited on a refresh which failed for the same token gets
    /// that refresh's error.
    async fn refresh_after(&self, sent_token: Option<&str>) -> Result<bool, AuthError> {
        let mut outcome = self.refresh_gate.lock().await;

        let session = self.session.get();
        let current = session.access_token();
        if current.is_some() && current != sent_token {
            tracing::debug!("Access token already refreshed by a concurrent request");
            return Ok(true);
        }

        let Some(refresh_token) = session.refresh_token() else {
            if let Some(error) = outcome.failure_for(sent_token) {
                tracing::debug!("Concurrent refresh for this token failed");
                return Err(AuthError::SessionInvalid(error));
            }
            tracing::debug!("Session cleared while waiting to refresh");
            return Ok(false);
        };

        match self.request_refresh(refresh_token).await {
            Ok(()) => {
                outcome.failed = None;
                Ok(true)
            }
            Err(error) => {
                if let AuthError::SessionInvalid(cause) = &error {
                    outcome.failed = Some((sent_token.map(str::to_owned), cause.clone()));
                }
                Err(error)
            }
        }
    }

    async fn request_refresh(&self, refresh_token: &str) -> Result<(), AuthError> {
        let request = RefreshToken::new(refresh_token).descriptor();
        let result = match self.transport.execute(&request).await {
            Ok(response) => response
                .error_for_status()
                .and_then(|response| response.json::<RefreshResponse>()),
            Err(e) => Err(e),
        };

        match result {
            Ok(tokens) => {
                self.session
                    .rotate(&tokens.access, tokens.refresh.as_deref())?;
                tracing::info!(rotated = tokens.refresh.is_some(), "Access token refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, clearing session");
                self.session.clear()?;
                Err(AuthError::SessionInvalid(Arc::new(e)))
            }
        }
    }

    /// Bootstrap the CSRF cookie. The token itself lands in the cookie jar.
    pub async fn fetch_csrf(&self) -> Result<(), AuthError> {
        match self.send(Request::auth().csrf().descriptor()).await {
            Ok(_) => {
                tracing::debug!("CSRF cookie fetched");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch CSRF token");
                Err(e)
            }
        }
    }

    /// Exchange credentials for a token pair and store it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let tokens = self.send_json(&Login::new(username, password)).await?;
        self.session.set(&tokens.access, &tokens.refresh)?;
        tracing::info!("Logged in");
        Ok(())
    }

    pub async fn register(&self, request: &Register) -> Result<RegisteredUser, AuthError> {
        let user = self.send_json(request).await?;
        tracing::info!("Account registered");
        Ok(user)
    }

    /// Clears the session immediately. Requests already in flight are not aborted.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }
}

/// Result of the last refresh, kept under the refresh gate.
#[derive(Default)]
struct RefreshOutcome {
    /// Access token the failed refresh was meant to replace, and the failure.
    failed: Option<(Option<String>, Arc<ApiError>)>,
}

impl RefreshOutcome {
    fn failure_for(&self, sent_token: Option<&str>) -> Option<Arc<ApiError>> {
        match &self.failed {
            Some((token, error)) if token.as_deref() == sent_token => Some(error.clone()),
            _ => None,
        }
    }
}
