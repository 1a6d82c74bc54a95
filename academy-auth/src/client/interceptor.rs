use crate::client::csrf::CsrfSource;
use crate::error::AuthError;
use crate::session::SessionStore;
use academy_api::RequestDescriptor;
use reqwest::header::{HeaderName, HeaderValue};
use std::sync::Arc;

/// Decorates every outbound request with credentials.
///
/// Pure header mutation: reads the session and the CSRF source, never does I/O.
pub struct RequestInterceptor {
    session: Arc<SessionStore>,
    csrf: Arc<dyn CsrfSource>,
    csrf_header: HeaderName,
}

impl RequestInterceptor {
    pub fn new(
        session: Arc<SessionStore>,
        csrf: Arc<dyn CsrfSource>,
        csrf_header: &str,
    ) -> Result<Self, AuthError> {
        let csrf_header = HeaderName::from_bytes(csrf_header.as_bytes()).map_err(|e| {
            AuthError::Configuration(format!("Invalid CSRF header name {:?}: {}", csrf_header, e))
        })?;

        Ok(Self {
            session,
            csrf,
            csrf_header,
        })
    }

    pub fn decorate(&self, request: RequestDescriptor) -> RequestDescriptor {
        // Bootstrap, login and refresh calls must not carry a stale token.
        if request.skips_auth() {
            return request;
        }

        let mut request = request;
        let session = self.session.get();
        if let Some(token) = session.access_token() {
            request = request.bearer(token);
        }

        if request.is_unsafe() {
            match self.csrf.csrf_token() {
                Some(token) => match HeaderValue::from_str(&token) {
                    Ok(value) => request = request.header(self.csrf_header.clone(), value),
                    Err(_) => tracing::warn!("CSRF cookie is not a valid header value, skipping"),
                },
                // The server rejects the request if it needs the token.
                None => tracing::debug!(path = request.path(), "No CSRF cookie available"),
            }
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    fn interceptor(session: Arc<SessionStore>, csrf: Option<&'static str>) -> RequestInterceptor {
        let source = move || csrf.map(str::to_string);
        RequestInterceptor::new(session, Arc::new(source), "X-CSRFToken").unwrap()
    }

    #[test]
    fn attaches_bearer_token() {
        let session = Arc::new(SessionStore::in_memory());
        session.set("access-1", "refresh-1").unwrap();

        let request = interceptor(session, None).decorate(RequestDescriptor::get("/api/auth/profile/"));
        assert_eq!(request.bearer_token(), Some("access-1"));
        assert!(request.headers().get("X-CSRFToken").is_none());
    }

    #[test]
    fn skip_auth_passes_through_unmodified() {
        let session = Arc::new(SessionStore::in_memory());
        session.set("access-1", "refresh-1").unwrap();

        let request = interceptor(session, Some("csrf"))
            .decorate(RequestDescriptor::post("/api/auth/login/").skip_auth(true));
        assert!(request.headers().is_empty());
    }

    #[test]
    fn unsafe_methods_get_csrf_header() {
        let session = Arc::new(SessionStore::in_memory());
        let interceptor = interceptor(session, Some("csrf-value"));

        let request = interceptor.decorate(RequestDescriptor::patch("/api/auth/profile/"));
        assert_eq!(request.headers().get("X-CSRFToken").unwrap(), "csrf-value");
        // No session, no Authorization.
        assert!(request.headers().get(AUTHORIZATION).is_none());

        let request = interceptor.decorate(RequestDescriptor::get("/api/video/courses/"));
        assert!(request.headers().get("X-CSRFToken").is_none());
    }

    #[test]
    fn missing_csrf_cookie_is_not_fatal() {
        let session = Arc::new(SessionStore::in_memory());
        session.set("a", "r").unwrap();
        let request = interceptor(session, None).decorate(RequestDescriptor::post("/api/video/ratings/"));
        assert_eq!(request.bearer_token(), Some("a"));
        assert!(request.headers().get("X-CSRFToken").is_none());
    }

    #[test]
    fn rejects_invalid_header_name() {
        let session = Arc::new(SessionStore::in_memory());
        let source = || None;
        assert!(RequestInterceptor::new(session, Arc::new(source), "bad header").is_err());
    }
}
