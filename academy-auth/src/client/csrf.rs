use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use std::borrow::Cow;
use std::sync::Arc;

/// Where the current CSRF token comes from. Read fresh for every unsafe
/// request since the server may rotate it.
pub trait CsrfSource: Send + Sync {
    fn csrf_token(&self) -> Option<String>;
}

impl<F> CsrfSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn csrf_token(&self) -> Option<String> {
        self()
    }
}

/// Reads the server-managed CSRF cookie from the HTTP client's cookie jar.
/// The client never writes this cookie.
pub struct CookieJarCsrf {
    jar: Arc<Jar>,
    url: Url,
    cookie_name: String,
}

impl CookieJarCsrf {
    pub fn new(jar: Arc<Jar>, url: Url, cookie_name: impl Into<String>) -> Self {
        Self {
            jar,
            url,
            cookie_name: cookie_name.into(),
        }
    }
}

impl CsrfSource for CookieJarCsrf {
    fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.url)?;
        let header = header.to_str().ok()?;
        cookie_value(header, &self.cookie_name)
    }
}

/// Extract and percent-decode one cookie from a `Cookie` header value.
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|value| !value.is_empty())
        .map(|value| {
            urlencoding::decode(value)
                .map(Cow::into_owned)
                .unwrap_or_else(|_| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie() {
        let header = "sessionid=abc; csrftoken=tok123; theme=dark";
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("tok123"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn does_not_match_prefix_of_other_cookie() {
        let header = "csrftoken_old=stale; csrftoken=fresh";
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("fresh"));
    }

    #[test]
    fn decodes_percent_encoding() {
        assert_eq!(
            cookie_value("csrftoken=a%2Fb%3Dc", "csrftoken").as_deref(),
            Some("a/b=c")
        );
    }

    #[test]
    fn empty_value_is_absent() {
        assert_eq!(cookie_value("csrftoken=", "csrftoken"), None);
    }

    #[test]
    fn reads_from_cookie_jar() {
        let url: Url = "http://localhost:8000/".parse().unwrap();
        let jar = Arc::new(Jar::default());
        let source = CookieJarCsrf::new(jar.clone(), url.clone(), "csrftoken");
        assert_eq!(source.csrf_token(), None);

        jar.add_cookie_str("csrftoken=from-server; Path=/", &url);
        assert_eq!(source.csrf_token().as_deref(), Some("from-server"));

        // Server rotation is picked up on the next read.
        jar.add_cookie_str("csrftoken=rotated; Path=/", &url);
        assert_eq!(source.csrf_token().as_deref(), Some("rotated"));
    }
}
