use crate::error::ApiError;
use crate::request::{RequestDescriptor, Response};
use reqwest::Client;
use reqwest::cookie::Jar;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Sends a fully decorated request and returns the response, whatever its status.
///
/// Only failures to obtain a response at all (network, timeout, unreadable
/// body) are errors at this level.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<Response, ApiError>> + Send;
}

/// reqwest-backed transport with a cookie jar shared with the CSRF reader.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: Url,
    cookies: Arc<Jar>,
}

impl HttpTransport {
    /// `base_url` may carry a path prefix (`https://host/backend`); request
    /// paths are resolved below it.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let cookies = Arc::new(Jar::default());
        let http_client = Client::builder()
            .timeout(timeout)
            .cookie_provider(cookies.clone())
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            cookies,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cookie_jar(&self) -> Arc<Jar> {
        self.cookies.clone()
    }

    fn url_for(&self, request: &RequestDescriptor) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(request.path().trim_start_matches('/'))?;
        if !request.query_pairs().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query_pairs());
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<Response, ApiError> {
        let url = self.url_for(request)?;

        let mut builder = self
            .http_client
            .request(request.method().clone(), url)
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        Ok(Response::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_method_path_query_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login/"))
            .and(query_param("next", "/learning"))
            .and(header("Authorization", "Bearer abc"))
            .and(body_json(serde_json::json!({"username": "ada"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let request = RequestDescriptor::post("/api/auth/login/")
            .query("next", "/learning")
            .bearer("abc")
            .json(&serde_json::json!({"username": "ada"}))
            .unwrap();

        let response = transport.execute(&request).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text(), "{\"ok\":true}");
    }

    #[tokio::test]
    async fn error_statuses_are_responses_not_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/profile/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let response = transport
            .execute(&RequestDescriptor::get("/api/auth/profile/"))
            .await
            .unwrap();
        assert!(response.is_unauthorized());
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/backend/api/video/courses/"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let base = format!("{}/backend", server.uri());
        let transport = HttpTransport::new(&base, Duration::from_secs(5)).unwrap();
        assert_eq!(transport.base_url().path(), "/backend/");

        let request = RequestDescriptor::get("/api/video/courses/").query("page", 2);
        let response = transport.execute(&request).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpTransport::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
