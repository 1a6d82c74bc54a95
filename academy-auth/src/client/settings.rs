use crate::error::AuthError;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL the OAuth callback redirects to.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    #[serde(default = "default_landing_route")]
    pub landing_route: String,

    #[serde(default = "default_csrf_cookie_name")]
    pub csrf_cookie_name: String,

    #[serde(default = "default_csrf_header_name")]
    pub csrf_header_name: String,

    /// Path prefixes whose GETs may be retried without credentials.
    #[serde(default = "default_public_prefixes")]
    pub public_prefixes: Vec<String>,

    #[serde(default = "default_guard_delay_ms")]
    pub guard_delay_ms: u64,

    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Overrides the token file location.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:5173/".to_string()
}

fn default_landing_route() -> String {
    "/learning".to_string()
}

fn default_csrf_cookie_name() -> String {
    "csrftoken".to_string()
}

fn default_csrf_header_name() -> String {
    "X-CSRFToken".to_string()
}

fn default_public_prefixes() -> Vec<String> {
    vec![
        academy_api::endpoints::VIDEOS_PATH.to_string(),
        academy_api::endpoints::COURSES_PATH.to_string(),
    ]
}

fn default_guard_delay_ms() -> u64 {
    100
}

fn default_notice_ttl_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            frontend_url: default_frontend_url(),
            landing_route: default_landing_route(),
            csrf_cookie_name: default_csrf_cookie_name(),
            csrf_header_name: default_csrf_header_name(),
            public_prefixes: default_public_prefixes(),
            guard_delay_ms: default_guard_delay_ms(),
            notice_ttl_secs: default_notice_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            storage_path: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("ACADEMY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load(&config_path)
    }

    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("ACADEMY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("public_prefixes")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        for (key, value) in [("api_url", &self.api_url), ("frontend_url", &self.frontend_url)] {
            if value.is_empty() {
                return Err(format!("{} is required", key));
            }
            if !value.starts_with("http") || Url::parse(value).is_err() {
                return Err(format!("{} must be a valid HTTP(S) URL", key));
            }
        }
        if !self.landing_route.starts_with('/') {
            return Err("landing_route must start with '/'".to_string());
        }
        if self.csrf_cookie_name.is_empty() || self.csrf_header_name.is_empty() {
            return Err("csrf_cookie_name and csrf_header_name must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, AuthError> {
        let settings = Self::new()?;
        settings.validate().map_err(AuthError::Configuration)?;
        Ok(settings)
    }

    pub fn guard_delay(&self) -> Duration {
        Duration::from_millis(self.guard_delay_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn oauth_start_url(&self) -> String {
        crate::oauth::start_url(&self.api_url)
    }
}
