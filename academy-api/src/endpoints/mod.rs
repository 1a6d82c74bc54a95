pub mod auth;
pub mod users;
pub mod video;

use serde::{Deserialize, Serialize};

pub const CSRF_PATH: &str = "/api/auth/csrf/";
pub const LOGIN_PATH: &str = "/api/auth/login/";
pub const REFRESH_PATH: &str = "/api/auth/refresh/";
pub const PROFILE_PATH: &str = "/api/auth/profile/";
pub const REGISTER_PATH: &str = "/api/user/register/";
pub const VIDEOS_PATH: &str = "/api/video/videos/";
pub const COURSES_PATH: &str = "/api/video/courses/";

/// List endpoints answer either with a bare array or, when pagination is
/// enabled server side, with a page envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page {
        count: u64,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Page { results, .. } => results,
            Listing::Plain(items) => items,
        }
    }

    pub fn has_next(&self) -> bool {
        matches!(self, Listing::Page { next: Some(_), .. })
    }
}
