use super::{CSRF_PATH, LOGIN_PATH, PROFILE_PATH, REFRESH_PATH};
use crate::macros::setter;
use crate::{ApiRequest, RequestDescriptor};
use serde::{Deserialize, Serialize};

// Requests

/// Bootstraps the `csrftoken` cookie. Sent without credentials.
#[derive(Default, Debug, Clone)]
pub struct GetCsrf;

impl ApiRequest for GetCsrf {
    type Response = serde_json::Value;

    fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor::get(CSRF_PATH).skip_auth(true)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Login {
    username: String,
    password: String,
}

impl Login {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl ApiRequest for Login {
    type Response = TokenPairResponse;

    fn descriptor(&self) -> RequestDescriptor {
        let descriptor = RequestDescriptor::post(LOGIN_PATH).skip_auth(true);
        // Serializing two strings cannot fail.
        descriptor.clone().json(self).unwrap_or(descriptor)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshToken {
    refresh: String,
}

impl RefreshToken {
    pub fn new(refresh: impl Into<String>) -> Self {
        Self {
            refresh: refresh.into(),
        }
    }
}

impl ApiRequest for RefreshToken {
    type Response = RefreshResponse;

    fn descriptor(&self) -> RequestDescriptor {
        let descriptor = RequestDescriptor::post(REFRESH_PATH).skip_auth(true);
        descriptor.clone().json(self).unwrap_or(descriptor)
    }
}

#[derive(Default, Debug, Clone)]
pub struct GetProfile;

impl ApiRequest for GetProfile {
    type Response = Profile;

    fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor::get(PROFILE_PATH)
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    college: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
}

impl UpdateProfile {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt full_name: String);
    setter!(opt college: String);
    setter!(opt bio: String);
}

impl ApiRequest for UpdateProfile {
    type Response = Profile;

    fn descriptor(&self) -> RequestDescriptor {
        let descriptor = RequestDescriptor::patch(PROFILE_PATH);
        descriptor.clone().json(self).unwrap_or(descriptor)
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// The refresh token is only present when the server rotates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}
