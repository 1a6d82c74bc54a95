use super::REGISTER_PATH;
use crate::macros::setter;
use crate::{ApiRequest, RequestDescriptor};
use serde::{Deserialize, Serialize};

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct Register {
    username: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl Register {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    setter!(first_name: String);
    setter!(last_name: String);
}

impl ApiRequest for Register {
    type Response = RegisteredUser;

    fn descriptor(&self) -> RequestDescriptor {
        let descriptor = RequestDescriptor::post(REGISTER_PATH).skip_auth(true);
        descriptor.clone().json(self).unwrap_or(descriptor)
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}
