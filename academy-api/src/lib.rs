pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
mod request;
mod transport;

pub use crate::error::{ApiError, ErrorResponse};
pub use reqwest::{Method, StatusCode};
pub use request::{RequestDescriptor, Response};
pub use transport::{HttpTransport, Transport};

use repositories::*;
use serde::de::DeserializeOwned;

/// A typed API call: knows how to describe itself and what it decodes to.
pub trait ApiRequest {
    type Response: DeserializeOwned;

    fn descriptor(&self) -> RequestDescriptor;
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }

    pub fn video() -> VideoRepository {
        VideoRepository::new()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
