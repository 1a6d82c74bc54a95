use super::{COURSES_PATH, Listing, VIDEOS_PATH};
use crate::macros::setter;
use crate::{ApiRequest, RequestDescriptor};
use serde::{Deserialize, Serialize};

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub instructor_name: String,
    // Decimal fields arrive as strings, e.g. "4.3".
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub total_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub added: Option<String>,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListCourses {
    page: Option<u32>,
    search: Option<String>,
}

impl ListCourses {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt page: u32);
    setter!(opt search: String);
}

impl ApiRequest for ListCourses {
    type Response = Listing<Course>;

    fn descriptor(&self) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::get(COURSES_PATH);
        if let Some(page) = self.page {
            descriptor = descriptor.query("page", page);
        }
        if let Some(search) = &self.search {
            descriptor = descriptor.query("search", search);
        }
        descriptor
    }
}

/// Legacy flat video list, kept by the backend for older clients.
#[derive(Default, Debug, Clone)]
pub struct ListVideos;

impl ApiRequest for ListVideos {
    type Response = Listing<Video>;

    fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor::get(VIDEOS_PATH)
    }
}
