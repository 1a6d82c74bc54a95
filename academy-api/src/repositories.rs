use crate::endpoints::{
    auth::{GetCsrf, GetProfile, Login, RefreshToken, UpdateProfile},
    users::Register,
    video::{ListCourses, ListVideos},
};

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn csrf(&self) -> GetCsrf {
        GetCsrf
    }

    pub fn login(&self, username: impl Into<String>, password: impl Into<String>) -> Login {
        Login::new(username, password)
    }

    pub fn refresh(&self, refresh: impl Into<String>) -> RefreshToken {
        RefreshToken::new(refresh)
    }

    pub fn profile(&self) -> GetProfile {
        GetProfile
    }

    pub fn update_profile(&self) -> UpdateProfile {
        UpdateProfile::new()
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn register(
        &self,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Register {
        Register::new(username, email, password)
    }
}

pub struct VideoRepository;

impl VideoRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn courses(&self) -> ListCourses {
        ListCourses::new()
    }

    pub fn videos(&self) -> ListVideos {
        ListVideos
    }
}
