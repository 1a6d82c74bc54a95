use crate::events::DataEvent;
use academy_api::Request;
use academy_auth::SessionClient;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs API calls through the session client and reports results as data events
#[derive(Clone)]
pub struct DataLoader {
    client: Arc<SessionClient>,
    data_tx: mpsc::UnboundedSender<DataEvent>,
}

impl DataLoader {
    pub fn new(client: Arc<SessionClient>, data_tx: mpsc::UnboundedSender<DataEvent>) -> Self {
        Self { client, data_tx }
    }

    fn emit(&self, event: DataEvent) {
        if self.data_tx.send(event).is_err() {
            tracing::debug!("UI loop gone, dropping data event");
        }
    }

    /// Prime the CSRF cookie before any state-changing request.
    pub async fn bootstrap(&self) {
        // Failures are logged by the client; unsafe requests then go without the header.
        let _ = self.client.fetch_csrf().await;
    }

    pub async fn load_courses(&self) {
        tracing::info!("Loading courses");
        match self.client.send_json(&Request::video().courses()).await {
            Ok(listing) => {
                let courses = listing.into_items();
                tracing::info!("Loaded {} courses", courses.len());
                self.emit(DataEvent::CoursesLoaded { courses });
            }
            Err(e) => {
                tracing::error!("Failed to load courses: {}", e);
                self.emit(DataEvent::CoursesLoadFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn load_profile(&self) {
        tracing::info!("Loading profile");
        match self.client.send_json(&Request::auth().profile()).await {
            Ok(profile) => {
                self.emit(DataEvent::ProfileLoaded { profile });
            }
            Err(e) => {
                tracing::error!("Failed to load profile: {}", e);
                self.emit(DataEvent::ProfileLoadFailed {
                    error: e.to_string(),
                    session_expired: e.is_session_invalid(),
                });
            }
        }
    }

    pub async fn open_login(&self) {
        let url = self.client.oauth_start_url().to_string();
        let target = url.clone();
        let result = tokio::task::spawn_blocking(move || academy_auth::oauth::open_login(&target)).await;

        let error = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(e) => e.to_string(),
        };
        self.emit(DataEvent::LoginBrowserFailed { url, error });
    }

    pub fn logout(&self) {
        if let Err(e) = self.client.logout() {
            tracing::error!("Failed to clear session: {}", e);
        }
    }
}
