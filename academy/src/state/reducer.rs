use super::{AppState, LoadingState};
use crate::events::{AppCommand, DataEvent};
use std::time::Instant;

/// State transition for data events.
///
/// Returns a follow-up command when the event makes new data necessary.
pub fn reduce_data_event(
    state: &mut AppState,
    event: DataEvent,
    now: Instant,
) -> Option<AppCommand> {
    match event {
        DataEvent::CoursesLoaded { courses } => {
            state.courses.selected = state.courses.selected.min(courses.len().saturating_sub(1));
            state.courses.courses = courses;
            state.courses.loading = LoadingState::Loaded;
            None
        }

        DataEvent::CoursesLoadFailed { error } => {
            state.courses.loading = LoadingState::Error(error.clone());
            state.raise_notice("Could not load courses", error, now);
            None
        }

        DataEvent::ProfileLoaded { profile } => {
            state.profile.profile = Some(profile);
            state.profile.loading = LoadingState::Loaded;
            None
        }

        DataEvent::ProfileLoadFailed {
            error,
            session_expired,
        } => {
            state.profile.loading = LoadingState::Error(error.clone());
            if session_expired {
                // The client already cleared the session; the guard follows
                // through the session notification.
                state.raise_notice("Session expired", "Please log in again.", now);
            } else {
                state.raise_notice("Could not load profile", error, now);
            }
            None
        }

        DataEvent::SessionChanged { authenticated } => {
            state.authenticated = authenticated;
            state.sync_guard(now);

            if authenticated {
                state.route().is_protected().then_some(AppCommand::Reload)
            } else {
                state.profile = Default::default();
                None
            }
        }

        DataEvent::LoginBrowserFailed { url, error } => {
            tracing::warn!(error = %error, "Browser could not be opened");
            state.raise_notice("Open this address to sign in", url, now);
            None
        }
    }
}
