use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::{AppCommand, Effect};
use crate::state::{AppState, LoadingState, Route};
use std::time::Instant;

/// Execute a command: update state, then run its effects as background tasks
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
    now: Instant,
) {
    for effect in execute_command_sync(command, state, now) {
        match effect {
            Effect::LoadCourses => {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("load_courses", async move {
                    data_loader.load_courses().await;
                });
            }
            Effect::LoadProfile => {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("load_profile", async move {
                    data_loader.load_profile().await;
                });
            }
            Effect::OpenLogin => {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("open_login", async move {
                    data_loader.open_login().await;
                });
            }
            // Synchronous: requests already in flight keep running.
            Effect::Logout => data_loader.logout(),
        }
    }
}

/// State half of a command. Returns the effects it needs, without running them.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState, now: Instant) -> Vec<Effect> {
    match command {
        AppCommand::Quit => {
            state.should_quit = true;
            Vec::new()
        }

        AppCommand::Navigate(route) => {
            if route == state.route() {
                return Vec::new();
            }
            state.navigate_to(route);
            state.sync_guard(now);
            route_loads(state)
        }

        AppCommand::Reload => route_loads(state),

        AppCommand::SelectNext => {
            state.courses.select_next();
            Vec::new()
        }

        AppCommand::SelectPrevious => {
            state.courses.select_prev();
            Vec::new()
        }

        AppCommand::StartGoogleLogin => vec![Effect::OpenLogin],

        AppCommand::Logout => vec![Effect::Logout],

        AppCommand::ConfirmAuthModal | AppCommand::DismissAuthModal => {
            let Some(path) = state.guard.as_mut().and_then(|guard| guard.dismiss()) else {
                return Vec::new();
            };
            state.redirect_to(path);
            let mut effects = route_loads(state);
            if command == AppCommand::ConfirmAuthModal {
                effects.push(Effect::OpenLogin);
            }
            effects
        }

        AppCommand::DismissNotice => {
            state.notice = None;
            Vec::new()
        }
    }
}

/// Data the current route shows; marks the matching sections as loading.
fn route_loads(state: &mut AppState) -> Vec<Effect> {
    let route = state.route();
    let mut effects = Vec::new();

    if matches!(route, Route::Home | Route::Explore | Route::Learning) {
        state.courses.loading = LoadingState::start();
        effects.push(Effect::LoadCourses);
    }

    // Anonymous profile requests would only bounce off the API.
    if route.is_protected() && state.authenticated {
        state.profile.loading = LoadingState::start();
        effects.push(Effect::LoadProfile);
    }

    tracing::debug!(route = route.path(), ?effects, "Loading route data");
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Location, UiConfig};
    use std::time::Duration;

    fn state(path: &str, authenticated: bool) -> AppState {
        let location = Location::parse(&format!("http://localhost:5173{}", path)).unwrap();
        AppState::new(location, authenticated, UiConfig::default())
    }

    #[test]
    fn public_routes_load_courses_only() {
        let now = Instant::now();
        let mut state = state("/", true);
        let effects = execute_command_sync(AppCommand::Navigate(Route::Explore), &mut state, now);
        assert_eq!(effects, vec![Effect::LoadCourses]);
        assert!(state.courses.loading.is_loading());
    }

    #[test]
    fn protected_routes_load_profile_when_signed_in() {
        let now = Instant::now();
        let mut state = state("/", true);
        let effects = execute_command_sync(AppCommand::Navigate(Route::Settings), &mut state, now);
        assert_eq!(effects, vec![Effect::LoadProfile]);

        let mut anonymous = self::state("/", false);
        let effects =
            execute_command_sync(AppCommand::Navigate(Route::Settings), &mut anonymous, now);
        assert!(effects.is_empty());
    }

    #[test]
    fn navigating_to_current_route_is_a_no_op() {
        let now = Instant::now();
        let mut state = state("/explore", false);
        let effects = execute_command_sync(AppCommand::Navigate(Route::Explore), &mut state, now);
        assert!(effects.is_empty());
        assert_eq!(state.location.depth(), 1);
    }

    #[test]
    fn confirming_modal_redirects_home_and_opens_login() {
        let now = Instant::now();
        let mut state = state("/learning", false);
        state.sync_guard(now);
        state.tick(now + Duration::from_millis(100));

        let effects = execute_command_sync(AppCommand::ConfirmAuthModal, &mut state, now);
        assert_eq!(state.route(), Route::Home);
        assert!(state.guard.is_none());
        assert_eq!(effects, vec![Effect::LoadCourses, Effect::OpenLogin]);
    }

    #[test]
    fn modal_commands_need_a_modal() {
        let now = Instant::now();
        let mut state = state("/learning", true);
        state.sync_guard(now);
        let effects = execute_command_sync(AppCommand::DismissAuthModal, &mut state, now);
        assert!(effects.is_empty());
        assert_eq!(state.route(), Route::Learning);
    }
}
