use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{reducer, AppState, Location, Route, UiConfig};
use academy_auth::{CallbackOutcome, OAuthCallbackHandler, SessionStore};
use std::sync::Arc;
use std::time::Instant;

/// Trait for handling command execution (production = real loader + tasks, test = mock)
///
/// This trait abstracts the side effects of command execution, allowing tests
/// to inject a mock implementation that doesn't spawn background tasks or make API calls.
pub trait DataEventHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState, now: Instant);
}

/// Testable application core without terminal dependencies
///
/// Time is always passed in, so tests control the guard debounce and notice
/// expiry without sleeping.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
    callback: OAuthCallbackHandler,
}

impl<H: DataEventHandler> AppCore<H> {
    /// Mount the landing URL: consume any OAuth callback in it, then load the
    /// route's data. The authenticated flag is read synchronously so the first
    /// frame already reflects a stored session.
    pub fn new(
        handler: H,
        session: Arc<SessionStore>,
        location: Location,
        config: UiConfig,
        now: Instant,
    ) -> Self {
        let authenticated = session.is_authenticated();
        let callback = OAuthCallbackHandler::new(session, config.landing_route.clone());

        let mut core = Self {
            ui_state: AppState::new(location, authenticated, config),
            handler,
            callback,
        };
        core.execute(AppCommand::Reload, now);
        core
    }

    /// Handle keyboard input and execute the resulting command
    pub fn handle_key(&mut self, event: KeyEvent, now: Instant) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            tracing::debug!(?command, "Executing command");
            self.execute(command, now);
        }
    }

    /// Handle a data event (for test injection or async results)
    pub fn handle_data_event(&mut self, event: DataEvent, now: Instant) {
        if let Some(follow_up) = reducer::reduce_data_event(&mut self.ui_state, event, now) {
            self.execute(follow_up, now);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.ui_state.tick(now);
    }

    pub fn execute(&mut self, command: AppCommand, now: Instant) {
        self.handler
            .execute_with_context(command, &mut self.ui_state, now);
        self.ingest_callback(now);
    }

    /// Runs after every navigation; a cleaned or already consumed URL is a no-op.
    fn ingest_callback(&mut self, now: Instant) {
        match self.callback.process(&mut self.ui_state.location) {
            Ok(Some(CallbackOutcome::SignedIn { landing })) => {
                let route = Route::from_path(&landing).unwrap_or(Route::Learning);
                self.execute(AppCommand::Navigate(route), now);
            }
            Ok(Some(CallbackOutcome::Failed { notice })) => {
                self.ui_state.raise_notice("Sign-in failed", notice, now);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to store OAuth tokens: {}", e);
                self.ui_state
                    .raise_notice("Sign-in failed", e.to_string(), now);
            }
        }
        self.ui_state.sync_guard(now);
    }

    /// Get read-only access to the current UI state (for rendering or assertions)
    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
