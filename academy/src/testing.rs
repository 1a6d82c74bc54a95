use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent, Effect};
use crate::input::{Key, KeyEvent};
use crate::state::{AppState, Location, Route, UiConfig};
use academy_auth::SessionStore;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

pub const TEST_FRONTEND_URL: &str = "http://localhost:5173/";

/// Mock data event handler for tests (no real async tasks)
///
/// Commands run through execute_command_sync; effects are recorded instead of
/// spawned. Logout is applied to the session store like the real loader does.
pub struct MockDataHandler {
    session: Arc<SessionStore>,
    effects: Vec<Effect>,
}

impl MockDataHandler {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            session,
            effects: Vec::new(),
        }
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState, now: Instant) {
        for effect in executor::execute_command_sync(command, state, now) {
            if effect == Effect::Logout {
                self.session.clear().expect("in-memory session clear");
            }
            self.effects.push(effect);
        }
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
    session: Arc<SessionStore>,
    session_rx: watch::Receiver<bool>,
    now: Instant,
}

impl TestApp {
    /// Anonymous app on the home page
    pub fn new() -> Self {
        Self::with_url(TEST_FRONTEND_URL)
    }

    pub fn with_url(url: &str) -> Self {
        Self::build(url, SessionStore::in_memory())
    }

    /// App started with a stored session
    pub fn signed_in(url: &str) -> Self {
        let session = SessionStore::in_memory();
        session
            .set("test-access", "test-refresh")
            .expect("in-memory session set");
        Self::build(url, session)
    }

    fn build(url: &str, session: SessionStore) -> Self {
        let session = Arc::new(session);
        let session_rx = session.subscribe();

        let now = Instant::now();
        let location = Location::parse(url).expect("valid test URL");
        let core = AppCore::new(
            MockDataHandler::new(session.clone()),
            session.clone(),
            location,
            UiConfig::default(),
            now,
        );

        let mut app = Self {
            core,
            session,
            session_rx,
            now,
        };
        app.pump_session();
        app
    }

    /// Deliver pending session notifications, as the app loop does.
    fn pump_session(&mut self) {
        while self.session_rx.has_changed().unwrap_or(false) {
            let authenticated = *self.session_rx.borrow_and_update();
            self.core
                .handle_data_event(DataEvent::SessionChanged { authenticated }, self.now);
        }
    }

    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key), self.now);
        self.pump_session();
    }

    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Inject a data event (simulate an API response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event, self.now);
        self.pump_session();
    }

    /// Move the clock forward and tick.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
        self.core.tick(self.now);
        self.pump_session();
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Log out from outside the UI, e.g. another process clearing the token file.
    pub fn clear_session(&mut self) {
        self.session.clear().expect("in-memory session clear");
        self.pump_session();
    }

    pub fn effects(&self) -> &[Effect] {
        &self.core.handler().effects
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.core.handler_mut().effects)
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    pub fn assert_route(&self, expected: Route) {
        assert_eq!(
            self.state().route(),
            expected,
            "Expected route {:?}, current URL {}",
            expected,
            self.state().location.url()
        );
    }

    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
