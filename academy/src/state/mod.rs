pub mod reducer;

use crate::notice::Notice;
use academy_api::endpoints::{auth::Profile, video::Course};
use academy_auth::{GuardView, History, RouteGuard};
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Explore,
    Learning,
    Leaderboard,
    Settings,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Explore,
        Route::Learning,
        Route::Leaderboard,
        Route::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Explore => "/explore",
            Route::Learning => "/learning",
            Route::Leaderboard => "/leaderboard",
            Route::Settings => "/settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    /// Requires a session; rendered through a `RouteGuard`.
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Learning | Route::Leaderboard | Route::Settings)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Explore => "Explore",
            Route::Learning => "Learning",
            Route::Leaderboard => "Leaderboard",
            Route::Settings => "Settings",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            Route::Home => '1',
            Route::Explore => '2',
            Route::Learning => '3',
            Route::Leaderboard => '4',
            Route::Settings => '5',
        }
    }

    pub fn from_hotkey(c: char) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.hotkey() == c)
    }
}

/// The app's address bar: the current URL plus the entries pushed before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    current: Url,
    previous: Vec<Url>,
}

impl Location {
    pub fn new(url: Url) -> Self {
        Self {
            current: url,
            previous: Vec::new(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(input)?))
    }

    pub fn url(&self) -> &Url {
        &self.current
    }

    /// Unknown paths render the home page.
    pub fn route(&self) -> Route {
        Route::from_path(self.current.path()).unwrap_or(Route::Home)
    }

    /// Navigate, adding a history entry.
    pub fn push(&mut self, path: &str) {
        let mut next = self.current.clone();
        next.set_path(path);
        next.set_query(None);
        next.set_fragment(None);
        self.previous.push(std::mem::replace(&mut self.current, next));
    }

    /// Navigate in place, as a redirect does.
    pub fn redirect(&mut self, path: &str) {
        self.current.set_path(path);
        self.current.set_query(None);
        self.current.set_fragment(None);
    }

    pub fn depth(&self) -> usize {
        self.previous.len() + 1
    }
}

impl History for Location {
    fn current(&self) -> &Url {
        &self.current
    }

    fn replace(&mut self, url: Url) {
        self.current = url;
    }
}

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn start() -> Self {
        LoadingState::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoursesState {
    pub courses: Vec<Course>,
    pub loading: LoadingState,
    pub selected: usize,
}

impl CoursesState {
    pub fn select_next(&mut self) {
        if !self.courses.is_empty() {
            self.selected = (self.selected + 1) % self.courses.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.courses.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.courses.len() - 1);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub profile: Option<Profile>,
    pub loading: LoadingState,
}

/// Timings taken from settings.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub landing_route: String,
    pub guard_delay: Duration,
    pub notice_ttl: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            landing_route: Route::Learning.path().to_string(),
            guard_delay: academy_auth::guard::DEFAULT_GUARD_DELAY,
            notice_ttl: Duration::from_secs(5),
        }
    }
}

impl From<&academy_auth::Settings> for UiConfig {
    fn from(settings: &academy_auth::Settings) -> Self {
        Self {
            landing_route: settings.landing_route.clone(),
            guard_delay: settings.guard_delay(),
            notice_ttl: settings.notice_ttl(),
        }
    }
}

pub struct AppState {
    pub location: Location,
    pub config: UiConfig,

    /// Mirrors the session store; updated from its change notifications.
    pub authenticated: bool,
    /// One guard per mount of a protected route.
    pub guard: Option<RouteGuard>,

    pub courses: CoursesState,
    pub profile: ProfileState,
    pub notice: Option<Notice>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new(location: Location, authenticated: bool, config: UiConfig) -> Self {
        let mut state = Self {
            location,
            config,
            authenticated,
            guard: None,
            courses: CoursesState::default(),
            profile: ProfileState::default(),
            notice: None,
            should_quit: false,
        };
        state.mount();
        state
    }

    pub fn route(&self) -> Route {
        self.location.route()
    }

    /// Navigate to a route (push). Re-selecting the current route keeps its guard.
    pub fn navigate_to(&mut self, route: Route) {
        if self.route() == route && self.location.url().query().is_none() {
            return;
        }
        tracing::debug!(from = self.route().path(), to = route.path(), "Navigating");
        self.location.push(route.path());
        self.mount();
    }

    /// Redirect in place, e.g. after leaving through the auth modal.
    pub fn redirect_to(&mut self, path: &str) {
        tracing::debug!(to = path, "Redirecting");
        self.location.redirect(path);
        self.mount();
    }

    /// Fresh guard for a protected route; none for public ones.
    fn mount(&mut self) {
        self.guard = self
            .route()
            .is_protected()
            .then(|| RouteGuard::new(self.config.guard_delay));
    }

    /// Feed the session flag and the clock into the current route's guard.
    pub fn sync_guard(&mut self, now: Instant) {
        if let Some(guard) = self.guard.as_mut() {
            guard.observe(self.authenticated, now);
            guard.tick(now);
        }
    }

    pub fn guard_view(&self) -> GuardView {
        self.guard
            .as_ref()
            .map(RouteGuard::view)
            .unwrap_or(GuardView::Content)
    }

    pub fn auth_modal_visible(&self) -> bool {
        self.guard.as_ref().is_some_and(RouteGuard::modal_visible)
    }

    /// Content keys only apply to fully rendered content.
    pub fn content_interactive(&self) -> bool {
        self.guard_view() == GuardView::Content
    }

    pub fn raise_notice(&mut self, title: impl Into<String>, message: impl Into<String>, now: Instant) {
        let notice = Notice::new(title, message, now, self.config.notice_ttl);
        tracing::info!(title = %notice.title, "Raising notice");
        self.notice = Some(notice);
    }

    /// Advance time-driven state: guard debounce, notice expiry and spinners.
    pub fn tick(&mut self, now: Instant) {
        self.sync_guard(now);

        if self.notice.as_ref().is_some_and(|notice| notice.is_expired(now)) {
            tracing::debug!("Notice expired");
            self.notice = None;
        }

        for loading in [&mut self.courses.loading, &mut self.profile.loading] {
            if let LoadingState::Loading(throbber) = loading {
                throbber.calc_next();
            }
        }
    }
}
