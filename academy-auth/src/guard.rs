use std::time::{Duration, Instant};

/// Where an unauthenticated visitor ends up after the warning modal.
pub const PUBLIC_LANDING_ROUTE: &str = "/";

pub const DEFAULT_GUARD_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated,
    /// Unauthenticated, waiting out the debounce before showing the modal.
    PendingUnauthenticated { since: Instant },
    ModalShown,
    /// The user left through the modal. Terminal for this guard.
    Redirected,
}

/// What a protected route draws for the current guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardView {
    Loading,
    Hidden,
    Content,
    /// Content drawn dimmed and non-interactive behind the warning modal.
    Degraded,
}

/// Per-route gate in front of protected content.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    state: GuardState,
    delay: Duration,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(DEFAULT_GUARD_DELAY)
    }
}

impl RouteGuard {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: GuardState::Checking,
            delay,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Feed the session's authenticated flag.
    pub fn observe(&mut self, authenticated: bool, now: Instant) {
        let next = match (self.state, authenticated) {
            (GuardState::Redirected, _) => return,
            (_, true) => GuardState::Authenticated,
            (GuardState::Checking | GuardState::Authenticated, false) => {
                GuardState::PendingUnauthenticated { since: now }
            }
            // Already counting down or showing the modal.
            (GuardState::PendingUnauthenticated { .. } | GuardState::ModalShown, false) => return,
        };

        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "Route guard transition");
            self.state = next;
        }
    }

    /// Advance the debounce timer.
    pub fn tick(&mut self, now: Instant) {
        if let GuardState::PendingUnauthenticated { since } = self.state {
            if now.saturating_duration_since(since) >= self.delay {
                tracing::debug!("Showing authentication warning");
                self.state = GuardState::ModalShown;
            }
        }
    }

    /// User closed the modal, either way. Returns the route to navigate to.
    pub fn dismiss(&mut self) -> Option<&'static str> {
        if self.state != GuardState::ModalShown {
            return None;
        }
        self.state = GuardState::Redirected;
        Some(PUBLIC_LANDING_ROUTE)
    }

    pub fn view(&self) -> GuardView {
        match self.state {
            GuardState::Checking => GuardView::Loading,
            GuardState::Authenticated => GuardView::Content,
            GuardState::PendingUnauthenticated { .. } | GuardState::Redirected => GuardView::Hidden,
            GuardState::ModalShown => GuardView::Degraded,
        }
    }

    pub fn modal_visible(&self) -> bool {
        self.state == GuardState::ModalShown
    }
}
