use crate::state::Route;
use academy_api::endpoints::{auth::Profile, video::Course};

/// Commands to execute (user actions → state changes and background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Navigation
    Navigate(Route),
    SelectNext,
    SelectPrevious,

    // Data loading for the current route
    Reload,

    // Session
    StartGoogleLogin,
    Logout,

    // Auth warning modal
    ConfirmAuthModal,
    DismissAuthModal,

    DismissNotice,

    // System
    Quit,
}

/// Side effects a command asks for, carried out by the data handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadCourses,
    LoadProfile,
    OpenLogin,
    Logout,
}

/// Events from background tasks and the session store
#[derive(Debug, Clone)]
pub enum DataEvent {
    CoursesLoaded {
        courses: Vec<Course>,
    },
    CoursesLoadFailed {
        error: String,
    },
    ProfileLoaded {
        profile: Profile,
    },
    ProfileLoadFailed {
        error: String,
        session_expired: bool,
    },

    /// The session's authenticated flag flipped.
    SessionChanged {
        authenticated: bool,
    },

    LoginBrowserFailed {
        url: String,
        error: String,
    },
}
