mod client;
mod error;
pub mod guard;
pub mod oauth;
mod session;

pub use client::{
    cookie_value, is_auth_endpoint, Attempt, CookieJarCsrf, CsrfSource, RequestInterceptor,
    RetryDecision, RetryPolicy, SessionClient, Settings,
};
pub use error::AuthError;
pub use guard::{GuardState, GuardView, RouteGuard};
pub use oauth::{CallbackChannel, CallbackOutcome, History, OAuthCallback, OAuthCallbackHandler};
pub use session::{FileStorage, MemoryStorage, Session, SessionStore, StorageBackend};
