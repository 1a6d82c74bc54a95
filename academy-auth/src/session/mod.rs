mod storage;

pub use storage::{FileStorage, MemoryStorage, StorageBackend};

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};
use std::path::Path;
use tokio::sync::watch;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Snapshot of the stored credentials.
#[derive(Debug, Default)]
pub struct Session {
    access_token: Option<SecretString>,
    refresh_token: Option<SecretString>,
}

impl Session {
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(|token| token.expose_secret())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|token| token.expose_secret())
    }

    /// True iff both tokens are present and non-empty.
    pub fn is_authenticated(&self) -> bool {
        matches!(
            (self.access_token(), self.refresh_token()),
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty()
        )
    }
}

/// The single source of truth for authentication state.
///
/// Callers only see `get`/`set`/`rotate`/`clear`; the storage backend stays
/// private. Writes are last-writer-wins.
pub struct SessionStore {
    storage: Box<dyn StorageBackend>,
    authenticated: watch::Sender<bool>,
}

impl SessionStore {
    pub fn new(storage: impl StorageBackend + 'static) -> Self {
        let storage: Box<dyn StorageBackend> = Box::new(storage);
        let initial = read_session(storage.as_ref()).is_authenticated();
        let (authenticated, _) = watch::channel(initial);

        tracing::debug!(authenticated = initial, "Session store initialized");
        Self {
            storage,
            authenticated,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// File-backed store at `path`, or at the default cache location.
    pub fn open(path: Option<&Path>) -> Result<Self, AuthError> {
        let storage = match path {
            Some(path) => FileStorage::with_path(path)?,
            None => FileStorage::new()?,
        };
        tracing::debug!(path = %storage.path().display(), "Using file session storage");
        Ok(Self::new(storage))
    }

    /// Never fails: unreadable storage yields an unauthenticated session.
    pub fn get(&self) -> Session {
        read_session(self.storage.as_ref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_authenticated()
    }

    /// Store a complete token pair. Both values are required.
    pub fn set(&self, access_token: &str, refresh_token: &str) -> Result<(), AuthError> {
        if access_token.is_empty() || refresh_token.is_empty() {
            return Err(AuthError::InvalidSessionUpdate(
                "access and refresh tokens must be set together",
            ));
        }

        self.storage.set_all(&[
            (ACCESS_TOKEN_KEY, access_token),
            (REFRESH_TOKEN_KEY, refresh_token),
        ])?;
        self.notify();
        Ok(())
    }

    /// Store a refreshed access token, and the refresh token if the server
    /// rotated it. Without a rotated token the stored one is kept.
    pub fn rotate(&self, access_token: &str, refresh_token: Option<&str>) -> Result<(), AuthError> {
        match refresh_token {
            Some(refresh_token) => self.set(access_token, refresh_token),
            None => {
                let current = self.get();
                let refresh_token = current.refresh_token().ok_or(
                    AuthError::InvalidSessionUpdate("no refresh token to keep"),
                )?;
                self.set(access_token, refresh_token)
            }
        }
    }

    /// Remove both tokens. Clearing an empty store is a no-op.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.storage
            .remove_all(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY])?;
        self.notify();
        Ok(())
    }

    /// Receiver that changes whenever the authenticated flag flips.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    fn notify(&self) {
        let now = self.is_authenticated();
        let changed = self.authenticated.send_if_modified(|current| {
            if *current == now {
                false
            } else {
                *current = now;
                true
            }
        });
        if changed {
            tracing::info!(authenticated = now, "Session state changed");
        }
    }
}

/// One snapshot read, so both tokens come from the same write.
fn read_session(storage: &dyn StorageBackend) -> Session {
    let mut entries = match storage.snapshot() {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read session tokens");
            return Session::default();
        }
    };
    let mut take = |key: &str| {
        entries
            .remove(key)
            .filter(|v| !v.is_empty())
            .map(SecretString::from)
    };

    Session {
        access_token: take(ACCESS_TOKEN_KEY),
        refresh_token: take(REFRESH_TOKEN_KEY),
    }
}
