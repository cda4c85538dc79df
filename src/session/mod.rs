//! Session management
//!
//! The session is the bearer token plus the signed-in user's profile,
//! persisted under two fixed keys. There is no expiry, refresh or
//! revocation: a session lives until logout clears it.

pub mod storage;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::{Role, User};
use crate::utils::errors::Result;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Snapshot of the stored session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// A stored user profile counts as being logged in
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> &str {
        self.user.as_ref().map(|u| u.id.as_str()).unwrap_or("anonymous")
    }
}

/// Read / write / clear contract over a durable key-value store
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Load the current session; an unreadable user blob reads as anonymous
    pub fn read(&self) -> Result<Session> {
        let token = self.backend.get(TOKEN_KEY)?;
        let user = match self.backend.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    warn!(error = %e, "Stored user profile is unreadable, treating session as anonymous");
                    None
                }
            },
            None => None,
        };

        debug!(authenticated = user.is_some(), has_token = token.is_some(), "Session loaded");
        Ok(Session { token, user })
    }

    /// Persist both keys
    pub fn write(&self, session: &Session) -> Result<()> {
        if let Some(token) = &session.token {
            self.backend.set(TOKEN_KEY, token)?;
        }
        if let Some(user) = &session.user {
            self.backend.set(USER_KEY, &serde_json::to_string(user)?)?;
        }
        info!(user_id = session.user_id(), "Session stored");
        Ok(())
    }

    /// Replace only the stored profile, e.g. after a profile edit
    pub fn update_user(&self, user: &User) -> Result<()> {
        self.backend.set(USER_KEY, &serde_json::to_string(user)?)
    }

    /// Wipe everything, as logout does
    pub fn clear(&self) -> Result<()> {
        self.backend.clear()?;
        info!("Session cleared");
        Ok(())
    }
}
