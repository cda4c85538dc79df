//! Application context
//!
//! Everything a page handler needs: settings, the API services, the session
//! store and a clock. Built once at startup and passed down explicitly.

use std::sync::Arc;
use chrono::{DateTime, Local};

use crate::config::Settings;
use crate::services::ServiceFactory;
use crate::session::{Session, SessionStore};
use crate::utils::errors::{EventrError, Result};
use crate::views::Renderer;

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub services: ServiceFactory,
    pub session_store: SessionStore,
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("settings", &self.settings)
            .field("session_store", &self.session_store)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Context with the session file from settings and the system clock
    pub fn new(settings: Settings) -> Result<Self> {
        let store = SessionStore::file(&settings.session.file_path);
        Self::with_parts(settings, store, Arc::new(SystemClock))
    }

    pub fn with_parts(settings: Settings, session_store: SessionStore, clock: Arc<dyn Clock>) -> Result<Self> {
        let services = ServiceFactory::new(&settings, session_store.clone())?;
        Ok(Self {
            settings,
            services,
            session_store,
            clock,
        })
    }

    pub fn session(&self) -> Result<Session> {
        self.session_store.read()
    }

    /// Session that must belong to a signed-in visitor
    pub fn require_session(&self) -> Result<Session> {
        let session = self.session()?;
        if session.is_authenticated() {
            Ok(session)
        } else {
            Err(EventrError::NotAuthenticated)
        }
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(&self.settings.api.base_url, &self.settings.ui.placeholder_image)
    }
}
