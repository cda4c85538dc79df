//! EVENTR terminal client
//!
//! A command-line client for the EVENTR event management platform.
//! This library provides the typed API client, the session store, the path
//! router with its role guards, and the page handlers and views for the
//! public, user and admin consoles.

pub mod cli;
pub mod config;
pub mod context;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod session;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventrError, Result};

// Re-export main components for easy access
pub use context::{AppContext, Clock, FixedClock, SystemClock};
pub use services::ServiceFactory;
pub use session::{Session, SessionStore};
pub use views::Page;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
