//! View models and rendering
//!
//! Everything here is pure: handlers fetch snapshots from the API and pass
//! them in together with the current clock instant.

pub mod analytics;
pub mod discovery;
pub mod profile;
pub mod registrations;
pub mod render;
pub mod ticket;
pub mod toast;

pub use render::Renderer;
pub use ticket::{TicketState, TicketView};
pub use toast::{Toast, ToastKind};

use std::fmt;

use crate::router::Route;

/// A rendered screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: String,
    pub toast: Option<Toast>,
    /// Where the shell should go next, e.g. after login
    pub redirect: Option<Route>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            toast: None,
            redirect: None,
        }
    }

    pub fn with_toast(mut self, toast: Toast) -> Self {
        self.toast = Some(toast);
        self
    }

    pub fn redirect_to(mut self, route: Route) -> Self {
        self.redirect = Some(route);
        self
    }

    pub fn not_found(path: &str) -> Self {
        Self::new("Page Not Found", format!("Nothing lives at {}.\n", path))
    }

    /// Whole-screen replacement for unexpected failures
    pub fn failure() -> Self {
        Self::new(
            "Something went wrong",
            "An unexpected error occurred. Please try again later.\n",
        )
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        if let Some(toast) = &self.toast {
            writeln!(f, "{}", toast)?;
        }
        f.write_str(&self.body)?;
        if let Some(route) = &self.redirect {
            writeln!(f, "-> {}", route)?;
        }
        Ok(())
    }
}
