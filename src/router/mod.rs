//! Path router
//!
//! Maps URL-style paths onto pages and gates the admin and user consoles
//! behind the stored session.

pub mod guard;
pub mod nav;

pub use guard::{authorize, resolve, Access};
pub use nav::{nav_items, NavItem};

use crate::models::Role;

/// Pages of the admin console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminPage {
    Dashboard,
    ManageEvents,
    ManageUsers,
    Analytics,
    CreateEvent,
    Registrations,
}

/// Pages of the user console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserPage {
    Dashboard,
    MyEvents,
    RegisteredEvents,
    Profile,
    RequestEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    About,
    Admin(AdminPage),
    User(UserPage),
    NotFound(String),
}

impl Route {
    /// Parse a path, ignoring any query string, fragment or trailing slash
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        match normalized {
            "/" => Route::Home,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/about" => Route::About,
            "/admin/dashboard" => Route::Admin(AdminPage::Dashboard),
            "/admin/manage-events" => Route::Admin(AdminPage::ManageEvents),
            "/admin/manage-users" => Route::Admin(AdminPage::ManageUsers),
            "/admin/analytics" => Route::Admin(AdminPage::Analytics),
            "/admin/create-event" => Route::Admin(AdminPage::CreateEvent),
            "/admin/registrations" => Route::Admin(AdminPage::Registrations),
            "/user/dashboard" => Route::User(UserPage::Dashboard),
            "/user/my-events" => Route::User(UserPage::MyEvents),
            "/user/registered-events" => Route::User(UserPage::RegisteredEvents),
            "/user/profile" => Route::User(UserPage::Profile),
            "/user/request-event" => Route::User(UserPage::RequestEvent),
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::About => "/about",
            Route::Admin(AdminPage::Dashboard) => "/admin/dashboard",
            Route::Admin(AdminPage::ManageEvents) => "/admin/manage-events",
            Route::Admin(AdminPage::ManageUsers) => "/admin/manage-users",
            Route::Admin(AdminPage::Analytics) => "/admin/analytics",
            Route::Admin(AdminPage::CreateEvent) => "/admin/create-event",
            Route::Admin(AdminPage::Registrations) => "/admin/registrations",
            Route::User(UserPage::Dashboard) => "/user/dashboard",
            Route::User(UserPage::MyEvents) => "/user/my-events",
            Route::User(UserPage::RegisteredEvents) => "/user/registered-events",
            Route::User(UserPage::Profile) => "/user/profile",
            Route::User(UserPage::RequestEvent) => "/user/request-event",
            Route::NotFound(path) => path,
        }
    }

    /// Role a visitor must hold to open this page
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Admin(_) => Some(Role::Admin),
            Route::User(_) => Some(Role::User),
            _ => None,
        }
    }

    /// Landing page for a signed-in role
    pub fn dashboard_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::Admin(AdminPage::Dashboard),
            Role::User => Route::User(UserPage::Dashboard),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
