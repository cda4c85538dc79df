//! Navigation menu per role

use crate::models::Role;
use crate::session::Session;
use super::{AdminPage, Route, UserPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    /// `None` marks the logout action
    pub route: Option<Route>,
}

impl NavItem {
    fn link(label: &'static str, route: Route) -> Self {
        Self { label, route: Some(route) }
    }

    fn logout() -> Self {
        Self { label: "Logout", route: None }
    }
}

pub fn nav_items(session: &Session) -> Vec<NavItem> {
    match session.role() {
        Some(Role::Admin) => vec![
            NavItem::link("Console", Route::Admin(AdminPage::Dashboard)),
            NavItem::link("Events", Route::Admin(AdminPage::ManageEvents)),
            NavItem::link("Requests", Route::Admin(AdminPage::Registrations)),
            NavItem::logout(),
        ],
        Some(Role::User) => vec![
            NavItem::link("Explore", Route::User(UserPage::Dashboard)),
            NavItem::link("Tickets", Route::User(UserPage::MyEvents)),
            NavItem::link("Profile", Route::User(UserPage::Profile)),
            NavItem::logout(),
        ],
        None => vec![
            NavItem::link("Home", Route::Home),
            NavItem::link("About", Route::About),
            NavItem::link("Sign In", Route::Login),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_menu_has_no_logout() {
        let items = nav_items(&Session::anonymous());
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.route.is_some()));
        assert_eq!(items[2].label, "Sign In");
    }
}
