//! Public pages

use crate::router::{nav_items, Route};
use crate::session::Session;
use crate::views::Page;

pub fn home(session: &Session) -> Page {
    let mut body = String::from(
        "Discover, register for and manage events in one place.\n\
         Browse upcoming events, request a seat and keep your tickets handy.\n\n",
    );

    match session.role() {
        Some(role) => {
            body.push_str(&format!("Go to your dashboard: eventr open {}\n", Route::dashboard_for(role)));
        }
        None => {
            body.push_str("Get started: eventr signup --name <name> --email <email> --password <password>\n");
            body.push_str("Already registered? eventr login --email <email> --password <password>\n");
        }
    }

    Page::new("EVENTR", body)
}

pub fn about() -> Page {
    Page::new(
        "About EVENTR",
        "EVENTR connects organisers and attendees.\n\
         Admins publish events and approve registrations; users discover\n\
         events, request seats and carry digital tickets for approved ones.\n",
    )
}

/// Navigation bar for the current session
pub fn nav_bar(session: &Session) -> String {
    nav_items(session)
        .iter()
        .map(|item| match &item.route {
            Some(route) => format!("{} ({})", item.label, route),
            None => item.label.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_home_invites_signup() {
        let page = home(&Session::anonymous());
        assert!(page.body.contains("eventr signup"));
        assert!(page.redirect.is_none());
    }

    #[test]
    fn test_nav_bar() {
        assert_eq!(
            nav_bar(&Session::anonymous()),
            "Home (/) | About (/about) | Sign In (/login)"
        );
    }
}
