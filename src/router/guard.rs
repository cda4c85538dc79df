//! Route guards
//!
//! Client-side gating only; the API enforces authorization on its own.

use tracing::debug;

use crate::session::Session;
use super::Route;

/// Outcome of checking a route against the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

/// Decide whether the session may open `route`
///
/// - `/login` and `/signup` send signed-in visitors to their dashboard.
/// - Console pages send anonymous visitors to `/login`.
/// - Console pages of the other role send visitors to their own dashboard.
pub fn authorize(route: &Route, session: &Session) -> Access {
    match (route, session.role()) {
        (Route::Login | Route::Signup, Some(role)) => Access::Redirect(Route::dashboard_for(role)),
        _ => match (route.required_role(), session.role()) {
            (None, _) => Access::Allow,
            (Some(_), None) => Access::Redirect(Route::Login),
            (Some(required), Some(role)) if required == role => Access::Allow,
            (Some(_), Some(role)) => Access::Redirect(Route::dashboard_for(role)),
        },
    }
}

/// Follow redirects until a page the session may open
pub fn resolve(path: &str, session: &Session) -> Route {
    let mut route = Route::parse(path);
    // every redirect target is allowed for the same session, so two hops suffice
    for _ in 0..2 {
        match authorize(&route, session) {
            Access::Allow => return route,
            Access::Redirect(target) => {
                debug!(from = %route, to = %target, "Route guard redirect");
                route = target;
            }
        }
    }
    route
}
