//! Page handlers
//!
//! One handler per page or action. Each reads the session from the context,
//! talks to the API through the services and returns a rendered [`Page`].
//! API failures become error toasts on the page; only failures of the
//! client itself (session file, configuration) propagate as errors.

use tracing::debug;

use crate::context::AppContext;
use crate::router::{self, Access, Route};
use crate::session::Session;
use crate::utils::errors::Result;
use crate::views::{Page, Toast};

/// Session allowed onto a route, or the page the guard redirects to
pub(crate) enum Gate {
    Pass(Session),
    Redirect(Page),
}

pub(crate) fn gate(ctx: &AppContext, route: &Route) -> Result<Gate> {
    let session = ctx.session()?;
    match router::authorize(route, &session) {
        Access::Allow => Ok(Gate::Pass(session)),
        Access::Redirect(target) => {
            debug!(route = %route, target = %target, "Action blocked by route guard");
            let toast = if session.is_authenticated() {
                Toast::error("You do not have access to that page")
            } else {
                Toast::error("Please log in first")
            };
            Ok(Gate::Redirect(Page::new("Redirected", "").with_toast(toast).redirect_to(target)))
        }
    }
}

/// Unwrap a [`Gate`], returning the redirect page from the handler
macro_rules! gated {
    ($ctx:expr, $route:expr) => {
        match $crate::handlers::gate($ctx, &$route)? {
            $crate::handlers::Gate::Pass(session) => session,
            $crate::handlers::Gate::Redirect(page) => return Ok(page),
        }
    };
}

pub mod admin;
pub mod auth;
pub mod public;
pub mod user;

/// Route a path through the guards and render the page it lands on
pub async fn open(ctx: &AppContext, path: &str) -> Result<Page> {
    let session = ctx.session()?;
    let route = router::resolve(path, &session);
    debug!(path = path, route = %route, "Opening page");

    let page = render(ctx, &route, &session).await?;
    if route != Route::parse(path) {
        return Ok(Page { redirect: Some(route), ..page });
    }
    Ok(page)
}

async fn render(ctx: &AppContext, route: &Route, session: &Session) -> Result<Page> {
    match route {
        Route::Home => Ok(public::home(session)),
        Route::About => Ok(public::about()),
        Route::Login => Ok(auth::login_form()),
        Route::Signup => Ok(auth::signup_form()),
        Route::Admin(page) => admin::page(ctx, *page, session).await,
        Route::User(page) => user::page(ctx, *page, session).await,
        Route::NotFound(path) => Ok(Page::not_found(path)),
    }
}
