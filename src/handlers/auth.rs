//! Signup, login and logout

use tracing::{info, warn};

use crate::context::AppContext;
use crate::router::Route;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;
use crate::views::{Page, Toast};

pub fn login_form() -> Page {
    Page::new("Sign In", "eventr login --email <email> --password <password>\n")
}

pub fn signup_form() -> Page {
    Page::new(
        "Create Account",
        "eventr signup --name <name> --email <email> --password <password>\n",
    )
}

/// Handle signup; on failure the visitor stays on the signup form
pub async fn signup(ctx: &AppContext, name: &str, email: &str, password: &str) -> Result<Page> {
    let _ = gated!(ctx, Route::Signup);

    match ctx.services.auth_service.signup(name, email, password).await {
        Ok(session) => {
            log_user_action(session.user_id(), "signup", None);
            let role = session.role().unwrap_or_default();
            Ok(Page::new("Welcome", format!("Signed up as {}.\n", email))
                .with_toast(Toast::success("Account created"))
                .redirect_to(Route::dashboard_for(role)))
        }
        Err(e) => {
            warn!(email = email, error = %e, "Signup failed");
            Ok(signup_form().with_toast(Toast::from_error(&e, "Signup failed")))
        }
    }
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<Page> {
    let _ = gated!(ctx, Route::Login);

    match ctx.services.auth_service.login(email, password).await {
        Ok(session) => {
            log_user_action(session.user_id(), "login", None);
            let role = session.role().unwrap_or_default();
            let name = session.user.as_ref().map(|u| u.name.as_str()).unwrap_or(email);
            Ok(Page::new("Welcome back", format!("Signed in as {}.\n", name))
                .with_toast(Toast::success("Login successful"))
                .redirect_to(Route::dashboard_for(role)))
        }
        Err(e) => {
            warn!(email = email, error = %e, "Login failed");
            Ok(login_form().with_toast(Toast::from_error(&e, "Login failed")))
        }
    }
}

/// Wipe the stored session and return to the login page
pub fn logout(ctx: &AppContext) -> Result<Page> {
    ctx.services.auth_service.logout()?;
    info!("Logout complete");
    Ok(login_form()
        .with_toast(Toast::success("Logged out"))
        .redirect_to(Route::Login))
}
