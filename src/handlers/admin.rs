//! Admin console handlers

use std::path::Path;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::models::{Decision, EventUpdate, NewEvent, Role};
use crate::router::{AdminPage, Route};
use crate::session::Session;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;
use crate::views::analytics::{DashboardStats, Report};
use crate::views::registrations::{apply_decision, pending_count};
use crate::views::{Page, Toast};

const DASHBOARD: Route = Route::Admin(AdminPage::Dashboard);
const MANAGE_EVENTS: Route = Route::Admin(AdminPage::ManageEvents);
const MANAGE_USERS: Route = Route::Admin(AdminPage::ManageUsers);
const ANALYTICS: Route = Route::Admin(AdminPage::Analytics);
const CREATE_EVENT: Route = Route::Admin(AdminPage::CreateEvent);
const REGISTRATIONS: Route = Route::Admin(AdminPage::Registrations);

pub(crate) async fn page(ctx: &AppContext, page: AdminPage, session: &Session) -> Result<Page> {
    match page {
        AdminPage::Dashboard => render_dashboard(ctx, session).await,
        AdminPage::ManageEvents => render_events(ctx, session).await,
        AdminPage::ManageUsers => render_users(ctx, session).await,
        AdminPage::Analytics => render_analytics(ctx, session).await,
        AdminPage::CreateEvent => Ok(create_event_form()),
        AdminPage::Registrations => render_queue(ctx, session).await,
    }
}

pub async fn dashboard(ctx: &AppContext) -> Result<Page> {
    let session = gated!(ctx, DASHBOARD);
    render_dashboard(ctx, &session).await
}

/// Headline counters; the three lists are fetched concurrently
async fn render_dashboard(ctx: &AppContext, session: &Session) -> Result<Page> {
    let title = "Admin Console";
    let services = &ctx.services;

    let fetched = futures::try_join!(
        services.event_service.list(Some(session)),
        services.user_service.list(session),
        services.registration_service.list_all(session),
    );

    let (events, users, registrations) = match fetched {
        Ok(lists) => lists,
        Err(e) => {
            warn!(error = %e, "Failed to load dashboard data");
            return Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load dashboard data")));
        }
    };

    let renderer = ctx.renderer();
    let stats = DashboardStats::compute(&events, &users, &registrations);
    let mut body = renderer.dashboard_stats(&stats);

    let recent: Vec<_> = events.iter().take(5).cloned().collect();
    body.push_str("\nRecent events:\n");
    body.push_str(&renderer.event_table(&recent));
    body.push_str(&format!(
        "\nQuick actions: {} | {} | {} | {}\n",
        CREATE_EVENT, MANAGE_EVENTS, MANAGE_USERS, ANALYTICS
    ));

    Ok(Page::new(title, body))
}

pub async fn events(ctx: &AppContext) -> Result<Page> {
    let session = gated!(ctx, MANAGE_EVENTS);
    render_events(ctx, &session).await
}

async fn render_events(ctx: &AppContext, session: &Session) -> Result<Page> {
    match ctx.services.event_service.list(Some(session)).await {
        Ok(events) => Ok(Page::new("Manage Events", ctx.renderer().event_table(&events))),
        Err(e) => Ok(Page::new("Manage Events", "").with_toast(Toast::from_error(&e, "Failed to load events"))),
    }
}

fn create_event_form() -> Page {
    Page::new(
        "Create Event",
        "eventr admin create-event --title <title> --category <category> --date <YYYY-MM-DD> \
         --time <HH:MM> --location <place> --description <text> [--image-url <url>] \
         [--price <amount>] [--seats <count>]\n",
    )
}

pub async fn create_event(ctx: &AppContext, event: &NewEvent) -> Result<Page> {
    let session = gated!(ctx, CREATE_EVENT);

    match ctx.services.event_service.create(&session, event).await {
        Ok(()) => {
            log_admin_action(session.user_id(), "create_event", None, Some(&event.title));
            Ok(Page::new("Create Event", format!("Created \"{}\".\n", event.title))
                .with_toast(Toast::success("Event created successfully"))
                .redirect_to(MANAGE_EVENTS))
        }
        Err(e) => Ok(create_event_form().with_toast(Toast::from_error(&e, "Failed to create event"))),
    }
}

pub async fn update_event(ctx: &AppContext, id: &str, update: &EventUpdate, image: Option<&Path>) -> Result<Page> {
    let session = gated!(ctx, MANAGE_EVENTS);

    match ctx.services.event_service.update(&session, id, update, image).await {
        Ok(()) => {
            log_admin_action(session.user_id(), "update_event", Some(id), None);
            Ok(render_events(ctx, &session).await?.with_toast(Toast::success("Event updated")))
        }
        Err(e) => Ok(render_events(ctx, &session).await?.with_toast(Toast::from_error(&e, "Failed to update event"))),
    }
}

pub async fn delete_event(ctx: &AppContext, id: &str) -> Result<Page> {
    let session = gated!(ctx, MANAGE_EVENTS);

    match ctx.services.event_service.delete(&session, id).await {
        Ok(()) => {
            log_admin_action(session.user_id(), "delete_event", Some(id), None);
            Ok(render_events(ctx, &session).await?.with_toast(Toast::success("Event deleted")))
        }
        Err(e) => Ok(render_events(ctx, &session).await?.with_toast(Toast::from_error(&e, "Failed to delete event"))),
    }
}

pub async fn users(ctx: &AppContext) -> Result<Page> {
    let session = gated!(ctx, MANAGE_USERS);
    render_users(ctx, &session).await
}

async fn render_users(ctx: &AppContext, session: &Session) -> Result<Page> {
    match ctx.services.user_service.list(session).await {
        Ok(users) => Ok(Page::new("Manage Users", ctx.renderer().user_table(&users))),
        Err(e) => Ok(Page::new("Manage Users", "").with_toast(Toast::from_error(&e, "Failed to load users"))),
    }
}

pub async fn set_role(ctx: &AppContext, id: &str, role: Role) -> Result<Page> {
    let session = gated!(ctx, MANAGE_USERS);

    match ctx.services.user_service.change_role(&session, id, role).await {
        Ok(()) => {
            log_admin_action(session.user_id(), "change_role", Some(id), Some(role.as_str()));
            Ok(render_users(ctx, &session).await?.with_toast(Toast::success(format!("Role changed to {}", role))))
        }
        Err(e) => Ok(render_users(ctx, &session).await?.with_toast(Toast::from_error(&e, "Failed to change role"))),
    }
}

pub async fn toggle_block(ctx: &AppContext, id: &str) -> Result<Page> {
    let session = gated!(ctx, MANAGE_USERS);

    match ctx.services.user_service.toggle_block(&session, id).await {
        Ok(()) => {
            log_admin_action(session.user_id(), "toggle_block", Some(id), None);
            Ok(render_users(ctx, &session).await?.with_toast(Toast::success("User status updated")))
        }
        Err(e) => Ok(render_users(ctx, &session).await?.with_toast(Toast::from_error(&e, "Failed to update user"))),
    }
}

pub async fn delete_user(ctx: &AppContext, id: &str) -> Result<Page> {
    let session = gated!(ctx, MANAGE_USERS);

    match ctx.services.user_service.delete(&session, id).await {
        Ok(()) => {
            log_admin_action(session.user_id(), "delete_user", Some(id), None);
            Ok(render_users(ctx, &session).await?.with_toast(Toast::success("User deleted")))
        }
        Err(e) => Ok(render_users(ctx, &session).await?.with_toast(Toast::from_error(&e, "Failed to delete user"))),
    }
}

pub async fn registrations(ctx: &AppContext) -> Result<Page> {
    let session = gated!(ctx, REGISTRATIONS);
    render_queue(ctx, &session).await
}

async fn render_queue(ctx: &AppContext, session: &Session) -> Result<Page> {
    let title = "Registrations";
    match ctx.services.registration_service.list_all(session).await {
        Ok(registrations) => {
            let body = format!(
                "{}\nPending: {}\n",
                ctx.renderer().registration_queue(&registrations),
                pending_count(&registrations)
            );
            Ok(Page::new(title, body))
        }
        Err(e) => Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load registrations"))),
    }
}

/// Approve or reject a pending registration
///
/// Decided rows are locked. On success the local list is updated in place so
/// only the decided row changes.
pub async fn decide(ctx: &AppContext, id: &str, decision: Decision) -> Result<Page> {
    let session = gated!(ctx, REGISTRATIONS);
    let title = "Registrations";

    let mut registrations = match ctx.services.registration_service.list_all(&session).await {
        Ok(registrations) => registrations,
        Err(e) => return Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load registrations"))),
    };

    match registrations.iter().find(|r| r.id == id) {
        None => return Ok(Page::new(title, "").with_toast(Toast::error("Registration not found"))),
        Some(row) if !row.status.is_pending() => {
            debug!(registration_id = id, status = %row.status, "Decision refused locally");
            return Ok(Page::new(title, ctx.renderer().registration_queue(&registrations))
                .with_toast(Toast::error("Status Locked: this registration was already decided")));
        }
        Some(_) => {}
    }

    if let Err(e) = ctx.services.registration_service.decide(&session, id, decision).await {
        let fallback = match decision {
            Decision::Approve => "Failed to approve registration",
            Decision::Reject => "Failed to reject registration",
        };
        return Ok(Page::new(title, ctx.renderer().registration_queue(&registrations))
            .with_toast(Toast::from_error(&e, fallback)));
    }

    apply_decision(&mut registrations, id, decision);
    log_admin_action(session.user_id(), decision.path_segment(), Some(id), None);

    let message = match decision {
        Decision::Approve => "Registration approved",
        Decision::Reject => "Registration rejected",
    };
    let body = format!(
        "{}\nPending: {}\n",
        ctx.renderer().registration_queue(&registrations),
        pending_count(&registrations)
    );
    Ok(Page::new(title, body).with_toast(Toast::success(message)))
}

pub async fn analytics(ctx: &AppContext) -> Result<Page> {
    let session = gated!(ctx, ANALYTICS);
    render_analytics(ctx, &session).await
}

async fn render_analytics(ctx: &AppContext, session: &Session) -> Result<Page> {
    let title = "Analytics";
    let services = &ctx.services;

    let fetched = futures::try_join!(
        services.event_service.list(Some(session)),
        services.user_service.list(session),
        services.registration_service.list_all(session),
    );

    let (events, users, registrations) = match fetched {
        Ok(lists) => lists,
        Err(e) => return Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load analytics"))),
    };

    let now = ctx.now();
    let renderer = ctx.renderer();
    let stats = DashboardStats::compute(&events, &users, &registrations);
    let report = Report::compute(&events, &registrations, now);

    let mut body = renderer.dashboard_stats(&stats);
    body.push('\n');
    body.push_str(&renderer.report(&report, now));
    Ok(Page::new(title, body))
}
