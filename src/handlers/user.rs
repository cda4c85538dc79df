//! User console handlers

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::models::{CreateRegistrationRequest, EventRequest, Registration, RegistrationStatus, UpdateProfileRequest, User};
use crate::router::{Route, UserPage};
use crate::session::Session;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;
use crate::views::discovery::{self, EventFilters};
use crate::views::{profile, ticket, Page, Toast};

const DASHBOARD: Route = Route::User(UserPage::Dashboard);
const MY_EVENTS: Route = Route::User(UserPage::MyEvents);
const REGISTERED: Route = Route::User(UserPage::RegisteredEvents);
const PROFILE: Route = Route::User(UserPage::Profile);
const REQUEST_EVENT: Route = Route::User(UserPage::RequestEvent);

/// Fields a profile edit may change; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub address: Option<String>,
}

impl ProfileChanges {
    fn apply(self, form: &mut UpdateProfileRequest) {
        let fields = [
            (self.name, &mut form.name),
            (self.email, &mut form.email),
            (self.phone, &mut form.phone),
            (self.bio, &mut form.bio),
            (self.address, &mut form.address),
        ];
        for (change, slot) in fields {
            if let Some(value) = change {
                *slot = value;
            }
        }
    }
}

pub(crate) async fn page(ctx: &AppContext, page: UserPage, session: &Session) -> Result<Page> {
    match page {
        UserPage::Dashboard => dashboard(ctx, session, &EventFilters::default()).await,
        UserPage::MyEvents => my_events(ctx, session).await,
        UserPage::RegisteredEvents => registered_events(ctx, session).await,
        UserPage::Profile => show_profile(ctx, session).await,
        UserPage::RequestEvent => Ok(request_event_form()),
    }
}

/// Event discovery with search, filters and the user's registration status
pub async fn discover(ctx: &AppContext, filters: &EventFilters) -> Result<Page> {
    let session = gated!(ctx, DASHBOARD);
    dashboard(ctx, &session, filters).await
}

async fn dashboard(ctx: &AppContext, session: &Session, filters: &EventFilters) -> Result<Page> {
    let title = "Discover Events";

    let events = match ctx.services.event_service.list(Some(session)).await {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "Failed to load events");
            return Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load events")));
        }
    };

    if events.is_empty() {
        return Ok(Page::new(title, "No events available right now. Check back soon.\n"));
    }

    let (statuses, popularity) = match session.token() {
        Some(_) => match ctx.services.registration_service.list_mine(session).await {
            Ok(registrations) => (discovery::status_map(&registrations), discovery::popularity(&registrations)),
            Err(e) => {
                warn!(error = %e, "Failed to load registration statuses");
                (HashMap::new(), HashMap::new())
            }
        },
        None => (HashMap::new(), HashMap::new()),
    };

    let selected = filters.apply(&events, &popularity);
    debug!(total = events.len(), shown = selected.len(), "Filtered events");
    Ok(Page::new(title, ctx.renderer().event_list(&selected, &statuses)))
}

/// Request a seat at an event; name and email default to the profile
pub async fn register(ctx: &AppContext, event_id: &str, name: Option<&str>, email: Option<&str>) -> Result<Page> {
    let session = gated!(ctx, DASHBOARD);
    let title = "Register";

    let me = session.user.clone().unwrap_or_default();

    match ctx.services.registration_service.list_mine(&session).await {
        Ok(mine) if mine.iter().any(|r| r.event_id() == Some(event_id)) => {
            return Ok(Page::new(title, "")
                .with_toast(Toast::error("You have already registered for this event")));
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Could not check existing registrations"),
    }

    let request = CreateRegistrationRequest {
        event_id: event_id.to_string(),
        name: name.unwrap_or(&me.name).to_string(),
        email: email.unwrap_or(&me.email).to_string(),
    };

    match ctx.services.registration_service.create(&session, &request).await {
        Ok(()) => {
            log_user_action(session.user_id(), "register", Some(event_id));
            Ok(Page::new(title, format!("Event {}: {}\n", event_id, RegistrationStatus::Pending))
                .with_toast(Toast::success("Registration request sent!")))
        }
        Err(e) => {
            warn!(event_id = event_id, error = %e, "Registration failed");
            Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Registration failed")))
        }
    }
}

/// Ticket overview of every registration
pub async fn tickets(ctx: &AppContext) -> Result<Page> {
    let session = gated!(ctx, MY_EVENTS);
    my_events(ctx, &session).await
}

async fn my_events(ctx: &AppContext, session: &Session) -> Result<Page> {
    let title = "My Tickets";
    match ctx.services.registration_service.list_mine(session).await {
        Ok(registrations) => Ok(Page::new(title, ctx.renderer().registration_list(&registrations, ctx.now()))),
        Err(e) => Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load your events"))),
    }
}

/// Digital ticket, only while approved and not expired
pub async fn show_ticket(ctx: &AppContext, registration_id: &str) -> Result<Page> {
    let session = gated!(ctx, MY_EVENTS);
    let title = "Digital Ticket";

    let registrations = match ctx.services.registration_service.list_mine(&session).await {
        Ok(registrations) => registrations,
        Err(e) => return Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load your events"))),
    };

    let Some(registration) = find(&registrations, registration_id) else {
        return Ok(Page::new(title, "").with_toast(Toast::error("Ticket not found")));
    };

    let view = ticket::derive(registration.status, registration.event().and_then(|e| e.date), ctx.now());
    if !view.can_view_ticket {
        let reason = match view.state {
            ticket::TicketState::Expired => "This event has ended. Ticket is no longer valid.".to_string(),
            _ => format!("No ticket available: {}", view.label),
        };
        return Ok(Page::new(title, "").with_toast(Toast::error(reason)));
    }

    let holder = session.user.as_ref().map(|u| u.name.as_str()).unwrap_or("");
    Ok(Page::new(title, ctx.renderer().ticket_card(registration, holder)))
}

/// Registrations with their events and cancel hints
pub async fn registrations(ctx: &AppContext) -> Result<Page> {
    let session = gated!(ctx, REGISTERED);
    registered_events(ctx, &session).await
}

async fn registered_events(ctx: &AppContext, session: &Session) -> Result<Page> {
    let title = "Registered Events";
    let registrations = match ctx.services.registration_service.list_mine(session).await {
        Ok(registrations) => registrations,
        Err(e) => return Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load registrations"))),
    };

    if registrations.is_empty() {
        return Ok(Page::new(title, "You have not registered for any events yet.\n"));
    }

    let renderer = ctx.renderer();
    let now = ctx.now();
    let mut body = String::new();
    for registration in &registrations {
        match registration.event() {
            Some(event) => body.push_str(&renderer.event_card(event, Some(registration.status))),
            None => body.push_str(&format!("Event {} (details unavailable)\n", registration.event_id().unwrap_or("-"))),
        }
        let view = ticket::derive(registration.status, registration.event().and_then(|e| e.date), now);
        if view.can_cancel {
            body.push_str(&format!("  Cancel: eventr cancel {}\n", registration.id));
        }
    }
    Ok(Page::new(title, body))
}

/// Withdraw a registration; only pending ones may be cancelled
pub async fn cancel(ctx: &AppContext, registration_id: &str) -> Result<Page> {
    let session = gated!(ctx, REGISTERED);
    let title = "Registered Events";

    let mut registrations = match ctx.services.registration_service.list_mine(&session).await {
        Ok(registrations) => registrations,
        Err(e) => return Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to load registrations"))),
    };

    let Some(registration) = find(&registrations, registration_id) else {
        return Ok(Page::new(title, "").with_toast(Toast::error("Registration not found")));
    };

    if !registration.status.is_pending() {
        debug!(registration_id = registration_id, status = %registration.status, "Cancel refused locally");
        return Ok(Page::new(title, "")
            .with_toast(Toast::error("Only pending registrations can be cancelled")));
    }

    match ctx.services.registration_service.cancel(&session, registration_id).await {
        Ok(()) => {
            log_user_action(session.user_id(), "cancel_registration", Some(registration_id));
            registrations.retain(|r| r.id != registration_id);
            Ok(Page::new(title, ctx.renderer().registration_list(&registrations, ctx.now()))
                .with_toast(Toast::success("Registration cancelled")))
        }
        Err(e) => Ok(Page::new(title, "").with_toast(Toast::from_error(&e, "Failed to cancel registration"))),
    }
}

pub async fn profile_page(ctx: &AppContext) -> Result<Page> {
    let session = gated!(ctx, PROFILE);
    show_profile(ctx, &session).await
}

async fn show_profile(ctx: &AppContext, session: &Session) -> Result<Page> {
    let title = "My Profile";
    match ctx.services.user_service.profile(session).await {
        Ok(user) => Ok(render_profile(ctx, &user)),
        Err(e) => {
            warn!(error = %e, "Failed to load profile");
            let toast = Toast::from_error(&e, "Failed to load profile");
            // fall back to the copy stored at login
            match &session.user {
                Some(stored) => Ok(render_profile(ctx, stored).with_toast(toast)),
                None => Ok(Page::new(title, "").with_toast(toast)),
            }
        }
    }
}

fn render_profile(ctx: &AppContext, user: &User) -> Page {
    Page::new("My Profile", ctx.renderer().profile(user, profile::completeness(user)))
}

pub async fn update_profile(ctx: &AppContext, changes: ProfileChanges) -> Result<Page> {
    let session = gated!(ctx, PROFILE);

    let current = match ctx.services.user_service.profile(&session).await {
        Ok(user) => user,
        Err(e) => match session.user.clone() {
            Some(stored) => stored,
            None => return Ok(Page::new("My Profile", "").with_toast(Toast::from_error(&e, "Failed to load profile"))),
        },
    };

    let mut form = UpdateProfileRequest::from_user(&current);
    changes.apply(&mut form);

    match ctx.services.user_service.update_profile(&session, &form).await {
        Ok(updated) => {
            ctx.session_store.update_user(&updated)?;
            log_user_action(session.user_id(), "update_profile", None);
            Ok(render_profile(ctx, &updated).with_toast(Toast::success("Profile updated")))
        }
        Err(e) => Ok(render_profile(ctx, &current).with_toast(Toast::from_error(&e, "Failed to update profile"))),
    }
}

pub async fn upload_avatar(ctx: &AppContext, file: &Path) -> Result<Page> {
    let session = gated!(ctx, PROFILE);

    match ctx.services.user_service.upload_avatar(&session, file).await {
        Ok(avatar) => {
            if let Some(mut user) = session.user.clone() {
                user.avatar = Some(avatar.clone());
                ctx.session_store.update_user(&user)?;
                info!(user_id = %user.id, "Avatar updated");
                return Ok(render_profile(ctx, &user).with_toast(Toast::success("Profile picture updated")));
            }
            Ok(Page::new("My Profile", format!("Avatar: {}\n", ctx.renderer().image(Some(avatar.as_str()))))
                .with_toast(Toast::success("Profile picture updated")))
        }
        Err(e) => Ok(Page::new("My Profile", "").with_toast(Toast::from_error(&e, "Failed to upload picture"))),
    }
}

fn request_event_form() -> Page {
    Page::new(
        "Request an Event",
        "eventr request-event --title <title> --description <text> --date <YYYY-MM-DD> --location <place>\n",
    )
}

pub async fn request_event(ctx: &AppContext, request: &EventRequest) -> Result<Page> {
    let session = gated!(ctx, REQUEST_EVENT);

    match ctx.services.event_request_service.submit(&session, request).await {
        Ok(()) => {
            log_user_action(session.user_id(), "request_event", Some(&request.title));
            Ok(request_event_form().with_toast(Toast::success("Event request submitted")))
        }
        Err(e) => Ok(request_event_form().with_toast(Toast::from_error(&e, "Failed to submit event request"))),
    }
}

fn find<'a>(registrations: &'a [Registration], id: &str) -> Option<&'a Registration> {
    registrations.iter().find(|r| r.id == id)
}
