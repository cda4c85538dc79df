//! Services module
//!
//! Thin typed wrappers over the remote API, one per resource.

pub mod api;
pub mod auth;
pub mod events;
pub mod registrations;
pub mod users;
pub mod event_requests;

// Re-export commonly used services
pub use api::ApiClient;
pub use auth::AuthService;
pub use events::EventService;
pub use registrations::RegistrationService;
pub use users::UserService;
pub use event_requests::EventRequestService;

use crate::config::settings::Settings;
use crate::session::SessionStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub api: ApiClient,
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub registration_service: RegistrationService,
    pub user_service: UserService,
    pub event_request_service: EventRequestService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one HTTP client
    pub fn new(settings: &Settings, store: SessionStore) -> Result<Self> {
        let api = ApiClient::new(&settings.api)?;

        Ok(Self {
            auth_service: AuthService::new(api.clone(), store),
            event_service: EventService::new(api.clone()),
            registration_service: RegistrationService::new(api.clone()),
            user_service: UserService::new(api.clone()),
            event_request_service: EventRequestService::new(api.clone()),
            api,
        })
    }
}
