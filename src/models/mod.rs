//! Data models module
//!
//! Typed records for everything the EVENTR API returns or accepts. The
//! entities are owned by the server; the client only decodes and displays them.

pub mod user;
pub mod event;
pub mod registration;
pub mod event_request;
pub mod wire;

// Re-export commonly used models
pub use user::{User, Role, SignupRequest, LoginRequest, AuthResponse, UpdateProfileRequest, ChangeRoleRequest, AvatarResponse};
pub use event::{Event, NewEvent, EventUpdate};
pub use registration::{Registration, RegistrationStatus, EventRef, CreateRegistrationRequest, Decision};
pub use event_request::EventRequest;
