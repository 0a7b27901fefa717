pub mod admin;
pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::auth_event_request::{AuthEventKind, AuthEventRequest, AuthIdentityDto};
pub use api::error::{ApiError, ApiErrorBody, ApiErrorResponse};
pub use api::guest::GuestOverrideRequest;
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};
pub use routes::build_router;
