mod auth_event_request;
mod error;
