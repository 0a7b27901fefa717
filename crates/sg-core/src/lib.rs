pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, CoreResult};
pub use models::attempt_token::AttemptToken;
pub use models::identity::Identity;
pub use models::profile::Profile;
pub use models::registration_status::RegistrationStatus;
pub use models::role::Role;
pub use models::session_view::SessionView;
