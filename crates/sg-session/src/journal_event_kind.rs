use serde::Serialize;

/// What happened, for the diagnostic trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEventKind {
    IdentityChanged,
    SignedOut,
    AttemptStarted,
    RegistrationStarted,
    AttemptSucceeded,
    AttemptFailed,
    AttemptTimedOut,
    StaleResultDiscarded,
    GuestOverrideSet,
    GuestOverrideCleared,
    ProviderError,
}

impl JournalEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::IdentityChanged => "identity_changed",
            Self::SignedOut => "signed_out",
            Self::AttemptStarted => "attempt_started",
            Self::RegistrationStarted => "registration_started",
            Self::AttemptSucceeded => "attempt_succeeded",
            Self::AttemptFailed => "attempt_failed",
            Self::AttemptTimedOut => "attempt_timed_out",
            Self::StaleResultDiscarded => "stale_result_discarded",
            Self::GuestOverrideSet => "guest_override_set",
            Self::GuestOverrideCleared => "guest_override_cleared",
            Self::ProviderError => "provider_error",
        }
    }
}

impl std::fmt::Display for JournalEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
