use log::{debug, info, warn};
use sg_core::{AttemptToken, RegistrationStatus};

/// State machine guarding profile reconciliation for the current identity.
///
/// At most one attempt is in flight at a time; every attempt carries a
/// fresh token, and completions are only honored while their token is
/// still the current one. Terminal failures latch per identity id so an
/// identical re-emission does not hammer a backend that already said no.
pub struct RegistrationCoordinator {
    status: RegistrationStatus,
    token: Option<AttemptToken>,
    identity_id: Option<String>,
    failed_identity: Option<String>,
}

impl RegistrationCoordinator {
    pub fn new() -> Self {
        Self {
            status: RegistrationStatus::Idle,
            token: None,
            identity_id: None,
            failed_identity: None,
        }
    }

    pub fn status(&self) -> RegistrationStatus {
        self.status
    }

    /// Whether a new attempt may launch for this identity.
    pub fn should_attempt(&self, identity_id: &str) -> bool {
        if self.status == RegistrationStatus::InFlight {
            return false;
        }

        self.failed_identity.as_deref() != Some(identity_id)
    }

    /// Launch an attempt and hand out its token.
    pub fn begin(&mut self, identity_id: &str) -> AttemptToken {
        debug_assert_ne!(self.status, RegistrationStatus::InFlight);

        let token = AttemptToken::new();
        self.status = RegistrationStatus::InFlight;
        self.token = Some(token);
        self.identity_id = Some(identity_id.to_string());

        debug!("Reconcile attempt {token} launched for identity {identity_id}");
        token
    }

    /// Whether a completion carrying this token is still the live attempt.
    pub fn is_current(&self, token: AttemptToken) -> bool {
        self.token == Some(token)
    }

    /// Accept a successful completion. Returns false for stale tokens.
    pub fn complete_success(&mut self, token: AttemptToken) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.status = RegistrationStatus::Succeeded;
        self.token = None;
        self.failed_identity = None;
        true
    }

    /// Accept a failed completion. Terminal failures latch against the
    /// attempt's identity; transient ones return to Idle so a later
    /// trigger may retry. Returns false for stale tokens.
    pub fn complete_failure(&mut self, token: AttemptToken, terminal: bool) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.token = None;
        if terminal {
            self.status = RegistrationStatus::Failed;
            self.failed_identity = self.identity_id.clone();
            warn!(
                "Reconcile attempt for identity {:?} failed terminally; retries suppressed until reset",
                self.identity_id
            );
        } else {
            self.status = RegistrationStatus::Idle;
        }
        true
    }

    /// Accept a timeout. The token is discarded first, so the attempt's
    /// eventual real completion is ignored, then the machine returns to
    /// Idle to allow one further attempt. Returns false for stale tokens.
    pub fn complete_timeout(&mut self, token: AttemptToken) -> bool {
        if !self.is_current(token) {
            return false;
        }

        info!(
            "Reconcile attempt {token} for identity {:?} timed out",
            self.identity_id
        );
        self.token = None;
        self.status = RegistrationStatus::Idle;
        true
    }

    /// An identity transition or guest override took over: discard the
    /// current token immediately and return to Idle. The terminal-failure
    /// latch survives, so an identical identity cannot sneak past it.
    pub fn supersede(&mut self) {
        if let Some(token) = self.token.take() {
            debug!("Discarding in-flight attempt {token}");
        }
        self.status = RegistrationStatus::Idle;
        self.identity_id = None;
    }

    /// Explicit caller-driven reset: also clears the terminal-failure
    /// latch, permitting a fresh attempt for the same identity.
    pub fn reset(&mut self) {
        self.supersede();
        self.failed_identity = None;
    }
}

impl Default for RegistrationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
