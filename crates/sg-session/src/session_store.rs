use crate::{
    IdentityEventSource, Journal, JournalEventKind, Metrics, RegistrationCoordinator,
    SessionCommand, ShutdownCoordinator, ShutdownGuard,
};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use sg_config::RegistrationConfig;
use sg_core::{AttemptToken, Identity, Profile, RegistrationStatus, SessionView};
use sg_profile::{GuestStore, ProfileError, ProfileResult, ProfileStore};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, timeout};

const COMMAND_BUFFER_SIZE: usize = 64;

/// Handle to the session reconciliation actor.
///
/// The actor is the single writer of the published `SessionView`; every
/// other component talks to it through commands. Cloning the handle is
/// cheap and all clones address the same actor.
#[derive(Clone)]
pub struct SessionStore {
    commands: mpsc::Sender<SessionCommand>,
    view_rx: watch::Receiver<SessionView>,
    status_rx: watch::Receiver<RegistrationStatus>,
    journal: Journal,
    shutdown: ShutdownCoordinator,
}

impl SessionStore {
    /// Start the actor and the provider pump. Must be called from within
    /// a tokio runtime.
    pub fn spawn(
        config: &RegistrationConfig,
        source: Arc<dyn IdentityEventSource>,
        profiles: Arc<dyn ProfileStore>,
        guests: Arc<dyn GuestStore>,
    ) -> Self {
        let journal = Journal::new(config.journal_capacity);
        let metrics = Metrics::new();
        let shutdown = ShutdownCoordinator::new();
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER_SIZE);

        // Restore a persisted guest session before the provider gets a say
        let guest = match guests.load() {
            Ok(guest) => guest,
            Err(e) => {
                warn!("Failed to load persisted guest profile: {e}");
                None
            }
        };

        let initial = match &guest {
            Some(profile) => SessionView {
                identity: None,
                profile: Some(profile.clone()),
                loading: false,
            },
            None => SessionView::initial(),
        };
        let loading = initial.loading;

        let (view_tx, view_rx) = watch::channel(initial);
        let (status_tx, status_rx) = watch::channel(RegistrationStatus::Idle);

        let actor = StoreActor {
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            attempt_timeout: Duration::from_secs(config.timeout_secs),
            identity: None,
            cached_profile: None,
            guest,
            loading,
            attempt_started_at: None,
            coordinator: RegistrationCoordinator::new(),
            profiles,
            guests,
            journal: journal.clone(),
            metrics,
            view_tx,
            status_tx,
            cmd_tx: cmd_tx.clone(),
        };
        tokio::spawn(actor.run(cmd_rx, shutdown.subscribe_guard()));

        Self::spawn_provider_pump(source, cmd_tx.clone(), shutdown.subscribe_guard());

        Self {
            commands: cmd_tx,
            view_rx,
            status_rx,
            journal,
            shutdown,
        }
    }

    /// Forward provider events into the command queue until teardown.
    ///
    /// The subscription handle is cancelled on every exit path, so no
    /// provider callback can reach the store after the session ends.
    fn spawn_provider_pump(
        source: Arc<dyn IdentityEventSource>,
        cmd_tx: mpsc::Sender<SessionCommand>,
        mut guard: ShutdownGuard,
    ) {
        let mut subscription = source.subscribe();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = guard.wait() => break,
                    event = subscription.next() => match event {
                        Some(identity) => {
                            if cmd_tx
                                .send(SessionCommand::IdentityChanged(identity))
                                .await
                                .is_err()
                            {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }

            subscription.handle.unsubscribe();
            debug!("Provider pump stopped");
        });
    }

    /// Current merged view, consistent with the latest applied event.
    pub fn view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    /// Watch the merged view; the receiver yields the current value and
    /// every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_rx.clone()
    }

    pub fn registration_status(&self) -> RegistrationStatus {
        *self.status_rx.borrow()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub async fn set_guest_override(&self, profile: Option<Profile>) {
        self.send(SessionCommand::SetGuestOverride(profile)).await;
    }

    pub async fn reset_registration(&self) {
        self.send(SessionCommand::ResetRegistration).await;
    }

    /// Tear the actor and provider pump down. Idempotent.
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    pub fn shutdown_coordinator(&self) -> ShutdownCoordinator {
        self.shutdown.clone()
    }

    async fn send(&self, command: SessionCommand) {
        if self.commands.send(command).await.is_err() {
            debug!("Session store stopped; dropping command");
        }
    }
}

/// Owns all mutable session state. Lives on its own task.
struct StoreActor {
    settle_delay: Duration,
    attempt_timeout: Duration,
    identity: Option<Identity>,
    /// Last successfully reconciled profile (single entry).
    cached_profile: Option<Profile>,
    guest: Option<Profile>,
    loading: bool,
    attempt_started_at: Option<Instant>,
    coordinator: RegistrationCoordinator,
    profiles: Arc<dyn ProfileStore>,
    guests: Arc<dyn GuestStore>,
    journal: Journal,
    metrics: Metrics,
    view_tx: watch::Sender<SessionView>,
    status_tx: watch::Sender<RegistrationStatus>,
    cmd_tx: mpsc::Sender<SessionCommand>,
}

impl StoreActor {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<SessionCommand>,
        mut guard: ShutdownGuard,
    ) {
        loop {
            tokio::select! {
                _ = guard.wait() => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                }
            }
        }

        debug!("Session store actor stopped");
    }

    fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::IdentityChanged(Some(identity)) => self.on_identity(identity),
            SessionCommand::IdentityChanged(None) => self.on_signed_out(),
            SessionCommand::SetGuestOverride(profile) => self.on_guest_override(profile),
            SessionCommand::AttemptResolved { token, result } => {
                self.on_attempt_resolved(token, result);
            }
            SessionCommand::AttemptTimedOut { token } => self.on_attempt_timed_out(token),
            SessionCommand::ResetRegistration => self.on_reset(),
        }
    }

    fn on_identity(&mut self, identity: Identity) {
        self.journal
            .record(JournalEventKind::IdentityChanged, &identity.id);
        self.metrics.identity_changed();

        // A real identity pre-empts and clears any guest session
        if self.guest.take().is_some() {
            if let Err(e) = self.guests.clear() {
                warn!("Failed to clear persisted guest profile: {e}");
            }
            self.journal.record(
                JournalEventKind::GuestOverrideCleared,
                "superseded by identity",
            );
            self.metrics.guest_override_cleared();
        }

        let same_identity = self
            .identity
            .as_ref()
            .is_some_and(|current| current.id == identity.id);

        if same_identity && self.coordinator.status() == RegistrationStatus::InFlight {
            // Duplicate delivery while its own attempt is still in
            // flight: replace the identity wholesale, keep the attempt.
            // Restarting here would issue a second register call for the
            // same identity.
            self.identity = Some(identity);
            self.publish();
            return;
        }

        self.coordinator.supersede();

        let cached = self
            .cached_profile
            .as_ref()
            .is_some_and(|profile| profile.matches_identity(&identity));

        self.identity = Some(identity.clone());

        if cached {
            // Re-emission of an identity we already reconciled, e.g. a
            // token refresh; nothing to fetch
            self.loading = false;
            self.publish();
            return;
        }

        self.cached_profile = None;

        if !self.coordinator.should_attempt(&identity.id) {
            // Terminal failure latched for this identity; surface the
            // profile-less error state instead of hammering the backend
            self.loading = false;
            self.publish();
            return;
        }

        self.start_attempt(identity);
    }

    fn on_signed_out(&mut self) {
        if self.guest.is_some() {
            // Guest sessions survive provider sign-out; only a real
            // identity clears them
            self.journal
                .record(JournalEventKind::SignedOut, "ignored: guest override active");
            self.publish();
            return;
        }

        self.journal.record(JournalEventKind::SignedOut, "");
        self.metrics.signed_out();
        self.coordinator.supersede();
        self.identity = None;
        self.cached_profile = None;
        self.loading = false;
        self.publish();
    }

    fn on_guest_override(&mut self, profile: Option<Profile>) {
        match profile {
            Some(profile) => {
                self.coordinator.supersede();
                self.identity = None;
                self.cached_profile = None;
                self.loading = false;
                self.guest = Some(profile.clone());

                if let Err(e) = self.guests.save(&profile) {
                    warn!("Failed to persist guest profile: {e}");
                }
                self.journal
                    .record(JournalEventKind::GuestOverrideSet, &profile.id);
                self.metrics.guest_override_set();
            }
            None => {
                if self.guest.take().is_some() {
                    if let Err(e) = self.guests.clear() {
                        warn!("Failed to clear persisted guest profile: {e}");
                    }
                    self.journal
                        .record(JournalEventKind::GuestOverrideCleared, "cleared by caller");
                    self.metrics.guest_override_cleared();
                }
                self.loading = false;
            }
        }

        self.publish();
    }

    fn on_attempt_resolved(&mut self, token: AttemptToken, result: ProfileResult<Profile>) {
        if !self.coordinator.is_current(token) {
            self.journal
                .record(JournalEventKind::StaleResultDiscarded, format!("token {token}"));
            self.metrics.stale_result_discarded();
            return;
        }

        if let Some(started_at) = self.attempt_started_at.take() {
            self.metrics.attempt_latency(started_at.elapsed());
        }

        match result {
            Ok(profile) => {
                self.coordinator.complete_success(token);
                self.journal
                    .record(JournalEventKind::AttemptSucceeded, &profile.id);
                self.metrics.attempt_succeeded();
                self.cached_profile = Some(profile);
            }
            Err(error) => {
                let terminal = error.is_terminal();
                self.coordinator.complete_failure(token, terminal);
                self.journal
                    .record(JournalEventKind::AttemptFailed, error.to_string());
                self.metrics.attempt_failed(terminal);
            }
        }

        self.loading = false;
        self.publish();
    }

    fn on_attempt_timed_out(&mut self, token: AttemptToken) {
        // A stale timer for a superseded attempt is simply ignored
        if !self.coordinator.complete_timeout(token) {
            return;
        }

        self.attempt_started_at = None;
        self.journal
            .record(JournalEventKind::AttemptTimedOut, format!("token {token}"));
        self.metrics.attempt_timed_out();
        self.loading = false;
        self.publish();
    }

    fn on_reset(&mut self) {
        self.coordinator.reset();

        if let Some(identity) = self.identity.clone()
            && self.guest.is_none()
            && self.cached_profile.is_none()
        {
            self.start_attempt(identity);
            return;
        }

        self.publish();
    }

    /// Launch the bounded reconcile attempt for an identity transition:
    /// settle, fetch, and register on NotFound, all under one token.
    fn start_attempt(&mut self, identity: Identity) {
        let token = self.coordinator.begin(&identity.id);
        self.loading = true;
        self.attempt_started_at = Some(Instant::now());
        self.journal.record(
            JournalEventKind::AttemptStarted,
            format!("identity {} token {token}", identity.id),
        );
        self.metrics.attempt_started();
        self.publish();

        let profiles = Arc::clone(&self.profiles);
        let cmd_tx = self.cmd_tx.clone();
        let journal = self.journal.clone();
        let settle = self.settle_delay;
        let deadline = self.attempt_timeout;

        tokio::spawn(async move {
            let work = async {
                // Let rapid provider re-emissions supersede this attempt
                // before any network traffic happens
                tokio::time::sleep(settle).await;

                match profiles.fetch(&identity).await {
                    Err(ProfileError::NotFound { .. }) => {
                        journal.record(JournalEventKind::RegistrationStarted, &identity.id);
                        profiles.register(&identity).await
                    }
                    other => other,
                }
            };

            let command = match timeout(deadline, work).await {
                Ok(result) => SessionCommand::AttemptResolved { token, result },
                Err(_) => SessionCommand::AttemptTimedOut { token },
            };

            let _ = cmd_tx.send(command).await;
        });
    }

    /// Recompute the merged view and republish if it changed.
    ///
    /// Precedence: guest override, then cached profile matching the
    /// current identity, then identity-only, then signed out.
    fn publish(&mut self) {
        let view = self.merged_view();
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });

        let status = self.coordinator.status();
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }

    fn merged_view(&self) -> SessionView {
        if let Some(guest) = &self.guest {
            return SessionView {
                identity: None,
                profile: Some(guest.clone()),
                loading: false,
            };
        }

        match &self.identity {
            Some(identity) => SessionView {
                identity: Some(identity.clone()),
                profile: self
                    .cached_profile
                    .as_ref()
                    .filter(|profile| profile.matches_identity(identity))
                    .cloned(),
                loading: self.loading,
            },
            None => SessionView {
                identity: None,
                profile: None,
                loading: self.loading,
            },
        }
    }
}
