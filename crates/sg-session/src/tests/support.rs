use crate::{ChannelIdentitySource, SessionStore};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sg_config::RegistrationConfig;
use sg_core::{Identity, Profile, Role, SessionView};
use sg_profile::{GuestStore, ProfileError, ProfileResult, ProfileStore};

/// What the mock backend does when asked about an identity.
#[derive(Clone)]
pub enum MockOutcome {
    Ok(Profile),
    OkAfter(Profile, Duration),
    NotFound,
    Unauthorized,
    Transient,
    Hang,
}

impl MockOutcome {
    async fn resolve(self, identity_id: &str) -> ProfileResult<Profile> {
        match self {
            Self::Ok(profile) => Ok(profile),
            Self::OkAfter(profile, delay) => {
                tokio::time::sleep(delay).await;
                Ok(profile)
            }
            Self::NotFound => Err(ProfileError::not_found(identity_id)),
            Self::Unauthorized => Err(ProfileError::unauthorized(401)),
            Self::Transient => Err(ProfileError::transient("backend unavailable")),
            Self::Hang => std::future::pending().await,
        }
    }
}

#[derive(Clone)]
pub struct IdentityPlan {
    pub fetch: MockOutcome,
    pub register: MockOutcome,
}

impl IdentityPlan {
    /// First-time identity: no profile yet, registration succeeds.
    pub fn first_time(id: &str) -> Self {
        Self {
            fetch: MockOutcome::NotFound,
            register: MockOutcome::Ok(Profile::new(id, Role::User)),
        }
    }

    /// Identity the backend already knows.
    pub fn known(id: &str) -> Self {
        Self {
            fetch: MockOutcome::Ok(Profile::new(id, Role::User)),
            register: MockOutcome::Unauthorized,
        }
    }
}

/// Scriptable in-memory stand-in for the backend profile API.
pub struct MockProfileStore {
    plans: Mutex<HashMap<String, IdentityPlan>>,
    fetch_calls: Mutex<Vec<String>>,
    register_calls: Mutex<Vec<String>>,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self {
            plans: Mutex::new(HashMap::new()),
            fetch_calls: Mutex::new(Vec::new()),
            register_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn plan(&self, id: &str, plan: IdentityPlan) {
        self.plans.lock().unwrap().insert(id.to_string(), plan);
    }

    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }

    pub fn register_calls(&self) -> Vec<String> {
        self.register_calls.lock().unwrap().clone()
    }

    fn plan_for(&self, id: &str) -> IdentityPlan {
        self.plans
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| IdentityPlan::first_time(id))
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn fetch(&self, identity: &Identity) -> ProfileResult<Profile> {
        self.fetch_calls.lock().unwrap().push(identity.id.clone());
        self.plan_for(&identity.id).fetch.resolve(&identity.id).await
    }

    async fn register(&self, identity: &Identity) -> ProfileResult<Profile> {
        self.register_calls.lock().unwrap().push(identity.id.clone());
        self.plan_for(&identity.id)
            .register
            .resolve(&identity.id)
            .await
    }
}

/// In-memory guest persistence with call tracking.
pub struct MockGuestStore {
    stored: Mutex<Option<Profile>>,
}

impl MockGuestStore {
    pub fn new() -> Self {
        Self {
            stored: Mutex::new(None),
        }
    }

    pub fn with(profile: Profile) -> Self {
        Self {
            stored: Mutex::new(Some(profile)),
        }
    }

    pub fn stored(&self) -> Option<Profile> {
        self.stored.lock().unwrap().clone()
    }
}

impl GuestStore for MockGuestStore {
    fn load(&self) -> ProfileResult<Option<Profile>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    fn save(&self, profile: &Profile) -> ProfileResult<()> {
        *self.stored.lock().unwrap() = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> ProfileResult<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

pub struct Harness {
    pub store: SessionStore,
    pub source: ChannelIdentitySource,
    pub profiles: Arc<MockProfileStore>,
    pub guests: Arc<MockGuestStore>,
}

pub fn test_config() -> RegistrationConfig {
    RegistrationConfig {
        timeout_secs: 15,
        settle_delay_ms: 10,
        journal_capacity: 64,
    }
}

pub fn harness() -> Harness {
    harness_with(MockProfileStore::new(), MockGuestStore::new())
}

pub fn harness_with(profiles: MockProfileStore, guests: MockGuestStore) -> Harness {
    let source = ChannelIdentitySource::new();
    let profiles = Arc::new(profiles);
    let guests = Arc::new(guests);

    let store = SessionStore::spawn(
        &test_config(),
        Arc::new(source.clone()),
        Arc::clone(&profiles) as Arc<dyn ProfileStore>,
        Arc::clone(&guests) as Arc<dyn GuestStore>,
    );

    Harness {
        store,
        source,
        profiles,
        guests,
    }
}

pub fn identity(id: &str) -> Identity {
    Identity::new(id, Some(&format!("{id}@example.com"))).unwrap()
}

/// Wait until the published view satisfies the predicate. Relies on
/// paused-clock auto-advance, so hung attempts and timeouts play out
/// instantly in virtual time.
pub async fn wait_for_view(
    store: &SessionStore,
    predicate: impl Fn(&SessionView) -> bool,
) -> SessionView {
    let mut rx = store.subscribe();

    tokio::time::timeout(Duration::from_secs(300), async {
        loop {
            {
                let view = rx.borrow_and_update().clone();
                if predicate(&view) {
                    return view;
                }
            }
            rx.changed().await.expect("session store went away");
        }
    })
    .await
    .expect("view never satisfied predicate")
}

/// Let queued commands and ready timers drain.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
