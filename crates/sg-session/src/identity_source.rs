use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use log::warn;
use sg_core::Identity;
use tokio::sync::mpsc;

const SUBSCRIBER_BUFFER_SIZE: usize = 16;

/// Normalized stream of "the current identity is X" events.
///
/// Implementations must deliver the current identity (or `None`) promptly
/// after subscribe, then every subsequent change in provider order.
pub trait IdentityEventSource: Send + Sync {
    fn subscribe(&self) -> IdentitySubscription;
}

/// Cancellation token for one subscription.
///
/// Unsubscribing is idempotent; once it happens, no further event is
/// delivered through the subscription, even if the source still holds a
/// queue for it.
#[derive(Clone)]
pub struct SubscriptionHandle {
    cancelled: Arc<AtomicBool>,
}

impl SubscriptionHandle {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn unsubscribe(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }
}

/// Receiving end of one subscription.
pub struct IdentitySubscription {
    events: mpsc::Receiver<Option<Identity>>,
    pub handle: SubscriptionHandle,
}

impl IdentitySubscription {
    /// Next identity event, or `None` once the subscription is cancelled
    /// or the source is gone.
    pub async fn next(&mut self) -> Option<Option<Identity>> {
        if !self.handle.is_active() {
            return None;
        }

        let event = self.events.recv().await?;

        // Cancellation may have raced the delivery; the contract is that
        // nothing observable arrives after unsubscribe
        if !self.handle.is_active() {
            return None;
        }

        Some(event)
    }
}

struct SubscriberSlot {
    tx: mpsc::Sender<Option<Identity>>,
    handle: SubscriptionHandle,
}

/// In-process fan-out source fed by the provider adapter (webhook ingest
/// in the gateway, direct emits in tests).
#[derive(Clone)]
pub struct ChannelIdentitySource {
    current: Arc<RwLock<Option<Identity>>>,
    subscribers: Arc<Mutex<Vec<SubscriberSlot>>>,
}

impl ChannelIdentitySource {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replace the current identity and fan it out to live subscribers.
    pub fn emit(&self, identity: Option<Identity>) {
        *self.current.write().unwrap() = identity.clone();

        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|slot| {
            if !slot.handle.is_active() {
                return false;
            }

            match slot.tx.try_send(identity.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    // A subscriber that cannot keep up with identity
                    // events is beyond saving; cut it loose
                    warn!("Dropping identity subscriber: event queue full");
                    slot.handle.unsubscribe();
                    false
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            }
        });
    }

    pub fn current(&self) -> Option<Identity> {
        self.current.read().unwrap().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|slot| slot.handle.is_active());
        subscribers.len()
    }
}

impl Default for ChannelIdentitySource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityEventSource for ChannelIdentitySource {
    fn subscribe(&self) -> IdentitySubscription {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER_SIZE);
        let handle = SubscriptionHandle::new();

        // New subscribers immediately learn the current identity
        let _ = tx.try_send(self.current.read().unwrap().clone());

        self.subscribers.lock().unwrap().push(SubscriberSlot {
            tx,
            handle: handle.clone(),
        });

        IdentitySubscription { events: rx, handle }
    }
}
