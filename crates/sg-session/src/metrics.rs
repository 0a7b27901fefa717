use metrics::{counter, gauge, histogram};

/// Metrics collector for session reconciliation
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "sg_session",
        }
    }

    pub fn identity_changed(&self) {
        counter!(format!("{}.identity.changed", self.prefix)).increment(1);
    }

    pub fn signed_out(&self) {
        counter!(format!("{}.identity.signed_out", self.prefix)).increment(1);
    }

    /// Record a reconcile attempt being launched
    pub fn attempt_started(&self) {
        counter!(format!("{}.attempts.started", self.prefix)).increment(1);
        gauge!(format!("{}.attempts.in_flight", self.prefix)).set(1.0);
    }

    pub fn attempt_succeeded(&self) {
        counter!(format!("{}.attempts.succeeded", self.prefix)).increment(1);
        gauge!(format!("{}.attempts.in_flight", self.prefix)).set(0.0);
    }

    pub fn attempt_failed(&self, terminal: bool) {
        counter!(format!("{}.attempts.failed", self.prefix)).increment(1);
        let class = if terminal { "terminal" } else { "transient" };
        counter!(format!("{}.attempts.failed.{}", self.prefix, class)).increment(1);
        gauge!(format!("{}.attempts.in_flight", self.prefix)).set(0.0);
    }

    pub fn attempt_timed_out(&self) {
        counter!(format!("{}.attempts.timed_out", self.prefix)).increment(1);
        gauge!(format!("{}.attempts.in_flight", self.prefix)).set(0.0);
    }

    pub fn stale_result_discarded(&self) {
        counter!(format!("{}.attempts.stale_discarded", self.prefix)).increment(1);
    }

    pub fn guest_override_set(&self) {
        counter!(format!("{}.guest.set", self.prefix)).increment(1);
    }

    pub fn guest_override_cleared(&self) {
        counter!(format!("{}.guest.cleared", self.prefix)).increment(1);
    }

    /// Record how long a reconcile attempt took to settle
    pub fn attempt_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.attempts.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
