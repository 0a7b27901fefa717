use metrics_exporter_prometheus::PrometheusHandle;
use sg_session::{ChannelIdentitySource, SessionStore, ShutdownCoordinator};

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The reconciliation engine; single writer of the session view.
    pub store: SessionStore,
    /// Where provider webhook events are fed in.
    pub source: ChannelIdentitySource,
    pub shutdown: ShutdownCoordinator,
    pub prometheus: Option<PrometheusHandle>,
}
