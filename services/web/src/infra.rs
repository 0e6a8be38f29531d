use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Process state for the operational endpoints.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

impl AppState {
    /// Starts not ready; the server flips the flag once the listener is bound.
    pub(crate) fn new(metrics: Arc<PrometheusHandle>) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics,
        }
    }
}
