use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_intake::config::AppConfig;
use talent_intake::intake::CorsPolicy;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn cors_policy(config: &AppConfig) -> CorsPolicy {
    CorsPolicy::with_extra_origins(config.cors.extra_origins.iter().cloned())
}
