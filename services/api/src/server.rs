use crate::cli::ServeArgs;
use crate::infra::{cors_policy, AppState};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_intake::config::AppConfig;
use talent_intake::error::AppError;
use talent_intake::intake::{IntakeService, RestApplicationStore};
use talent_intake::telemetry;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let cors = cors_policy(&config);
    let intake_service = match &config.store {
        Some(store_config) => {
            let store = RestApplicationStore::new(store_config)?;
            info!(endpoint = store.endpoint(), "persistence API configured");
            IntakeService::new(cors, Arc::new(store))
        }
        None => {
            warn!("SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY missing; submissions will fail");
            IntakeService::<RestApplicationStore>::unconfigured(cors)
        }
    };

    let app = with_intake_routes(Arc::new(intake_service))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "application intake ready");

    axum::serve(listener, app).await?;
    Ok(())
}
