use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use oc_lettings::config::AppConfig;
use oc_lettings::error::AppError;
use oc_lettings::storage::Database;
use oc_lettings::{site_router, telemetry, SiteState};
use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    args.database.apply(&mut config);

    telemetry::init(&config.telemetry)?;

    let database = Database::connect(&config.database).await?;
    database.migrate().await?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(Arc::new(prometheus_handle));
    let readiness_flag = app_state.readiness.clone();

    let app = with_operational_routes(site_router(SiteState::from_database(&database)))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, database = %config.database.url, "lettings site ready");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|err| AppError::Server(axum::Error::new(err)))?;
    database.close().await;
    Ok(())
}
