use std::{net::SocketAddr, process, sync::Arc, time::Duration};

use bottega::{
    application::{
        catalog::CatalogService,
        error::AppError,
        health::HealthService,
        orders::OrderService,
        repos::{CatalogRepo, DiagnosticsRepo, OrdersRepo},
    },
    config,
    infra::{
        cache::ResponseCache,
        db::PostgresStore,
        error::InfraError,
        http::{self, AdminGuard, GatewayRateLimiter, GatewayState},
        telemetry,
    },
};
use tokio::net::TcpListener;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        Some(config::Command::Serve(_)) | None => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let store = init_store(&settings).await?;
    let state = build_gateway_state(store, &settings);

    for warning in settings.validation_warnings() {
        tracing::warn!(target = "bottega::config", warning = %warning, "configuration warning");
    }

    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "bottega::serve",
        addr = %settings.server.addr,
        "gateway listening"
    );

    let router = http::build_router(state);
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(settings.server.graceful_shutdown))
    .await
    .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal(drain_budget: Duration) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    info!(
        target = "bottega::serve",
        drain_secs = drain_budget.as_secs(),
        "shutdown signal received; draining connections"
    );
    // Watchdog: a drain that exceeds its budget ends the process anyway.
    tokio::spawn(async move {
        tokio::time::sleep(drain_budget).await;
        error!(target = "bottega::serve", "graceful shutdown budget exceeded");
        process::exit(1);
    });
}

async fn init_store(settings: &config::Settings) -> Result<PostgresStore, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresStore::connect_with_retry(
        database_url,
        settings.database.max_connections.get(),
        settings.database.connect_attempts.get(),
        settings.database.connect_base_delay,
    )
    .await
    .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresStore::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(PostgresStore::new(pool))
}

fn build_gateway_state(store: PostgresStore, settings: &config::Settings) -> GatewayState {
    let catalog_repo: Arc<dyn CatalogRepo> = Arc::new(store.clone());
    let orders_repo: Arc<dyn OrdersRepo> = Arc::new(store.clone());
    let diagnostics_repo: Arc<dyn DiagnosticsRepo> = Arc::new(store);

    let cache = ResponseCache::new(settings.cache.ttl());
    let limiter = Arc::new(GatewayRateLimiter::new(
        settings.rate_limit.window(),
        settings.rate_limit.max_requests.get(),
    ));

    let catalog = Arc::new(CatalogService::new(catalog_repo, cache));
    let orders = Arc::new(OrderService::new(orders_repo));
    let health = Arc::new(HealthService::new(
        diagnostics_repo,
        limiter.clone(),
        settings.validation_warnings(),
    ));
    let guard = Arc::new(AdminGuard::new(
        &settings.admin.username,
        &settings.admin.password,
    ));

    GatewayState {
        catalog,
        orders,
        health,
        guard,
        limiter,
        debug: settings.debug,
    }
}
