use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fieldbook_api::config::ServerConfig;
use fieldbook_api::router::build_app_router;
use fieldbook_api::state::AppState;
use fieldbook_booking::{AppointmentOrchestrator, Collaborators, OrchestratorConfig};
use fieldbook_core::clock::SystemClock;
use fieldbook_db::PgSystemOfRecord;
use fieldbook_scheduler::{SchedulerApi, SchedulerApiConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fieldbook_api=debug,fieldbook_booking=debug,fieldbook_scheduler=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let orchestrator_config =
        OrchestratorConfig::from_env().expect("Invalid orchestrator configuration");
    config
        .check_request_timeout(&orchestrator_config)
        .expect("Invalid request timeout");
    let scheduler_config =
        SchedulerApiConfig::from_env().expect("Invalid scheduler configuration");
    tracing::info!(
        scheduler_url = %scheduler_config.base_url,
        rpc_timeout_secs = orchestrator_config.rpc_timeout.as_secs(),
        search_weeks = orchestrator_config.search_weeks,
        "Loaded scheduler configuration",
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = fieldbook_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    fieldbook_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    fieldbook_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Orchestrator ---
    let system_of_record = Arc::new(PgSystemOfRecord::new(pool.clone()));
    let orchestrator = Arc::new(AppointmentOrchestrator::new(
        Collaborators {
            scheduler: Arc::new(SchedulerApi::new(scheduler_config)),
            work_orders: system_of_record.clone(),
            system_of_record,
            clock: Arc::new(SystemClock::with_offset_minutes(config.utc_offset_minutes)),
        },
        orchestrator_config,
    ));
    let cancel = orchestrator.cancellation_token();

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        orchestrator,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal, then cancel in-flight scheduler calls.
///
/// Cancelled workflows still close their scheduler sessions before the
/// requests complete, so draining connections leaves no session open.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }

    cancel.cancel();
}
