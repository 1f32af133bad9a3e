//! FareLens Server — Flight Deal Ranking & Alert Platform
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use farelens_core::config::AppConfig;
use farelens_core::error::AppError;
use farelens_core::traits::admission::AdmissionStore;
use farelens_core::traits::cache::CacheProvider;

#[tokio::main]
async fn main() {
    let env = std::env::var("FARELENS_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FareLens v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = farelens_database::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    farelens_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Initialize cache ─────────────────────────────────
    tracing::info!(
        "Initializing cache (provider: {})...",
        config.cache.provider
    );
    let cache = Arc::new(farelens_cache::provider::CacheManager::new(&config.cache)?);
    let cache_provider: Arc<dyn CacheProvider> = Arc::clone(&cache) as Arc<dyn CacheProvider>;
    tracing::info!("Cache initialized");

    // ── Step 3: Initialize deal source ───────────────────────────
    tracing::info!(
        "Initializing deal source (provider: {})...",
        config.ingest.provider
    );
    let source = farelens_ingest::source::build_source(&config.ingest)?;
    tracing::info!("Deal source initialized");

    // ── Step 4: Initialize repositories ──────────────────────────
    let profile_repo = Arc::new(
        farelens_database::repositories::profile::ProfileRepository::new(db.pool().clone()),
    );
    let history_repo = Arc::new(
        farelens_database::repositories::alert_history::AlertHistoryRepository::new(
            db.pool().clone(),
        ),
    );
    let admission_store: Arc<dyn AdmissionStore> = Arc::new(
        farelens_database::repositories::admission::AdmissionRepository::new(db.pool().clone()),
    );

    // ── Step 5: Initialize engine ────────────────────────────────
    tracing::info!("Initializing ranking engine...");
    let resolver = farelens_engine::PreferenceResolver::new(config.alerts.watchlist_boost);
    let scorer = farelens_engine::Scorer::new(resolver);
    let curator = farelens_engine::Curator::new(config.feed.clone());
    let feed = Arc::new(farelens_engine::FeedService::new(
        Arc::clone(&source),
        Arc::clone(&cache_provider),
        scorer,
        curator,
        config.feed.clone(),
    ));
    let admission = Arc::new(farelens_engine::AdmissionController::new(
        Arc::clone(&admission_store),
        config.alerts.clone(),
    ));
    let dispatcher: Arc<dyn farelens_engine::AlertDispatcher> =
        Arc::new(farelens_engine::TracingDispatcher);
    tracing::info!("Ranking engine initialized");

    // ── Step 6: Start background worker ──────────────────────────
    let mut scheduler = if config.worker.enabled {
        tracing::info!("Starting background worker...");

        let mut registry = farelens_worker::JobRegistry::new();
        registry.register(Arc::new(farelens_worker::jobs::AlertScanJob::new(
            Arc::clone(&profile_repo),
            Arc::clone(&feed),
            Arc::clone(&admission),
            Arc::clone(&dispatcher),
            Arc::clone(&history_repo),
        )));
        registry.register(Arc::new(farelens_worker::jobs::DedupSweepJob::new(
            Arc::clone(&admission_store),
            config.alerts.dedup_window_hours,
        )));
        registry.register(Arc::new(farelens_worker::jobs::CounterPurgeJob::new(
            Arc::clone(&admission_store),
            config.worker.counter_retention_days,
        )));

        let scheduler =
            farelens_worker::CronScheduler::new(Arc::new(registry), config.worker.clone()).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;

        tracing::info!("Background worker started");
        Some(scheduler)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 7: Build and start HTTP server ──────────────────────
    tracing::info!(
        "Starting HTTP server on {}:{}...",
        config.server.host,
        config.server.port
    );

    let app_state = farelens_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db.pool().clone(),
        cache: Arc::clone(&cache),
        source: Arc::clone(&source),
        feed: Arc::clone(&feed),
        profiles: Arc::clone(&profile_repo),
        history: Arc::clone(&history_repo),
    };

    let app = farelens_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("FareLens server listening on {}", addr);

    // ── Step 8: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(scheduler) = scheduler.as_mut() {
        tracing::info!("Stopping background worker...");
        scheduler.shutdown().await?;
    }

    db.close().await;

    tracing::info!("FareLens server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
