//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, click worker spawning, and the
//! Axum server lifecycle including graceful shutdown.

use crate::application::services::{ResolutionService, ResolutionSettings};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::{CacheStore, NullCache, RedisCache};
use crate::infrastructure::messaging::{AmqpClickPublisher, QueuedClickPublisher};
use crate::infrastructure::persistence::PgLinkRepository;
use crate::infrastructure::security::BcryptVerifier;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};

/// How long shutdown waits for buffered clicks to reach the broker.
const CLICK_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - Click queue and background click worker
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server stops accepting connections, finishes
/// in-flight requests, lets the click worker drain the queue and closes the
/// pool.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Migrations applied");

    let cache = connect_cache(&config).await;
    let link_repository: Arc<dyn LinkRepository> =
        Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let broker = Arc::new(AmqpClickPublisher::new(
        config.amqp_url.clone(),
        config.click_queue.clone(),
        config.publish_timeout(),
    ));
    info!("Publishing clicks to queue '{}'", broker.queue());
    let (stop_worker, worker_stop) = oneshot::channel();
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        broker,
        config.click_worker_concurrency,
        worker_stop,
    ));
    info!("Click worker started");

    let resolution_service = Arc::new(ResolutionService::new(
        link_repository.clone(),
        cache.clone(),
        Arc::new(QueuedClickPublisher::new(click_tx.clone())),
        Arc::new(BcryptVerifier::new()),
        ResolutionSettings {
            positive_ttl: config.positive_cache_ttl(),
            negative_ttl: config.negative_cache_ttl(),
            io_timeout: config.io_timeout(),
        },
    ));

    let state = AppState::new(resolution_service, cache, link_repository, click_tx);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, draining click queue");
    if stop_worker.send(()).is_err() {
        warn!("Click worker exited before shutdown");
    }
    match tokio::time::timeout(CLICK_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Click worker panicked: {}", e),
        Err(_) => warn!(
            "Click worker did not drain within {}s, remaining clicks are lost",
            CLICK_DRAIN_TIMEOUT.as_secs()
        ),
    }

    pool.close().await;
    info!("Shutdown complete");

    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");
    Ok(pool)
}

async fn connect_cache(config: &Config) -> Arc<dyn CacheStore> {
    let Some(redis_url) = &config.redis_url else {
        info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Completes on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
