use std::sync::Arc;

use blog_server::{
    config::AppConfig,
    database::client::{Database, DbConfig},
    init,
    jobs::like_flush,
    middleware::{error::AppResult, mw_ctx},
    utils::cache::redis_map_cache::RedisMapCache,
};
use tokio::signal::{self, ctrl_c};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env();

    let _sentry = config.sentry_project_link.as_ref().map(|link| {
        sentry::init((
            link.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let db = Database::connect(DbConfig {
        url: &config.db_url,
        database: &config.db_database,
        namespace: &config.db_namespace,
        password: config.db_password.as_deref(),
        username: config.db_username.as_deref(),
    })
    .await?;
    init::run_migrations(&db).await?;

    let cache = RedisMapCache::connect(&config.redis_uri()).await?;
    let ctx_state = mw_ctx::create_ctx_state(db, Arc::new(cache), &config);

    let flush_job = if ctx_state.likes_flush_interval.is_zero() {
        info!("->> like flush job disabled");
        None
    } else {
        Some(like_flush::run(ctx_state.clone(), ctx_state.likes_flush_interval).await)
    };

    info!(
        "->> like aggregation running, sync threshold={}",
        ctx_state.likes_sync_threshold
    );
    shutdown_signal().await;

    if let Some(job) = flush_job {
        job.abort();
    }

    match ctx_state.post_service().flush_pending().await {
        Ok(flushed) => info!("->> final like flush: {flushed} posts"),
        Err(err) => error!("final like flush failed: {err:?}"),
    }

    info!("->> shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
