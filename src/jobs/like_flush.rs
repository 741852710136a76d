use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::middleware::mw_ctx::CtxState;

/// Periodically moves pending likes of every post to the database.
///
/// Covers posts that never reach the sync threshold.
pub async fn run(state: Arc<CtxState>, interval: Duration) -> JoinHandle<()> {
    let state = state.clone();
    tokio::spawn(async move {
        info!("->> like flush job started, interval={interval:?}");
        loop {
            tokio::time::sleep(interval).await;

            match state.post_service().flush_pending().await {
                Ok(0) => debug!("like flush: nothing pending"),
                Ok(flushed) => info!("->> like flush: flushed {flushed} posts"),
                Err(err) => error!("like flush failed: {err:?}"),
            }
        }
    })
}
