use crate::config::AppConfig;
use crate::database::client::Database;
use crate::database::repositories::{like::LikesRepository, post::PostRepository};
use crate::interfaces::map_cache::MapCacheInterface;
use crate::services::post_service::PostService;
use crate::utils::keyed_lock::KeyedLocks;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

pub type MapCache = Arc<dyn MapCacheInterface + Send + Sync>;

pub struct CtxState {
    pub db: Database,
    pub cache: MapCache,
    pub like_locks: KeyedLocks<i64>,
    pub likes_sync_threshold: usize,
    pub likes_flush_interval: Duration,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("likes_sync_threshold", &self.likes_sync_threshold)
            .field("likes_flush_interval", &self.likes_flush_interval)
            .finish_non_exhaustive()
    }
}

impl CtxState {
    pub fn post_service(&self) -> PostService<'_, MapCache, LikesRepository, PostRepository> {
        PostService::new(
            &self.cache,
            &self.db.likes,
            &self.db.posts,
            &self.like_locks,
            self.likes_sync_threshold,
        )
    }
}

pub fn create_ctx_state(db: Database, cache: MapCache, config: &AppConfig) -> Arc<CtxState> {
    let ctx_state = CtxState {
        db,
        cache,
        like_locks: KeyedLocks::new(),
        likes_sync_threshold: config.likes_sync_threshold.max(1),
        likes_flush_interval: Duration::from_secs(config.likes_flush_interval_secs),
    };
    Arc::new(ctx_state)
}
