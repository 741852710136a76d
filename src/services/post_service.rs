use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::{
    database::repositories::post_likes_cache::PostLikesCacheRepository,
    entities::community::post_entity::{CreatePost, Post, UpdatePost},
    interfaces::{
        map_cache::MapCacheInterface,
        repositories::{like::LikesRepositoryInterface, post::PostsRepositoryInterface},
    },
    middleware::{
        error::{AppError, AppResult},
        utils::db_utils::Pagination,
    },
    utils::keyed_lock::KeyedLocks,
};

pub const DEFAULT_LIKES_SYNC_THRESHOLD: usize = 100;

/// Posts and the write-behind like pipeline.
///
/// Likes are collected per post in the cache and moved to the database in
/// one batch once `sync_threshold` of them are pending. Every cache
/// mutation of a post runs under that post's lock in `like_locks`, so two
/// likes on the same post never overwrite each other within one process.
pub struct PostService<'a, C, L, P>
where
    C: MapCacheInterface + Send + Sync,
    L: LikesRepositoryInterface + Send + Sync,
    P: PostsRepositoryInterface + Send + Sync,
{
    likes_cache: PostLikesCacheRepository<'a, C>,
    likes_repository: &'a L,
    posts_repository: &'a P,
    like_locks: &'a KeyedLocks<i64>,
    sync_threshold: usize,
}

impl<'a, C, L, P> PostService<'a, C, L, P>
where
    C: MapCacheInterface + Send + Sync,
    L: LikesRepositoryInterface + Send + Sync,
    P: PostsRepositoryInterface + Send + Sync,
{
    pub fn new(
        cache: &'a C,
        likes_repository: &'a L,
        posts_repository: &'a P,
        like_locks: &'a KeyedLocks<i64>,
        sync_threshold: usize,
    ) -> Self {
        Self {
            likes_cache: PostLikesCacheRepository::new(cache),
            likes_repository,
            posts_repository,
            like_locks,
            sync_threshold: sync_threshold.max(1),
        }
    }

    pub async fn create_post(&self, data: CreatePost) -> AppResult<Post> {
        self.posts_repository.create(data).await
    }

    pub async fn get_post(&self, post_id: i64) -> AppResult<Post> {
        self.posts_repository
            .get_by_id(post_id)
            .await?
            .ok_or(AppError::EntityFailIdNotFound {
                ident: post_id.to_string(),
            })
    }

    pub async fn get_posts(&self, topic: Option<String>, pag: Pagination) -> AppResult<Vec<Post>> {
        self.posts_repository.filter(topic, pag).await
    }

    /// False when the post does not exist or `author_id` did not write it.
    pub async fn update_post(
        &self,
        post_id: i64,
        author_id: i64,
        data: UpdatePost,
    ) -> AppResult<bool> {
        self.posts_repository
            .update_if_author(post_id, author_id, data)
            .await
    }

    /// Removes the post with its stored and pending likes.
    pub async fn delete_post(&self, post_id: i64, author_id: i64) -> AppResult<bool> {
        let _guard = self.like_locks.lock(post_id).await;
        if !self
            .posts_repository
            .delete_if_author(post_id, author_id)
            .await?
        {
            return Ok(false);
        }
        let removed = self.likes_repository.delete_likes_by_post(post_id).await?;
        self.likes_cache.clear_cache(post_id).await?;
        info!("->> post {post_id} deleted with {removed} likes");
        Ok(true)
    }

    /// Records a like in the cache, false when the user is already pending for the post.
    ///
    /// Reaching the threshold flushes the post's pending likes before returning.
    pub async fn like_post(&self, post_id: i64, user_id: i64) -> AppResult<bool> {
        let _guard = self.like_locks.lock(post_id).await;

        if !self.likes_cache.like_post(post_id, user_id).await? {
            debug!("user {user_id} already liked post {post_id}");
            return Ok(false);
        }

        let pending = self.likes_cache.get_likes_by_post(post_id).await?.len();
        if pending >= self.sync_threshold {
            debug!("post {post_id} reached {pending} pending likes, flushing");
            self.sync_likes_locked(post_id).await?;
            self.likes_cache.clear_cache(post_id).await?;
        }
        Ok(true)
    }

    /// Pending likes only, not the stored total.
    pub async fn get_likes_by_post(&self, post_id: i64) -> AppResult<Vec<i64>> {
        self.likes_cache.get_likes_by_post(post_id).await
    }

    /// Stores pending likes that are not stored yet and recounts the post, returns the count.
    pub async fn sync_likes(&self, post_id: i64) -> AppResult<i64> {
        let _guard = self.like_locks.lock(post_id).await;
        self.sync_likes_locked(post_id).await
    }

    pub async fn clear_cache(&self, post_id: i64) -> AppResult<()> {
        let _guard = self.like_locks.lock(post_id).await;
        self.likes_cache.clear_cache(post_id).await
    }

    /// Syncs and clears every post with pending likes, returns how many were flushed.
    ///
    /// A post that fails is logged and left pending for the next run.
    pub async fn flush_pending(&self) -> AppResult<usize> {
        let pending = self.likes_cache.pending_posts().await?;
        let mut flushed = 0;
        for (post_id, _) in pending {
            let _guard = self.like_locks.lock(post_id).await;
            let res = match self.sync_likes_locked(post_id).await {
                Ok(_) => self.likes_cache.clear_cache(post_id).await,
                Err(err) => Err(err),
            };
            match res {
                Ok(()) => flushed += 1,
                Err(err) => error!("flushing likes of post {post_id} failed: {err:?}"),
            }
        }
        Ok(flushed)
    }

    // caller holds the post lock
    async fn sync_likes_locked(&self, post_id: i64) -> AppResult<i64> {
        let cached = self.likes_cache.get_likes_by_post(post_id).await?;
        let stored = self
            .likes_repository
            .list_likes_by_post(post_id)
            .await?
            .into_iter()
            .map(|like| like.user_id)
            .collect::<HashSet<i64>>();

        let mut inserted = 0;
        for user_id in cached.into_iter().filter(|id| !stored.contains(id)) {
            match self.likes_repository.insert_like(post_id, user_id).await {
                Ok(_) => inserted += 1,
                Err(AppError::ConstraintViolation { source }) => {
                    warn!("like of user {user_id} on post {post_id} already stored: {source}");
                }
                Err(err) => return Err(err),
            }
        }

        let count = self
            .likes_repository
            .list_likes_by_post(post_id)
            .await?
            .len() as i64;
        if !self.posts_repository.set_likes(post_id, count).await? {
            warn!("post {post_id} not found, like counter not updated");
        }

        info!("->> synced likes of post {post_id}: inserted={inserted} total={count}");
        Ok(count)
    }
}
