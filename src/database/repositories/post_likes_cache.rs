use tracing::warn;

use crate::database::table_names::POST_LIKES_CACHE_TABLE_NAME;
use crate::interfaces::map_cache::{MapCacheInterface, EMPTY_ROW};
use crate::middleware::error::AppResult;

/// Likes not yet flushed to the database, one JSON list of user ids per post.
pub struct PostLikesCacheRepository<'a, C: MapCacheInterface> {
    cache: &'a C,
}

impl<'a, C: MapCacheInterface + Sync> PostLikesCacheRepository<'a, C> {
    pub fn new(cache: &'a C) -> Self {
        Self { cache }
    }

    async fn get_post_data(&self, post_id: i64) -> AppResult<Vec<i64>> {
        let row = self
            .cache
            .get_row(POST_LIKES_CACHE_TABLE_NAME, &post_id.to_string())
            .await?;
        Ok(serde_json::from_str::<Vec<i64>>(&row)?)
    }

    pub async fn get_likes_by_post(&self, post_id: i64) -> AppResult<Vec<i64>> {
        self.get_post_data(post_id).await
    }

    /// Appends the user to the post's pending likes, false if already there.
    pub async fn like_post(&self, post_id: i64, user_id: i64) -> AppResult<bool> {
        let mut likes = self.get_post_data(post_id).await?;
        if likes.contains(&user_id) {
            return Ok(false);
        }
        likes.push(user_id);
        self.cache
            .set_row(
                POST_LIKES_CACHE_TABLE_NAME,
                &post_id.to_string(),
                &serde_json::to_string(&likes)?,
            )
            .await?;
        Ok(true)
    }

    /// Resets the row to an empty list, the row itself stays.
    pub async fn clear_cache(&self, post_id: i64) -> AppResult<()> {
        self.cache
            .set_row(POST_LIKES_CACHE_TABLE_NAME, &post_id.to_string(), EMPTY_ROW)
            .await
    }

    /// Posts that have at least one pending like, unreadable rows are left out.
    pub async fn pending_posts(&self) -> AppResult<Vec<(i64, Vec<i64>)>> {
        let table = self.cache.get_table(POST_LIKES_CACHE_TABLE_NAME).await?;
        let mut pending = Vec::with_capacity(table.len());
        for (row, value) in table {
            let Ok(post_id) = row.parse::<i64>() else {
                warn!("skipping cache row `{row}` of {POST_LIKES_CACHE_TABLE_NAME}, not a post id");
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let likes = match serde_json::from_str::<Vec<i64>>(&value) {
                Ok(likes) => likes,
                Err(err) => {
                    warn!("skipping post {post_id} in {POST_LIKES_CACHE_TABLE_NAME}, bad row: {err}");
                    continue;
                }
            };
            if !likes.is_empty() {
                pending.push((post_id, likes));
            }
        }
        pending.sort_by_key(|(post_id, _)| *post_id);
        Ok(pending)
    }
}
