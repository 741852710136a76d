use crate::entities::community::like_entity::Like;
use crate::middleware::error::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait LikesRepositoryInterface {
    /// Fails with `AppError::ConstraintViolation` when the pair is already stored.
    async fn insert_like(&self, post_id: i64, user_id: i64) -> AppResult<Like>;
    async fn list_likes_by_post(&self, post_id: i64) -> AppResult<Vec<Like>>;
    async fn delete_likes_by_post(&self, post_id: i64) -> AppResult<u64>;
}
