use async_trait::async_trait;

use crate::entities::community::post_entity::{CreatePost, Post, UpdatePost};
use crate::middleware::{error::AppResult, utils::db_utils::Pagination};

#[async_trait]
pub trait PostsRepositoryInterface {
    async fn create(&self, data: CreatePost) -> AppResult<Post>;
    async fn get_by_id(&self, post_id: i64) -> AppResult<Option<Post>>;
    /// Newest first, optionally restricted to one topic.
    async fn filter(&self, topic: Option<String>, pag: Pagination) -> AppResult<Vec<Post>>;
    async fn update_if_author(
        &self,
        post_id: i64,
        author_id: i64,
        data: UpdatePost,
    ) -> AppResult<bool>;
    async fn delete_if_author(&self, post_id: i64, author_id: i64) -> AppResult<bool>;
    /// Overwrites the like counter, returns false when the post does not exist.
    async fn set_likes(&self, post_id: i64, likes: i64) -> AppResult<bool>;
}
