use crate::database::client::Db;
use crate::database::repository_impl::Repository;
use crate::database::repository_traits::RepositoryCore;
use crate::entities::community::like_entity::{
    CreateLike, Like, INDEX_POST_USER, TABLE_COL_POST, TABLE_COL_USER, TABLE_NAME,
};
use crate::interfaces::repositories::like::LikesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug)]
pub struct LikesRepository {
    repository: Repository<Like>,
}

impl LikesRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self {
            repository: Repository::new(client, TABLE_NAME.to_string()),
        }
    }

    pub(crate) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS {TABLE_COL_POST} ON TABLE {TABLE_NAME} TYPE int;
    DEFINE FIELD IF NOT EXISTS {TABLE_COL_USER} ON TABLE {TABLE_NAME} TYPE int;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS {INDEX_POST_USER} ON TABLE {TABLE_NAME} FIELDS {TABLE_COL_POST}, {TABLE_COL_USER} UNIQUE;
    ");
        self.repository.client.query(sql).await?.check()?;
        Ok(())
    }
}

#[async_trait]
impl LikesRepositoryInterface for LikesRepository {
    async fn insert_like(&self, post_id: i64, user_id: i64) -> AppResult<Like> {
        self.repository
            .create_entity(CreateLike { post_id, user_id })
            .await
    }

    async fn list_likes_by_post(&self, post_id: i64) -> AppResult<Vec<Like>> {
        self.repository
            .filter(vec![(TABLE_COL_POST, json!(post_id))], None)
            .await
    }

    async fn delete_likes_by_post(&self, post_id: i64) -> AppResult<u64> {
        let mut res = self
            .repository
            .client
            .query(format!(
                "LET $deleted = (DELETE {TABLE_NAME} WHERE {TABLE_COL_POST} = $post_id RETURN BEFORE);
                RETURN array::len($deleted);"
            ))
            .bind(("post_id", post_id))
            .await?;
        let count = res.take::<Option<i64>>(res.num_statements() - 1)?.unwrap_or(0);
        Ok(count as u64)
    }
}
