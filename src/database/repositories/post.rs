use crate::database::client::Db;
use crate::database::repository_impl::Repository;
use crate::database::repository_traits::RepositoryCore;
use crate::entities::community::post_entity::{
    CreatePost, Post, UpdatePost, TABLE_COL_AUTHOR, TABLE_COL_LIKES, TABLE_COL_TOPIC, TABLE_NAME,
};
use crate::interfaces::repositories::post::PostsRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::{Pagination, QryOrder};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug)]
pub struct PostRepository {
    repository: Repository<Post>,
}

impl PostRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self {
            repository: Repository::new(client, TABLE_NAME.to_string()),
        }
    }

    pub(crate) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS title ON TABLE {TABLE_NAME} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE FIELD IF NOT EXISTS content ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS {TABLE_COL_TOPIC} ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS {TABLE_COL_LIKES} ON TABLE {TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE FIELD IF NOT EXISTS {TABLE_COL_AUTHOR} ON TABLE {TABLE_NAME} TYPE int;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    DEFINE INDEX IF NOT EXISTS idx_topic ON TABLE {TABLE_NAME} COLUMNS {TABLE_COL_TOPIC};
    DEFINE INDEX IF NOT EXISTS idx_author ON TABLE {TABLE_NAME} COLUMNS {TABLE_COL_AUTHOR};
");
        self.repository.client.query(sql).await?.check()?;
        Ok(())
    }
}

#[async_trait]
impl PostsRepositoryInterface for PostRepository {
    async fn create(&self, data: CreatePost) -> AppResult<Post> {
        self.repository.create_entity(data).await
    }

    async fn get_by_id(&self, post_id: i64) -> AppResult<Option<Post>> {
        self.repository.get_by_id(post_id).await
    }

    async fn filter(&self, topic: Option<String>, pag: Pagination) -> AppResult<Vec<Post>> {
        let filters = match topic {
            Some(topic) => vec![(TABLE_COL_TOPIC, json!(topic))],
            None => vec![],
        };
        let pag = Pagination {
            order_by: Some(pag.order_by.unwrap_or("created_at".to_string())),
            order_dir: Some(pag.order_dir.unwrap_or(QryOrder::DESC)),
            ..pag
        };
        self.repository.filter(filters, Some(pag)).await
    }

    async fn update_if_author(
        &self,
        post_id: i64,
        author_id: i64,
        data: UpdatePost,
    ) -> AppResult<bool> {
        self.repository
            .update_where(post_id, data, vec![(TABLE_COL_AUTHOR, json!(author_id))])
            .await
    }

    async fn delete_if_author(&self, post_id: i64, author_id: i64) -> AppResult<bool> {
        self.repository
            .delete_where(post_id, vec![(TABLE_COL_AUTHOR, json!(author_id))])
            .await
    }

    async fn set_likes(&self, post_id: i64, likes: i64) -> AppResult<bool> {
        self.repository
            .update_where(post_id, json!({ "likes": likes }), vec![])
            .await
    }
}
