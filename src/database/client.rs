use std::sync::Arc;

use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repositories::like::LikesRepository;
use crate::database::repositories::post::PostRepository;
use crate::middleware::error::AppResult;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

#[derive(Debug)]
pub struct Database {
    pub client: Arc<Db>,
    pub posts: PostRepository,
    pub likes: LikesRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> AppResult<Self> {
        info!("->> connecting DB url={} ns={} db={}", config.url, config.namespace, config.database);
        let conn = connect(config.url).await?;

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password }).await?;
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await?;

        let version = conn.version().await?;
        info!("->> connected DB version: {version}");

        Ok(Self::from_client(conn))
    }

    pub fn from_client(conn: Db) -> Self {
        let client = Arc::new(conn);
        Self {
            posts: PostRepository::new(client.clone()),
            likes: LikesRepository::new(client.clone()),
            client,
        }
    }
}
