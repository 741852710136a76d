use std::collections::HashMap;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::info;

use crate::interfaces::map_cache::{MapCacheInterface, EMPTY_ROW};
use crate::middleware::error::AppResult;

/// Each table is one Redis hash, rows are its fields.
#[derive(Clone)]
pub struct RedisMapCache {
    connection: ConnectionManager,
}

impl RedisMapCache {
    pub async fn connect(redis_uri: &str) -> AppResult<Self> {
        info!("->> connecting cache");
        let client = Client::open(redis_uri)?;
        let connection = client.get_connection_manager().await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl MapCacheInterface for RedisMapCache {
    async fn create_table(&self, table: &str, map: HashMap<String, String>) -> AppResult<()> {
        if map.is_empty() {
            return Ok(());
        }
        let items = map.into_iter().collect::<Vec<(String, String)>>();
        let mut conn = self.connection.clone();
        conn.hset_multiple::<_, _, _, ()>(table, &items).await?;
        Ok(())
    }

    async fn get_table(&self, table: &str) -> AppResult<HashMap<String, String>> {
        let mut conn = self.connection.clone();
        let map: HashMap<String, String> = conn.hgetall(table).await?;
        Ok(map)
    }

    async fn get_row(&self, table: &str, row: &str) -> AppResult<String> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.hget(table, row).await?;
        Ok(value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| EMPTY_ROW.to_string()))
    }

    async fn set_row(&self, table: &str, row: &str, value: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.hset::<_, _, _, ()>(table, row, value).await?;
        Ok(())
    }
}
