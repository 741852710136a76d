use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::middleware::error::AppResult;

/// Value returned for a row that was never written or holds nothing.
pub const EMPTY_ROW: &str = "[]";

/// Two level key-value store: table -> row -> value.
///
/// Every call is a round trip to a shared store and is atomic on its own,
/// a read followed by a write is not.
#[async_trait]
pub trait MapCacheInterface {
    /// Sets all given rows of the table, creating it if needed.
    async fn create_table(&self, table: &str, map: HashMap<String, String>) -> AppResult<()>;
    /// Empty map when the table does not exist.
    async fn get_table(&self, table: &str) -> AppResult<HashMap<String, String>>;
    /// [`EMPTY_ROW`] when the row does not exist.
    async fn get_row(&self, table: &str, row: &str) -> AppResult<String>;
    async fn set_row(&self, table: &str, row: &str, value: &str) -> AppResult<()>;
}

#[async_trait]
impl<T: MapCacheInterface + Send + Sync + ?Sized> MapCacheInterface for Arc<T> {
    async fn create_table(&self, table: &str, map: HashMap<String, String>) -> AppResult<()> {
        (**self).create_table(table, map).await
    }

    async fn get_table(&self, table: &str) -> AppResult<HashMap<String, String>> {
        (**self).get_table(table).await
    }

    async fn get_row(&self, table: &str, row: &str) -> AppResult<String> {
        (**self).get_row(table, row).await
    }

    async fn set_row(&self, table: &str, row: &str, value: &str) -> AppResult<()> {
        (**self).set_row(table, row, value).await
    }
}
