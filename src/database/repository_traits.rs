use async_trait::async_trait;
use serde::Serialize;
use std::string::String;

use crate::middleware::utils::db_utils::Pagination;

/// Equality conditions joined with `AND`, `(column, value)`.
pub type QryFilters = Vec<(&'static str, serde_json::Value)>;

#[async_trait]
pub trait RepositoryCore {
    type Connection;
    type Error: std::error::Error + Send;
    type QueryResultItem;
    type QueryResultList; // = Vec<Self::QueryResultItem>; (not stable yet)

    fn new(conn: Self::Connection, table_name: String) -> Self
    where
        Self: Sized;

    async fn get_by_id(&self, id: i64) -> Result<Option<Self::QueryResultItem>, Self::Error>;

    /// Inserts under the next integer id of the table.
    async fn create_entity<C>(&self, content: C) -> Result<Self::QueryResultItem, Self::Error>
    where
        C: Serialize + Send + Sync + 'static;

    /// Merges `patch` into the record when every condition holds, returns whether it matched.
    async fn update_where<C>(
        &self,
        id: i64,
        patch: C,
        conditions: QryFilters,
    ) -> Result<bool, Self::Error>
    where
        C: Serialize + Send + Sync + 'static;

    async fn delete_where(&self, id: i64, conditions: QryFilters) -> Result<bool, Self::Error>;

    async fn filter(
        &self,
        filters: QryFilters,
        pagination: Option<Pagination>,
    ) -> Result<Self::QueryResultList, Self::Error>;
}
