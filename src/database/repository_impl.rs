use crate::database::client::Db;
use crate::database::repository_traits::{QryFilters, RepositoryCore};
use crate::database::surrdb_utils;
use crate::database::table_names::SEQUENCE_TABLE_NAME;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::{Pagination, ViewFieldSelector};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::{marker::PhantomData, string::String};

#[derive(Debug)]
pub struct Repository<E> {
    pub client: Arc<Db>,
    pub table_name: String,
    _phantom: PhantomData<E>,
}

fn where_clause(conditions: &QryFilters) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    let parts = conditions
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{column} = $f{i}"))
        .collect::<Vec<String>>();
    format!("WHERE {}", parts.join(" AND "))
}

impl<E> Repository<E> {
    async fn next_id(&self) -> AppResult<i64> {
        let mut res = self
            .client
            .query(format!(
                "RETURN (UPSERT ONLY type::thing('{SEQUENCE_TABLE_NAME}', $tb) SET seq = (seq OR 0) + 1).seq;"
            ))
            .bind(("tb", self.table_name.clone()))
            .await?;
        let id = res.take::<Option<i64>>(0)?;
        id.ok_or(AppError::SurrealDbNoResult {
            source: SEQUENCE_TABLE_NAME.to_string(),
            id: self.table_name.clone(),
        })
    }
}

#[async_trait]
impl<E> RepositoryCore for Repository<E>
where
    E: ViewFieldSelector + DeserializeOwned + Send + Sync + 'static,
{
    type Connection = Arc<Db>;
    type Error = AppError;
    type QueryResultItem = E;
    type QueryResultList = Vec<Self::QueryResultItem>;

    fn new(client: Self::Connection, table_name: String) -> Self {
        Repository {
            client,
            table_name,
            _phantom: PhantomData,
        }
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<E>> {
        let fields = E::get_select_query_fields();
        let qry = self
            .client
            .query(format!("SELECT {fields} FROM type::thing($tb, $id);"))
            .bind(("tb", self.table_name.clone()))
            .bind(("id", id));
        surrdb_utils::get_query(qry).await
    }

    async fn create_entity<C>(&self, content: C) -> AppResult<E>
    where
        C: Serialize + Send + Sync + 'static,
    {
        let id = self.next_id().await?;
        self.client
            .query("CREATE type::thing($tb, $id) CONTENT $content RETURN NONE;")
            .bind(("tb", self.table_name.clone()))
            .bind(("id", id))
            .bind(("content", content))
            .await?
            .check()?;

        self.get_by_id(id).await?.ok_or(AppError::SurrealDbNoResult {
            source: self.table_name.clone(),
            id: id.to_string(),
        })
    }

    async fn update_where<C>(&self, id: i64, patch: C, conditions: QryFilters) -> AppResult<bool>
    where
        C: Serialize + Send + Sync + 'static,
    {
        let where_str = where_clause(&conditions);
        let mut qry = self
            .client
            .query(format!(
                "LET $updated = (UPDATE type::thing($tb, $id) MERGE $patch {where_str});
                RETURN array::len($updated);"
            ))
            .bind(("tb", self.table_name.clone()))
            .bind(("id", id))
            .bind(("patch", patch));
        for (i, (_, value)) in conditions.into_iter().enumerate() {
            qry = qry.bind((format!("f{i}"), value));
        }
        let mut res = qry.await?;
        let count = res.take::<Option<i64>>(res.num_statements() - 1)?.unwrap_or(0);
        Ok(count > 0)
    }

    async fn delete_where(&self, id: i64, conditions: QryFilters) -> AppResult<bool> {
        let where_str = where_clause(&conditions);
        let mut qry = self
            .client
            .query(format!(
                "LET $deleted = (DELETE type::thing($tb, $id) {where_str} RETURN BEFORE);
                RETURN array::len($deleted);"
            ))
            .bind(("tb", self.table_name.clone()))
            .bind(("id", id));
        for (i, (_, value)) in conditions.into_iter().enumerate() {
            qry = qry.bind((format!("f{i}"), value));
        }
        let mut res = qry.await?;
        let count = res.take::<Option<i64>>(res.num_statements() - 1)?.unwrap_or(0);
        Ok(count > 0)
    }

    async fn filter(
        &self,
        filters: QryFilters,
        pagination: Option<Pagination>,
    ) -> AppResult<Vec<E>> {
        let fields = E::get_select_query_fields();
        let where_str = where_clause(&filters);
        let pag_str = pagination.map(|p| p.to_query_str()).unwrap_or_default();
        let mut qry = self
            .client
            .query(format!(
                "SELECT {fields} FROM type::table($tb) {where_str} {pag_str};"
            ))
            .bind(("tb", self.table_name.clone()));
        for (i, (_, value)) in filters.into_iter().enumerate() {
            qry = qry.bind((format!("f{i}"), value));
        }
        surrdb_utils::get_list_qry(qry).await
    }
}
