use serde::de::DeserializeOwned;
use surrealdb::method::Query;
use surrealdb::engine::any::Any as SurDb;

use crate::middleware::error::AppResult;

// remote engines only hand back the rendered message of these errors
const INDEX_EXISTS_MSG: &str = "already contains";
const FIELD_ASSERT_MSG: &str = "but field must conform to";
const FIELD_TYPE_MSG: &str = "but expected a";

pub fn is_unique_violation(err: &surrealdb::Error) -> bool {
    match err {
        surrealdb::Error::Db(surrealdb::error::Db::IndexExists { .. }) => true,
        other => other.to_string().contains(INDEX_EXISTS_MSG),
    }
}

/// Record rejected by a field `ASSERT` or type check of the schema.
pub fn is_field_violation(err: &surrealdb::Error) -> bool {
    match err {
        surrealdb::Error::Db(
            surrealdb::error::Db::FieldValue { .. } | surrealdb::error::Db::FieldCheck { .. },
        ) => true,
        other => {
            let msg = other.to_string();
            msg.contains(FIELD_ASSERT_MSG) || msg.contains(FIELD_TYPE_MSG)
        }
    }
}

pub async fn get_list_qry<T: DeserializeOwned>(qry: Query<'_, SurDb>) -> AppResult<Vec<T>> {
    let mut res = qry.await?;
    let list = res.take::<Vec<T>>(0)?;
    Ok(list)
}

pub async fn get_query<T: DeserializeOwned>(qry: Query<'_, SurDb>) -> AppResult<Option<T>> {
    let mut res = qry.await?;
    let item = res.take::<Option<T>>(0)?;
    Ok(item)
}
