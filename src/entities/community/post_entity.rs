use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::utils::db_utils::ViewFieldSelector;

pub const TABLE_NAME: &str = "post";
pub const TABLE_COL_LIKES: &str = "likes";
pub const TABLE_COL_AUTHOR: &str = "author_id";
pub const TABLE_COL_TOPIC: &str = "topic";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub topic: Option<String>,
    /// Denormalized like counter, refreshed on every sync of the like cache.
    pub likes: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ViewFieldSelector for Post {
    fn get_select_query_fields() -> String {
        "record::id(id) AS id,
        title,
        content,
        topic,
        likes,
        author_id,
        created_at,
        updated_at"
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub author_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}
