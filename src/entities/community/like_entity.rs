use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::utils::db_utils::ViewFieldSelector;

pub const TABLE_NAME: &str = "post_like";
pub const TABLE_COL_POST: &str = "post_id";
pub const TABLE_COL_USER: &str = "user_id";
pub const INDEX_POST_USER: &str = "like_post_user_idx";

/// Durable record of one user liking one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl ViewFieldSelector for Like {
    fn get_select_query_fields() -> String {
        "record::id(id) AS id, post_id, user_id, created_at".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLike {
    pub post_id: i64,
    pub user_id: i64,
}
