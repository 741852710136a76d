use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub order_by: Option<String>,
    pub order_dir: Option<QryOrder>,
    pub count: u16,
    pub start: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            order_by: None,
            order_dir: None,
            count: 20,
            start: 0,
        }
    }
}

impl Pagination {
    pub fn to_query_str(&self) -> String {
        let order_by = self.order_by.as_deref().unwrap_or("id");
        let order_dir = self.order_dir.as_ref().unwrap_or(&QryOrder::DESC);
        let count = if self.count == 0 { 20 } else { self.count };
        format!(
            "ORDER BY {order_by} {order_dir} LIMIT {count} START {}",
            self.start
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QryOrder {
    DESC,
    ASC,
}

impl fmt::Display for QryOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QryOrder::DESC => write!(f, "DESC"),
            QryOrder::ASC => write!(f, "ASC"),
        }
    }
}

pub trait ViewFieldSelector {
    // select query fields to fill the View object
    fn get_select_query_fields() -> String;
}
