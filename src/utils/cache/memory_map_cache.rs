use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::interfaces::map_cache::{MapCacheInterface, EMPTY_ROW};
use crate::middleware::error::AppResult;

/// Process local cache store for tests and single node setups.
#[derive(Debug, Default)]
pub struct MemoryMapCache {
    tables: DashMap<String, HashMap<String, String>>,
}

impl MemoryMapCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MapCacheInterface for MemoryMapCache {
    async fn create_table(&self, table: &str, map: HashMap<String, String>) -> AppResult<()> {
        if map.is_empty() {
            return Ok(());
        }
        self.tables
            .entry(table.to_string())
            .or_default()
            .extend(map);
        Ok(())
    }

    async fn get_table(&self, table: &str) -> AppResult<HashMap<String, String>> {
        Ok(self
            .tables
            .get(table)
            .map(|rows| rows.clone())
            .unwrap_or_default())
    }

    async fn get_row(&self, table: &str, row: &str) -> AppResult<String> {
        let value = self
            .tables
            .get(table)
            .and_then(|rows| rows.get(row).cloned())
            .filter(|v| !v.is_empty());
        Ok(value.unwrap_or_else(|| EMPTY_ROW.to_string()))
    }

    async fn set_row(&self, table: &str, row: &str, value: &str) -> AppResult<()> {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(row.to_string(), value.to_string());
        Ok(())
    }
}
