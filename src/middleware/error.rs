use std::fmt;

use serde::{Deserialize, Serialize};

use crate::database::surrdb_utils::{is_field_violation, is_unique_violation};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    EntityFailIdNotFound { ident: String },
    StoreUnavailable { store: String, source: String },
    ConstraintViolation { source: String },
    ValidationFail { source: String },
    Serde { source: String },
    SurrealDb { source: String },
    SurrealDbNoResult { source: String, id: String },
}

/// Any error raised below the request-handling layer.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl AppError {
    /// Store failures are safe for the caller to retry as a whole.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::StoreUnavailable { .. } | AppError::SurrealDb { .. }
        )
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::EntityFailIdNotFound { ident: id } => write!(f, "Record id= {id} not found"),
            Self::StoreUnavailable { store, .. } => {
                write!(f, "{store} store unavailable, try again later")
            }
            Self::ConstraintViolation { .. } => write!(f, "Record already exists"),
            Self::ValidationFail { source } => write!(f, "Invalid record - {source}"),
            Self::Serde { source } => write!(f, "Serde error - {source}"),
            Self::SurrealDb { .. } => write!(f, "{INTERNAL}"),
            Self::SurrealDbNoResult { id, .. } => write!(f, "No result for id {id}"),
        }
    }
}

// External Errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        if is_unique_violation(&value) {
            return Self::ConstraintViolation {
                source: value.to_string(),
            };
        }
        if is_field_violation(&value) {
            return Self::ValidationFail {
                source: value.to_string(),
            };
        }
        Self::SurrealDb {
            source: value.to_string(),
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(value: redis::RedisError) -> Self {
        Self::StoreUnavailable {
            store: "cache".to_string(),
            source: value.to_string(),
        }
    }
}
