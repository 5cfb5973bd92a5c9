use thiserror::Error;

use crate::domain::category::{MainCategory, SubCategory};

/// Error type that captures construction and persistence failures.
///
/// Store lookups never surface here: a missing transaction id is an
/// ordinary `None`, not an error.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("{main} does not allow subcategory {sub}")]
    InvalidCategory {
        main: MainCategory,
        sub: SubCategory,
    },
}
