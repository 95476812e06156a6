//! Error types for Studiospace Core

use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ambiguous notation: {0}")]
    ParseAmbiguous(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Area not found: {0}")]
    AreaNotFound(String),

    #[error("Invalid studio area range: start {start}, end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid notation: {0}")]
    InvalidNotationState(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
