use crate::domain::employee::EmployeeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("Could not find Employee with id={0}")]
    NotFound(EmployeeId),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Notification dispatch failed: {0}")]
    DispatchFailure(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, PayrollError>;
