use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration file not found: {}", .0.display())]
    ConfigurationNotFound(PathBuf),
    #[error("Invalid configuration file {}: {source}", path.display())]
    InvalidConfiguration {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Missing payment data: {0}")]
    MissingPaymentData(&'static str),
    #[error("Missing callback parameter: {0}")]
    MissingParameter(String),
    #[error("Unknown payment gateway: {0}")]
    UnknownGateway(String),
    #[error("Operation '{operation}' is not supported by the {gateway} gateway")]
    Unsupported {
        gateway: &'static str,
        operation: &'static str,
    },
    #[error("Illegal {0} notification: signature check failed")]
    InvalidSignature(&'static str),
    #[error("{gateway} responded with status {status}: {body}")]
    VendorError {
        gateway: &'static str,
        status: u16,
        body: String,
    },
    #[error("Unexpected response from {gateway}: {message}")]
    UnexpectedResponse {
        gateway: &'static str,
        message: String,
    },
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
