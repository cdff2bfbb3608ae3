//! Error types for the growth driver.

use thiserror::Error;

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a mesh.
#[derive(Debug, Error)]
pub enum Error {
    /// The engine rejected a tick or a seed
    #[error("Mesh error: {0}")]
    Mesh(#[from] tessel_mesh::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// An audit found structural violations
    #[error("Audit failed: {count} invariant violations")]
    AuditFailed { count: usize },
}
