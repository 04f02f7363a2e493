//! Error types for manifest loading.

use std::path::PathBuf;

/// Errors that can occur while loading or building a route manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("Failed to read manifest '{path}': {source}")]
    Io {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or has the wrong shape.
    #[error("Failed to parse manifest '{path}': {source}")]
    Parse {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A route names a method the table does not know.
    #[error("Unknown method '{method}' for route '{path}'")]
    UnknownMethod {
        /// The method as written.
        method: String,
        /// The route's path template.
        path: String,
    },

    /// A route was declared with the MOUNT sentinel.
    #[error("Route '{0}' uses MOUNT; declare it under \"mounts\" instead")]
    MountInRoutes(String),
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
