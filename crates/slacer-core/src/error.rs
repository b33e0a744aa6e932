//! Error handling for SLAcer
//!
//! Provides error types for all layers of the application:
//! - Store errors (path-addressed settings tree)
//! - Unit errors (measurement parsing and conversion)
//! - Load errors (mesh acquisition, parsing, and installation)
//!
//! Store and unit errors are programmer errors and are propagated as-is.
//! Load errors are expected at runtime and are recovered at the pipeline boundary.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Settings store error type
///
/// Raised by path lookups and writes against the nested settings tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A path segment does not exist
    #[error("Setting not found: {path}")]
    NotFound {
        /// The full path that was looked up.
        path: String,
    },

    /// An intermediate segment holds a scalar where a mapping is required
    #[error("Type conflict at '{segment}' while writing {path}: not a mapping")]
    TypeConflict {
        /// The full path that was written.
        path: String,
        /// The segment holding the scalar.
        segment: String,
    },

    /// The path is empty or contains an empty segment
    #[error("Invalid setting path: '{path}'")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },
}

/// Unit conversion error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// Input could not be read as a finite number
    #[error("Invalid number: '{input}'")]
    InvalidNumber {
        /// The rejected input text.
        input: String,
    },

    /// Unit label is not one of the supported units
    #[error("Unknown unit: '{unit}'")]
    UnknownUnit {
        /// The rejected unit label.
        unit: String,
    },
}

/// Mesh load error type
///
/// Represents the recoverable failures of the load pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Raw bytes could not be acquired from the source
    #[error("Failed to acquire {source_name}: {reason}")]
    AcquisitionFailed {
        /// Human-readable name of the source (file name or URL).
        source_name: String,
        /// The reason acquisition failed.
        reason: String,
    },

    /// Bytes were received but are not a usable mesh
    #[error("Failed to parse mesh: {reason}")]
    ParseFailed {
        /// The reason parsing failed.
        reason: String,
    },

    /// The viewer or slicer rejected the new mesh
    #[error("Failed to install mesh: {reason}")]
    InstallFailed {
        /// The reason installation failed.
        reason: String,
    },
}

/// Main error type for SLAcer
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Settings store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Unit conversion error
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Mesh load error
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a mesh load error
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load(_))
    }

    /// Check if this is a settings store error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Load errors are runtime conditions; everything else is a caller bug.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Load(_) | Error::Io(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound {
            path: "resin.color".to_string(),
        };
        assert_eq!(err.to_string(), "Setting not found: resin.color");

        let err = StoreError::TypeConflict {
            path: "resin.price.amount".to_string(),
            segment: "price".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type conflict at 'price' while writing resin.price.amount: not a mapping"
        );
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::AcquisitionFailed {
            source_name: "stl/Octocat-v2.stl".to_string(),
            reason: "HTTP 404".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to acquire stl/Octocat-v2.stl: HTTP 404"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = StoreError::InvalidPath {
            path: String::new(),
        }
        .into();
        assert!(err.is_store_error());
        assert!(!err.is_recoverable());

        let err: Error = LoadError::ParseFailed {
            reason: "truncated".to_string(),
        }
        .into();
        assert!(err.is_load_error());
        assert!(err.is_recoverable());

        let err: Error = UnitError::InvalidNumber {
            input: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Unit(_)));
    }
}
