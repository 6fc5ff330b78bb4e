//! Error types for attribute mapping operations.

use thiserror::Error;

/// Errors that can occur while resolving or reading an attribute.
#[derive(Debug, Error)]
pub enum AttrMapError {
    /// The canonical key does not correspond to an existing file.
    ///
    /// Raised regardless of how the filesystem reported the missing path,
    /// and never suppressed by the read options.
    #[error("attribute not found: {key}")]
    NotFound {
        /// The canonical key that was looked up.
        key: String,
    },

    /// Reading the attribute file failed for a reason other than absence
    /// (permission denied, is-a-directory, I/O error).
    #[error("failed to read attribute {key}: {source}")]
    Read {
        /// The canonical key that was being read.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A raw key could not be normalized into a canonical key.
    #[error("invalid attribute key: {key}")]
    InvalidKey {
        /// Display form of the rejected key.
        key: String,
    },
}

impl AttrMapError {
    /// Create a `Read` error from an I/O error, collapsing "no such file"
    /// into `NotFound`.
    ///
    /// # Arguments
    /// * `key` - Canonical key being read
    /// * `err` - The underlying I/O error
    pub fn from_io(key: impl Into<String>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            AttrMapError::NotFound { key: key.into() }
        } else {
            AttrMapError::Read {
                key: key.into(),
                source: err,
            }
        }
    }

    /// Check whether this error is the not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AttrMapError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_from_io_maps_enoent_to_not_found() {
        let err: AttrMapError =
            AttrMapError::from_io("vendor", Error::new(ErrorKind::NotFound, "no such file"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_keeps_other_errors_as_read() {
        let err: AttrMapError = AttrMapError::from_io(
            "vendor",
            Error::new(ErrorKind::PermissionDenied, "permission denied"),
        );
        assert!(!err.is_not_found());
        assert!(matches!(err, AttrMapError::Read { .. }));
    }

    #[test]
    fn test_display_includes_key() {
        let err: AttrMapError = AttrMapError::NotFound {
            key: "board_serial".to_string(),
        };
        assert_eq!(err.to_string(), "attribute not found: board_serial");
    }
}
