//! Errors raised while loading content

use std::path::PathBuf;
use thiserror::Error;

use super::Category;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content storage unavailable at {path:?}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No {category} entry named '{slug}'")]
    NotFound { category: Category, slug: String },

    #[error("Malformed record {path:?}: {reason}")]
    MalformedRecord { path: PathBuf, reason: String },
}

impl ContentError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ContentError::MalformedRecord {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Map a failed read of a single content file.
    ///
    /// Undecodable bytes make the record malformed; anything else means the
    /// storage itself could not be read.
    pub(crate) fn from_read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::InvalidData {
            ContentError::MalformedRecord {
                path,
                reason: err.to_string(),
            }
        } else {
            ContentError::StorageUnavailable { path, source: err }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
