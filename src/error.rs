//! Error types for media organization.
//!
//! Every variant except [`OrganizeError::InvalidBasePath`] and
//! [`OrganizeError::ReadDir`] describes a failure of a single file; the
//! organizer records it and moves on to the next entry.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Errors that can occur while organizing a directory.
#[derive(Error, Debug)]
pub enum OrganizeError {
    /// The file could not be stat'ed (permission denied, dangling symlink, ...).
    #[error("Cannot read metadata of {}: {source}", path.display())]
    MetadataUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A category or date directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file could not be relocated.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Every candidate name in the destination directory was taken.
    #[error("No free name for {name} in {}", dir.display())]
    CollisionUnresolved { dir: PathBuf, name: String },

    /// The directory to organize is missing or is not a directory.
    #[error("Invalid directory {}: {reason}", path.display())]
    InvalidBasePath { path: PathBuf, reason: String },

    /// The directory to organize could not be listed.
    #[error("Error reading directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl OrganizeError {
    /// Short label used in summaries.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::MetadataUnavailable { .. } => "metadata unavailable",
            Self::DirectoryCreate { .. } => "directory create error",
            Self::Move { .. } => "move error",
            Self::CollisionUnresolved { .. } => "name collision",
            Self::InvalidBasePath { .. } => "invalid directory",
            Self::ReadDir { .. } => "read error",
        }
    }
}
