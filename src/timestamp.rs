//! File timestamp resolution.
//!
//! The modification time is the only timestamp used for bucketing. It is
//! available on every platform, unlike creation time.

use crate::error::{OrganizeError, OrganizeResult};
use chrono::{DateTime, Local, NaiveDateTime};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Returns the file's modification time as a local civil date and time.
///
/// Symlinks are followed, so a dangling link fails with
/// [`OrganizeError::MetadataUnavailable`].
pub fn resolve_timestamp(path: &Path) -> OrganizeResult<NaiveDateTime> {
    let unavailable = |source| OrganizeError::MetadataUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(unavailable)?;
    let modified = metadata.modified().map_err(unavailable)?;
    let local: DateTime<Local> = modified.into();

    debug!(path = %path.display(), mtime = %local, "Resolved modification time");
    Ok(local.naive_local())
}

/// Formats the `YYYYMMDD` folder name for a timestamp.
pub fn date_segment(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y%m%d").to_string()
}

/// Formats the `HHMMSS` prefix used to disambiguate colliding names.
pub fn time_prefix(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%H%M%S").to_string()
}
