/// Media organization: destination resolution and file relocation.
///
/// For each regular file in a directory the organizer runs a fixed pipeline:
/// filter, classify, resolve the modification time, build the
/// `[category/]YYYYMMDD` directory, sanitize the name, avoid collisions and
/// move. Each file is independent; a failure is recorded and the pass
/// continues with the next file.
use crate::config::{CollisionPolicy, CompiledFilters, Config, ConfigError, OrganizeOptions};
use crate::error::{OrganizeError, OrganizeResult};
use crate::file_category::{MediaCategory, MediaTable};
use crate::sanitize::sanitize_filename;
use crate::timestamp::{date_segment, resolve_timestamp, time_prefix};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Highest numeric suffix tried by [`CollisionPolicy::TimePrefixThenCounter`].
const MAX_COUNTER: u32 = 9999;

/// One regular file found in the directory snapshot.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// File name, lossily converted for display and sanitizing.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

/// A file that was moved, or would be moved in a dry run.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    pub original_name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Destination relative to the organized directory.
    pub relative_destination: PathBuf,
    pub category: MediaCategory,
    /// True if the name got a `HHMMSS_` prefix (or counter) to avoid a clash.
    pub renamed_on_collision: bool,
}

/// Why a file was left where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension is not in the media table.
    NotMedia,
    /// Hidden file or matched an exclude rule.
    Filtered,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotMedia => write!(f, "not a picture or video"),
            SkipReason::Filtered => write!(f, "excluded by filters"),
        }
    }
}

/// Result of processing a single file.
#[derive(Debug)]
pub enum FileOutcome {
    Moved(MoveRecord),
    /// Dry run: the move that would have happened.
    Planned(MoveRecord),
    Skipped {
        path: PathBuf,
        reason: SkipReason,
    },
    Failed {
        path: PathBuf,
        error: OrganizeError,
    },
}

/// Everything that happened during one pass, in processing order.
#[derive(Debug)]
pub struct RunReport {
    pub base_path: PathBuf,
    pub dry_run: bool,
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    fn new(base_path: PathBuf, dry_run: bool) -> Self {
        Self {
            base_path,
            dry_run,
            outcomes: Vec::new(),
        }
    }

    /// Files moved (or planned, in a dry run).
    pub fn records(&self) -> impl Iterator<Item = &MoveRecord> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Moved(record) | FileOutcome::Planned(record) => Some(record),
            _ => None,
        })
    }

    pub fn moved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Moved(_)))
            .count()
    }

    pub fn planned_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Planned(_)))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &OrganizeError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Failed { path, error } => Some((path.as_path(), error)),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Moved (or planned) files per category directory name.
    pub fn category_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records() {
            *counts.entry(record.category.dir_name()).or_insert(0) += 1;
        }
        counts
    }
}

/// Returns true if anything, including a dangling symlink, exists at `path`.
pub fn path_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Computes `base[/category]/YYYYMMDD` without touching the filesystem.
pub fn destination_dir(
    base: &Path,
    category: Option<MediaCategory>,
    timestamp: &NaiveDateTime,
) -> PathBuf {
    let mut dir = base.to_path_buf();
    if let Some(category) = category {
        dir.push(category.dir_name());
    }
    dir.push(date_segment(timestamp));
    dir
}

/// Creates `base[/category]/YYYYMMDD` as needed and returns it.
///
/// Existing directories are reused, so calling this for every file of the
/// same day is fine. Anything else in the way (a regular file named
/// `pictures`, say) is a [`OrganizeError::DirectoryCreate`].
pub fn build_destination_dir(
    base: &Path,
    category: Option<MediaCategory>,
    timestamp: &NaiveDateTime,
) -> OrganizeResult<PathBuf> {
    let mut dir = base.to_path_buf();
    if let Some(category) = category {
        dir.push(category.dir_name());
        ensure_dir(&dir)?;
    }
    dir.push(date_segment(timestamp));
    ensure_dir(&dir)?;
    Ok(dir)
}

fn ensure_dir(path: &Path) -> OrganizeResult<()> {
    match fs::create_dir(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Created directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(OrganizeError::DirectoryCreate {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Picks the final file name inside `dest_dir`.
///
/// Returns `desired` when it is free, otherwise `HHMMSS_desired`. With
/// [`CollisionPolicy::TimePrefix`] the prefixed name is returned even if it
/// is also taken; [`move_file`] then refuses to overwrite it.
pub fn resolve_collision(
    dest_dir: &Path,
    desired: &OsStr,
    timestamp: &NaiveDateTime,
    policy: CollisionPolicy,
) -> OrganizeResult<OsString> {
    resolve_collision_with(dest_dir, desired, timestamp, policy, path_occupied)
}

fn resolve_collision_with(
    dest_dir: &Path,
    desired: &OsStr,
    timestamp: &NaiveDateTime,
    policy: CollisionPolicy,
    is_taken: impl Fn(&Path) -> bool,
) -> OrganizeResult<OsString> {
    if !is_taken(&dest_dir.join(desired)) {
        return Ok(desired.to_os_string());
    }

    let mut prefixed = OsString::from(format!("{}_", time_prefix(timestamp)));
    prefixed.push(desired);

    match policy {
        CollisionPolicy::TimePrefix => Ok(prefixed),
        CollisionPolicy::TimePrefixThenCounter => {
            if !is_taken(&dest_dir.join(&prefixed)) {
                return Ok(prefixed);
            }
            let prefixed_path = Path::new(&prefixed);
            let stem = prefixed_path.file_stem().unwrap_or(&prefixed);
            let extension = prefixed_path.extension();

            for n in 2..=MAX_COUNTER {
                let mut candidate = stem.to_os_string();
                candidate.push(format!("_{}", n));
                if let Some(ext) = extension {
                    candidate.push(".");
                    candidate.push(ext);
                }
                if !is_taken(&dest_dir.join(&candidate)) {
                    return Ok(candidate);
                }
            }

            Err(OrganizeError::CollisionUnresolved {
                dir: dest_dir.to_path_buf(),
                name: desired.to_string_lossy().into_owned(),
            })
        }
    }
}

/// Moves `source` to `destination`.
///
/// Never overwrites: an occupied destination fails with `AlreadyExists`.
/// A plain rename is used when possible; across filesystems the file is
/// copied to a staging name next to the destination, checked, renamed into
/// place, and only then removed from its source.
pub fn move_file(source: &Path, destination: &Path) -> OrganizeResult<()> {
    let move_error = |source_error: io::Error| OrganizeError::Move {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: source_error,
    };

    if path_occupied(destination) {
        return Err(move_error(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(
                source = %source.display(),
                destination = %destination.display(),
                "Rename crosses filesystems, copying instead"
            );
            copy_then_remove(source, destination).map_err(move_error)
        }
        Err(e) => Err(move_error(e)),
    }
}

/// Copy-verify-delete move. Leaves the file in exactly one place on any error.
pub(crate) fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    let staging = staging_path(destination)?;

    if let Err(e) = copy_verified(source, &staging) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }

    if let Err(e) = fs::rename(&staging, destination) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }

    if let Err(e) = fs::remove_file(source) {
        // Roll back so the file is not left in two places.
        let _ = fs::remove_file(destination);
        return Err(e);
    }

    Ok(())
}

fn copy_verified(source: &Path, staging: &Path) -> io::Result<()> {
    let source_meta = fs::metadata(source)?;
    let copied = fs::copy(source, staging)?;
    if copied != source_meta.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "copied {} of {} bytes",
                copied,
                source_meta.len()
            ),
        ));
    }

    let mtime = filetime::FileTime::from_last_modification_time(&source_meta);
    filetime::set_file_mtime(staging, mtime)?;
    File::open(staging)?.sync_all()?;

    if fs::metadata(staging)?.len() != source_meta.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "staged copy has the wrong size",
        ));
    }
    Ok(())
}

fn staging_path(destination: &Path) -> io::Result<PathBuf> {
    let name = destination.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name")
    })?;
    let mut staged = OsString::from(".");
    staged.push(name);
    staged.push(".mediatidy-part");
    Ok(destination.with_file_name(staged))
}

/// Takes a one-level snapshot of the regular files in `base`, sorted by name.
pub fn collect_entries(base: &Path) -> OrganizeResult<Vec<FileEntry>> {
    let read_error = |source| OrganizeError::ReadDir {
        path: base.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(base).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let path = entry.path();
        if is_candidate_file(&path, entry.file_type()) {
            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
            });
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// Whether a directory entry belongs in the snapshot.
///
/// When the entry type cannot be read it is looked up again without
/// following links. If that fails too the entry is kept, so the pass
/// reports it as failed instead of dropping it.
fn is_candidate_file(path: &Path, file_type: io::Result<fs::FileType>) -> bool {
    match file_type {
        Ok(file_type) => file_type.is_file(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read entry type");
            fs::symlink_metadata(path)
                .map(|meta| meta.is_file())
                .unwrap_or(true)
        }
    }
}

/// Organizes the media files of one directory.
///
/// # Examples
///
/// ```no_run
/// use mediatidy::config::Config;
/// use mediatidy::file_organizer::Organizer;
/// use std::path::Path;
///
/// let organizer = Organizer::new(&Config::default()).expect("valid config");
/// let report = organizer.run(Path::new("/path/to/camera-import")).expect("readable directory");
/// println!("{} moved, {} failed", report.moved_count(), report.failed_count());
/// ```
#[derive(Debug, Clone)]
pub struct Organizer {
    options: OrganizeOptions,
    table: MediaTable,
    filters: CompiledFilters,
    dry_run: bool,
}

impl Organizer {
    /// Builds an organizer from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a filter pattern does not compile.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            options: config.organize.clone(),
            table: config.media.build_table(),
            filters: config.filters.compile()?,
            dry_run: false,
        })
    }

    /// In dry-run mode nothing is created or moved; outcomes are `Planned`.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Organizes `base` and returns what happened to each file.
    ///
    /// Only failing to list `base` is an error; per-file problems end up in
    /// the report.
    pub fn run(&self, base: &Path) -> OrganizeResult<RunReport> {
        self.run_with(base, |_| {})
    }

    /// Like [`Organizer::run`], calling `on_outcome` as each file finishes.
    pub fn run_with<F>(&self, base: &Path, on_outcome: F) -> OrganizeResult<RunReport>
    where
        F: FnMut(&FileOutcome),
    {
        let entries = collect_entries(base)?;
        Ok(self.run_entries(base, &entries, on_outcome))
    }

    /// Processes an existing snapshot from [`collect_entries`], in order.
    pub fn run_entries<F>(&self, base: &Path, entries: &[FileEntry], mut on_outcome: F) -> RunReport
    where
        F: FnMut(&FileOutcome),
    {
        debug!(base = %base.display(), files = entries.len(), dry_run = self.dry_run, "Organizing");

        let mut report = RunReport::new(base.to_path_buf(), self.dry_run);
        let mut planned = HashSet::new();

        for entry in entries {
            let outcome = self.process_entry(base, entry, &mut planned);
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        report
    }

    fn process_entry(
        &self,
        base: &Path,
        entry: &FileEntry,
        planned: &mut HashSet<PathBuf>,
    ) -> FileOutcome {
        if !self.filters.should_include(&entry.name) {
            debug!(file = %entry.name, "Excluded by filters");
            return FileOutcome::Skipped {
                path: entry.path.clone(),
                reason: SkipReason::Filtered,
            };
        }

        let Some(category) = self.table.classify_path(&entry.path) else {
            debug!(file = %entry.name, "Not media");
            return FileOutcome::Skipped {
                path: entry.path.clone(),
                reason: SkipReason::NotMedia,
            };
        };

        match self.place(base, entry, category, planned) {
            Ok(record) if self.dry_run => FileOutcome::Planned(record),
            Ok(record) => {
                info!(
                    file = %record.original_name,
                    destination = %record.destination.display(),
                    "Moved"
                );
                FileOutcome::Moved(record)
            }
            Err(error) => {
                warn!(file = %entry.name, %error, "Skipping file");
                FileOutcome::Failed {
                    path: entry.path.clone(),
                    error,
                }
            }
        }
    }

    fn place(
        &self,
        base: &Path,
        entry: &FileEntry,
        category: MediaCategory,
        planned: &mut HashSet<PathBuf>,
    ) -> OrganizeResult<MoveRecord> {
        let timestamp = resolve_timestamp(&entry.path)?;
        let segment = self.options.use_category_subfolders.then_some(category);

        let dest_dir = if self.dry_run {
            destination_dir(base, segment, &timestamp)
        } else {
            build_destination_dir(base, segment, &timestamp)?
        };

        let desired = self.target_name(entry);
        let policy = self.options.collision_policy;
        let final_name = if self.dry_run {
            resolve_collision_with(&dest_dir, &desired, &timestamp, policy, |p| {
                planned.contains(p) || path_occupied(p)
            })?
        } else {
            resolve_collision(&dest_dir, &desired, &timestamp, policy)?
        };

        let destination = dest_dir.join(&final_name);
        if self.dry_run {
            planned.insert(destination.clone());
        } else {
            move_file(&entry.path, &destination)?;
        }

        let relative_destination = destination
            .strip_prefix(base)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| destination.clone());

        Ok(MoveRecord {
            original_name: entry.name.clone(),
            source: entry.path.clone(),
            destination,
            relative_destination,
            category,
            renamed_on_collision: final_name != desired,
        })
    }

    fn target_name(&self, entry: &FileEntry) -> OsString {
        if self.options.sanitize_filenames {
            OsString::from(sanitize_filename(&entry.name))
        } else {
            entry
                .path
                .file_name()
                .map(OsStr::to_os_string)
                .unwrap_or_else(|| OsString::from(&entry.name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn unreadable_type() -> io::Result<fs::FileType> {
        Err(io::Error::other("entry type unavailable"))
    }

    #[test]
    fn test_unreadable_entry_type_falls_back_to_lstat() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.jpg");
        fs::write(&file, b"x").unwrap();
        let dir = temp_dir.path().join("b.jpg");
        fs::create_dir(&dir).unwrap();

        assert!(is_candidate_file(&file, unreadable_type()));
        assert!(!is_candidate_file(&dir, unreadable_type()));
    }

    #[test]
    fn test_unstatable_entry_is_kept_and_fails_in_pass() {
        let temp_dir = TempDir::new().unwrap();
        let gone = temp_dir.path().join("gone.jpg");
        assert!(is_candidate_file(&gone, unreadable_type()));

        let entries = vec![FileEntry {
            name: "gone.jpg".to_string(),
            path: gone,
        }];
        let organizer = Organizer::new(&Config::default()).unwrap();
        let report = organizer.run_entries(temp_dir.path(), &entries, |_| {});

        assert_eq!(report.failed_count(), 1);
        assert!(matches!(
            report.outcomes[0],
            FileOutcome::Failed {
                error: OrganizeError::MetadataUnavailable { .. },
                ..
            }
        ));
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_destination_dir_layouts() {
        let base = Path::new("/media/import");
        assert_eq!(
            destination_dir(base, Some(MediaCategory::Video), &at(8, 0, 0)),
            PathBuf::from("/media/import/videos/20250609")
        );
        assert_eq!(
            destination_dir(base, None, &at(8, 0, 0)),
            PathBuf::from("/media/import/20250609")
        );
    }

    #[test]
    fn test_build_destination_dir_creates_and_reuses() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();

        let first = build_destination_dir(base, Some(MediaCategory::Picture), &at(9, 0, 0))
            .expect("Failed to build directory");
        assert_eq!(first, base.join("pictures").join("20250609"));
        assert!(first.is_dir());

        let second = build_destination_dir(base, Some(MediaCategory::Picture), &at(18, 0, 0))
            .expect("Second call should reuse the directory");
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_destination_dir_flat() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = build_destination_dir(temp_dir.path(), None, &at(9, 0, 0)).unwrap();
        assert_eq!(dir, temp_dir.path().join("20250609"));
        assert!(!temp_dir.path().join("pictures").exists());
    }

    #[test]
    fn test_build_destination_dir_blocked_by_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("videos"), b"not a dir").unwrap();

        let result = build_destination_dir(temp_dir.path(), Some(MediaCategory::Video), &at(9, 0, 0));
        assert!(matches!(result, Err(OrganizeError::DirectoryCreate { .. })));
    }

    #[test]
    fn test_resolve_collision_free_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let name = resolve_collision(
            temp_dir.path(),
            OsStr::new("a.jpg"),
            &at(14, 35, 38),
            CollisionPolicy::TimePrefix,
        )
        .unwrap();
        assert_eq!(name, OsString::from("a.jpg"));
    }

    #[test]
    fn test_resolve_collision_time_prefix() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.jpg"), b"x").unwrap();

        let name = resolve_collision(
            temp_dir.path(),
            OsStr::new("a.jpg"),
            &at(14, 35, 38),
            CollisionPolicy::TimePrefix,
        )
        .unwrap();
        assert_eq!(name, OsString::from("143538_a.jpg"));
    }

    #[test]
    fn test_resolve_collision_single_attempt() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(temp_dir.path().join("143538_a.jpg"), b"y").unwrap();

        let name = resolve_collision(
            temp_dir.path(),
            OsStr::new("a.jpg"),
            &at(14, 35, 38),
            CollisionPolicy::TimePrefix,
        )
        .unwrap();
        assert_eq!(name, OsString::from("143538_a.jpg"));
    }

    #[test]
    fn test_resolve_collision_counter_policy() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(temp_dir.path().join("143538_a.jpg"), b"y").unwrap();
        fs::write(temp_dir.path().join("143538_a_2.jpg"), b"z").unwrap();

        let name = resolve_collision(
            temp_dir.path(),
            OsStr::new("a.jpg"),
            &at(14, 35, 38),
            CollisionPolicy::TimePrefixThenCounter,
        )
        .unwrap();
        assert_eq!(name, OsString::from("143538_a_3.jpg"));
    }

    #[test]
    fn test_resolve_collision_counter_exhausted() {
        let result = resolve_collision_with(
            Path::new("/anywhere"),
            OsStr::new("a.jpg"),
            &at(1, 2, 3),
            CollisionPolicy::TimePrefixThenCounter,
            |_| true,
        );
        assert!(matches!(
            result,
            Err(OrganizeError::CollisionUnresolved { .. })
        ));
    }

    #[test]
    fn test_move_file_renames() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.png");
        let destination = temp_dir.path().join("b.png");
        fs::write(&source, b"pixels").unwrap();

        move_file(&source, &destination).expect("Failed to move file");

        assert!(!source.exists());
        assert_eq!(fs::read(&destination).unwrap(), b"pixels");
    }

    #[test]
    fn test_move_file_refuses_overwrite() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.png");
        let destination = temp_dir.path().join("b.png");
        fs::write(&source, b"new").unwrap();
        fs::write(&destination, b"old").unwrap();

        let result = move_file(&source, &destination);
        match result {
            Err(OrganizeError::Move { source: e, .. }) => {
                assert_eq!(e.kind(), io::ErrorKind::AlreadyExists)
            }
            other => panic!("expected move error, got {:?}", other),
        }
        assert_eq!(fs::read(&source).unwrap(), b"new");
        assert_eq!(fs::read(&destination).unwrap(), b"old");
    }

    #[test]
    fn test_move_file_missing_parent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("a.png");
        fs::write(&source, b"x").unwrap();

        let result = move_file(&source, &temp_dir.path().join("nope").join("a.png"));
        assert!(matches!(result, Err(OrganizeError::Move { .. })));
        assert!(source.exists());
    }

    #[test]
    fn test_copy_then_remove_keeps_content_and_mtime() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("clip.mp4");
        let dest_dir = temp_dir.path().join("videos");
        fs::create_dir(&dest_dir).unwrap();
        let destination = dest_dir.join("clip.mp4");

        fs::write(&source, vec![7u8; 64 * 1024]).unwrap();
        let mtime = filetime::FileTime::from_unix_time(1_700_000_000, 0);
        filetime::set_file_mtime(&source, mtime).unwrap();

        copy_then_remove(&source, &destination).expect("Fallback move failed");

        assert!(!source.exists());
        assert_eq!(fs::read(&destination).unwrap(), vec![7u8; 64 * 1024]);
        let moved_meta = fs::metadata(&destination).unwrap();
        assert_eq!(
            filetime::FileTime::from_last_modification_time(&moved_meta),
            mtime
        );
        assert!(!dest_dir.join(".clip.mp4.mediatidy-part").exists());
    }

    #[test]
    fn test_copy_then_remove_missing_source_leaves_no_staging() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let destination = temp_dir.path().join("out.mp4");

        let result = copy_then_remove(&temp_dir.path().join("gone.mp4"), &destination);
        assert!(result.is_err());
        assert!(!destination.exists());
        assert!(!temp_dir.path().join(".out.mp4.mediatidy-part").exists());
    }

    #[test]
    fn test_collect_entries_only_regular_files_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("b.jpg"), b"x").unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"x").unwrap();
        fs::create_dir(temp_dir.path().join("pictures")).unwrap();

        let entries = collect_entries(temp_dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.jpg"]);
    }

    #[test]
    fn test_collect_entries_missing_dir() {
        let result = collect_entries(Path::new("/non/existent/path"));
        assert!(matches!(result, Err(OrganizeError::ReadDir { .. })));
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NotMedia.to_string(), "not a picture or video");
        assert_eq!(SkipReason::Filtered.to_string(), "excluded by filters");
    }
}
