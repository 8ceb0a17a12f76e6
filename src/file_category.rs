/// Media classification by file extension.
///
/// This module maps file extensions to the two media categories the
/// organizer knows about. Only the extension is consulted; file contents
/// are never read.
///
/// # Examples
///
/// ```
/// use mediatidy::file_category::{MediaCategory, MediaTable};
///
/// let table = MediaTable::default();
/// assert_eq!(table.classify(".JPG"), Some(MediaCategory::Picture));
/// assert_eq!(table.classify("mov"), Some(MediaCategory::Video));
/// assert_eq!(table.classify(".txt"), None);
/// ```
use std::collections::HashMap;
use std::path::Path;

/// A media category. Files outside these categories are never moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    /// Still images (JPG, PNG, HEIC, ...)
    Picture,
    /// Video files (MP4, MOV, MKV, ...)
    Video,
}

impl MediaCategory {
    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatidy::file_category::MediaCategory;
    ///
    /// assert_eq!(MediaCategory::Picture.dir_name(), "pictures");
    /// assert_eq!(MediaCategory::Video.dir_name(), "videos");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            MediaCategory::Picture => "pictures",
            MediaCategory::Video => "videos",
        }
    }
}

const DEFAULT_PICTURE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".heic"];
const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".avi", ".mkv", ".webm"];

/// Maps lowercase extensions (with leading dot) to media categories.
///
/// The table is filled once when the organizer is built and only read
/// afterwards.
#[derive(Debug, Clone)]
pub struct MediaTable {
    extension_map: HashMap<String, MediaCategory>,
}

impl MediaTable {
    /// Creates a table with the standard picture and video extensions.
    pub fn new() -> Self {
        let mut table = Self {
            extension_map: HashMap::new(),
        };
        for ext in DEFAULT_PICTURE_EXTENSIONS {
            table.add_extension(ext, MediaCategory::Picture);
        }
        for ext in DEFAULT_VIDEO_EXTENSIONS {
            table.add_extension(ext, MediaCategory::Video);
        }
        table
    }

    /// Adds (or overrides) an extension mapping. A missing leading dot is added.
    pub fn add_extension(&mut self, ext: &str, category: MediaCategory) {
        self.extension_map.insert(normalize_key(ext), category);
    }

    /// Looks up an extension, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediatidy::file_category::{MediaCategory, MediaTable};
    ///
    /// let table = MediaTable::default();
    /// assert_eq!(table.classify(".HeIc"), Some(MediaCategory::Picture));
    /// assert_eq!(table.classify(""), None);
    /// ```
    pub fn classify(&self, ext: &str) -> Option<MediaCategory> {
        if ext.is_empty() || ext == "." {
            return None;
        }
        self.extension_map.get(&normalize_key(ext)).copied()
    }

    /// Classifies a path by its final extension.
    ///
    /// Dot-files such as `.jpg` have no extension and are not media.
    pub fn classify_path(&self, path: &Path) -> Option<MediaCategory> {
        let ext = path.extension()?.to_str()?;
        self.classify(ext)
    }

    /// Number of known extensions.
    pub fn len(&self) -> usize {
        self.extension_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extension_map.is_empty()
    }
}

impl Default for MediaTable {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_key(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}
