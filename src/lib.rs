//! mediatidy - sort photos and videos into date folders
//!
//! This library classifies the files of one directory by extension, reads
//! their modification dates, and moves pictures and videos into
//! `pictures/YYYYMMDD/` and `videos/YYYYMMDD/` folders, optionally renaming
//! them to lowercase ASCII snake case.

pub mod cli;
pub mod config;
pub mod error;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod sanitize;
pub mod timestamp;

pub use config::{CollisionPolicy, CompiledFilters, Config, ConfigError};
pub use error::{OrganizeError, OrganizeResult};
pub use file_category::{MediaCategory, MediaTable};
pub use file_organizer::{FileOutcome, MoveRecord, Organizer, RunReport, SkipReason};
pub use sanitize::sanitize_filename;

pub use cli::{Cli, organize_directory, run_cli, validate_directory};
