//! Keeps a Markdown changelog of merged pull requests, grouped by date and
//! deployment environment:
//!
//! ```text
//! # Changelog
//!
//! ## 2024-05-01
//!
//! [staging]
//!
//! - [associated PR](https://github.com/owner/repo/pull/42)
//! - Fix login redirect
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod types;
pub mod updater;
pub mod utils;

pub use crate::config::ChangelogConfig;
pub use crate::document::{ChangelogDocument, DateSection, EnvironmentBlock};
pub use crate::error::ChangelogError;
pub use crate::formatter::{EntryFormatter, GitHubEntryFormatter};
pub use crate::types::{AddOutcome, EntryRequest, Placement, PrEntry, Result};
pub use crate::updater::Changelog;
pub use crate::utils::environment_label;

use chrono::NaiveDate;
use std::path::Path;

/// Adds a pull request entry to the changelog at `changelog_path` under today's date.
///
/// # Arguments
///
/// * `changelog_path` - Path to the CHANGELOG.md file
/// * `request` - Repository, PR number, PR title and bracketed environment label
/// * `config` - Formatting options and whether a missing file may be created
///
/// # Errors
///
/// Returns `FileMissing` when the file does not exist and may not be created,
/// `MissingTitle` when the file lacks the title line, and I/O errors
pub fn add_entry(
    changelog_path: &Path,
    request: &EntryRequest,
    config: ChangelogConfig,
) -> Result<AddOutcome> {
    Changelog::load(changelog_path, config)?.add_entry(request)
}

/// Same as [`add_entry`] with an explicit date instead of the local calendar date.
///
/// # Errors
///
/// See [`add_entry`]
pub fn add_entry_on(
    changelog_path: &Path,
    request: &EntryRequest,
    config: ChangelogConfig,
    date: NaiveDate,
) -> Result<AddOutcome> {
    Changelog::load(changelog_path, config)?.add_entry_on(request, date)
}
