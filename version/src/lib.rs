//! Build version computation for CI runs.
//!
//! Versions follow a git-flow layout: tags on the main branch are releases,
//! `release/x.y.z` branches build betas, and every other branch builds a
//! pre-release of the next minor (or, for hotfixes, the next patch) version.

pub mod build_ref;
pub mod dotnet;
pub mod error;
pub mod info;

pub use build_ref::BuildRef;
pub use error::{Result, ResultExt, VersionError};
pub use info::VersionInfo;
// Re-export semver for users of this library
pub use semver::Version as SemverVersion;

use once_cell::sync::Lazy;
use regex::Regex;

static MAJOR_MINOR_PATCH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+$").expect("Failed to compile version regex")
});

const UNKNOWN_VERSION: SemverVersion = SemverVersion::new(0, 0, 0);

/// Tag lookups against the repository being built
pub trait TagSource {
    /// The tag pointing exactly at the tip of `origin/<main_branch>`, if any
    ///
    /// # Errors
    /// Returns an error if the repository cannot be queried
    fn main_tag(&self, main_branch: &str) -> Result<Option<String>>;

    /// Whether `origin/<main_branch>` contains the commit `tag` points at
    ///
    /// # Errors
    /// Returns an error if the repository cannot be queried or the tag does not exist
    fn is_tag_on_branch(&self, tag: &str, main_branch: &str) -> Result<bool>;
}

/// What the CI run is building
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub main_branch: String,
    /// Full git ref, e.g. `refs/heads/develop`
    pub git_ref: String,
    pub run_number: String,
    pub sha: String,
}

impl BuildContext {
    pub fn new(
        main_branch: impl Into<String>,
        git_ref: impl Into<String>,
        run_number: impl Into<String>,
        sha: impl Into<String>,
    ) -> Self {
        Self {
            main_branch: main_branch.into(),
            git_ref: git_ref.into(),
            run_number: run_number.into(),
            sha: sha.into(),
        }
    }
}

/// Computes the version of the build described by `context`
///
/// # Errors
/// Returns an error for builds from the main branch itself, malformed tag or
/// release names, tags outside the main branch and failed tag lookups
pub fn get_version(tags: &dyn TagSource, context: &BuildContext) -> Result<VersionInfo> {
    let main_branch = context.main_branch.as_str();
    let build_ref = BuildRef::parse(&context.git_ref, main_branch);

    let major_minor_patch = match build_ref {
        BuildRef::Tag(tag) => {
            let version = parse_major_minor_patch(tag)
                .map_err(|_| VersionError::InvalidTag(context.git_ref.clone()))?;
            if !tags.is_tag_on_branch(tag, main_branch)? {
                return Err(VersionError::TagNotOnBranch {
                    tag: tag.to_string(),
                    branch: main_branch.to_string(),
                });
            }
            version
        }
        BuildRef::Release(name) => parse_major_minor_patch(name)
            .map_err(|_| VersionError::InvalidReleaseName(name.to_string()))?,
        BuildRef::Main => return Err(VersionError::MainBranchBuild(main_branch.to_string())),
        BuildRef::Hotfix(_) => main_version(tags, main_branch)?.map_or(UNKNOWN_VERSION, |v| {
            SemverVersion::new(v.major, v.minor, v.patch + 1)
        }),
        BuildRef::Develop | BuildRef::Feature(_) | BuildRef::Other => main_version(tags, main_branch)?
            .map_or(UNKNOWN_VERSION, |v| SemverVersion::new(v.major, v.minor + 1, 0)),
    };

    let info = VersionInfo::new(
        build_ref.description(),
        major_minor_patch,
        build_ref.suffix(&context.run_number),
        &context.sha,
    );
    log::info!(
        "{} {} {}",
        info.description,
        info.major_minor_patch,
        info.informational_version
    );
    Ok(info)
}

/// The version of the main branch's tag; `None` when the branch is untagged
fn main_version(tags: &dyn TagSource, main_branch: &str) -> Result<Option<SemverVersion>> {
    match tags.main_tag(main_branch)? {
        Some(tag) => parse_major_minor_patch(&tag)
            .map(Some)
            .map_err(|_| VersionError::InvalidTag(tag)),
        None => {
            log::warn!("Branch {main_branch} does not have a tag.");
            Ok(None)
        }
    }
}

/// Parses a plain `x.y.z` version, rejecting pre-release and build metadata
///
/// # Errors
/// Returns an error if `text` is not exactly three dot-separated numbers
pub fn parse_major_minor_patch(text: &str) -> Result<SemverVersion> {
    if !MAJOR_MINOR_PATCH_PATTERN.is_match(text) {
        return Err(VersionError::InvalidTag(text.to_string()));
    }
    Ok(SemverVersion::parse(text)?)
}
