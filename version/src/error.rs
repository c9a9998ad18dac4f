use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Failed to parse version: {0}")]
    ParseError(#[from] semver::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Found a tag {0} in the wrong format. Expected SemVer: x.x.x without leading zeros")]
    InvalidTag(String),

    #[error("Wrong release name '{0}'. Expected SemVer: release/x.x.x without leading zeros")]
    InvalidReleaseName(String),

    #[error("Tag {tag} does not belong to {branch} branch")]
    TagNotOnBranch { tag: String, branch: String },

    #[error("Unexpected build from {0}. Ignore it and use tags instead")]
    MainBranchBuild(String),

    #[error("Git lookup failed: {0}")]
    TagLookup(String),

    #[error("Invalid project file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Unreadable project file path: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Malformed project XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to update '{}': {}", .0.display(), .1)]
    ProjectFile(PathBuf, String),

    #[error("{0}: {1}")]
    WithContext(String, Box<VersionError>),
}

impl VersionError {
    /// Add context to an error
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        VersionError::WithContext(context.into(), Box::new(self))
    }

    /// Get a user-friendly message for command line display
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            VersionError::ParseError(e) => format!("Invalid version format: {e}"),
            VersionError::TagLookup(msg) => {
                format!("Could not read tags from the repository: {msg}")
            }
            VersionError::WithContext(ctx, err) => format!("{}: {}", ctx, err.user_message()),
            _ => format!("{self}"),
        }
    }
}

pub type Result<T> = result::Result<T, VersionError>;

// Helper trait for adding context to results
pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for result::Result<T, E>
where
    E: Into<VersionError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let version_err: VersionError = err.into();
            version_err.with_context(context())
        })
    }
}
