use crate::error::ChangelogError;
use std::fmt;

/// Type alias for Result with `ChangelogError`
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// What the caller wants recorded in the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRequest {
    /// `owner/repo`, used to build the pull request URL
    pub repository: String,
    pub pr_number: String,
    pub pr_title: String,
    /// Bracketed label, e.g. `[staging]`
    pub environment: String,
}

impl EntryRequest {
    pub fn new(
        repository: impl Into<String>,
        pr_number: impl Into<String>,
        pr_title: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            pr_number: pr_number.into(),
            pr_title: pr_title.into(),
            environment: environment.into(),
        }
    }
}

/// A pull request rendered as the two changelog lines that represent it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrEntry {
    pub link: String,
    pub title: String,
}

impl PrEntry {
    #[must_use]
    pub fn lines(&self) -> [String; 2] {
        [self.link.clone(), self.title.clone()]
    }
}

/// Where a new entry ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A fresh date section was created at the top of the changelog
    NewSection,
    /// Today's section existed but the environment block had to be created
    NewEnvironment,
    /// Prepended to an existing environment block
    ExistingEnvironment,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NewSection => "new date section",
            Self::NewEnvironment => "new environment block",
            Self::ExistingEnvironment => "existing environment block",
        };
        write!(f, "{text}")
    }
}

/// Result of adding an entry to a changelog file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added {
        placement: Placement,
        created_file: bool,
    },
    /// The PR link is already present somewhere in the file; nothing was written
    AlreadyListed,
}
