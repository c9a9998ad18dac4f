use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with changelogs
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read or write changelog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("The file '{}' does not exist", .0.display())]
    FileMissing(PathBuf),

    #[error("The file '{}' does not have a '{}' title", .0.display(), .1)]
    MissingTitle(PathBuf, String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<ChangelogError>),
}

impl ChangelogError {
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File operation failed: {e}"),
            Self::FileMissing(path) => format!("The file '{}' does not exist", path.display()),
            Self::MissingTitle(path, title) => {
                format!("The file '{}' does not have a '{title}' title", path.display())
            }
            Self::InvalidEntry(msg) => format!("Invalid changelog entry: {msg}"),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_message_names_file() {
        let err = ChangelogError::MissingTitle(PathBuf::from("CHANGELOG.md"), "# Changelog".into());
        assert_eq!(
            err.user_message(),
            "The file 'CHANGELOG.md' does not have a '# Changelog' title"
        );
    }

    #[test]
    fn test_context_is_prepended() {
        let err = ChangelogError::FileMissing(PathBuf::from("docs/CHANGELOG.md"))
            .with_context("Adding PR #12");
        assert!(err.user_message().starts_with("Adding PR #12: The file 'docs/CHANGELOG.md'"));
    }
}
