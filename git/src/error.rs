use thiserror::Error;
use version::VersionError;

/// Git operation error type that provides detailed context about the error
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git2 error: {0}")]
    Git2Error(#[from] git2::Error),

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<GitError>),
}

impl GitError {
    /// Add context to an error
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        GitError::WithContext(context.into(), Box::new(self))
    }

    /// Get a user-friendly message for command line display
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GitError::Git2Error(e) => {
                let msg = format!("{e}");
                // Extract just the message without the class and code details
                msg.split(';').next().map_or_else(
                    || format!("Git error: {msg}"),
                    |main_msg| format!("Git error: {}", main_msg.trim()),
                )
            }
            GitError::BranchNotFound(branch) => format!("Branch '{branch}' not found"),
            GitError::TagNotFound(tag) => format!("Tag '{tag}' not found"),
            GitError::RepositoryError(msg) => format!("Repository error: {msg}"),
            GitError::WithContext(ctx, err) => format!("{}: {}", ctx, err.user_message()),
        }
    }
}

impl From<GitError> for VersionError {
    fn from(err: GitError) -> Self {
        VersionError::TagLookup(err.user_message())
    }
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Helper trait for adding context to results
pub trait ResultExt<T, E> {
    /// Add context to an error result with a string or string-producing closure
    fn with_context<C, F>(self, context: F) -> std::result::Result<T, GitError>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Into<GitError>,
{
    fn with_context<C, F>(self, context: F) -> std::result::Result<T, GitError>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let git_err: GitError = err.into();
            git_err.with_context(context())
        })
    }
}
