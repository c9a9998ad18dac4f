use std::path::Path;

use crate::error::{GitError, Result, ResultExt};
use git2::{ErrorCode, Oid, Repository as GitRepository};
use version::TagSource;

pub struct RealGitRepository {
    repo: GitRepository,
}

impl RealGitRepository {
    /// Discovers the repository containing the current directory
    ///
    /// # Errors
    /// Returns an error when no repository is found
    pub fn open() -> Result<Self> {
        let repo = GitRepository::discover(".").map_err(|e| {
            GitError::RepositoryError(format!("Failed to discover git repository: {e}"))
        })?;
        Ok(Self { repo })
    }

    /// # Errors
    /// Returns an error when `path` is not a repository
    pub fn open_at(path: &Path) -> Result<Self> {
        let repo = GitRepository::open(path).map_err(|e| {
            GitError::RepositoryError(format!(
                "Failed to open git repository at '{}': {e}",
                path.display()
            ))
        })?;
        Ok(Self { repo })
    }

    /// Commit at the tip of `origin/<branch>`
    ///
    /// # Errors
    /// Returns `BranchNotFound` when the remote-tracking branch does not exist
    pub fn remote_branch_commit(&self, branch: &str) -> Result<Oid> {
        let refname = format!("refs/remotes/origin/{branch}");
        let reference = self.repo.find_reference(&refname).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::BranchNotFound(format!("origin/{branch}")),
            _ => GitError::Git2Error(e),
        })?;
        Ok(reference.peel_to_commit()?.id())
    }

    /// Commit a tag points at, following annotated tags
    ///
    /// # Errors
    /// Returns `TagNotFound` when there is no such tag
    pub fn tag_commit(&self, tag: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{tag}"))
            .map_err(|e| match e.code() {
                ErrorCode::NotFound => GitError::TagNotFound(tag.to_string()),
                _ => GitError::Git2Error(e),
            })?;
        Ok(reference.peel_to_commit()?.id())
    }

    /// Names of all tags pointing exactly at `commit`, sorted
    ///
    /// # Errors
    /// Returns an error if the tag list cannot be read
    pub fn tags_at(&self, commit: Oid) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            if self.tag_commit(name)? == commit {
                tags.push(name.to_string());
            }
        }
        tags.sort();
        Ok(tags)
    }

    /// Whether `commit` is `tip` or one of its ancestors
    ///
    /// # Errors
    /// Returns an error if the commit graph cannot be walked
    pub fn is_reachable_from(&self, commit: Oid, tip: Oid) -> Result<bool> {
        if commit == tip {
            return Ok(true);
        }
        Ok(self.repo.graph_descendant_of(tip, commit)?)
    }
}

impl TagSource for RealGitRepository {
    fn main_tag(&self, main_branch: &str) -> version::Result<Option<String>> {
        let tip = match self.remote_branch_commit(main_branch) {
            Ok(tip) => tip,
            Err(GitError::BranchNotFound(branch)) => {
                log::warn!("Remote branch {branch} not found; treating it as untagged");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut tags = self.tags_at(tip)?;
        if tags.len() > 1 {
            log::debug!("Several tags point at origin/{main_branch}: {tags:?}");
        }
        Ok((!tags.is_empty()).then(|| tags.remove(0)))
    }

    fn is_tag_on_branch(&self, tag: &str, main_branch: &str) -> version::Result<bool> {
        let commit = self
            .tag_commit(tag)
            .with_context(|| format!("Checking whether {tag} is on {main_branch}"))?;
        let tip = self.remote_branch_commit(main_branch)?;
        Ok(self.is_reachable_from(commit, tip)?)
    }
}
