use crate::config::ChangelogConfig;
use crate::types::{EntryRequest, PrEntry};

pub trait EntryFormatter: Send + Sync {
    fn link_line(&self, repository: &str, pr_number: &str) -> String;
    fn title_line(&self, pr_title: &str) -> String;

    fn format(&self, request: &EntryRequest) -> PrEntry {
        PrEntry {
            link: self.link_line(&request.repository, &request.pr_number),
            title: self.title_line(&request.pr_title),
        }
    }
}

/// Renders `- [associated PR](https://github.com/owner/repo/pull/N)` / `- Title` pairs
#[derive(Debug, Clone)]
pub struct GitHubEntryFormatter {
    base_url: String,
    link_text: String,
}

impl GitHubEntryFormatter {
    pub fn new(base_url: impl Into<String>, link_text: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            link_text: link_text.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ChangelogConfig) -> Self {
        Self::new(&config.github_url, &config.link_text)
    }
}

impl Default for GitHubEntryFormatter {
    fn default() -> Self {
        Self::from_config(&ChangelogConfig::default())
    }
}

impl EntryFormatter for GitHubEntryFormatter {
    fn link_line(&self, repository: &str, pr_number: &str) -> String {
        format!(
            "- [{}]({}/{}/pull/{})",
            self.link_text,
            self.base_url.trim_end_matches('/'),
            repository.trim_matches('/'),
            pr_number.trim_start_matches('#')
        )
    }

    fn title_line(&self, pr_title: &str) -> String {
        format!("- {}", pr_title.trim())
    }
}

#[must_use]
pub fn section_heading(date: &str) -> String {
    format!("## {date}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_link_line() {
        let formatter = GitHubEntryFormatter::default();
        assert_eq!(
            formatter.link_line("acme/widgets", "42"),
            "- [associated PR](https://github.com/acme/widgets/pull/42)"
        );
    }

    #[test]
    fn test_link_line_normalizes_inputs() {
        let formatter = GitHubEntryFormatter::new("https://ghe.example.com/", "PR");
        assert_eq!(
            formatter.link_line("/acme/widgets/", "#7"),
            "- [PR](https://ghe.example.com/acme/widgets/pull/7)"
        );
    }

    #[test]
    fn test_format_request() {
        let request = EntryRequest::new("acme/widgets", "42", "Fix login redirect", "[dev]");
        let entry = GitHubEntryFormatter::default().format(&request);
        assert_eq!(entry.title, "- Fix login redirect");
        assert!(entry.link.ends_with("/pull/42)"));
    }
}
