use serde::Deserialize;

/// Configuration options for changelog formatting and behavior
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Title line every changelog must carry
    pub title: String,
    /// `chrono` format used for date section headings
    pub date_format: String,
    /// Base URL of the GitHub instance hosting the repository
    pub github_url: String,
    /// Text of the markdown link pointing at the pull request
    pub link_text: String,
    /// Create the changelog with a bare title when the file does not exist
    #[serde(skip)]
    pub create_if_missing: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            title: "# Changelog".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            github_url: "https://github.com".to_string(),
            link_text: "associated PR".to_string(),
            create_if_missing: false,
        }
    }
}

impl ChangelogConfig {
    #[must_use]
    pub fn with_create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }
}
