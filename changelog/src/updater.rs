use crate::config::ChangelogConfig;
use crate::document::ChangelogDocument;
use crate::error::ChangelogError;
use crate::formatter::{EntryFormatter, GitHubEntryFormatter};
use crate::parser::Parser;
use crate::types::*;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents a changelog file with its raw contents
pub struct Changelog {
    path: PathBuf,
    content: String,
    created: bool,
    config: ChangelogConfig,
    formatter: Box<dyn EntryFormatter>,
    parser: Parser,
}

impl Changelog {
    /// Loads the changelog at `path`, creating it with a bare title when the
    /// configuration allows it
    ///
    /// # Errors
    /// Returns `FileMissing` if the file does not exist and may not be created,
    /// or an I/O error if it cannot be read or written
    pub fn load(path: impl Into<PathBuf>, config: ChangelogConfig) -> Result<Self> {
        let path = path.into();
        let mut created = false;

        if !path.exists() {
            if !config.create_if_missing {
                return Err(ChangelogError::FileMissing(path));
            }
            let initial = ChangelogDocument::new(config.title.clone()).render();
            fs::write(&path, initial)?;
            log::info!(
                "File '{}' created with initial {} header",
                path.display(),
                config.title
            );
            created = true;
        }

        let content = fs::read_to_string(&path)?;
        let formatter = Box::new(GitHubEntryFormatter::from_config(&config));
        let parser = Parser::new(config.title.clone());

        Ok(Self {
            path,
            content,
            created,
            config,
            formatter,
            parser,
        })
    }

    /// Replaces the formatter used to render new entries
    #[must_use]
    pub fn with_formatter(mut self, formatter: Box<dyn EntryFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Parses the current contents into a document
    ///
    /// # Errors
    /// Returns `MissingTitle` when the title line is absent
    pub fn document(&self) -> Result<ChangelogDocument> {
        self.parser
            .parse(&self.content)
            .ok_or_else(|| ChangelogError::MissingTitle(self.path.clone(), self.config.title.clone()))
    }

    /// Adds an entry for the pull request under today's date section
    ///
    /// # Errors
    /// See [`Changelog::add_entry_on`]
    pub fn add_entry(&mut self, request: &EntryRequest) -> Result<AddOutcome> {
        let today = Local::now().date_naive();
        self.add_entry_on(request, today)
    }

    /// Adds an entry for the pull request under the section for `date`
    ///
    /// The file is left untouched when the entry is already listed anywhere in
    /// the changelog or when the title line is missing.
    ///
    /// # Errors
    /// Returns `InvalidEntry` for empty request fields, `MissingTitle` for a
    /// malformed changelog and I/O errors when the file cannot be written
    pub fn add_entry_on(&mut self, request: &EntryRequest, date: NaiveDate) -> Result<AddOutcome> {
        validate_request(request)?;

        let entry = self.formatter.format(request);

        if self.content.lines().any(|line| line == entry.link) {
            log::info!(
                "PR #{} is already listed in the changelog. Skipping addition.",
                request.pr_number
            );
            return Ok(AddOutcome::AlreadyListed);
        }

        let mut document = self.document()?;
        if document.ensure_title_spacing() {
            log::debug!("Inserted blank line after the changelog title");
        }

        let date = date.format(&self.config.date_format).to_string();
        let placement = document.add_entry(&date, &request.environment, &entry);
        log::debug!(
            "Placed PR #{} in {} for {} under {}",
            request.pr_number,
            placement,
            date,
            request.environment
        );

        let rendered = document.render();
        fs::write(&self.path, &rendered).map_err(|e| {
            ChangelogError::Io(e).with_context(format!("Writing {}", self.path.display()))
        })?;
        self.content = rendered;

        Ok(AddOutcome::Added {
            placement,
            created_file: self.created,
        })
    }

    /// Gets the path to the changelog file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the raw content of the changelog
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Gets a reference to the changelog's configuration
    #[must_use]
    pub const fn config(&self) -> &ChangelogConfig {
        &self.config
    }
}

fn validate_request(request: &EntryRequest) -> Result<()> {
    let fields = [
        ("repository", &request.repository),
        ("PR number", &request.pr_number),
        ("PR title", &request.pr_title),
        ("environment", &request.environment),
    ];

    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ChangelogError::InvalidEntry(format!("{name} must not be empty")));
        }
    }
    Ok(())
}
