use crate::error::Result;
use semver::Version;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Computed version numbers for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub description: String,
    pub suffix: String,
    pub major_minor_patch: Version,
    /// e.g. `1.3.0-beta.12+release-1.3.0.56793f7`
    pub informational_version: String,
    /// e.g. `1.3.0-beta.12`
    pub sem_ver: String,
    /// e.g. `1.3.0.0`
    pub assembly_sem_ver: String,
}

impl VersionInfo {
    pub fn new(
        description: impl Into<String>,
        major_minor_patch: Version,
        suffix: impl Into<String>,
        sha: &str,
    ) -> Self {
        let suffix = suffix.into();
        let sem_ver = format!("{major_minor_patch}{suffix}");
        let informational_version = format!("{sem_ver}+{sha}").replace('/', "-");
        let assembly_sem_ver = format!("{major_minor_patch}.0");

        Self {
            description: description.into(),
            suffix,
            major_minor_patch,
            informational_version,
            sem_ver,
            assembly_sem_ver,
        }
    }

    /// Step outputs in the order they are published
    #[must_use]
    pub fn outputs(&self) -> [(&'static str, &str); 3] {
        [
            ("informational-version", &self.informational_version),
            ("semver", &self.sem_ver),
            ("assembly-semver", &self.assembly_sem_ver),
        ]
    }

    /// Appends `name=value` lines to a GitHub Actions output file
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written
    pub fn append_outputs(&self, output_file: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(output_file)?;
        for (name, value) in self.outputs() {
            writeln!(file, "{name}={value}")?;
        }
        Ok(())
    }
}
