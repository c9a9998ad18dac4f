//! Reshapes SARIF reports from secret and vulnerability scanners into the
//! compact JSON consumed by the CI reporting step.

pub mod error;
pub mod gitleaks;
pub mod model;
pub mod trivy;

pub use error::{Result, SarifError};
pub use gitleaks::GitleaksReport;
pub use model::SarifLog;
pub use trivy::TrivyReport;

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Scanner that produced the SARIF report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckType {
    Trivy,
    Gitleaks,
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trivy => "trivy",
            Self::Gitleaks => "gitleaks",
        };
        write!(f, "{name}")
    }
}

impl FromStr for CheckType {
    type Err = SarifError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trivy" => Ok(Self::Trivy),
            "gitleaks" => Ok(Self::Gitleaks),
            _ => Err(SarifError::UnknownCheckType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Trivy(TrivyReport),
    Gitleaks(GitleaksReport),
}

impl Report {
    /// Number of files with at least one finding
    #[must_use]
    pub fn total_files(&self) -> usize {
        match self {
            Self::Trivy(report) => report.trivy.total_files + report.vulnerabilities.total_files,
            Self::Gitleaks(report) => report.gitleaks.total_files,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Written { total_files: usize },
    /// The first run had no results, so no output file was produced
    NoFindings,
}

/// Converts the first run of a parsed SARIF log. `None` when it has no results.
///
/// # Errors
/// Returns an error if the log has no runs or a result is missing required data
pub fn convert(sarif_log: &SarifLog, check_type: CheckType) -> Result<Option<Report>> {
    let run = sarif_log.first_run()?;
    if run.results.is_empty() {
        return Ok(None);
    }

    let report = match check_type {
        CheckType::Trivy => Report::Trivy(trivy::convert(run)?),
        CheckType::Gitleaks => Report::Gitleaks(gitleaks::convert(run)?),
    };
    Ok(Some(report))
}

/// Reads the SARIF file at `input`, converts it and writes pretty-printed JSON to `output`
///
/// # Errors
/// Returns an error if reading, parsing, converting or writing fails
pub fn convert_file(input: &Path, output: &Path, check_type: CheckType) -> Result<ConversionOutcome> {
    let content = fs::read_to_string(input)
        .map_err(|e| SarifError::Io(e).with_context(format!("Reading {}", input.display())))?;
    let sarif_log: SarifLog = serde_json::from_str(&content)?;

    let Some(report) = convert(&sarif_log, check_type)? else {
        log::info!("{} reported no findings; nothing written", check_type);
        return Ok(ConversionOutcome::NoFindings);
    };

    let json = serde_json::to_string_pretty(&report)?;
    fs::write(output, json)
        .map_err(|e| SarifError::Io(e).with_context(format!("Writing {}", output.display())))?;

    Ok(ConversionOutcome::Written {
        total_files: report.total_files(),
    })
}
