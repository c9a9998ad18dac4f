use crate::error::Result;
use crate::model::Run;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub name: String,
    pub start_line: u64,
    pub end_line: u64,
    pub rule_id: String,
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityFinding {
    pub package: String,
    pub installed_version: String,
    pub fixed_version: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub finding: Finding,
}

/// Findings grouped per file, sorted by file name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileGroup<T> {
    pub total_files: usize,
    pub files: BTreeMap<String, Vec<T>>,
    pub details: Value,
}

impl<T> FileGroup<T> {
    fn new(files: BTreeMap<String, Vec<T>>, details: &Value) -> Self {
        Self {
            total_files: files.len(),
            files,
            details: details.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrivyReport {
    pub vulnerabilities: FileGroup<VulnerabilityFinding>,
    /// Secrets and every other non-vulnerability finding
    pub trivy: FileGroup<Finding>,
}

/// Splits trivy results into vulnerabilities (rules tagged `vulnerability`) and secrets
///
/// # Errors
/// Returns an error when a result has no location or its message lacks the
/// `Severity` line, or the package lines for vulnerabilities
pub fn convert(run: &Run) -> Result<TrivyReport> {
    let descriptions: HashMap<String, Option<String>> = run
        .rules()
        .into_iter()
        .filter(|rule| rule.has_tag("vulnerability"))
        .map(|rule| {
            let description = rule
                .full_description
                .map(|text| text.text.trim_end().to_string());
            (rule.id, description)
        })
        .collect();

    let mut secrets: BTreeMap<String, Vec<Finding>> = BTreeMap::new();
    let mut vulnerabilities: BTreeMap<String, Vec<VulnerabilityFinding>> = BTreeMap::new();

    for item in &run.results {
        let base = item.base_info()?;
        let finding = Finding {
            name: base.file_name.clone(),
            start_line: base.start_line,
            end_line: base.end_line,
            rule_id: item.rule_id.clone(),
            severity: item.message_field("Severity: ")?,
        };

        match descriptions.get(&item.rule_id) {
            Some(description) => {
                vulnerabilities
                    .entry(base.file_name)
                    .or_default()
                    .push(VulnerabilityFinding {
                        package: item.message_field("Package: ")?,
                        installed_version: item.message_field("Installed Version: ")?,
                        fixed_version: item.message_field("Fixed Version: ")?,
                        description: description.clone(),
                        finding,
                    });
            }
            None => secrets.entry(base.file_name).or_default().push(finding),
        }
    }

    log::debug!(
        "trivy: {} vulnerable files, {} files with secrets",
        vulnerabilities.len(),
        secrets.len()
    );

    Ok(TrivyReport {
        vulnerabilities: FileGroup::new(vulnerabilities, &run.tool),
        trivy: FileGroup::new(secrets, &run.tool),
    })
}
