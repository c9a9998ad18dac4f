use crate::error::Result;
use crate::model::Run;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One leaked span of a file, with every commit it was seen in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakFinding {
    pub name: String,
    pub commits: Vec<String>,
    pub start_line: u64,
    pub end_line: u64,
    pub rule_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitleaksGroup {
    pub total_files: usize,
    /// file name -> `"{start}-{end}"` -> finding
    pub files: BTreeMap<String, BTreeMap<String, LeakFinding>>,
    pub unique_file_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitleaksReport {
    pub gitleaks: GitleaksGroup,
}

/// Groups gitleaks results by file and line span, collecting commit SHAs
///
/// # Errors
/// Returns an error when a result has no location or no `commitSha` fingerprint
pub fn convert(run: &Run) -> Result<GitleaksReport> {
    let mut files: BTreeMap<String, BTreeMap<String, LeakFinding>> = BTreeMap::new();

    for item in &run.results {
        let base = item.base_info()?;
        let commit = item.fingerprint("commitSha")?;
        let span = format!("{}-{}", base.start_line, base.end_line);

        files
            .entry(base.file_name.clone())
            .or_default()
            .entry(span)
            .or_insert_with(|| LeakFinding {
                name: base.file_name,
                commits: Vec::new(),
                start_line: base.start_line,
                end_line: base.end_line,
                rule_id: item.rule_id.clone(),
            })
            .commits
            .push(commit);
    }

    let mut unique_file_names: Vec<String> = files
        .keys()
        .map(|name| {
            Path::new(name)
                .file_name()
                .map_or_else(|| name.clone(), |base| base.to_string_lossy().into_owned())
        })
        .collect();
    unique_file_names.sort();

    log::debug!("gitleaks: leaks found in {} files", files.len());

    Ok(GitleaksReport {
        gitleaks: GitleaksGroup {
            total_files: files.len(),
            files,
            unique_file_names,
        },
    })
}
