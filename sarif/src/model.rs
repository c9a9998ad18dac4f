//! The subset of SARIF 2.1.0 read by the converters.

use crate::error::{Result, SarifError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct SarifLog {
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl SarifLog {
    /// The converters only look at the first run, like the scanners emit it
    ///
    /// # Errors
    /// Returns `NoRuns` for an empty log
    pub fn first_run(&self) -> Result<&Run> {
        self.runs.first().ok_or(SarifError::NoRuns)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    /// Kept verbatim; reports copy it into their `details` field
    #[serde(default)]
    pub tool: Value,
    #[serde(default)]
    pub results: Vec<SarifResult>,
}

impl Run {
    /// Rules declared by the tool driver, skipping entries that do not look like rules
    #[must_use]
    pub fn rules(&self) -> Vec<Rule> {
        self.tool
            .pointer("/driver/rules")
            .and_then(Value::as_array)
            .map(|rules| {
                rules
                    .iter()
                    .filter_map(|rule| serde_json::from_value(rule.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub full_description: Option<Text>,
    #[serde(default)]
    pub properties: RuleProperties,
}

impl Rule {
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.properties.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleProperties {
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    #[serde(default)]
    pub message: Text,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub partial_fingerprints: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub physical_location: PhysicalLocation,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    pub artifact_location: ArtifactLocation,
    pub region: Region,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactLocation {
    pub uri: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub start_line: u64,
    #[serde(default)]
    pub end_line: Option<u64>,
}

/// File and line span every converted finding starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseInfo {
    pub file_name: String,
    pub start_line: u64,
    pub end_line: u64,
}

impl SarifResult {
    /// File name and line span of the first location
    ///
    /// # Errors
    /// Returns `MissingLocation` when the result has no location
    pub fn base_info(&self) -> Result<BaseInfo> {
        let location = &self
            .locations
            .first()
            .ok_or_else(|| SarifError::MissingLocation {
                rule_id: self.rule_id.clone(),
            })?
            .physical_location;

        Ok(BaseInfo {
            file_name: location.artifact_location.uri.clone(),
            start_line: location.region.start_line,
            end_line: location.region.end_line.unwrap_or(location.region.start_line),
        })
    }

    /// Value of a `Label: value` line inside the result message
    ///
    /// # Errors
    /// Returns `MissingMessageField` when the label does not occur
    pub fn message_field(&self, label: &str) -> Result<String> {
        extract_field(&self.message.text, label).ok_or_else(|| SarifError::MissingMessageField {
            field: label.trim_end_matches(": ").to_string(),
            rule_id: self.rule_id.clone(),
        })
    }

    /// # Errors
    /// Returns `MissingFingerprint` when the fingerprint is absent or not a string
    pub fn fingerprint(&self, name: &str) -> Result<String> {
        self.partial_fingerprints
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| SarifError::MissingFingerprint {
                field: name.to_string(),
                rule_id: self.rule_id.clone(),
            })
    }
}

/// Text following the first `label` up to the end of that line, trimmed
#[must_use]
pub fn extract_field(text: &str, label: &str) -> Option<String> {
    let (_, rest) = text.split_once(label)?;
    let value = rest.split('\n').next().unwrap_or_default();
    Some(value.trim().to_string())
}
