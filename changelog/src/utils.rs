use once_cell::sync::Lazy;
use regex::Regex;

/// Any second-level heading opens a new section, dated or not
pub static SECTION_HEADING_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*## ").expect("Failed to compile section heading regex"));

pub static ENVIRONMENT_LABEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\[[^\[\]]+\]\s*$").expect("Failed to compile environment label regex")
});

#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Wraps a bare environment name in brackets, leaving labels that already have them untouched
#[must_use]
pub fn environment_label(environment: &str) -> String {
    let environment = environment.trim();
    if ENVIRONMENT_LABEL_PATTERN.is_match(environment) {
        environment.to_string()
    } else {
        format!("[{environment}]")
    }
}
