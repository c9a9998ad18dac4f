//! In-memory model of a changelog: title, date sections, environment blocks.
//!
//! Every line keeps its original text so that untouched parts of the file render
//! back byte for byte. Only the operations below add lines.

use crate::formatter::section_heading;
use crate::types::{Placement, PrEntry};
use crate::utils::is_blank;

/// A `[environment]` label followed by the lines (entries, blanks) below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentBlock {
    pub label: String,
    pub lines: Vec<String>,
}

impl EnvironmentBlock {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            lines: Vec::new(),
        }
    }

    /// A block holding a single entry, laid out as label / blank / entry / blank
    #[must_use]
    pub fn with_entry(label: &str, entry: &PrEntry) -> Self {
        let [link, title] = entry.lines();
        Self {
            label: label.to_string(),
            lines: vec![String::new(), link, title, String::new()],
        }
    }

    #[must_use]
    pub fn matches(&self, environment: &str) -> bool {
        self.label.trim() == environment.trim()
    }

    /// Inserts the entry at the top of the block, right after the blank line below the label
    pub fn prepend_entry(&mut self, entry: &PrEntry) {
        if self.lines.first().is_none_or(|line| !is_blank(line)) {
            self.lines.insert(0, String::new());
        }
        let [link, title] = entry.lines();
        self.lines.splice(1..1, [link, title]);
    }

    fn push_lines<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.label);
        out.extend(self.lines.iter().map(String::as_str));
    }
}

/// A `## heading` and everything up to the next second-level heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSection {
    pub heading: String,
    /// Lines between the heading and the first environment label
    pub lead: Vec<String>,
    pub environments: Vec<EnvironmentBlock>,
}

impl DateSection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lead: Vec::new(),
            environments: Vec::new(),
        }
    }

    /// `## date`, blank, then one environment block holding `entry`
    #[must_use]
    pub fn with_entry(date: &str, environment: &str, entry: &PrEntry) -> Self {
        Self {
            heading: section_heading(date),
            lead: vec![String::new()],
            environments: vec![EnvironmentBlock::with_entry(environment, entry)],
        }
    }

    #[must_use]
    pub fn is_for(&self, date: &str) -> bool {
        self.heading.trim() == section_heading(date)
    }

    /// Adds `entry` under `environment`, creating the block as the section's first one if needed
    pub fn add_entry(&mut self, environment: &str, entry: &PrEntry) -> Placement {
        if let Some(block) = self
            .environments
            .iter_mut()
            .find(|block| block.matches(environment))
        {
            block.prepend_entry(entry);
            return Placement::ExistingEnvironment;
        }

        if self.lead.last().is_none_or(|line| !is_blank(line)) {
            self.lead.push(String::new());
        }
        self.environments
            .insert(0, EnvironmentBlock::with_entry(environment, entry));
        Placement::NewEnvironment
    }

    fn push_lines<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.heading);
        out.extend(self.lead.iter().map(String::as_str));
        for block in &self.environments {
            block.push_lines(out);
        }
    }
}

/// Content below the title: free text or a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(Vec<String>),
    Section(DateSection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    pub(crate) preamble: Vec<String>,
    pub(crate) title: String,
    /// The blank (possibly whitespace-only) line below the title, kept as written
    pub(crate) title_spacer: Option<String>,
    pub(crate) body: Vec<Block>,
    pub(crate) newline: &'static str,
    pub(crate) trailing_newline: bool,
}

impl ChangelogDocument {
    /// The document written for a changelog that did not exist yet
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            preamble: Vec::new(),
            title: title.into(),
            title_spacer: Some(String::new()),
            body: Vec::new(),
            newline: "\n",
            trailing_newline: true,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = &DateSection> {
        self.body.iter().filter_map(|block| match block {
            Block::Section(section) => Some(section),
            Block::Text(_) => None,
        })
    }

    fn section_mut(&mut self, date: &str) -> Option<&mut DateSection> {
        self.body.iter_mut().find_map(|block| match block {
            Block::Section(section) if section.is_for(date) => Some(section),
            _ => None,
        })
    }

    /// Guarantees a blank line directly below the title. Returns true if one was inserted.
    pub fn ensure_title_spacing(&mut self) -> bool {
        let inserted = self.title_spacer.is_none();
        self.title_spacer.get_or_insert_with(String::new);
        inserted
    }

    /// Places a section directly below the title, above all existing content
    pub fn insert_section(&mut self, section: DateSection) {
        self.body.insert(0, Block::Section(section));
    }

    /// Records `entry` under `environment` in the section for `date`
    pub fn add_entry(&mut self, date: &str, environment: &str, entry: &PrEntry) -> Placement {
        self.ensure_title_spacing();

        match self.section_mut(date) {
            Some(section) => section.add_entry(environment, entry),
            None => {
                self.insert_section(DateSection::with_entry(date, environment, entry));
                Placement::NewSection
            }
        }
    }

    /// All lines of the document in order, without line terminators
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.preamble.iter().map(String::as_str).collect();
        out.push(&self.title);
        if let Some(spacer) = &self.title_spacer {
            out.push(spacer);
        }
        for block in &self.body {
            match block {
                Block::Text(lines) => out.extend(lines.iter().map(String::as_str)),
                Block::Section(section) => section.push_lines(&mut out),
            }
        }
        out
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = self.lines().join(self.newline);
        if self.trailing_newline {
            rendered.push_str(self.newline);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(number: u32, title: &str) -> PrEntry {
        PrEntry {
            link: format!("- [associated PR](https://github.com/acme/app/pull/{number})"),
            title: format!("- {title}"),
        }
    }

    #[test]
    fn test_new_document_renders_bare_title() {
        assert_eq!(ChangelogDocument::new("# Changelog").render(), "# Changelog\n\n");
    }

    #[test]
    fn test_add_entry_to_new_document() {
        let mut doc = ChangelogDocument::new("# Changelog");
        let placement = doc.add_entry("2024-05-01", "[staging]", &entry(1, "First"));

        assert_eq!(placement, Placement::NewSection);
        assert_eq!(
            doc.render(),
            "# Changelog\n\n## 2024-05-01\n\n[staging]\n\n\
             - [associated PR](https://github.com/acme/app/pull/1)\n- First\n\n"
        );
    }

    #[test]
    fn test_prepend_entry_inserts_blank_when_missing() {
        let mut block = EnvironmentBlock::new("[dev]");
        block.lines = vec!["- old link".into(), "- old".into()];
        block.prepend_entry(&entry(2, "New"));

        assert_eq!(
            block.lines,
            vec![
                "".to_string(),
                "- [associated PR](https://github.com/acme/app/pull/2)".to_string(),
                "- New".to_string(),
                "- old link".to_string(),
                "- old".to_string(),
            ]
        );
    }

    #[test]
    fn test_new_environment_goes_first_in_section() {
        let mut section = DateSection::with_entry("2024-05-01", "[staging]", &entry(1, "First"));
        let placement = section.add_entry("[prod]", &entry(2, "Second"));

        assert_eq!(placement, Placement::NewEnvironment);
        let labels: Vec<&str> = section.environments.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["[prod]", "[staging]"]);
    }

    #[test]
    fn test_section_lead_gets_blank_before_new_block() {
        let mut section = DateSection::new("## 2024-05-01");
        section.add_entry("[dev]", &entry(3, "Third"));
        assert_eq!(section.lead, vec![String::new()]);
    }

    #[test]
    fn test_ensure_title_spacing_reports_insertion() {
        let mut doc = ChangelogDocument::new("# Changelog");
        doc.title_spacer = None;
        assert!(doc.ensure_title_spacing());
        assert!(!doc.ensure_title_spacing());
        assert_eq!(doc.render(), "# Changelog\n\n");
    }

    #[test]
    fn test_whitespace_spacer_is_kept() {
        let mut doc = ChangelogDocument::new("# Changelog");
        doc.title_spacer = Some("   ".to_string());
        assert!(!doc.ensure_title_spacing());
        assert_eq!(doc.render(), "# Changelog\n   \n");
    }
}
