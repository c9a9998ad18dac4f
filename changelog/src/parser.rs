use crate::document::{Block, ChangelogDocument, DateSection, EnvironmentBlock};
use crate::utils::{ENVIRONMENT_LABEL_PATTERN, SECTION_HEADING_PATTERN, is_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    BeforeTitle,
    AfterTitle,
    Body,
}

/// Splits changelog text into title, sections, environment blocks and free text
#[derive(Debug, Clone)]
pub struct Parser {
    title: String,
}

impl Parser {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Returns `None` when the title line is missing
    #[must_use]
    pub fn parse(&self, content: &str) -> Option<ChangelogDocument> {
        let mut doc = ChangelogDocument::new(self.title.clone());
        doc.title_spacer = None;
        doc.newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
        doc.trailing_newline = content.ends_with('\n');

        let mut state = ParserState::BeforeTitle;

        for line in content.lines() {
            state = match state {
                ParserState::BeforeTitle => {
                    if line == self.title {
                        ParserState::AfterTitle
                    } else {
                        doc.preamble.push(line.to_string());
                        ParserState::BeforeTitle
                    }
                }
                ParserState::AfterTitle if is_blank(line) => {
                    doc.title_spacer = Some(line.to_string());
                    ParserState::Body
                }
                ParserState::AfterTitle | ParserState::Body => {
                    Self::parse_body_line(line, &mut doc.body);
                    ParserState::Body
                }
            };
        }

        (state != ParserState::BeforeTitle).then_some(doc)
    }

    fn parse_body_line(line: &str, body: &mut Vec<Block>) {
        if SECTION_HEADING_PATTERN.is_match(line) {
            body.push(Block::Section(DateSection::new(line)));
            return;
        }

        match body.last_mut() {
            Some(Block::Section(section)) => Self::handle_section_line(line, section),
            Some(Block::Text(lines)) => lines.push(line.to_string()),
            None => body.push(Block::Text(vec![line.to_string()])),
        }
    }

    fn handle_section_line(line: &str, section: &mut DateSection) {
        if ENVIRONMENT_LABEL_PATTERN.is_match(line) {
            section.environments.push(EnvironmentBlock::new(line));
        } else if let Some(block) = section.environments.last_mut() {
            block.lines.push(line.to_string());
        } else {
            section.lead.push(line.to_string());
        }
    }
}
