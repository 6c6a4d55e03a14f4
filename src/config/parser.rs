// src/config/parser.rs

//! Line-oriented INI parser.
//!
//! Rules:
//! - `#` / `;` at the start of a (trimmed) line mark a comment.
//! - `[name]` opens a section; `[DEFAULT]` opens the inherited defaults.
//! - `key = value` or a bare `key`; the key ends at the first `=`.
//! - a line indented deeper than its option line continues that option's
//!   value; blank lines inside a value are kept, trailing ones dropped.
//! - duplicate sections and duplicate keys within a section are errors.

use tracing::trace;

use crate::config::model::{DEFAULT_SECTION, Document, Entry, Section};
use crate::errors::{ConfigError, Result};

/// Section currently receiving option lines.
#[derive(Debug, Clone, Copy)]
enum Target {
    Defaults,
    Section(usize),
}

struct Parser {
    doc: Document,
    target: Option<Target>,
    /// Whether the target's last entry can take continuation lines.
    in_option: bool,
    indent_level: usize,
}

/// Parse INI text into a [`Document`].
pub fn parse(text: &str) -> Result<Document> {
    let mut parser = Parser {
        doc: Document::new(),
        target: None,
        in_option: false,
        indent_level: 0,
    };

    for (idx, line) in text.lines().enumerate() {
        parser.feed(idx + 1, line)?;
    }

    Ok(parser.finish())
}

impl Parser {
    fn feed(&mut self, lineno: usize, line: &str) -> Result<()> {
        let value = line.trim();

        if value.starts_with('#') || value.starts_with(';') {
            return Ok(());
        }

        if value.is_empty() {
            if self.in_option {
                if let Some(entry) = self.current_mut().and_then(Section::last_mut) {
                    // Valueless entries ignore blank lines.
                    entry.push_continuation("");
                }
            }
            return Ok(());
        }

        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        if self.in_option && indent > self.indent_level {
            return self.continuation(lineno, value);
        }

        self.indent_level = indent;

        if let Some(header) = section_header(value) {
            self.open_section(lineno, header)?;
            self.in_option = false;
            return Ok(());
        }

        if self.target.is_none() {
            return Err(ConfigError::MissingSectionHeader {
                line: lineno,
                text: line.to_string(),
            });
        }

        self.option(lineno, line, value)
    }

    fn continuation(&mut self, lineno: usize, value: &str) -> Result<()> {
        let section_name = self.current_name();
        let Some(entry) = self.current_mut().and_then(Section::last_mut) else {
            return Ok(());
        };
        if !entry.push_continuation(value) {
            return Err(ConfigError::ContinuationWithoutValue {
                section: section_name,
                option: entry.key().to_string(),
                line: lineno,
            });
        }
        Ok(())
    }

    fn open_section(&mut self, lineno: usize, header: &str) -> Result<()> {
        if header == DEFAULT_SECTION {
            self.target = Some(Target::Defaults);
            return Ok(());
        }
        if self.doc.has_section(header) {
            return Err(ConfigError::DuplicateSection {
                section: header.to_string(),
                line: lineno,
            });
        }
        trace!(section = header, line = lineno, "section");
        self.doc.push_section(Section::new(header));
        self.target = Some(Target::Section(self.doc.sections().count() - 1));
        Ok(())
    }

    fn option(&mut self, lineno: usize, line: &str, value: &str) -> Result<()> {
        let (key, val) = match value.split_once('=') {
            Some((key, val)) => (key.trim_end(), Some(val.trim())),
            None => (value, None),
        };

        if key.is_empty() {
            return Err(ConfigError::Parse {
                line: lineno,
                text: line.to_string(),
            });
        }

        let section_name = self.current_name();
        let Some(section) = self.current_mut() else {
            return Ok(());
        };
        if section.contains(key) {
            return Err(ConfigError::DuplicateOption {
                section: section_name,
                option: key.to_string(),
                line: lineno,
            });
        }
        section.push(Entry::parsed(value, key, val));
        self.in_option = true;
        Ok(())
    }

    fn current_mut(&mut self) -> Option<&mut Section> {
        match self.target? {
            Target::Defaults => Some(self.doc.defaults_mut()),
            Target::Section(idx) => self.doc.sections_mut().nth(idx),
        }
    }

    fn current_name(&mut self) -> String {
        self.current_mut()
            .map(|s| s.name().to_string())
            .unwrap_or_default()
    }

    fn finish(mut self) -> Document {
        self.doc.defaults_mut().entries_mut().for_each(Entry::trim_value);
        for section in self.doc.sections_mut() {
            section.entries_mut().for_each(Entry::trim_value);
        }
        self.doc
    }
}

/// Header text of a `[name]` line: everything between the leading `[` and
/// the last `]`, at least one character.
fn section_header(value: &str) -> Option<&str> {
    let rest = value.strip_prefix('[')?;
    let end = rest.rfind(']')?;
    if end == 0 { None } else { Some(&rest[..end]) }
}
