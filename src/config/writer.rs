// src/config/writer.rs

use std::fmt::Write;

use crate::config::model::{Document, Section};

/// Render a document as INI text.
///
/// `[DEFAULT]` comes first when it has entries. Each option is written as
/// `key = value` (or a bare `key`), multi-line values continue on lines
/// indented with a tab, and every section is followed by a blank line.
/// Values are written uninterpolated.
pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    if !doc.defaults().is_empty() {
        write_section(&mut out, doc.defaults());
    }
    for section in doc.sections() {
        write_section(&mut out, section);
    }
    out
}

fn write_section(out: &mut String, section: &Section) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "[{}]", section.name());
    for entry in section.entries() {
        match entry.value() {
            Some(value) => {
                let _ = writeln!(out, "{} = {}", entry.key(), value.replace('\n', "\n\t"));
            }
            None => {
                let _ = writeln!(out, "{}", entry.key());
            }
        }
    }
    out.push('\n');
}
