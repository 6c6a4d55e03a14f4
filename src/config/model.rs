// src/config/model.rs

use crate::errors::{ConfigError, Result};

/// Name of the section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// One option line of a section.
///
/// Each entry keeps both readings of its line:
///
/// ```ini
/// [paths]
/// root = /srv/app
/// /var/log/app.log
/// ```
///
/// - `root = /srv/app`: raw `"root = /srv/app"`, key `"root"`, value `Some("/srv/app")`
/// - `/var/log/app.log`: raw `"/var/log/app.log"`, key the same, value `None`
///
/// `raw` backs [`Document::raw_lines`] (list-style sections); `key`/`value`
/// back every keyed lookup. Updating the value re-renders `raw`, so the two
/// readings cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    raw: String,
    key: String,
    value: Option<String>,
}

impl Entry {
    /// Entry as read from a file line.
    pub(crate) fn parsed(raw: &str, key: &str, value: Option<&str>) -> Self {
        Self {
            raw: raw.to_string(),
            key: key.to_string(),
            value: value.map(str::to_string),
        }
    }

    /// Entry created in memory; the raw line is rendered from key and value.
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        let key = key.into();
        let raw = render_raw(&key, value.as_deref());
        Self { raw, key, value }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw (uninterpolated) value; `None` for a line without `=`.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.raw = render_raw(&self.key, Some(&value));
        self.value = Some(value);
    }

    /// Append a continuation line. Returns `false` for a valueless entry.
    pub(crate) fn push_continuation(&mut self, line: &str) -> bool {
        match self.value.as_mut() {
            Some(value) => {
                value.push('\n');
                value.push_str(line);
                true
            }
            None => false,
        }
    }

    /// Drop trailing blank continuation lines.
    pub(crate) fn trim_value(&mut self) {
        if let Some(value) = self.value.as_mut() {
            let len = value.trim_end().len();
            value.truncate(len);
        }
    }
}

fn render_raw(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => {
            let first_line = value.lines().next().unwrap_or("");
            format!("{key} = {first_line}").trim_end().to_string()
        }
        None => key.to_string(),
    }
}

/// A named, ordered group of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Update `key` in place, or append it when new.
    pub fn set(&mut self, key: &str, value: String) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.set_value(value),
            None => self.entries.push(Entry::new(key, Some(value))),
        }
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Entry> {
        self.entries.last_mut()
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.entries.iter_mut()
    }
}

/// Parsed contents of one INI file: the `[DEFAULT]` section plus all other
/// sections in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    defaults: Section,
    sections: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            defaults: Section::new(DEFAULT_SECTION),
            sections: Vec::new(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// All sections except `[DEFAULT]`, in order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Like [`Document::section`] but also resolves `DEFAULT`.
    fn addressable(&self, name: &str) -> Result<&Section> {
        if name == DEFAULT_SECTION {
            return Ok(&self.defaults);
        }
        self.section(name)
            .ok_or_else(|| ConfigError::NoSection(name.to_string()))
    }

    /// Find `option` in `section`, falling back to `[DEFAULT]`.
    pub fn resolve(&self, section: &str, option: &str) -> Result<&Entry> {
        let sect = self.addressable(section)?;
        sect.get(option)
            .or_else(|| self.defaults.get(option))
            .ok_or_else(|| ConfigError::NoOption {
                section: section.to_string(),
                option: option.to_string(),
            })
    }

    /// Option names of `section`: its own first, then inherited ones.
    pub fn options(&self, section: &str) -> Result<Vec<&str>> {
        let sect = self
            .section(section)
            .ok_or_else(|| ConfigError::NoSection(section.to_string()))?;
        let mut names: Vec<&str> = sect.keys().collect();
        names.extend(self.defaults.keys().filter(|k| !sect.contains(k)));
        Ok(names)
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        if section.is_empty() || section == DEFAULT_SECTION {
            return self.defaults.contains(option);
        }
        match self.section(section) {
            Some(sect) => sect.contains(option) || self.defaults.contains(option),
            None => false,
        }
    }

    /// Raw lines of `section`, inherited `[DEFAULT]` lines first.
    pub fn raw_lines(&self, section: &str) -> Result<Vec<&str>> {
        let sect = self.addressable(section)?;
        let mut lines: Vec<&str> = Vec::new();
        if section != DEFAULT_SECTION {
            lines.extend(self.defaults.entries().iter().map(Entry::raw));
        }
        for raw in sect.entries().iter().map(Entry::raw) {
            if !lines.contains(&raw) {
                lines.push(raw);
            }
        }
        Ok(lines)
    }

    /// Remove `name`. `[DEFAULT]` cannot be removed; returns whether a section existed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != name);
        self.sections.len() != before
    }

    /// Mutable access to `name`, appending an empty section when absent.
    pub fn ensure_section(&mut self, name: &str) -> &mut Section {
        if name == DEFAULT_SECTION {
            return &mut self.defaults;
        }
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    pub(crate) fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub(crate) fn defaults_mut(&mut self) -> &mut Section {
        &mut self.defaults
    }

    pub(crate) fn sections_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.sections.iter_mut()
    }
}
