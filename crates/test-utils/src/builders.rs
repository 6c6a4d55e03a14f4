#![allow(dead_code)]

use anyhow::Result;
use tempfile::NamedTempFile;

use iniconf::ConfigStore;

use crate::{temp_config, temp_store};

/// Builder for INI text to simplify test setup.
///
/// ```ignore
/// let text = IniBuilder::new()
///     .section("server")
///     .option("port", "8080")
///     .flag("verbose")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct IniBuilder {
    text: String,
}

impl IniBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a `[name]` section, separated from the previous one by a blank line.
    pub fn section(mut self, name: &str) -> Self {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(&format!("[{name}]\n"));
        self
    }

    /// `key = value`
    pub fn option(self, key: &str, value: &str) -> Self {
        self.line(&format!("{key} = {value}"))
    }

    /// A bare `key` with no value.
    pub fn flag(self, key: &str) -> Self {
        self.line(key)
    }

    /// Any line, written as given.
    pub fn line(mut self, raw: &str) -> Self {
        self.text.push_str(raw);
        self.text.push('\n');
        self
    }

    pub fn comment(self, text: &str) -> Self {
        self.line(&format!("# {text}"))
    }

    pub fn build(self) -> String {
        self.text
    }

    /// Write the text to a temporary file.
    pub fn write_temp(self) -> Result<NamedTempFile> {
        temp_config(&self.text)
    }

    /// Write the text to a temporary file and open it.
    pub fn open(self) -> Result<(NamedTempFile, ConfigStore)> {
        temp_store(&self.build())
    }
}
