// src/store.rs

//! [`ConfigStore`]: one INI file loaded into memory.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::coerce::{parse_bool, parse_int};
use crate::config::interpolate::{check_syntax, interpolate};
use crate::config::model::{DEFAULT_SECTION, Document};
use crate::config::validate::{Requirements, ValidationFailure, validate};
use crate::config::{load_from_path, render};
use crate::errors::{ConfigError, Result};
use crate::fs::{FileSystem, RealFileSystem};

/// An INI file loaded into memory.
///
/// The file is read once by [`ConfigStore::open`]; later changes on disk are
/// not seen. Mutations stay in memory until [`ConfigStore::save`].
///
/// Every option line is available two ways: keyed (`get_*`, `options`,
/// `has_option`) and as a raw line (`get_list`). Both read the same entries.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: Document,
    fs: Arc<dyn FileSystem>,
}

impl ConfigStore {
    /// Load the file at `path` from the real filesystem.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(Arc::new(RealFileSystem), path)
    }

    /// Load the file at `path` through `fs`.
    pub fn open_with(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = load_from_path(fs.as_ref(), &path)?;
        Ok(Self { path, document, fs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check required sections, options and option types.
    ///
    /// Returns the first failure; see [`validate`] for the rules.
    pub fn validate(&self, requirements: &Requirements) -> std::result::Result<(), ValidationFailure> {
        validate(self, requirements)
    }

    /// Section names in file order, without `DEFAULT`.
    pub fn sections(&self) -> Vec<&str> {
        self.document.sections().map(|s| s.name()).collect()
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.document.has_section(section)
    }

    /// Every option line of `section` as written, one item per line.
    pub fn get_list(&self, section: &str) -> Result<Vec<String>> {
        let lines = self.document.raw_lines(section)?;
        Ok(lines.into_iter().map(str::to_string).collect())
    }

    /// Value of `option` without `%(name)s` expansion; `None` when valueless.
    pub fn get_raw(&self, section: &str, option: &str) -> Result<Option<String>> {
        let entry = self.document.resolve(section, option)?;
        Ok(entry.value().map(str::to_string))
    }

    /// Value of `option`, interpolated; an option without value reads as `""`.
    pub fn get_string(&self, section: &str, option: &str) -> Result<String> {
        let entry = self.document.resolve(section, option)?;
        match entry.value() {
            Some(raw) => interpolate(&self.document, section, option, raw),
            None => Ok(String::new()),
        }
    }

    pub fn get_integer(&self, section: &str, option: &str) -> Result<i64> {
        let value = self.get_string(section, option)?;
        parse_int(&value).ok_or_else(|| ConfigError::InvalidInteger {
            section: section.to_string(),
            option: option.to_string(),
            value,
        })
    }

    /// Boolean value of `option`.
    ///
    /// `true/t/yes/y/on/1` and `false/f/no/n/off/0`, any case.
    pub fn get_boolean(&self, section: &str, option: &str) -> Result<bool> {
        let value = self.get_string(section, option)?;
        parse_bool(&value).ok_or_else(|| ConfigError::InvalidBoolean {
            section: section.to_string(),
            option: option.to_string(),
            value,
        })
    }

    /// Whether `option` is set in `section` or inherited from `DEFAULT`.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.document.has_option(section, option)
    }

    /// Option names of `section`, own options first, then inherited ones.
    pub fn options(&self, section: &str) -> Result<Vec<String>> {
        let names = self.document.options(section)?;
        Ok(names.into_iter().map(str::to_string).collect())
    }

    /// Drop `section` and recreate it holding only `items`.
    pub fn replace_section<I, K, V>(&mut self, section: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        if section == DEFAULT_SECTION {
            return Err(ConfigError::InvalidSectionName(section.to_string()));
        }
        let items = prepare(section, items)?;

        let existed = self.document.remove_section(section);
        self.document.ensure_section(section);
        debug!(section, existed, items = items.len(), "replacing section");
        self.apply(section, items);
        Ok(())
    }

    /// Set each of `items` in `section`, creating the section if needed.
    ///
    /// Values are stored as their `Display` text. Options not in `items`
    /// are left alone. Nothing is changed if any value has invalid `%`
    /// syntax.
    pub fn merge_section<I, K, V>(&mut self, section: &str, items: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Display,
    {
        let items = prepare(section, items)?;
        debug!(section, items = items.len(), "merging section");
        self.apply(section, items);
        Ok(())
    }

    fn apply(&mut self, section: &str, items: Vec<(String, String)>) {
        let target = self.document.ensure_section(section);
        for (key, value) in items {
            target.set(&key, value);
        }
    }

    /// Overwrite the backing file with the current contents.
    ///
    /// The file is rewritten in place; a failed write may leave it truncated.
    pub fn save(&self) -> Result<()> {
        let text = render(&self.document);
        self.fs.write(&self.path, text.as_bytes())?;
        debug!(path = %self.path.display(), bytes = text.len(), "saved config");
        Ok(())
    }
}

/// Stringify `items` and check their `%` syntax before anything is applied.
fn prepare<I, K, V>(section: &str, items: I) -> Result<Vec<(String, String)>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Display,
{
    items
        .into_iter()
        .map(|(key, value)| {
            let key = key.into();
            let value = value.to_string();
            match check_syntax(&value) {
                Ok(()) => Ok((key, value)),
                Err(pos) => Err(ConfigError::InterpolationSyntax {
                    section: section.to_string(),
                    option: key,
                    detail: format!("invalid interpolation syntax in {value:?} at position {pos}"),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn store(text: &str) -> (MockFileSystem, ConfigStore) {
        let fs = MockFileSystem::new();
        fs.add_file("/etc/app.ini", text);
        let store = ConfigStore::open_with(Arc::new(fs.clone()), "/etc/app.ini").unwrap();
        (fs, store)
    }

    #[test]
    fn merge_updates_in_place_and_appends() {
        let (_, mut s) = store("[S]\na = 0\nb = x\n");
        s.merge_section("S", [("a", "1"), ("c", "new")]).unwrap();
        assert_eq!(s.options("S").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(s.get_string("S", "a").unwrap(), "1");
        assert_eq!(s.get_list("S").unwrap(), vec!["a = 1", "b = x", "c = new"]);
    }

    #[test]
    fn merge_is_all_or_nothing() {
        let (_, mut s) = store("[S]\na = 0\n");
        let err = s.merge_section("S", [("a", "1"), ("b", "50%")]).unwrap_err();
        assert!(matches!(err, ConfigError::InterpolationSyntax { .. }));
        assert_eq!(s.get_string("S", "a").unwrap(), "0");
        assert!(!s.has_option("S", "b"));
    }

    #[test]
    fn replace_rejects_default() {
        let (_, mut s) = store("[S]\na = 0\n");
        let err = s.replace_section("DEFAULT", [("a", 1)]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSectionName(_)));
    }

    #[test]
    fn merge_into_default_is_inherited() {
        let (_, mut s) = store("[S]\na = 0\n");
        s.merge_section("DEFAULT", [("shared", true)]).unwrap();
        assert!(s.get_boolean("S", "shared").unwrap());
        assert!(!s.has_section("DEFAULT"));
    }

    #[test]
    fn save_writes_through_the_filesystem() {
        let (fs, mut s) = store("; comment\n[S]\na=0\n");
        s.merge_section("S", [("b", 2)]).unwrap();
        s.save().unwrap();
        assert_eq!(fs.contents("/etc/app.ini").unwrap(), "[S]\na = 0\nb = 2\n\n");
    }
}
