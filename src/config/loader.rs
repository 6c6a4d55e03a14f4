// src/config/loader.rs

use std::path::Path;

use tracing::debug;

use crate::config::model::Document;
use crate::config::parser::parse;
use crate::config::validate::Requirements;
use crate::errors::{ConfigError, Result};
use crate::fs::FileSystem;

/// Read and parse the INI file at `path`.
///
/// A path that is not an existing file yields [`ConfigError::FileNotFound`]
/// carrying the absolute form of the path.
pub fn load_from_path(fs: &dyn FileSystem, path: &Path) -> Result<Document> {
    if !fs.is_file(path) {
        let absolute = fs.absolute(path).unwrap_or_else(|_| path.to_path_buf());
        return Err(ConfigError::FileNotFound(absolute));
    }

    let contents = fs.read_to_string(path)?;
    let doc = parse(&contents)?;

    debug!(
        path = %path.display(),
        sections = doc.sections().count(),
        "loaded config"
    );
    Ok(doc)
}

/// Read a TOML requirements file for [`crate::ConfigStore::validate`].
pub fn load_requirements(fs: &dyn FileSystem, path: &Path) -> Result<Requirements> {
    let contents = fs.read_to_string(path)?;
    Requirements::from_toml_str(&contents)
}
