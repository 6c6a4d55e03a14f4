// src/errors.rs

//! Crate-wide error type.
//!
//! Every caller-visible failure goes through [`ConfigError`]. Validation
//! results have their own descriptor ([`ValidationFailure`]) but can be
//! lifted into `ConfigError::Validation` when one error channel is wanted.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::validate::ValidationFailure;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot locate config file: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No section: '{0}'")]
    NoSection(String),

    #[error("No option '{option}' in section: '{section}'")]
    NoOption { section: String, option: String },

    #[error("[{section}] {option}: invalid integer value '{value}'")]
    InvalidInteger {
        section: String,
        option: String,
        value: String,
    },

    #[error("[{section}] {option}: not a boolean: '{value}'")]
    InvalidBoolean {
        section: String,
        option: String,
        value: String,
    },

    #[error("Invalid section name: '{0}'")]
    InvalidSectionName(String),

    #[error("File contains no section headers (line {line}): '{text}'")]
    MissingSectionHeader { line: usize, text: String },

    #[error("Section '{section}' already exists (line {line})")]
    DuplicateSection { section: String, line: usize },

    #[error("Option '{option}' in section '{section}' already exists (line {line})")]
    DuplicateOption {
        section: String,
        option: String,
        line: usize,
    },

    #[error("Parse error on line {line}: '{text}'")]
    Parse { line: usize, text: String },

    #[error("Continuation of valueless option '{option}' in section '{section}' (line {line})")]
    ContinuationWithoutValue {
        section: String,
        option: String,
        line: usize,
    },

    #[error("[{section}] {option}: bad interpolation syntax: {detail}")]
    InterpolationSyntax {
        section: String,
        option: String,
        detail: String,
    },

    #[error("[{section}] {option}: interpolation references missing option '{reference}'")]
    InterpolationMissingOption {
        section: String,
        option: String,
        reference: String,
    },

    #[error("[{section}] {option}: interpolation nested too deeply")]
    InterpolationDepth { section: String, option: String },

    #[error("TOML parsing error: {0}")]
    Schema(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

impl ConfigError {
    /// Numeric status code carried alongside the message.
    ///
    /// Only a missing config file has a non-zero code (2, like `ENOENT`).
    pub fn code(&self) -> i32 {
        match self {
            ConfigError::FileNotFound(_) => 2,
            _ => 0,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_has_code_two() {
        let e = ConfigError::FileNotFound(PathBuf::from("/etc/missing.ini"));
        assert_eq!(e.code(), 2);
        assert!(e.to_string().contains("/etc/missing.ini"));
    }

    #[test]
    fn other_errors_default_to_zero() {
        let e = ConfigError::NoSection("main".into());
        assert_eq!(e.code(), 0);
        assert!(e.to_string().contains("main"));
    }

    #[test]
    fn anyhow_converts_to_io() {
        let e: ConfigError = anyhow::anyhow!("disk full").into();
        assert!(matches!(e, ConfigError::Io(_)));
        assert_eq!(e.to_string(), "disk full");
    }
}
