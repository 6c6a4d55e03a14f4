// src/config/validate.rs

use serde::Deserialize;
use thiserror::Error;

use crate::config::coerce::{is_int_literal, is_strict_bool};
use crate::errors::Result;
use crate::store::ConfigStore;
use crate::types::ExpectedType;

/// Sections (and optionally options) a config file must provide.
///
/// Order matters: checks run in insertion order and stop at the first
/// failure. Can be built in code or read from TOML:
///
/// ```toml
/// [[section]]
/// name = "general"
/// options = [{ name = "count", type = "int" }, { name = "enabled", type = "bool" }]
///
/// [[section]]
/// name = "possibly_empty"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Requirements {
    #[serde(default, rename = "section")]
    sections: Vec<SectionRequirement>,
}

/// One required section. `options: None` only checks that the section exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionRequirement {
    pub name: String,
    #[serde(default)]
    pub options: Option<Vec<OptionRequirement>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptionRequirement {
    pub name: String,
    #[serde(default, rename = "type")]
    pub expected: ExpectedType,
}

impl OptionRequirement {
    pub fn new(name: impl Into<String>, expected: ExpectedType) -> Self {
        Self {
            name: name.into(),
            expected,
        }
    }
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Require `section` to exist.
    pub fn section(mut self, name: impl Into<String>) -> Self {
        self.add(name, None);
        self
    }

    /// Require `section` and each `(option, type)` in it.
    pub fn options<I, S>(mut self, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = (S, ExpectedType)>,
        S: Into<String>,
    {
        let name = name.into();
        self.add(name.clone(), None);
        for (option, expected) in options {
            self.add(name.clone(), Some(OptionRequirement::new(option, expected)));
        }
        self
    }

    /// Append a requirement, folding it into an existing entry for the same section.
    pub fn add(&mut self, section: impl Into<String>, option: Option<OptionRequirement>) {
        let section = section.into();
        let idx = match self.sections.iter().position(|s| s.name == section) {
            Some(idx) => idx,
            None => {
                self.sections.push(SectionRequirement {
                    name: section,
                    options: None,
                });
                self.sections.len() - 1
            }
        };
        if let Some(option) = option {
            self.sections[idx]
                .options
                .get_or_insert_with(Vec::new)
                .push(option);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionRequirement> {
        self.sections.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// First requirement a config file failed.
///
/// Read as the triple `(section, option, expected)`: a missing section has
/// neither option nor type, a missing option has no type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("missing section [{section}]")]
    MissingSection { section: String },

    #[error("missing option '{option}' in section [{section}]")]
    MissingOption { section: String, option: String },

    #[error("option '{option}' in section [{section}] must be {expected}")]
    TypeMismatch {
        section: String,
        option: String,
        expected: ExpectedType,
    },
}

impl ValidationFailure {
    pub fn section(&self) -> &str {
        match self {
            ValidationFailure::MissingSection { section }
            | ValidationFailure::MissingOption { section, .. }
            | ValidationFailure::TypeMismatch { section, .. } => section,
        }
    }

    pub fn option(&self) -> Option<&str> {
        match self {
            ValidationFailure::MissingSection { .. } => None,
            ValidationFailure::MissingOption { option, .. }
            | ValidationFailure::TypeMismatch { option, .. } => Some(option),
        }
    }

    pub fn expected(&self) -> Option<ExpectedType> {
        match self {
            ValidationFailure::TypeMismatch { expected, .. } => Some(*expected),
            _ => None,
        }
    }

    /// The failure as `(section, option, expected type name)`.
    pub fn descriptor(&self) -> (&str, Option<&str>, Option<String>) {
        (
            self.section(),
            self.option(),
            self.expected().map(|t| t.to_string()),
        )
    }
}

/// Check `store` against `requirements`, stopping at the first failure.
///
/// The boolean check is narrower than
/// [`ConfigStore::get_boolean`]: only `true`/`false` (any case) pass here.
/// The integer check is wider than [`ConfigStore::get_integer`]: any
/// base-10 literal passes, whatever its magnitude.
pub fn validate(
    store: &ConfigStore,
    requirements: &Requirements,
) -> std::result::Result<(), ValidationFailure> {
    for req in requirements.iter() {
        if !store.has_section(&req.name) {
            return Err(ValidationFailure::MissingSection {
                section: req.name.clone(),
            });
        }

        let Some(options) = req.options.as_ref() else {
            continue;
        };

        for opt in options.iter().filter(|o| !o.name.is_empty()) {
            if !store.has_option(&req.name, &opt.name) {
                return Err(ValidationFailure::MissingOption {
                    section: req.name.clone(),
                    option: opt.name.clone(),
                });
            }

            let ok = match opt.expected {
                ExpectedType::Untyped => true,
                ExpectedType::Bool => store
                    .get_string(&req.name, &opt.name)
                    .is_ok_and(|v| is_strict_bool(&v)),
                ExpectedType::Int => store
                    .get_string(&req.name, &opt.name)
                    .is_ok_and(|v| is_int_literal(&v)),
            };

            if !ok {
                return Err(ValidationFailure::TypeMismatch {
                    section: req.name.clone(),
                    option: opt.name.clone(),
                    expected: opt.expected,
                });
            }
        }
    }

    Ok(())
}
