// src/config/mod.rs

//! INI document model, parsing and validation.
//!
//! Responsibilities:
//! - Hold a parsed file as sections of entries (`model.rs`).
//! - Parse and render INI text (`parser.rs`, `writer.rs`).
//! - Expand `%(name)s` references (`interpolate.rs`).
//! - Convert values to integers and booleans (`coerce.rs`).
//! - Check required sections/options (`validate.rs`).
//! - Read files through the [`crate::fs::FileSystem`] seam (`loader.rs`).

pub mod coerce;
pub mod interpolate;
pub mod loader;
pub mod model;
pub mod parser;
pub mod validate;
pub mod writer;

pub use loader::{load_from_path, load_requirements};
pub use model::{DEFAULT_SECTION, Document, Entry, Section};
pub use parser::parse;
pub use validate::{OptionRequirement, Requirements, SectionRequirement, ValidationFailure};
pub use writer::render;
