// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod store;
pub mod types;

pub use errors::{ConfigError, Result};
pub use store::ConfigStore;
pub use types::ExpectedType;

use tracing::info;

use crate::cli::{CliArgs, Command, ValueKind};
use crate::config::{Requirements, load_requirements};
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// Opens the config named by `--config` and runs one command against it.
/// Command output goes to stdout.
pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let mut store = ConfigStore::open(&args.config)?;

    match args.command {
        Command::Validate { schema, require } => {
            let mut requirements = match schema {
                Some(path) => load_requirements(&RealFileSystem, &path)?,
                None => Requirements::new(),
            };
            for spec in require {
                requirements.add(spec.section, spec.option);
            }
            store
                .validate(&requirements)
                .map_err(ConfigError::from)?;
            info!(path = %store.path().display(), "config is valid");
            println!("{}: ok", store.path().display());
        }
        Command::Get {
            section,
            option,
            kind,
        } => match kind {
            ValueKind::String => println!("{}", store.get_string(&section, &option)?),
            ValueKind::Int => println!("{}", store.get_integer(&section, &option)?),
            ValueKind::Bool => println!("{}", store.get_boolean(&section, &option)?),
        },
        Command::List { section } => {
            for line in store.get_list(&section)? {
                println!("{line}");
            }
        }
        Command::Options { section } => {
            for name in store.options(&section)? {
                println!("{name}");
            }
        }
        Command::Sections => {
            for name in store.sections() {
                println!("{name}");
            }
        }
        Command::Set {
            section,
            items,
            replace,
        } => {
            let pairs = items.into_iter().map(|kv| (kv.key, kv.value));
            if replace {
                store.replace_section(&section, pairs)?;
            } else {
                store.merge_section(&section, pairs)?;
            }
            store.save()?;
            info!(path = %store.path().display(), section = %section, replace, "updated config");
        }
    }

    Ok(())
}
