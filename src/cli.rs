// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::OptionRequirement;
use crate::types::ExpectedType;

/// Command-line arguments for `iniconf`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "iniconf",
    version,
    about = "Inspect, validate and edit INI-style config files.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (INI).
    #[arg(long, short, value_name = "PATH", default_value = "config.ini")]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `INICONF_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check required sections and options; exits non-zero on the first failure.
    Validate {
        /// TOML file listing the required sections and options.
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,

        /// Extra requirement. Repeatable.
        ///
        /// Options of a section the schema already names are checked with
        /// that section, after its schema options; new sections come last.
        #[arg(long, value_name = "SECTION[:OPTION[:TYPE]]")]
        require: Vec<RequireSpec>,
    },

    /// Print one option value.
    Get {
        section: String,
        option: String,

        /// How to read the value.
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },

    /// Print every line of a section as written.
    List { section: String },

    /// Print the option names of a section.
    Options { section: String },

    /// Print the section names.
    Sections,

    /// Set options in a section and save the file.
    Set {
        section: String,

        #[arg(value_name = "KEY=VALUE", required = true)]
        items: Vec<KeyValue>,

        /// Replace the whole section instead of merging into it.
        #[arg(long)]
        replace: bool,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Int,
    Bool,
}

/// `SECTION`, `SECTION:OPTION` or `SECTION:OPTION:TYPE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequireSpec {
    pub section: String,
    pub option: Option<OptionRequirement>,
}

impl FromStr for RequireSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let section = parts.next().unwrap_or_default();
        if section.is_empty() {
            return Err(format!("missing section name in requirement {s:?}"));
        }
        let option = match parts.next() {
            Some(name) if !name.is_empty() => {
                let expected = match parts.next() {
                    Some(kind) => kind.parse::<ExpectedType>()?,
                    None => ExpectedType::Untyped,
                };
                Some(OptionRequirement::new(name, expected))
            }
            _ => None,
        };
        Ok(Self {
            section: section.to_string(),
            option,
        })
    }
}

/// A `KEY=VALUE` pair from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl FromStr for KeyValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(Self {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            }),
            _ => Err(format!("expected KEY=VALUE, got {s:?}")),
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_spec_forms() {
        let spec: RequireSpec = "general".parse().unwrap();
        assert_eq!(spec.option, None);

        let spec: RequireSpec = "general:count:int".parse().unwrap();
        assert_eq!(spec.section, "general");
        assert_eq!(
            spec.option,
            Some(OptionRequirement::new("count", ExpectedType::Int))
        );

        let spec: RequireSpec = "general:name".parse().unwrap();
        assert_eq!(
            spec.option,
            Some(OptionRequirement::new("name", ExpectedType::Untyped))
        );

        assert!(":x".parse::<RequireSpec>().is_err());
        assert!("s:x:float".parse::<RequireSpec>().is_err());
    }

    #[test]
    fn key_value_splits_on_first_equals() {
        let kv: KeyValue = "url = http://h/?a=b".parse().unwrap();
        assert_eq!(kv.key, "url");
        assert_eq!(kv.value, "http://h/?a=b");
        assert!("novalue".parse::<KeyValue>().is_err());
        assert!("=x".parse::<KeyValue>().is_err());
    }

    #[test]
    fn parses_set_command() {
        let args = CliArgs::try_parse_from([
            "iniconf", "--config", "app.ini", "set", "db", "port=5432", "--replace",
        ])
        .unwrap();
        match args.command {
            Command::Set {
                section,
                items,
                replace,
            } => {
                assert_eq!(section, "db");
                assert_eq!(items.len(), 1);
                assert!(replace);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
