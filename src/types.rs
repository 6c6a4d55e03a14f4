use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Type an option value must have to pass validation.
///
/// - `Bool`: the value is `true` or `false` (any case), nothing else.
/// - `Int`: the value parses as a base-10 integer.
/// - `Untyped`: only the option's presence is checked.
///
/// Schema files and `--require` accept the same spellings (see `FromStr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ExpectedType {
    Bool,
    Int,
    #[default]
    Untyped,
}

impl FromStr for ExpectedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bool" | "boolean" => Ok(ExpectedType::Bool),
            "int" | "integer" => Ok(ExpectedType::Int),
            "" | "untyped" | "str" | "string" | "any" => Ok(ExpectedType::Untyped),
            other => Err(format!(
                "invalid option type: {other} (expected \"bool\", \"int\" or \"untyped\")"
            )),
        }
    }
}

impl TryFrom<String> for ExpectedType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Renders the name used in validation failure descriptors.
impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpectedType::Bool => "boolean",
            ExpectedType::Int => "integer",
            ExpectedType::Untyped => "untyped",
        };
        f.write_str(name)
    }
}
