// src/config/coerce.rs

//! String → typed value conversions used by the accessors and validation.

const TRUE_ALIASES: [&str; 6] = ["TRUE", "T", "YES", "Y", "ON", "1"];
const FALSE_ALIASES: [&str; 6] = ["FALSE", "F", "NO", "N", "OFF", "0"];

/// Whether `value` is a base-10 integer literal, of any magnitude.
///
/// Accepts surrounding whitespace, an optional sign, leading zeros and
/// single underscores between digits (`"1_000"`).
pub fn is_int_literal(value: &str) -> bool {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);

    !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c.is_ascii_digit() || c == '_')
}

/// Parse a base-10 integer literal (see [`is_int_literal`]) into an `i64`.
///
/// `None` for malformed input and for values outside the `i64` range.
pub fn parse_int(value: &str) -> Option<i64> {
    if !is_int_literal(value) {
        return None;
    }
    let cleaned: String = value.trim().chars().filter(|c| *c != '_').collect();
    cleaned.parse().ok()
}

/// Lenient boolean: the usual yes/no/on/off/1/0 spellings, any case.
pub fn parse_bool(value: &str) -> Option<bool> {
    let upper = value.to_uppercase();
    if TRUE_ALIASES.contains(&upper.as_str()) {
        Some(true)
    } else if FALSE_ALIASES.contains(&upper.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Strict boolean check used by validation: `true` or `false`, any case.
pub fn is_strict_bool(value: &str) -> bool {
    matches!(value.to_uppercase().as_str(), "TRUE" | "FALSE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(parse_int("042"), Some(42));
        assert_eq!(parse_int(" -7 "), Some(-7));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("1_000"), Some(1000));
        assert_eq!(parse_int("1__0"), None);
        assert_eq!(parse_int("_1"), None);
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int("0x10"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn integer_literals_have_no_size_limit() {
        assert!(is_int_literal("99999999999999999999"));
        assert!(is_int_literal("-1_000_000_000_000_000_000_000"));
        assert!(!is_int_literal("1__0"));
        assert!(!is_int_literal("+"));
        assert!(!is_int_literal("12a"));
    }

    #[test]
    fn lenient_booleans() {
        for v in ["true", "T", "Yes", "y", "ON", "1"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["False", "f", "NO", "n", "off", "0"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        for v in ["2", "", "enabled", " yes"] {
            assert_eq!(parse_bool(v), None, "{v}");
        }
    }

    #[test]
    fn strict_booleans() {
        assert!(is_strict_bool("TRUE"));
        assert!(is_strict_bool("false"));
        assert!(!is_strict_bool("yes"));
        assert!(!is_strict_bool("1"));
    }
}
