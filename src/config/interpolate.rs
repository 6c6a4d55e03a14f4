// src/config/interpolate.rs

//! `%(name)s` value interpolation.
//!
//! References are resolved against the value's own section, then
//! `[DEFAULT]`. `%%` is a literal percent sign. Anything else following a
//! `%` is a syntax error.

use crate::config::model::Document;
use crate::errors::{ConfigError, Result};

/// Nesting limit for references that expand to further references.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

struct Context<'a> {
    doc: &'a Document,
    section: &'a str,
    option: &'a str,
}

/// Expand all references in `raw`, the value of `option` in `section`.
pub fn interpolate(doc: &Document, section: &str, option: &str, raw: &str) -> Result<String> {
    let ctx = Context {
        doc,
        section,
        option,
    };
    let mut out = String::with_capacity(raw.len());
    expand(&ctx, &mut out, raw, 1)?;
    Ok(out)
}

fn expand(ctx: &Context<'_>, out: &mut String, mut rest: &str, depth: usize) -> Result<()> {
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(ConfigError::InterpolationDepth {
            section: ctx.section.to_string(),
            option: ctx.option.to_string(),
        });
    }

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(after) = rest.strip_prefix("%%") {
            out.push('%');
            rest = after;
            continue;
        }

        if !rest.starts_with("%(") {
            return Err(syntax_error(
                ctx,
                format!("'%' must be followed by '%' or '(', found: {rest:?}"),
            ));
        }

        let Some((name, after)) = reference(rest) else {
            return Err(syntax_error(
                ctx,
                format!("bad interpolation variable reference {rest:?}"),
            ));
        };
        rest = after;

        let value = lookup(ctx, name)?;
        if value.contains('%') {
            expand(ctx, out, value, depth + 1)?;
        } else {
            out.push_str(value);
        }
    }

    out.push_str(rest);
    Ok(())
}

fn lookup<'a>(ctx: &Context<'a>, name: &str) -> Result<&'a str> {
    match ctx.doc.resolve(ctx.section, name) {
        Ok(entry) => Ok(entry.value().unwrap_or("")),
        Err(_) => Err(ConfigError::InterpolationMissingOption {
            section: ctx.section.to_string(),
            option: ctx.option.to_string(),
            reference: name.to_string(),
        }),
    }
}

fn syntax_error(ctx: &Context<'_>, detail: String) -> ConfigError {
    ConfigError::InterpolationSyntax {
        section: ctx.section.to_string(),
        option: ctx.option.to_string(),
        detail,
    }
}

/// Split `%(name)s...` into `name` and the remainder.
fn reference(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_prefix("%(")?;
    let close = body.find(')')?;
    if close == 0 {
        return None;
    }
    let after = body[close + 1..].strip_prefix('s')?;
    Some((&body[..close], after))
}

/// Check that a value about to be stored only uses valid `%` syntax.
///
/// Returns the byte offset of the first stray `%` on failure.
pub fn check_syntax(value: &str) -> std::result::Result<(), usize> {
    let mut rest = value;
    while let Some(pos) = rest.find('%') {
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("%%") {
            rest = after;
            continue;
        }
        match reference(tail) {
            Some((_, after)) => rest = after,
            None => return Err(value.len() - tail.len()),
        }
    }
    Ok(())
}
