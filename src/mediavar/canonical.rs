//! Canonical string form of a [`Recipe`].
//!
//! ```text
//! colorize+250,250,250|resize+250,250
//! ^op     ^args        ^next entry
//! ```
//!
//! Entries are sorted by operation name (byte order), arguments keep their given
//! order. The string is embedded in variant filenames, so none of the delimiters
//! may be a path separator.

use crate::error::{MediaError, Result};
use crate::recipe::{Arg, Recipe};

pub const ARG_SEPARATOR: char = ',';
pub const OP_ARGS_SEPARATOR: char = '+';
pub const ENTRY_SEPARATOR: char = '|';

/// Characters that may not appear in operation names or string arguments.
pub const RESERVED_CHARS: &[char] = &['/', '\\', OP_ARGS_SEPARATOR, ENTRY_SEPARATOR, ARG_SEPARATOR];

pub fn canonicalize(recipe: &Recipe) -> String {
    let mut out = String::new();
    for (i, (op, args)) in recipe.operations().enumerate() {
        if i > 0 {
            out.push(ENTRY_SEPARATOR);
        }
        out.push_str(op);
        out.push(OP_ARGS_SEPARATOR);
        for (j, arg) in args.iter().enumerate() {
            if j > 0 {
                out.push(ARG_SEPARATOR);
            }
            out.push_str(&arg.to_string());
        }
    }
    out
}

/// Inverse of [`canonicalize`]; the empty string is the empty recipe.
pub fn parse(canonical: &str) -> Result<Recipe> {
    let mut recipe = Recipe::new();
    if canonical.is_empty() {
        return Ok(recipe);
    }

    for entry in canonical.split(ENTRY_SEPARATOR) {
        let (op, args) = entry.split_once(OP_ARGS_SEPARATOR).ok_or_else(|| {
            MediaError::InvalidArgument(format!(
                "'{}' is missing the '{}' separator",
                entry, OP_ARGS_SEPARATOR
            ))
        })?;
        let args = if args.is_empty() {
            Vec::new()
        } else {
            args.split(ARG_SEPARATOR).map(Arg::parse_scalar).collect()
        };
        if recipe.get(op).is_some() {
            return Err(MediaError::InvalidArgument(format!(
                "operation '{}' appears twice",
                op
            )));
        }
        recipe.insert(op, args)?;
    }

    Ok(recipe)
}
