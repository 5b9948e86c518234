//! SNBT, the textual surface of NBT used by commands and data packs.
//!
//! The syntax looks like relaxed JSON with typed numeric suffixes
//! (`1b`, `2s`, `3l`, `4.5f`), typed array literals (`[B;1b,2b]`,
//! `[I;1,2]`, `[L;1l,2l]`), single- or double-quoted strings, and bare
//! words for simple strings and keys:
//!
//! ```
//! use polynbt::{nbt, snbt};
//!
//! let v = snbt::from_snbt("{id: \"minecraft:bat\", Health: 6.0f}").unwrap();
//! assert_eq!(v, nbt!({"id": "minecraft:bat", "Health": 6.0f32}));
//!
//! assert_eq!(snbt::to_snbt(&v), r#"{id:"minecraft:bat",Health:6.0f}"#);
//! ```
//!
//! `true` and `false` parse to Byte 1 and 0; the formatter never produces
//! them. Parsing is strict about structure (no trailing separators, no
//! text after the root value) but, like the game, permissive about what a
//! bare word may turn out to be: anything that fails the numeric and
//! boolean patterns is a string.

mod parser;
mod ser;

use crate::error::Result;
use crate::Value;

/// Parse a single SNBT value from a string. The whole input must be
/// consumed; trailing non-whitespace is an error.
pub fn from_snbt(input: &str) -> Result<Value> {
    parser::parse_root(input)
}

/// Format a value as compact SNBT with no whitespace.
pub fn to_snbt(value: &Value) -> String {
    let mut out = String::new();
    ser::write_value(&mut out, value, "", 0);
    out
}

/// Format a value as indented SNBT. `space` is the indentation unit, e.g.
/// `"  "` or `"\t"`; compounds and lists of nested containers break onto
/// one line per entry, while lists of scalars stay on a single line.
pub fn to_snbt_pretty(value: &Value, space: &str) -> String {
    let mut out = String::new();
    ser::write_value(&mut out, value, space, 0);
    out
}

/// Characters that may appear in an unquoted string or key.
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}
