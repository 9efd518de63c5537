//! The fixed SQL dialect used for compilation.
//!
//! Identifiers are quoted with backticks, string literals with single quotes,
//! and variables are embedded as `??{name}??` markers that a database adapter
//! rewrites into its native placeholder syntax.

/// The identifier quote character.
pub const IDENTIFIER_QUOTE: char = '`';

/// The string literal quote character.
pub const STRING_QUOTE: char = '\'';

/// The "all columns" marker, never quoted.
pub const WILDCARD: &str = "*";

/// Opening delimiter of a variable marker.
pub const VARIABLE_OPEN: &str = "??{";

/// Closing delimiter of a variable marker.
pub const VARIABLE_CLOSE: &str = "}??";

/// Quotes an identifier with backticks.
///
/// The wildcard `*` is returned as is.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    if name == WILDCARD {
        return String::from(WILDCARD);
    }
    let q = IDENTIFIER_QUOTE;
    format!("{q}{name}{q}")
}

/// Quotes a list of identifiers and joins them with `, `.
#[must_use]
pub fn quote_identifier_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|n| quote_identifier(n.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wraps a string in single quotes.
///
/// No escaping is performed: embedded quotes are emitted verbatim. Untrusted
/// values should be passed as variables instead.
#[must_use]
pub fn quote_string(value: &str) -> String {
    let q = STRING_QUOTE;
    format!("{q}{value}{q}")
}

/// Renders a variable marker for `name`.
#[must_use]
pub fn variable_marker(name: &str) -> String {
    format!("{VARIABLE_OPEN}{name}{VARIABLE_CLOSE}")
}
