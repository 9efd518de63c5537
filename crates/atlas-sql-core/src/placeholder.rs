//! Variable placeholder binding.
//!
//! Compiled SQL carries variables as `??{name}??` markers. Before execution
//! the markers are rewritten, left to right, into the placeholder syntax of
//! the target database and the bound values are collected in the same order.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::adapter::{Params, SqlValue};
use crate::error::PlaceholderError;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\?\?\{([^}]+)\}\?\?").expect("variable marker pattern is valid")
});

/// Native placeholder syntax markers are rewritten into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaceholderStyle {
    /// Leave `??{name}??` markers in place.
    #[default]
    Keep,
    /// `?`
    Question,
    /// `$1`, `$2`, ...
    Numbered,
    /// `:name`
    Named,
}

impl PlaceholderStyle {
    /// Returns the style name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Question => "question",
            Self::Numbered => "numbered",
            Self::Named => "named",
        }
    }

    fn token(self, name: &str, position: usize) -> String {
        match self {
            Self::Keep => crate::dialect::variable_marker(name),
            Self::Question => String::from("?"),
            Self::Numbered => format!("${position}"),
            Self::Named => format!(":{name}"),
        }
    }
}

/// SQL with its markers rewritten and the values to send positionally.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundQuery {
    /// The rewritten SQL.
    pub sql: String,
    /// Values in marker order.
    pub values: Vec<SqlValue>,
    /// Variable names in marker order.
    pub names: Vec<String>,
}

/// Lists the variable names of all markers in `sql`, left to right.
///
/// ```rust
/// use atlas_sql_core::placeholder::markers;
///
/// let sql = "SELECT * FROM `t` WHERE (`a` = ??{a}??) AND (`b` = ??{b}??)";
/// assert_eq!(markers(sql), vec!["a", "b"]);
/// ```
#[must_use]
pub fn markers(sql: &str) -> Vec<String> {
    MARKER
        .captures_iter(sql)
        .map(|caps| String::from(&caps[1]))
        .collect()
}

/// Rewrites the markers of `sql` in `style` and collects the bound values.
///
/// A variable used several times is bound once per occurrence.
///
/// # Errors
///
/// Returns [`PlaceholderError::Unbound`] for a marker without value.
pub fn bind(
    sql: &str,
    params: &Params,
    style: PlaceholderStyle,
) -> Result<BoundQuery, PlaceholderError> {
    let mut bound = BoundQuery::default();
    let mut last = 0;

    for caps in MARKER.captures_iter(sql) {
        let (Some(marker), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        let value = params
            .get(name)
            .ok_or_else(|| PlaceholderError::Unbound(String::from(name)))?;

        bound.sql.push_str(&sql[last..marker.start()]);
        bound.values.push(value.clone());
        bound.names.push(String::from(name));
        bound.sql.push_str(&style.token(name, bound.values.len()));
        last = marker.end();
    }
    bound.sql.push_str(&sql[last..]);

    debug!(
        style = style.as_str(),
        count = bound.values.len(),
        "bound query variables"
    );
    Ok(bound)
}
