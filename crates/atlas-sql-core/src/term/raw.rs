//! Pre-rendered SQL fragments.

use std::fmt;
use std::sync::Arc;

use crate::error::{BoxError, RenderError};

type RenderFn = dyn Fn() -> Result<String, BoxError> + Send + Sync;

/// A raw SQL fragment produced lazily by a callback at compile time.
///
/// The callback is shared between clones; two `RawSql` values compare equal
/// only when they share the same callback.
#[derive(Clone)]
pub struct RawSql {
    render: Arc<RenderFn>,
}

impl RawSql {
    /// Creates a raw fragment from a fallible callback.
    pub fn new<F>(render: F) -> Self
    where
        F: Fn() -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
        }
    }

    /// Creates a raw fragment that always renders `sql`.
    ///
    /// **Warning**: the text is emitted verbatim. Only use this for SQL
    /// that does not contain user input.
    #[must_use]
    pub fn verbatim(sql: impl Into<String>) -> Self {
        let sql: String = sql.into();
        Self::new(move || Ok(sql.clone()))
    }

    /// Invokes the callback.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Raw`] when the callback fails.
    pub fn render(&self) -> Result<String, RenderError> {
        (self.render)().map_err(RenderError::Raw)
    }
}

impl fmt::Debug for RawSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSql").finish_non_exhaustive()
    }
}

impl PartialEq for RawSql {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.render, &other.render)
    }
}
