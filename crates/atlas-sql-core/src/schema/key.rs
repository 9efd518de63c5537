//! Table keys: primary, unique and foreign.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    /// Reject the change (default, never rendered).
    #[default]
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// No action.
    NoAction,
    /// Set to default value.
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// The referenced table.
    pub table: String,
    /// Local column to referenced column mapping, in order.
    pub columns: IndexMap<String, String>,
    /// Action on update.
    pub on_update: ReferentialAction,
    /// Action on delete.
    pub on_delete: ReferentialAction,
}

impl ForeignKey {
    /// Creates a foreign key referencing `table` with no columns yet.
    #[must_use]
    pub fn references(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: IndexMap::new(),
            on_update: ReferentialAction::default(),
            on_delete: ReferentialAction::default(),
        }
    }

    /// Maps a local column to a referenced column.
    #[must_use]
    pub fn column(mut self, local: impl Into<String>, foreign: impl Into<String>) -> Self {
        self.columns.insert(local.into(), foreign.into());
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = action;
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = action;
        self
    }
}

/// A table key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// PRIMARY KEY over the columns.
    Primary(Vec<String>),
    /// UNIQUE over the columns.
    Unique(Vec<String>),
    /// FOREIGN KEY.
    Foreign(ForeignKey),
}

impl Key {
    /// Creates a primary key.
    #[must_use]
    pub fn primary<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Primary(columns.into_iter().map(Into::into).collect())
    }

    /// Creates a unique key.
    #[must_use]
    pub fn unique<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Unique(columns.into_iter().map(Into::into).collect())
    }
}

impl From<ForeignKey> for Key {
    fn from(key: ForeignKey) -> Self {
        Self::Foreign(key)
    }
}
