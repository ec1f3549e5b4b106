//! Closed sets of SQLite keywords.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Clause;

/// Type affinity of a column.
///
/// See <https://www.sqlite.org/datatype3.html>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// A signed integer stored in 1, 2, 3, 4, 6, or 8 bytes.
    Integer,
    /// A text string stored in the database encoding.
    Text,
    /// A blob of data, stored exactly as given.
    Blob,
    /// An 8-byte IEEE floating point number.
    Real,
    /// A fixed decimal-point field.
    Numeric,
}

impl DataType {
    /// Returns the SQL keyword for the affinity.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Real => "REAL",
            Self::Numeric => "NUMERIC",
        }
    }
}

impl Clause for DataType {
    /// Example: `TEXT`.
    fn to_sql(&self) -> String {
        self.as_sql().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// How strings are compared, used in the `COLLATE` clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Collation {
    /// Compares strings using `memcmp()`, regardless of text encoding.
    #[default]
    Binary,
    /// Like [`Collation::Binary`], ignoring trailing whitespace.
    Rtrim,
    /// Like [`Collation::Binary`], ignoring ASCII case.
    Nocase,
}

impl Collation {
    /// Returns the collation name, e.g. `NOCASE`.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::Rtrim => "RTRIM",
            Self::Nocase => "NOCASE",
        }
    }
}

impl Clause for Collation {
    /// Example: `COLLATE BINARY`.
    fn to_sql(&self) -> String {
        format!("COLLATE {}", self.as_sql())
    }
}

/// Sort direction of an indexed column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Order {
    /// Lowest value first.
    #[default]
    Asc,
    /// Highest value first.
    Desc,
}

impl Order {
    /// Returns the keyword, `ASC` or `DESC`.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl Clause for Order {
    fn to_sql(&self) -> String {
        self.as_sql().to_string()
    }
}

/// Conflict resolution algorithm for `UNIQUE`, `NOT NULL`, `CHECK` and
/// `PRIMARY KEY` constraints.
///
/// [`ConflictAction::Abort`] is the SQLite default and is what the engine
/// does when the clause is omitted.
///
/// See <https://sqlite.org/lang_conflict.html>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictAction {
    /// Abort the statement and roll back the current transaction.
    Rollback,
    /// Abort the statement and back out its changes; the transaction stays active.
    #[default]
    Abort,
    /// Abort the statement, keeping the changes it already made.
    Fail,
    /// Skip the offending row and carry on.
    Ignore,
    /// Delete the pre-existing conflicting rows, then insert or update.
    Replace,
}

impl ConflictAction {
    /// Returns the bare action keyword, e.g. `ROLLBACK`.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
            Self::Ignore => "IGNORE",
            Self::Replace => "REPLACE",
        }
    }
}

impl Clause for ConflictAction {
    /// Example: `ON CONFLICT ABORT`.
    fn to_sql(&self) -> String {
        format!("ON CONFLICT {}", self.as_sql())
    }
}

/// Action taken on child rows when a referenced parent key is updated or
/// deleted.
///
/// See <https://sqlite.org/foreignkeys.html#fk_actions>.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeignKeyAction {
    /// Reject the parent change immediately while child keys reference it.
    Restrict,
    /// Take no special action.
    #[default]
    NoAction,
    /// Propagate the update or delete to child rows.
    Cascade,
    /// Set child key columns to `NULL`.
    SetNull,
    /// Set child key columns to their default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }

    /// Example: `ON UPDATE CASCADE`.
    #[must_use]
    pub fn on_update_clause(self) -> String {
        format!("ON UPDATE {}", self.as_sql())
    }

    /// Example: `ON DELETE CASCADE`.
    #[must_use]
    pub fn on_delete_clause(self) -> String {
        format!("ON DELETE {}", self.as_sql())
    }
}

impl Clause for ForeignKeyAction {
    fn to_sql(&self) -> String {
        self.as_sql().to_string()
    }
}
