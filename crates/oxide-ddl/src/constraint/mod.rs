//! Column and table constraints.
//!
//! Column constraints ([`ColumnConstraint`]) are rendered inline with the
//! column definition. Table constraints ([`Check`], [`Unique`],
//! [`PrimaryKey`], [`ForeignKey`]) follow the column definitions and are
//! collected as [`TableConstraint`] values by the `CREATE TABLE` builder.

mod check;
mod column;
mod foreign_key;
mod primary_key;
mod unique;

pub use check::Check;
pub use column::{ColumnConstraint, DefaultValue};
pub use foreign_key::ForeignKey;
pub use primary_key::PrimaryKey;
pub use unique::Unique;

use crate::clause::{Clause, IndexedColumn};
use crate::error::Result;
use crate::schema::ColumnDescriptor;

/// A table constraint.
pub trait Constraint: Clause {
    /// The name used in `CONSTRAINT <name>`, if the constraint has one.
    fn constraint_name(&self) -> Option<String>;
}

/// One of the four table constraint kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableConstraint<'a> {
    /// `CHECK (...)`.
    Check(Check),
    /// `UNIQUE (...)`.
    Unique(Unique<'a>),
    /// `PRIMARY KEY(...)`.
    PrimaryKey(PrimaryKey<'a>),
    /// `FOREIGN KEY (...) REFERENCES ...`.
    ForeignKey(ForeignKey<'a>),
}

impl<'a> TableConstraint<'a> {
    /// Columns of the constrained table this constraint refers to.
    ///
    /// Check expressions are opaque SQL and refer to no column here. For a
    /// foreign key only the child column is returned: the parent column
    /// lives in another table.
    #[must_use]
    pub fn columns(&self) -> Vec<&'a ColumnDescriptor> {
        match self {
            Self::Check(_) => Vec::new(),
            Self::Unique(unique) => unique
                .columns()
                .columns()
                .iter()
                .map(IndexedColumn::column)
                .collect(),
            Self::PrimaryKey(key) => key
                .columns()
                .columns()
                .iter()
                .map(IndexedColumn::column)
                .collect(),
            Self::ForeignKey(fk) => vec![fk.child()],
        }
    }

    /// Returns `true` for a `PRIMARY KEY` constraint.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self, Self::PrimaryKey(_))
    }

    /// Checks the constraint on its own, independent of any table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SchemaError::ForeignKeyTypeMismatch`] for a foreign
    /// key whose column affinities differ.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::ForeignKey(fk) => fk.validate(),
            Self::Check(_) | Self::Unique(_) | Self::PrimaryKey(_) => Ok(()),
        }
    }

    /// One-line summary for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Check(check) => check.describe(),
            Self::Unique(unique) => unique.describe(),
            Self::PrimaryKey(key) => key.describe(),
            Self::ForeignKey(fk) => fk.describe(),
        }
    }
}

impl Clause for TableConstraint<'_> {
    fn to_sql(&self) -> String {
        match self {
            Self::Check(check) => check.to_sql(),
            Self::Unique(unique) => unique.to_sql(),
            Self::PrimaryKey(key) => key.to_sql(),
            Self::ForeignKey(fk) => fk.to_sql(),
        }
    }
}

impl Constraint for TableConstraint<'_> {
    fn constraint_name(&self) -> Option<String> {
        match self {
            Self::Check(check) => check.constraint_name(),
            Self::Unique(unique) => unique.constraint_name(),
            Self::PrimaryKey(key) => key.constraint_name(),
            Self::ForeignKey(fk) => fk.constraint_name(),
        }
    }
}

impl From<Check> for TableConstraint<'_> {
    fn from(check: Check) -> Self {
        Self::Check(check)
    }
}

impl<'a> From<Unique<'a>> for TableConstraint<'a> {
    fn from(unique: Unique<'a>) -> Self {
        Self::Unique(unique)
    }
}

impl<'a> From<PrimaryKey<'a>> for TableConstraint<'a> {
    fn from(key: PrimaryKey<'a>) -> Self {
        Self::PrimaryKey(key)
    }
}

impl<'a> From<ForeignKey<'a>> for TableConstraint<'a> {
    fn from(fk: ForeignKey<'a>) -> Self {
        Self::ForeignKey(fk)
    }
}
