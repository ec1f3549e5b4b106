//! Per-column constraints: nullability, `DEFAULT`, `COLLATE` and the
//! `NOT NULL ON CONFLICT` strategy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clause::{Clause, Collation, ConflictAction};
use crate::error::{Result, SchemaError};
use crate::naming::quote;
use crate::schema::ColumnDescriptor;

/// A constant default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// `NULL`.
    Null,
    /// Boolean, stored by SQLite as `1` or `0`.
    Boolean(bool),
    /// Integer.
    Integer(i64),
    /// Floating point.
    Real(f64),
    /// Text.
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(b) => f.write_str(if *b { "1" } else { "0" }),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for DefaultValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for DefaultValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl DefaultValue {
    /// Renders the value for a `DEFAULT` clause.
    ///
    /// The value is wrapped in backticks; backticks inside it are escaped
    /// with a backslash. `NULL` is written bare.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            other => format!("`{}`", other.to_string().replace('`', "\\`")),
        }
    }
}

/// Constraints on a single column.
///
/// Setters validate eagerly: a default requires an optional column and a
/// `NOT NULL ON CONFLICT` strategy requires a non-nullable one.
///
/// ```rust
/// use oxide_ddl::clause::{Clause, Collation, ConflictAction};
/// use oxide_ddl::constraint::ColumnConstraint;
/// use oxide_ddl::schema::{TableSchema, integer};
///
/// let schema = TableSchema::builder("Counter")
///     .column(integer("value").optional())
///     .build()
///     .unwrap();
/// let value = schema.column("value").unwrap();
///
/// let constraint = ColumnConstraint::on(value)
///     .with_default(30)
///     .unwrap()
///     .with_not_null_on_conflict(ConflictAction::Abort)
///     .unwrap()
///     .with_collation(Collation::Rtrim);
///
/// assert_eq!(
///     constraint.to_sql(),
///     "`value` NOT NULL ON CONFLICT ABORT DEFAULT `30` COLLATE RTRIM"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraint<'a> {
    column: &'a ColumnDescriptor,
    default: Option<DefaultValue>,
    collation: Option<Collation>,
    not_null_on_conflict: Option<ConflictAction>,
}

impl<'a> ColumnConstraint<'a> {
    /// A constraint with no default, no collation and no conflict strategy.
    #[must_use]
    pub const fn on(column: &'a ColumnDescriptor) -> Self {
        Self {
            column,
            default: None,
            collation: None,
            not_null_on_conflict: None,
        }
    }

    /// Sets the `DEFAULT` value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidColumnConstraint`] if the column is not
    /// optional.
    pub fn with_default(self, default: impl Into<DefaultValue>) -> Result<Self> {
        if !self.column.is_optional() {
            return Err(self.invalid("must be an optional parameter to allow default values"));
        }
        Ok(Self {
            default: Some(default.into()),
            ..self
        })
    }

    /// Sets the collation.
    #[must_use]
    pub fn with_collation(self, collation: Collation) -> Self {
        Self {
            collation: Some(collation),
            ..self
        }
    }

    /// Sets the conflict strategy of the `NOT NULL` constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidColumnConstraint`] if the column is
    /// nullable.
    pub fn with_not_null_on_conflict(self, action: ConflictAction) -> Result<Self> {
        if self.column.is_nullable() {
            return Err(self.invalid(
                "must be marked non-null in order to specify a NOT NULL ON CONFLICT clause",
            ));
        }
        Ok(Self {
            not_null_on_conflict: Some(action),
            ..self
        })
    }

    /// The constrained column.
    #[must_use]
    pub const fn column(&self) -> &'a ColumnDescriptor {
        self.column
    }

    /// The default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// The collation, if any.
    #[must_use]
    pub const fn collation(&self) -> Option<Collation> {
        self.collation
    }

    /// The `NOT NULL` conflict strategy, if any.
    #[must_use]
    pub const fn not_null_on_conflict(&self) -> Option<ConflictAction> {
        self.not_null_on_conflict
    }

    /// Renders the full column definition used inside `CREATE TABLE`.
    ///
    /// Example: `` `id` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL ``.
    #[must_use]
    pub fn to_definition_sql(&self, autoincrement: bool) -> String {
        let mut sql = format!(
            "{} {}",
            quote(&self.column.sql_name()),
            self.column.data_type().as_sql()
        );
        if autoincrement {
            sql.push_str(" PRIMARY KEY AUTOINCREMENT");
        }
        sql.push(' ');
        sql.push_str(&self.constraints_sql());
        sql
    }

    /// Nullability, default and collation, without the column name.
    fn constraints_sql(&self) -> String {
        let mut sql = if self.column.is_nullable() {
            String::from("NULL")
        } else {
            let mut not_null = String::from("NOT NULL");
            if let Some(action) = self.not_null_on_conflict {
                not_null.push(' ');
                not_null.push_str(&action.to_sql());
            }
            not_null
        };
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        if let Some(collation) = self.collation {
            sql.push(' ');
            sql.push_str(&collation.to_sql());
        }
        sql
    }

    fn invalid(&self, reason: &str) -> SchemaError {
        SchemaError::InvalidColumnConstraint {
            table: self.column.table().to_string(),
            column: self.column.name().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Clause for ColumnConstraint<'_> {
    /// Example: `` `column` NOT NULL DEFAULT `30` ``.
    fn to_sql(&self) -> String {
        format!(
            "{} {}",
            quote(&self.column.sql_name()),
            self.constraints_sql()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{TableSchema, integer, text};

    fn table() -> TableSchema {
        TableSchema::builder("ColumnConstraintTestTable")
            .column(integer("a"))
            .column(integer("b").optional())
            .column(integer("c").nullable())
            .column(text("d").optional())
            .build()
            .unwrap()
    }

    #[test]
    fn test_on() {
        let schema = table();
        let a = schema.column("a").unwrap();
        let constraint = ColumnConstraint::on(a);
        assert_eq!(constraint.column(), a);
        assert!(constraint.default_value().is_none());
        assert!(constraint.collation().is_none());
        assert!(constraint.not_null_on_conflict().is_none());
    }

    #[test]
    fn test_default_on_non_optional_column() {
        let schema = table();
        let err = ColumnConstraint::on(schema.column("a").unwrap())
            .with_default(30)
            .unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, SchemaError::InvalidColumnConstraint { .. }));
        assert!(msg.contains("ColumnConstraintTestTable"));
        assert!(msg.contains(".a "));
        assert!(msg.contains("must be an optional parameter"));
    }

    #[test]
    fn test_not_null_on_conflict_on_nullable_column() {
        let schema = table();
        let err = ColumnConstraint::on(schema.column("c").unwrap())
            .with_not_null_on_conflict(ConflictAction::Replace)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ColumnConstraintTestTable.c"));
        assert!(msg.contains("must be marked non-null"));
    }

    #[test]
    fn test_setters() {
        let schema = table();
        let b = ColumnConstraint::on(schema.column("b").unwrap())
            .with_default(30)
            .unwrap();
        assert_eq!(b.default_value(), Some(&DefaultValue::Integer(30)));

        let a = ColumnConstraint::on(schema.column("a").unwrap())
            .with_collation(Collation::Nocase)
            .with_not_null_on_conflict(ConflictAction::Rollback)
            .unwrap();
        assert_eq!(a.collation(), Some(Collation::Nocase));
        assert_eq!(a.not_null_on_conflict(), Some(ConflictAction::Rollback));
    }

    #[test]
    fn test_clause() {
        let schema = table();
        let sql = ColumnConstraint::on(schema.column("b").unwrap())
            .with_default(30)
            .unwrap()
            .with_collation(Collation::Rtrim)
            .with_not_null_on_conflict(ConflictAction::Abort)
            .unwrap()
            .to_sql();
        assert_eq!(sql, "`b` NOT NULL ON CONFLICT ABORT DEFAULT `30` COLLATE RTRIM");
    }

    #[test]
    fn test_backtick_default_is_escaped() {
        let schema = table();
        let sql = ColumnConstraint::on(schema.column("d").unwrap())
            .with_default("`")
            .unwrap()
            .to_sql();
        assert_eq!(sql, "`d` NOT NULL DEFAULT `\\``");
    }

    #[test]
    fn test_nullable_clause() {
        let schema = table();
        let sql = ColumnConstraint::on(schema.column("c").unwrap()).to_sql();
        assert_eq!(sql, "`c` NULL");
    }

    #[test]
    fn test_definition_sql() {
        let schema = table();
        let a = ColumnConstraint::on(schema.column("a").unwrap());
        assert_eq!(a.to_definition_sql(false), "`a` INTEGER NOT NULL");
        assert_eq!(
            a.to_definition_sql(true),
            "`a` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL"
        );
    }

    #[test]
    fn test_default_value_rendering() {
        assert_eq!(DefaultValue::Null.to_sql(), "NULL");
        assert_eq!(DefaultValue::from(true).to_sql(), "`1`");
        assert_eq!(DefaultValue::from(false).to_sql(), "`0`");
        assert_eq!(DefaultValue::from(42_i64).to_sql(), "`42`");
        assert_eq!(DefaultValue::from(2.5).to_sql(), "`2.5`");
        assert_eq!(DefaultValue::from("it's").to_sql(), "`it's`");
        assert_eq!(DefaultValue::from(None::<i64>), DefaultValue::Null);
        assert_eq!(DefaultValue::from(Some(7)), DefaultValue::Integer(7));
    }
}
