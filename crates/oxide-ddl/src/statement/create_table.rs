//! `CREATE TABLE` statement builder.
//!
//! The builder accumulates table constraints, column constraints, defaults
//! and the autoincrement column, validating each addition against the
//! borrowed [`TableSchema`]. [`CreateTableBuilder::build`] consumes it and
//! runs the checks that need the whole picture. The resulting
//! [`CreateTable`] is immutable and renders infallibly.
//!
//! # Example
//!
//! ```rust
//! use oxide_ddl::clause::Clause;
//! use oxide_ddl::constraint::Unique;
//! use oxide_ddl::schema::{TableSchema, integer, text};
//! use oxide_ddl::statement::CreateTable;
//!
//! let schema = TableSchema::builder("Post")
//!     .column(integer("id"))
//!     .column(text("slug"))
//!     .column(integer("views").optional())
//!     .build()
//!     .unwrap();
//!
//! let table = CreateTable::of(&schema)
//!     .unwrap()
//!     .auto_increment(schema.column("id").unwrap())
//!     .unwrap()
//!     .default(schema.column("views").unwrap(), 0)
//!     .unwrap()
//!     .constraint(Unique::on(schema.column("slug").unwrap()))
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     table.to_sql(),
//!     "CREATE TABLE `post` (`id` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
//!      `slug` TEXT NOT NULL, `views` INTEGER NOT NULL DEFAULT `0`, \
//!      CONSTRAINT `uq_slug` UNIQUE (`slug` ASC) ON CONFLICT ABORT)"
//! );
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, trace};

use crate::clause::{Clause, DataType};
use crate::constraint::{ColumnConstraint, DefaultValue, TableConstraint};
use crate::error::{Result, SchemaError};
use crate::naming::quote;
use crate::schema::{ColumnDescriptor, TableSchema, check_identifier};

/// A validated `CREATE TABLE` statement.
///
/// Only [`CreateTableBuilder::build`] creates one.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable<'a> {
    table: &'a TableSchema,
    without_rowid: bool,
    if_not_exists: bool,
    schema_name: Option<String>,
    constraints: Vec<TableConstraint<'a>>,
    column_constraints: HashMap<&'a str, ColumnConstraint<'a>>,
    autoincrement: Option<&'a ColumnDescriptor>,
}

impl<'a> CreateTable<'a> {
    /// Alias for [`CreateTableBuilder::new`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotAPureDataSchema`] if the schema declares
    /// fields that are not columns.
    pub fn of(table: &'a TableSchema) -> Result<CreateTableBuilder<'a>> {
        CreateTableBuilder::new(table)
    }

    /// The described table.
    #[must_use]
    pub const fn table(&self) -> &'a TableSchema {
        self.table
    }

    /// Whether `WITHOUT ROWID` is appended.
    #[must_use]
    pub const fn without_rowid(&self) -> bool {
        self.without_rowid
    }

    /// Whether `IF NOT EXISTS` is emitted.
    #[must_use]
    pub const fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    /// The database qualifier, e.g. `main` or `temp`.
    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }

    /// Table constraints in attachment order.
    #[must_use]
    pub fn constraints(&self) -> &[TableConstraint<'a>] {
        &self.constraints
    }

    /// The column constraint of the column declared as `name`, if any.
    #[must_use]
    pub fn column_constraint(&self, name: &str) -> Option<&ColumnConstraint<'a>> {
        self.column_constraints.get(name)
    }

    /// Default values keyed by declared column name.
    #[must_use]
    pub fn defaults(&self) -> BTreeMap<&'a str, &DefaultValue> {
        self.column_constraints
            .iter()
            .filter_map(|(name, cc)| cc.default_value().map(|value| (*name, value)))
            .collect()
    }

    /// The `AUTOINCREMENT` column, if any.
    #[must_use]
    pub const fn auto_increment_column(&self) -> Option<&'a ColumnDescriptor> {
        self.autoincrement
    }

    fn is_autoincrement(&self, column: &ColumnDescriptor) -> bool {
        self.autoincrement.is_some_and(|c| c == column)
    }

    fn column_definition(&self, column: &ColumnDescriptor) -> String {
        let autoincrement = self.is_autoincrement(column);
        self.column_constraints.get(column.name()).map_or_else(
            || ColumnConstraint::on(column).to_definition_sql(autoincrement),
            |cc| cc.to_definition_sql(autoincrement),
        )
    }

    fn qualified_table_name(&self) -> String {
        let table = quote(&self.table.sql_name());
        self.schema_name
            .as_deref()
            .map_or_else(|| table.clone(), |schema| format!("{}.{table}", quote(schema)))
    }

    /// Multi-line summary for debugging a table definition.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut lines = vec![format!(
            "Table {} ({})",
            self.qualified_table_name(),
            self.table.name()
        )];
        lines.push(format!(
            "  rowid: {}",
            if self.without_rowid { "WITHOUT ROWID" } else { "yes" }
        ));
        if let Some(column) = self.autoincrement {
            lines.push(format!("  autoincrement: {}", column.sql_name()));
        }
        lines.push("  columns:".to_string());
        for column in self.table.columns() {
            let mut line = format!(
                "    {} {} {}",
                column.sql_name(),
                column.data_type(),
                if column.is_nullable() { "NULL" } else { "NOT NULL" }
            );
            if let Some(cc) = self.column_constraints.get(column.name()) {
                if let Some(default) = cc.default_value() {
                    line.push_str(&format!(" default={}", default.to_sql()));
                }
                if let Some(collation) = cc.collation() {
                    line.push_str(&format!(" collate={}", collation.as_sql()));
                }
                if let Some(action) = cc.not_null_on_conflict() {
                    line.push_str(&format!(" notNullOnConflict={}", action.as_sql()));
                }
            }
            lines.push(line);
        }
        if !self.constraints.is_empty() {
            lines.push("  constraints:".to_string());
            for constraint in &self.constraints {
                lines.push(format!("    {}", constraint.describe()));
            }
        }
        lines.join("\n")
    }
}

impl Clause for CreateTable<'_> {
    /// Example: ``CREATE TABLE `post` (`id` INTEGER NOT NULL) WITHOUT ROWID``.
    fn to_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .table
            .columns()
            .iter()
            .map(|column| self.column_definition(column))
            .collect();
        parts.extend(self.constraints.iter().map(Clause::to_sql));

        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.qualified_table_name());
        sql.push_str(" (");
        sql.push_str(&parts.join(", "));
        sql.push(')');
        if self.without_rowid {
            sql.push_str(" WITHOUT ROWID");
        }
        sql
    }
}

impl fmt::Display for CreateTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Accumulates the parts of a [`CreateTable`].
#[derive(Debug, Clone)]
pub struct CreateTableBuilder<'a> {
    table: &'a TableSchema,
    without_rowid: bool,
    if_not_exists: bool,
    schema_name: Option<String>,
    constraints: Vec<TableConstraint<'a>>,
    column_constraints: HashMap<&'a str, ColumnConstraint<'a>>,
    defaults: HashMap<&'a str, (&'a ColumnDescriptor, DefaultValue)>,
    autoincrement: Option<&'a ColumnDescriptor>,
}

impl<'a> CreateTableBuilder<'a> {
    /// Starts a `CREATE TABLE` for `table`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotAPureDataSchema`] if the schema declares
    /// fields that are not columns.
    pub fn new(table: &'a TableSchema) -> Result<Self> {
        if let Some(field) = table.extra_fields().first() {
            return Err(SchemaError::NotAPureDataSchema {
                table: table.name().to_string(),
                field: field.clone(),
            });
        }
        Ok(Self {
            table,
            without_rowid: false,
            if_not_exists: false,
            schema_name: None,
            constraints: Vec::new(),
            column_constraints: HashMap::new(),
            defaults: HashMap::new(),
            autoincrement: None,
        })
    }

    /// Appends `WITHOUT ROWID` when `true`.
    ///
    /// See <https://sqlite.org/withoutrowid.html>.
    #[must_use]
    pub const fn without_rowid(mut self, without_rowid: bool) -> Self {
        self.without_rowid = without_rowid;
        self
    }

    /// Emits `CREATE TABLE IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Qualifies the table with a database name, e.g. `main` or `temp`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidIdentifier`] if `name` is not a valid
    /// identifier.
    pub fn schema_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_identifier("schema", &name)?;
        self.schema_name = Some(name);
        Ok(self)
    }

    /// Attaches a table constraint.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::ColumnNotInTable`] if the constraint refers to a
    ///   column of another table.
    /// - [`SchemaError::ForeignKeyTypeMismatch`] for a foreign key whose
    ///   column affinities differ.
    pub fn constraint(mut self, constraint: impl Into<TableConstraint<'a>>) -> Result<Self> {
        let constraint = constraint.into();
        self.check_constraint(&constraint)?;
        trace!(
            table = %self.table.name(),
            constraint = %constraint.describe(),
            "attached table constraint"
        );
        self.constraints.push(constraint);
        Ok(self)
    }

    /// Attaches a column constraint. A default it carries counts as the
    /// column's default.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::ColumnNotInTable`] if the column belongs to another
    ///   table.
    /// - [`SchemaError::DuplicateColumnConstraint`] if the column already
    ///   has one.
    /// - [`SchemaError::DuplicateDefault`] if a default was already given
    ///   through [`Self::default`].
    pub fn column_constraint(mut self, constraint: ColumnConstraint<'a>) -> Result<Self> {
        let column = constraint.column();
        self.check_owned(column)?;
        if self.column_constraints.contains_key(column.name()) {
            return Err(SchemaError::DuplicateColumnConstraint {
                table: self.table.name().to_string(),
                column: column.name().to_string(),
            });
        }
        if let (Some(attempted), Some((_, existing))) =
            (constraint.default_value(), self.defaults.get(column.name()))
        {
            return Err(duplicate_default(column, existing, attempted));
        }
        trace!(
            table = %self.table.name(),
            column = %column.name(),
            sql = %constraint.to_sql(),
            "attached column constraint"
        );
        self.column_constraints.insert(column.name(), constraint);
        Ok(self)
    }

    /// Marks `column` as `INTEGER PRIMARY KEY AUTOINCREMENT`.
    ///
    /// See <https://www.sqlite.org/autoinc.html>.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::ColumnNotInTable`] if the column belongs to another
    ///   table.
    /// - [`SchemaError::DuplicateAutoIncrementColumn`] if a column is
    ///   already marked.
    /// - [`SchemaError::InvalidAutoIncrementColumn`] if the column does not
    ///   have INTEGER affinity.
    pub fn auto_increment(mut self, column: &'a ColumnDescriptor) -> Result<Self> {
        self.check_owned(column)?;
        if let Some(existing) = self.autoincrement {
            return Err(SchemaError::DuplicateAutoIncrementColumn {
                table: self.table.name().to_string(),
                existing: existing.name().to_string(),
                attempted: column.name().to_string(),
            });
        }
        if column.data_type() != DataType::Integer {
            return Err(SchemaError::InvalidAutoIncrementColumn {
                table: self.table.name().to_string(),
                column: column.name().to_string(),
                reason: format!("expected INTEGER affinity, found {}", column.data_type()),
            });
        }
        self.autoincrement = Some(column);
        Ok(self)
    }

    /// Registers the `DEFAULT` value of an optional column.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::ColumnNotInTable`] if the column belongs to another
    ///   table.
    /// - [`SchemaError::ColumnNotOptional`] if the column is not optional.
    /// - [`SchemaError::DuplicateDefault`] if the column already has a
    ///   default.
    pub fn default(
        mut self,
        column: &'a ColumnDescriptor,
        value: impl Into<DefaultValue>,
    ) -> Result<Self> {
        self.check_owned(column)?;
        if !column.is_optional() {
            return Err(SchemaError::ColumnNotOptional {
                table: self.table.name().to_string(),
                column: column.name().to_string(),
            });
        }
        let value = value.into();
        let existing = self
            .defaults
            .get(column.name())
            .map(|(_, existing)| existing)
            .or_else(|| {
                self.column_constraints
                    .get(column.name())
                    .and_then(ColumnConstraint::default_value)
            });
        if let Some(existing) = existing {
            return Err(duplicate_default(column, existing, &value));
        }
        trace!(
            table = %self.table.name(),
            column = %column.name(),
            default = %value,
            "registered default"
        );
        self.defaults.insert(column.name(), (column, value));
        Ok(self)
    }

    /// Validates the whole definition and produces the statement.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MissingDefaultForOptionalColumn`] if an optional
    ///   column has no default.
    /// - [`SchemaError::MultiplePrimaryKeys`] if more than one primary key
    ///   is declared; the autoincrement column counts as one.
    /// - Any error from re-validating the table constraints.
    /// - [`SchemaError::InvalidAutoIncrementColumn`] or
    ///   [`SchemaError::MissingPrimaryKey`] for an invalid `WITHOUT ROWID`
    ///   table.
    pub fn build(mut self) -> Result<CreateTable<'a>> {
        let table_name = self.table.name();

        for column in self.table.optional_columns() {
            let has_default = self.defaults.contains_key(column.name())
                || self
                    .column_constraints
                    .get(column.name())
                    .is_some_and(|cc| cc.default_value().is_some());
            if !has_default {
                return Err(SchemaError::MissingDefaultForOptionalColumn {
                    table: table_name.to_string(),
                    column: column.name().to_string(),
                });
            }
        }

        let primary_keys = self
            .constraints
            .iter()
            .filter(|c| c.is_primary_key())
            .count()
            + usize::from(self.autoincrement.is_some());
        if primary_keys > 1 {
            return Err(SchemaError::MultiplePrimaryKeys {
                table: table_name.to_string(),
                count: primary_keys,
            });
        }

        for constraint in &self.constraints {
            self.check_constraint(constraint)?;
        }

        if self.without_rowid {
            if let Some(column) = self.autoincrement {
                return Err(SchemaError::InvalidAutoIncrementColumn {
                    table: table_name.to_string(),
                    column: column.name().to_string(),
                    reason: "WITHOUT ROWID tables cannot use AUTOINCREMENT".to_string(),
                });
            }
            if primary_keys == 0 {
                return Err(SchemaError::MissingPrimaryKey {
                    table: table_name.to_string(),
                });
            }
        }

        for (name, (column, value)) in std::mem::take(&mut self.defaults) {
            let constraint = self
                .column_constraints
                .remove(name)
                .unwrap_or_else(|| ColumnConstraint::on(column));
            self.column_constraints
                .insert(name, constraint.with_default(value)?);
        }

        debug!(
            table = %table_name,
            constraints = self.constraints.len(),
            column_constraints = self.column_constraints.len(),
            without_rowid = self.without_rowid,
            "built CREATE TABLE statement"
        );

        Ok(CreateTable {
            table: self.table,
            without_rowid: self.without_rowid,
            if_not_exists: self.if_not_exists,
            schema_name: self.schema_name,
            constraints: self.constraints,
            column_constraints: self.column_constraints,
            autoincrement: self.autoincrement,
        })
    }

    fn check_owned(&self, column: &ColumnDescriptor) -> Result<()> {
        if self.table.contains(column) {
            Ok(())
        } else {
            Err(SchemaError::ColumnNotInTable {
                table: self.table.name().to_string(),
                column: column.name().to_string(),
                column_table: column.table().to_string(),
            })
        }
    }

    fn check_constraint(&self, constraint: &TableConstraint<'a>) -> Result<()> {
        for column in constraint.columns() {
            self.check_owned(column)?;
        }
        constraint.validate()
    }
}

fn duplicate_default(
    column: &ColumnDescriptor,
    existing: &DefaultValue,
    attempted: &DefaultValue,
) -> SchemaError {
    SchemaError::DuplicateDefault {
        table: column.table().to_string(),
        column: column.name().to_string(),
        existing: existing.to_string(),
        attempted: attempted.to_string(),
    }
}
