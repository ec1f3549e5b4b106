//! Explicit table schema descriptions.
//!
//! A [`TableSchema`] describes a table the way a plain data struct would: a
//! pascal case name and an ordered list of camel case columns, each with a
//! type affinity, a nullability flag and an "optional" flag meaning the field
//! has a default value. The schema is built once, validated, and then only
//! borrowed by constraints and statements.
//!
//! # Example
//!
//! ```rust
//! use oxide_ddl::schema::{TableSchema, integer, text};
//!
//! let schema = TableSchema::builder("UserAccount")
//!     .column(integer("id"))
//!     .column(text("displayName").nullable())
//!     .column(integer("loginCount").optional())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.sql_name(), "user_account");
//! assert_eq!(schema.columns().len(), 3);
//! assert_eq!(schema.column("loginCount").unwrap().sql_name(), "login_count");
//! ```

use std::collections::HashMap;

use crate::clause::DataType;
use crate::constraint::ForeignKey;
use crate::error::{Result, SchemaError};
use crate::naming::{IDENTIFIER_PATTERN, is_valid_identifier, to_sql_name};

/// A single column of a [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDescriptor {
    table: String,
    name: String,
    data_type: DataType,
    nullable: bool,
    optional: bool,
}

impl ColumnDescriptor {
    /// Identifier of the table that declares this column, e.g. `ChildTable`.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// SQL name of the declaring table, e.g. `child_table`.
    #[must_use]
    pub fn table_sql_name(&self) -> String {
        to_sql_name(&self.table)
    }

    /// Declared identifier, e.g. `parentTableId`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SQL column name, e.g. `parent_table_id`.
    #[must_use]
    pub fn sql_name(&self) -> String {
        to_sql_name(&self.name)
    }

    /// Type affinity.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Whether the column accepts `NULL`.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the column has a default value in its declaration.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns `Table.column`, used in messages.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.name)
    }

    /// Creates a foreign key from this column to `parent`, with both actions
    /// set to `NO ACTION`.
    #[must_use]
    pub const fn references<'a>(&'a self, parent: &'a Self) -> ForeignKey<'a> {
        ForeignKey::references(self, parent)
    }
}

/// Column definition used while building a [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBuilder {
    name: String,
    data_type: DataType,
    nullable: bool,
    optional: bool,
}

impl ColumnBuilder {
    /// Creates a non-nullable, non-optional column.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
            optional: false,
        }
    }

    /// Marks the column as accepting `NULL`.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as optional: it has a default value, which must be
    /// registered on the `CREATE TABLE` builder.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    fn into_descriptor(self, table: &str) -> ColumnDescriptor {
        ColumnDescriptor {
            table: table.to_string(),
            name: self.name,
            data_type: self.data_type,
            nullable: self.nullable,
            optional: self.optional,
        }
    }
}

/// Creates an INTEGER column.
#[must_use]
pub fn integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Integer)
}

/// Creates a TEXT column.
#[must_use]
pub fn text(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Text)
}

/// Creates a BLOB column.
#[must_use]
pub fn blob(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Blob)
}

/// Creates a REAL column.
#[must_use]
pub fn real(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Real)
}

/// Creates a NUMERIC column.
#[must_use]
pub fn numeric(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, DataType::Numeric)
}

/// An immutable, validated description of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: Vec<ColumnDescriptor>,
    extra_fields: Vec<String>,
}

impl TableSchema {
    /// Starts describing the table `name` (pascal case, e.g. `ChildTable`).
    #[must_use]
    pub fn builder(name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            name: name.into(),
            columns: Vec::new(),
            extra_fields: Vec::new(),
        }
    }

    /// Declared table identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SQL table name.
    #[must_use]
    pub fn sql_name(&self) -> String {
        to_sql_name(&self.name)
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Looks up a column by its declared identifier.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Looks up a column by its declared identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownColumn`] if no column has that name.
    pub fn column(&self, name: &str) -> Result<&ColumnDescriptor> {
        self.find_column(name)
            .ok_or_else(|| SchemaError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Returns `true` if `column` is one of this table's columns.
    #[must_use]
    pub fn contains(&self, column: &ColumnDescriptor) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fields the described aggregate declares beyond its columns.
    #[must_use]
    pub fn extra_fields(&self) -> &[String] {
        &self.extra_fields
    }

    /// Columns that need a registered default.
    pub fn optional_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.optional)
    }
}

/// Builder for [`TableSchema`].
#[derive(Debug, Clone)]
pub struct TableSchemaBuilder {
    name: String,
    columns: Vec<ColumnBuilder>,
    extra_fields: Vec<String>,
}

impl TableSchemaBuilder {
    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: ColumnBuilder) -> Self {
        self.columns.push(column);
        self
    }

    /// Declares a field that is not a column.
    ///
    /// Such a schema is accepted here but rejected by the `CREATE TABLE`
    /// builder, since the field would never reach the database.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.extra_fields.push(name.into());
        self
    }

    /// Validates names and builds the schema.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidIdentifier`] if the table or a column name is
    ///   not a valid identifier.
    /// - [`SchemaError::NoColumns`] if no column was declared.
    /// - [`SchemaError::DuplicateColumn`] if two columns map to the same SQL
    ///   name, e.g. `userId` and `user_id`.
    pub fn build(self) -> Result<TableSchema> {
        check_identifier("table", &self.name)?;
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns { table: self.name });
        }

        let mut seen: HashMap<String, &str> = HashMap::new();
        for column in &self.columns {
            check_identifier("column", &column.name)?;
            let sql_name = to_sql_name(&column.name);
            if let Some(existing) = seen.get(&sql_name) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                    existing: (*existing).to_string(),
                    sql_name,
                });
            }
            seen.insert(sql_name, column.name.as_str());
        }

        let columns = self
            .columns
            .into_iter()
            .map(|c| c.into_descriptor(&self.name))
            .collect();
        Ok(TableSchema {
            name: self.name,
            columns,
            extra_fields: self.extra_fields,
        })
    }
}

pub(crate) fn check_identifier(kind: &'static str, name: &str) -> Result<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier {
            kind,
            name: name.to_string(),
            pattern: IDENTIFIER_PATTERN.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableSchema {
        TableSchema::builder("ChildTable")
            .column(integer("id"))
            .column(integer("parentTableId"))
            .column(text("note").nullable().optional())
            .build()
            .unwrap()
    }

    #[test]
    fn test_column_metadata() {
        let schema = sample();
        let col = schema.column("parentTableId").unwrap();
        assert_eq!(col.table(), "ChildTable");
        assert_eq!(col.table_sql_name(), "child_table");
        assert_eq!(col.sql_name(), "parent_table_id");
        assert_eq!(col.data_type(), DataType::Integer);
        assert!(!col.is_nullable());
        assert!(!col.is_optional());
        assert_eq!(col.qualified_name(), "ChildTable.parentTableId");

        let note = schema.column("note").unwrap();
        assert!(note.is_nullable());
        assert!(note.is_optional());
    }

    #[test]
    fn test_columns_keep_declaration_order() {
        let schema = sample();
        let names: Vec<_> = schema.columns().iter().map(ColumnDescriptor::name).collect();
        assert_eq!(names, ["id", "parentTableId", "note"]);
        let optional: Vec<_> = schema.optional_columns().map(ColumnDescriptor::name).collect();
        assert_eq!(optional, ["note"]);
    }

    #[test]
    fn test_unknown_column() {
        let err = sample().column("missing").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownColumn {
                table: "ChildTable".into(),
                column: "missing".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_column() {
        let err = TableSchema::builder("Post")
            .column(integer("id"))
            .column(text("id"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn { ref column, .. } if column == "id"));
    }

    #[test]
    fn test_columns_sharing_a_sql_name() {
        let err = TableSchema::builder("Account")
            .column(integer("userId"))
            .column(integer("user_id"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateColumn {
                table: "Account".into(),
                column: "user_id".into(),
                existing: "userId".into(),
                sql_name: "user_id".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Account.user_id clashes with Account.userId: both map to the SQL column `user_id`"
        );
    }

    #[test]
    fn test_no_columns() {
        let err = TableSchema::builder("Empty").build().unwrap_err();
        assert_eq!(err, SchemaError::NoColumns { table: "Empty".into() });
    }

    #[test]
    fn test_invalid_names() {
        let err = TableSchema::builder("Bad Table")
            .column(integer("id"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidIdentifier { kind: "table", .. }));

        let err = TableSchema::builder("Post")
            .column(integer("2fast"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidIdentifier { kind: "column", .. }));
    }

    #[test]
    fn test_extra_fields_are_recorded() {
        let schema = TableSchema::builder("Post")
            .column(integer("id"))
            .field("cachedSlug")
            .build()
            .unwrap();
        assert_eq!(schema.extra_fields(), ["cachedSlug"]);
    }

    #[test]
    fn test_contains() {
        let schema = sample();
        let other = TableSchema::builder("Other")
            .column(integer("id"))
            .build()
            .unwrap();
        assert!(schema.contains(schema.column("id").unwrap()));
        assert!(!schema.contains(other.column("id").unwrap()));
    }
}
