//! Error types for schema definitions.
//!
//! Every error is raised while a schema is being declared, never while SQL is
//! rendered. Messages name the table, the column and the rule that was broken
//! so the declaration can be fixed without reading this crate.

/// Errors raised while declaring tables, constraints and `CREATE TABLE`
/// statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The schema declares a field that is not one of its columns.
    #[error(
        "{table} must be a pure data schema: field '{field}' is not a column and would be \
         silently left out of the CREATE TABLE statement"
    )]
    NotAPureDataSchema {
        /// Table identifier.
        table: String,
        /// The offending non-column field.
        field: String,
    },

    /// An indexed column group was built with zero columns.
    #[error("IndexedColumnGroup cannot have zero columns")]
    EmptyColumnGroup,

    /// A column constraint was set on a column that cannot carry it.
    #[error("{table}.{column} {reason}")]
    InvalidColumnConstraint {
        /// Table identifier.
        table: String,
        /// Column identifier.
        column: String,
        /// The violated rule.
        reason: String,
    },

    /// A check constraint name is not a valid SQL identifier.
    #[error("Invalid check constraint name <`{name}`>, it must follow the regex {pattern}")]
    InvalidCheckName {
        /// The rejected name.
        name: String,
        /// The pattern names must match.
        pattern: String,
    },

    /// A check constraint has an empty or whitespace-only expression.
    #[error("Cannot have blank check constraints{}", .name.as_ref().map(|n| format!(" (`{n}`)")).unwrap_or_default())]
    BlankCheckExpression {
        /// The check constraint name, if it has one.
        name: Option<String>,
    },

    /// A foreign key links columns with different type affinities.
    #[error(
        "Foreign key {child_table}.{child_column} ({child_type}) cannot reference \
         {parent_table}.{parent_column} ({parent_type}): column types must match"
    )]
    ForeignKeyTypeMismatch {
        /// Child (referencing) table identifier.
        child_table: String,
        /// Child column identifier.
        child_column: String,
        /// Child column affinity.
        child_type: String,
        /// Parent (referenced) table identifier.
        parent_table: String,
        /// Parent column identifier.
        parent_column: String,
        /// Parent column affinity.
        parent_type: String,
    },

    /// A second autoincrement column was requested.
    #[error(
        "{table} already has an autoincrement column '{existing}', cannot set autoincrement \
         on '{attempted}'"
    )]
    DuplicateAutoIncrementColumn {
        /// Table identifier.
        table: String,
        /// Column already marked as autoincrement.
        existing: String,
        /// Column that was rejected.
        attempted: String,
    },

    /// A default was given for a column that is not optional.
    #[error("{table}.{column} must be an optional parameter to allow default values")]
    ColumnNotOptional {
        /// Table identifier.
        table: String,
        /// Column identifier.
        column: String,
    },

    /// A second default was given for the same column.
    #[error("{table}.{column} already has the default value of '{existing}', cannot set it to '{attempted}'")]
    DuplicateDefault {
        /// Table identifier.
        table: String,
        /// Column identifier.
        column: String,
        /// The registered default.
        existing: String,
        /// The rejected default.
        attempted: String,
    },

    /// An optional column was left without a default.
    #[error(
        "Optional parameter {table}.{column} must have its default value passed into the \
         table definition via default()"
    )]
    MissingDefaultForOptionalColumn {
        /// Table identifier.
        table: String,
        /// Column identifier.
        column: String,
    },

    /// More than one primary key was declared.
    #[error("{table} declares more than one PRIMARY KEY ({count} found)")]
    MultiplePrimaryKeys {
        /// Table identifier.
        table: String,
        /// Number of primary keys found, counting an autoincrement column.
        count: usize,
    },

    /// A table, column or schema name is not a valid identifier.
    #[error("Invalid {kind} name <`{name}`>, it must follow the regex {pattern}")]
    InvalidIdentifier {
        /// What was being named (table, column, schema).
        kind: &'static str,
        /// The rejected name.
        name: String,
        /// The pattern names must match.
        pattern: String,
    },

    /// A table schema was declared without columns.
    #[error("{table} must declare at least one column")]
    NoColumns {
        /// Table identifier.
        table: String,
    },

    /// Two columns of the same table map to the same SQL name.
    #[error(
        "{table}.{column} clashes with {table}.{existing}: both map to the SQL column `{sql_name}`"
    )]
    DuplicateColumn {
        /// Table identifier.
        table: String,
        /// Identifier of the rejected column.
        column: String,
        /// Identifier of the column declared first.
        existing: String,
        /// The shared SQL name.
        sql_name: String,
    },

    /// A column lookup by name failed.
    #[error("{table} has no column named '{column}'")]
    UnknownColumn {
        /// Table identifier.
        table: String,
        /// Requested column identifier.
        column: String,
    },

    /// A column of another table was used where a column of this table is required.
    #[error("{column_table}.{column} does not belong to {table}")]
    ColumnNotInTable {
        /// Table being defined.
        table: String,
        /// Column identifier.
        column: String,
        /// Table the column actually belongs to.
        column_table: String,
    },

    /// A second column constraint was registered for the same column.
    #[error("{table}.{column} already has a column constraint")]
    DuplicateColumnConstraint {
        /// Table identifier.
        table: String,
        /// Column identifier.
        column: String,
    },

    /// The autoincrement column cannot be used as one.
    #[error("{table}.{column} cannot be AUTOINCREMENT: {reason}")]
    InvalidAutoIncrementColumn {
        /// Table identifier.
        table: String,
        /// Column identifier.
        column: String,
        /// The violated rule.
        reason: String,
    },

    /// A `WITHOUT ROWID` table has no primary key.
    #[error("{table} is a WITHOUT ROWID table and must declare a PRIMARY KEY")]
    MissingPrimaryKey {
        /// Table identifier.
        table: String,
    },
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_table_and_column() {
        let err = SchemaError::ColumnNotOptional {
            table: "UserAccount".into(),
            column: "id".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("UserAccount.id"));
        assert!(msg.contains("must be an optional parameter"));
    }

    #[test]
    fn test_blank_check_message() {
        let unnamed = SchemaError::BlankCheckExpression { name: None };
        assert_eq!(unnamed.to_string(), "Cannot have blank check constraints");

        let named = SchemaError::BlankCheckExpression {
            name: Some("ck_x".into()),
        };
        assert_eq!(named.to_string(), "Cannot have blank check constraints (`ck_x`)");
    }

    #[test]
    fn test_duplicate_autoincrement_message() {
        let err = SchemaError::DuplicateAutoIncrementColumn {
            table: "Post".into(),
            existing: "id".into(),
            attempted: "views".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("already has an autoincrement column 'id'"));
        assert!(msg.contains("'views'"));
    }
}
