//! Error types for the command-line tool.

use oxide_ddl::SchemaError;

/// Errors that can occur while loading or rendering a schema document.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A table or constraint declaration was rejected.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// IO error (reading the schema document).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema document is not valid JSON or has an unexpected shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document declares no table.
    #[error("Schema document declares no tables")]
    EmptyDocument,

    /// Two tables map to the same SQL name.
    #[error("Table '{name}' clashes with table '{existing}': both map to `{sql_name}`")]
    DuplicateTable {
        /// Identifier of the rejected table.
        name: String,
        /// Identifier of the table declared first.
        existing: String,
        /// The shared SQL name.
        sql_name: String,
    },

    /// A table was requested or referenced but is not declared.
    #[error("Unknown table '{0}'")]
    UnknownTable(String),
}

/// Result type for command-line operations.
pub type Result<T> = std::result::Result<T, CliError>;
