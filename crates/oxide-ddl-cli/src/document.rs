//! JSON schema documents.
//!
//! A document lists tables together with their columns and constraints:
//!
//! ```json
//! {
//!   "tables": [{
//!     "name": "ChildTable",
//!     "columns": [
//!       {"name": "id", "type": "INTEGER"},
//!       {"name": "parentTableId", "type": "INTEGER"},
//!       {"name": "label", "type": "TEXT", "optional": true, "default": "none",
//!        "collation": "NOCASE"}
//!     ],
//!     "autoincrement": "id",
//!     "unique": [{"columns": [{"name": "label", "order": "DESC"}], "on_conflict": "FAIL"}],
//!     "checks": [{"name": "ck_label", "expression": "length(label) > 0"}],
//!     "foreign_keys": [{
//!       "column": "parentTableId",
//!       "references": {"table": "ParentTable", "column": "id"},
//!       "on_update": "CASCADE",
//!       "on_delete": "RESTRICT"
//!     }]
//!   }]
//! }
//! ```
//!
//! Keywords use their enum spelling in `SCREAMING_SNAKE_CASE`, so the
//! `NO ACTION` foreign key action is written `NO_ACTION`.

use std::path::Path;

use oxide_ddl::{Collation, ConflictAction, DataType, DefaultValue, ForeignKeyAction, Order};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::Result;

/// A set of table declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    /// Tables, in output order.
    pub tables: Vec<TableDocument>,
}

impl SchemaDocument {
    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CliError::Serialization`] if the text is not a valid
    /// document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a document file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CliError::Io`] if the file cannot be read, or
    /// [`crate::CliError::Serialization`] if it is not a valid document.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading schema document");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// One table declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDocument {
    /// Pascal case table identifier.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDocument>,
    /// Non-column fields of the described aggregate.
    #[serde(default)]
    pub extra_fields: Vec<String>,
    #[serde(default)]
    pub without_rowid: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    /// Database qualifier such as `main` or `temp`.
    #[serde(default)]
    pub schema_name: Option<String>,
    /// Column declared `INTEGER PRIMARY KEY AUTOINCREMENT`.
    #[serde(default)]
    pub autoincrement: Option<String>,
    #[serde(default)]
    pub primary_key: Option<KeyDocument>,
    #[serde(default)]
    pub unique: Vec<KeyDocument>,
    #[serde(default)]
    pub checks: Vec<CheckDocument>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDocument>,
}

/// One column declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnDocument {
    /// Camel case column identifier.
    pub name: String,
    /// Type affinity.
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column has a default value.
    #[serde(default)]
    pub optional: bool,
    /// The default value. An explicit `null` is a `NULL` default, a missing
    /// key is no default.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<Collation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_null_on_conflict: Option<ConflictAction>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<DefaultValue>, D::Error>
where
    D: Deserializer<'de>,
{
    DefaultValue::deserialize(deserializer).map(Some)
}

/// Columns of a `PRIMARY KEY` or `UNIQUE` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyDocument {
    pub columns: Vec<IndexedColumnDocument>,
    #[serde(default)]
    pub on_conflict: ConflictAction,
}

/// A column reference with an optional order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexedColumnDocument {
    pub name: String,
    #[serde(default)]
    pub order: Option<Order>,
}

/// A `CHECK` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckDocument {
    #[serde(default)]
    pub name: Option<String>,
    pub expression: String,
}

/// A `FOREIGN KEY` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForeignKeyDocument {
    /// Child column in the declaring table.
    pub column: String,
    pub references: ReferenceDocument,
    #[serde(default)]
    pub on_update: ForeignKeyAction,
    #[serde(default)]
    pub on_delete: ForeignKeyAction,
}

/// The parent side of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceDocument {
    pub table: String,
    pub column: String,
}
