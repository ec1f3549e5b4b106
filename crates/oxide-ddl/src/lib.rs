//! # oxide-ddl
//!
//! A schema definition library for SQLite `CREATE TABLE` statements.
//!
//! This crate provides:
//! - Explicit table schema descriptions with snake_case SQL naming
//! - Typed column and table constraints (`CHECK`, `UNIQUE`, `PRIMARY KEY`,
//!   `FOREIGN KEY`)
//! - A validating `CREATE TABLE` builder with deterministic rendering
//!
//! No SQL is executed; the output is DDL text.
//!
//! ## Declaring a table
//!
//! ```rust
//! use oxide_ddl::clause::{Clause, ForeignKeyAction};
//! use oxide_ddl::schema::{TableSchema, integer, text};
//! use oxide_ddl::statement::CreateTable;
//!
//! let parent = TableSchema::builder("ParentTable")
//!     .column(integer("id"))
//!     .build()
//!     .unwrap();
//! let child = TableSchema::builder("ChildTable")
//!     .column(integer("id"))
//!     .column(integer("parentTableId"))
//!     .column(text("label").nullable())
//!     .build()
//!     .unwrap();
//!
//! let fk = child
//!     .column("parentTableId")
//!     .unwrap()
//!     .references(parent.column("id").unwrap())
//!     .on_delete(ForeignKeyAction::Cascade);
//!
//! let statement = CreateTable::of(&child)
//!     .unwrap()
//!     .auto_increment(child.column("id").unwrap())
//!     .unwrap()
//!     .constraint(fk)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert!(statement.to_sql().starts_with("CREATE TABLE `child_table` ("));
//! ```
//!
//! ## Validation
//!
//! Mistakes are reported while the table is declared, never while it is
//! rendered:
//!
//! ```rust
//! use oxide_ddl::SchemaError;
//! use oxide_ddl::schema::{TableSchema, integer};
//! use oxide_ddl::statement::CreateTable;
//!
//! let schema = TableSchema::builder("Counter")
//!     .column(integer("value").optional())
//!     .build()
//!     .unwrap();
//!
//! // The optional column never got a default.
//! let err = CreateTable::of(&schema).unwrap().build().unwrap_err();
//! assert!(matches!(err, SchemaError::MissingDefaultForOptionalColumn { .. }));
//! ```

pub mod clause;
pub mod constraint;
pub mod error;
pub mod naming;
pub mod schema;
pub mod statement;

pub use clause::{Clause, Collation, ConflictAction, DataType, ForeignKeyAction, Order};
pub use constraint::{
    Check, ColumnConstraint, Constraint, DefaultValue, ForeignKey, PrimaryKey, TableConstraint,
    Unique,
};
pub use error::{Result, SchemaError};
pub use naming::to_sql_name;
pub use schema::{ColumnDescriptor, TableSchema};
pub use statement::{CreateTable, CreateTableBuilder};
