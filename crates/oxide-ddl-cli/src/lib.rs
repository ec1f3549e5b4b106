//! Render SQLite `CREATE TABLE` statements from JSON schema documents.
//!
//! `oxide-ddl-cli` loads a [`SchemaDocument`], builds every table through
//! the `oxide-ddl` builder and prints the DDL or a debug description.
//!
//! # Example
//!
//! ```rust
//! use oxide_ddl_cli::{Catalog, SchemaDocument};
//!
//! let document = SchemaDocument::from_json(
//!     r#"{"tables": [{"name": "UserAccount",
//!                     "columns": [{"name": "id", "type": "INTEGER"}],
//!                     "autoincrement": "id"}]}"#,
//! )
//! .unwrap();
//! let catalog = Catalog::new(document).unwrap();
//!
//! assert_eq!(
//!     catalog.render(None, true).unwrap(),
//!     ["CREATE TABLE `user_account` (`id` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL);"]
//! );
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the DDL of every table
//! oxide-ddl --schema schema.json render --semicolon
//!
//! # Describe a single table
//! oxide-ddl --schema schema.json describe --table ChildTable
//!
//! # Validate the document
//! OXIDE_DDL_SCHEMA=schema.json oxide-ddl check
//! ```

pub mod catalog;
pub mod document;
pub mod error;

pub use catalog::Catalog;
pub use document::SchemaDocument;
pub use error::{CliError, Result};
