//! DDL statements.

mod create_table;

pub use create_table::{CreateTable, CreateTableBuilder};
