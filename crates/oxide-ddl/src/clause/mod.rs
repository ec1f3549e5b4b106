//! SQL clause primitives.
//!
//! Everything that ends up in a `CREATE TABLE` statement implements
//! [`Clause`]: keyword enums, indexed column groups, column and table
//! constraints, and the statement itself.

mod indexed_column;
mod keywords;

pub use indexed_column::{IndexedColumn, IndexedColumnGroup};
pub use keywords::{Collation, ConflictAction, DataType, ForeignKeyAction, Order};

/// A fragment of SQL that can render itself.
///
/// Rendering never fails: all validation happens when the clause is built.
pub trait Clause {
    /// Returns the SQL text for this clause.
    fn to_sql(&self) -> String;
}
