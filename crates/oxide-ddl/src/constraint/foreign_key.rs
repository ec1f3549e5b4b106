use super::Constraint;
use crate::clause::{Clause, ForeignKeyAction};
use crate::error::{Result, SchemaError};
use crate::schema::ColumnDescriptor;

/// A `FOREIGN KEY` from a column of the child table to a column of the
/// parent table.
///
/// When the parent column is updated or deleted, the `on_update` or
/// `on_delete` action applies to child rows. Both default to
/// [`ForeignKeyAction::NoAction`].
///
/// See <https://www.sqlite.org/foreignkeys.html>.
///
/// ```rust
/// use oxide_ddl::clause::{Clause, ForeignKeyAction};
/// use oxide_ddl::schema::{TableSchema, integer};
///
/// let parent = TableSchema::builder("ParentTable")
///     .column(integer("id"))
///     .build()
///     .unwrap();
/// let child = TableSchema::builder("ChildTable")
///     .column(integer("parentTableId"))
///     .build()
///     .unwrap();
///
/// let fk = child
///     .column("parentTableId")
///     .unwrap()
///     .references(parent.column("id").unwrap())
///     .on_update(ForeignKeyAction::Cascade)
///     .on_delete(ForeignKeyAction::Restrict);
///
/// assert_eq!(
///     fk.to_sql(),
///     "CONSTRAINT `fk_child_table_parent_table_id` FOREIGN KEY (`parent_table_id`) \
///      REFERENCES `parent_table`(`id`) ON UPDATE CASCADE ON DELETE RESTRICT"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForeignKey<'a> {
    child: &'a ColumnDescriptor,
    parent: &'a ColumnDescriptor,
    on_update: ForeignKeyAction,
    on_delete: ForeignKeyAction,
}

impl<'a> ForeignKey<'a> {
    /// Links `child` to `parent` with both actions set to `NO ACTION`.
    #[must_use]
    pub const fn references(child: &'a ColumnDescriptor, parent: &'a ColumnDescriptor) -> Self {
        Self {
            child,
            parent,
            on_update: ForeignKeyAction::NoAction,
            on_delete: ForeignKeyAction::NoAction,
        }
    }

    /// Sets the `ON UPDATE` action.
    #[must_use]
    pub const fn on_update(self, on_update: ForeignKeyAction) -> Self {
        Self { on_update, ..self }
    }

    /// Sets the `ON DELETE` action.
    #[must_use]
    pub const fn on_delete(self, on_delete: ForeignKeyAction) -> Self {
        Self { on_delete, ..self }
    }

    /// The referencing column.
    #[must_use]
    pub const fn child(&self) -> &'a ColumnDescriptor {
        self.child
    }

    /// The referenced column.
    #[must_use]
    pub const fn parent(&self) -> &'a ColumnDescriptor {
        self.parent
    }

    /// Identifier of the child (local) table.
    #[must_use]
    pub fn child_table(&self) -> &'a str {
        self.child.table()
    }

    /// Identifier of the parent (referenced) table.
    #[must_use]
    pub fn parent_table(&self) -> &'a str {
        self.parent.table()
    }

    /// The `ON UPDATE` action.
    #[must_use]
    pub const fn update_action(&self) -> ForeignKeyAction {
        self.on_update
    }

    /// The `ON DELETE` action.
    #[must_use]
    pub const fn delete_action(&self) -> ForeignKeyAction {
        self.on_delete
    }

    /// Checks that both columns share the same type affinity.
    ///
    /// SQLite does not enforce this itself.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ForeignKeyTypeMismatch`] if the affinities
    /// differ.
    pub fn validate(&self) -> Result<()> {
        if self.child.data_type() == self.parent.data_type() {
            return Ok(());
        }
        Err(SchemaError::ForeignKeyTypeMismatch {
            child_table: self.child.table().to_string(),
            child_column: self.child.name().to_string(),
            child_type: self.child.data_type().to_string(),
            parent_table: self.parent.table().to_string(),
            parent_column: self.parent.name().to_string(),
            parent_type: self.parent.data_type().to_string(),
        })
    }

    /// `fk_<child table>_<parent table>_<parent column>`, e.g.
    /// `fk_child_table_parent_table_id`.
    #[must_use]
    pub fn name(&self) -> String {
        format!(
            "fk_{}_{}_{}",
            self.child.table_sql_name(),
            self.parent.table_sql_name(),
            self.parent.sql_name()
        )
    }

    /// Example: `Foreign Key child_table.parent_id -> parent.id onUpdate=NO ACTION onDelete=CASCADE`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Foreign Key {}.{} -> {}.{} onUpdate={} onDelete={}",
            self.child.table_sql_name(),
            self.child.sql_name(),
            self.parent.table_sql_name(),
            self.parent.sql_name(),
            self.on_update.as_sql(),
            self.on_delete.as_sql()
        )
    }
}

impl Clause for ForeignKey<'_> {
    fn to_sql(&self) -> String {
        format!(
            "CONSTRAINT `{}` FOREIGN KEY (`{}`) REFERENCES `{}`(`{}`) {} {}",
            self.name(),
            self.child.sql_name(),
            self.parent.table_sql_name(),
            self.parent.sql_name(),
            self.on_update.on_update_clause(),
            self.on_delete.on_delete_clause()
        )
    }
}

impl Constraint for ForeignKey<'_> {
    fn constraint_name(&self) -> Option<String> {
        Some(self.name())
    }
}
