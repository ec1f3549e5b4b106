use super::Constraint;
use crate::clause::{Clause, ConflictAction, IndexedColumnGroup, Order};
use crate::schema::ColumnDescriptor;

/// The `PRIMARY KEY` table constraint.
///
/// A table has at most one primary key, which the `CREATE TABLE` builder
/// enforces. Primary keys are never referenced by name, so
/// [`Constraint::constraint_name`] is always `None`.
///
/// See <https://www.sqlite.org/lang_createtable.html#constraints>.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimaryKey<'a> {
    columns: IndexedColumnGroup<'a>,
    on_conflict: ConflictAction,
}

impl<'a> PrimaryKey<'a> {
    /// A primary key on a single column.
    #[must_use]
    pub fn on(column: &'a ColumnDescriptor) -> Self {
        Self::from(IndexedColumnGroup::of(column))
    }

    /// Appends a column.
    #[must_use]
    pub fn and(self, column: &'a ColumnDescriptor) -> Self {
        self.and_ordered(column, Order::default())
    }

    /// Appends a column with an explicit order.
    #[must_use]
    pub fn and_ordered(self, column: &'a ColumnDescriptor, order: Order) -> Self {
        Self {
            columns: self.columns.and_ordered(column, order),
            ..self
        }
    }

    /// Sets the order of the last column.
    #[must_use]
    pub fn order(self, order: Order) -> Self {
        Self {
            columns: self.columns.order(order),
            ..self
        }
    }

    /// Sets the conflict resolution strategy.
    #[must_use]
    pub fn on_conflict(self, on_conflict: ConflictAction) -> Self {
        Self {
            on_conflict,
            ..self
        }
    }

    /// The key columns.
    #[must_use]
    pub const fn columns(&self) -> &IndexedColumnGroup<'a> {
        &self.columns
    }

    /// The conflict resolution strategy.
    #[must_use]
    pub const fn conflict_action(&self) -> ConflictAction {
        self.on_conflict
    }

    /// Example: ``Primary Key on (`id` ASC) onConflict=ABORT``.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Primary Key on {} onConflict={}",
            self.columns.to_sql(),
            self.on_conflict.as_sql()
        )
    }
}

impl<'a> From<IndexedColumnGroup<'a>> for PrimaryKey<'a> {
    fn from(columns: IndexedColumnGroup<'a>) -> Self {
        Self {
            columns: columns.with_default_order(),
            on_conflict: ConflictAction::default(),
        }
    }
}

impl Clause for PrimaryKey<'_> {
    /// Example: ``CONSTRAINT PRIMARY KEY(`id` DESC, `post_id` ASC) ON CONFLICT ABORT``.
    fn to_sql(&self) -> String {
        format!(
            "CONSTRAINT PRIMARY KEY{} {}",
            self.columns.to_sql(),
            self.on_conflict.to_sql()
        )
    }
}

impl Constraint for PrimaryKey<'_> {
    fn constraint_name(&self) -> Option<String> {
        None
    }
}
