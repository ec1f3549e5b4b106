use super::Constraint;
use crate::clause::{Clause, ConflictAction, IndexedColumnGroup, Order};
use crate::schema::ColumnDescriptor;

/// A `UNIQUE` table constraint over one or more columns.
///
/// Columns without an explicit order are rendered `ASC` and the conflict
/// strategy is always written out, `ABORT` unless set otherwise. The
/// constraint name is derived from the columns: `uq_<col1>_<col2>...`.
///
/// ```rust
/// use oxide_ddl::clause::{Clause, ConflictAction};
/// use oxide_ddl::constraint::{Constraint, Unique};
/// use oxide_ddl::schema::{TableSchema, integer};
///
/// let schema = TableSchema::builder("Pair")
///     .column(integer("a"))
///     .column(integer("b"))
///     .build()
///     .unwrap();
/// let unique = Unique::on(schema.column("a").unwrap())
///     .and(schema.column("b").unwrap())
///     .on_conflict(ConflictAction::Rollback);
///
/// assert_eq!(unique.constraint_name().as_deref(), Some("uq_a_b"));
/// assert_eq!(
///     unique.to_sql(),
///     "CONSTRAINT `uq_a_b` UNIQUE (`a` ASC, `b` ASC) ON CONFLICT ROLLBACK"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unique<'a> {
    columns: IndexedColumnGroup<'a>,
    on_conflict: ConflictAction,
}

impl<'a> Unique<'a> {
    /// A unique constraint on a single column.
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

    /// The constrained columns.
    #[must_use]
    pub const fn columns(&self) -> &IndexedColumnGroup<'a> {
        &self.columns
    }

    /// The conflict resolution strategy.
    #[must_use]
    pub const fn conflict_action(&self) -> ConflictAction {
        self.on_conflict
    }

    /// Example: `uq_id_post_id`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("uq_{}", self.columns.sql_names().join("_"))
    }

    /// Example: ``Unique on (`a` ASC) onConflict=ABORT``.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Unique on {} onConflict={}",
            self.columns.to_sql(),
            self.on_conflict.as_sql()
        )
    }
}

impl<'a> From<IndexedColumnGroup<'a>> for Unique<'a> {
    fn from(columns: IndexedColumnGroup<'a>) -> Self {
        Self {
            columns: columns.with_default_order(),
            on_conflict: ConflictAction::default(),
        }
    }
}

impl Clause for Unique<'_> {
    /// Example: ``CONSTRAINT `uq_a_b` UNIQUE (`a` ASC, `b` ASC) ON CONFLICT ROLLBACK``.
    fn to_sql(&self) -> String {
        format!(
            "CONSTRAINT `{}` UNIQUE {} {}",
            self.name(),
            self.columns.to_sql(),
            self.on_conflict.to_sql()
        )
    }
}

impl Constraint for Unique<'_> {
    fn constraint_name(&self) -> Option<String> {
        Some(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{TableSchema, integer};

    fn table() -> TableSchema {
        TableSchema::builder("UniqueTestTable")
            .column(integer("a"))
            .column(integer("b"))
            .column(integer("postId"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_on_uses_default_order() {
        let schema = table();
        let unique = Unique::on(schema.column("a").unwrap());
        assert_eq!(unique.columns().columns()[0].order(), Some(Order::Asc));
        assert_eq!(unique.conflict_action(), ConflictAction::Abort);
    }

    #[test]
    fn test_from_group_applies_defaults() {
        let schema = table();
        let group = IndexedColumnGroup::of(schema.column("a").unwrap()).and(schema.column("b").unwrap());
        let unique = Unique::from(group);
        assert_eq!(unique.constraint_name().as_deref(), Some("uq_a_b"));
        assert_eq!(
            unique.to_sql(),
            "CONSTRAINT `uq_a_b` UNIQUE (`a` ASC, `b` ASC) ON CONFLICT ABORT"
        );
    }

    #[test]
    fn test_on_conflict() {
        let schema = table();
        let unique = Unique::on(schema.column("a").unwrap())
            .and(schema.column("b").unwrap())
            .on_conflict(ConflictAction::Rollback);
        let changed = unique.clone().on_conflict(ConflictAction::Fail);
        assert_eq!(unique.conflict_action(), ConflictAction::Rollback);
        assert_eq!(changed.conflict_action(), ConflictAction::Fail);
        assert_eq!(
            unique.to_sql(),
            "CONSTRAINT `uq_a_b` UNIQUE (`a` ASC, `b` ASC) ON CONFLICT ROLLBACK"
        );
    }

    #[test]
    fn test_name_uses_sql_names_in_group_order() {
        let schema = table();
        let unique = Unique::on(schema.column("postId").unwrap())
            .order(Order::Desc)
            .and(schema.column("a").unwrap());
        assert_eq!(unique.name(), "uq_post_id_a");
        assert_eq!(
            unique.to_sql(),
            "CONSTRAINT `uq_post_id_a` UNIQUE (`post_id` DESC, `a` ASC) ON CONFLICT ABORT"
        );
    }

    #[test]
    fn test_describe() {
        let schema = table();
        let described = Unique::on(schema.column("a").unwrap()).describe();
        assert!(described.contains("Unique on"));
        assert!(described.contains("onConflict"));
    }

    #[test]
    fn test_render_is_stable() {
        let schema = table();
        let unique = Unique::on(schema.column("a").unwrap()).and(schema.column("b").unwrap());
        assert_eq!(unique.to_sql(), unique.to_sql());
    }
}
