//! The repeated [`indexed-column`](https://www.sqlite.org/syntax/indexed-column.html)
//! clause used by `UNIQUE` and `PRIMARY KEY` constraints.

use super::{Clause, Order};
use crate::error::{Result, SchemaError};
use crate::naming::quote;
use crate::schema::ColumnDescriptor;

/// A column with an optional sort direction.
///
/// An absent order is not the same as [`Order::Asc`]: it is left out of the
/// rendered SQL entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexedColumn<'a> {
    column: &'a ColumnDescriptor,
    order: Option<Order>,
}

impl<'a> IndexedColumn<'a> {
    /// A column without an explicit order.
    #[must_use]
    pub const fn new(column: &'a ColumnDescriptor) -> Self {
        Self {
            column,
            order: None,
        }
    }

    /// A column with an explicit order.
    #[must_use]
    pub const fn ordered(column: &'a ColumnDescriptor, order: Order) -> Self {
        Self {
            column,
            order: Some(order),
        }
    }

    /// The underlying column.
    #[must_use]
    pub const fn column(&self) -> &'a ColumnDescriptor {
        self.column
    }

    /// The explicit order, if any.
    #[must_use]
    pub const fn order(&self) -> Option<Order> {
        self.order
    }

    /// Example: `` `foo` ``.
    #[must_use]
    pub fn to_sql_without_order(&self) -> String {
        quote(&self.column.sql_name())
    }
}

impl Clause for IndexedColumn<'_> {
    /// Example: `` `foo` DESC `` or `` `foo` ``.
    fn to_sql(&self) -> String {
        self.order.map_or_else(
            || self.to_sql_without_order(),
            |order| format!("{} {}", self.to_sql_without_order(), order.as_sql()),
        )
    }
}

impl<'a> From<&'a ColumnDescriptor> for IndexedColumn<'a> {
    fn from(column: &'a ColumnDescriptor) -> Self {
        Self::new(column)
    }
}

/// An ordered, non-empty group of [`IndexedColumn`]s.
///
/// Groups are values: every append returns a new group and leaves the
/// receiver's columns untouched.
///
/// ```rust
/// use oxide_ddl::clause::{Clause, IndexedColumnGroup, Order};
/// use oxide_ddl::schema::{TableSchema, integer, text};
///
/// let schema = TableSchema::builder("Post")
///     .column(integer("postId"))
///     .column(text("name"))
///     .build()
///     .unwrap();
/// let post_id = schema.column("postId").unwrap();
/// let name = schema.column("name").unwrap();
///
/// let group = IndexedColumnGroup::of(post_id).order(Order::Desc).and(name);
/// assert_eq!(group.to_sql(), "(`post_id` DESC, `name`)");
/// assert_eq!(group.to_sql_without_order(), "(`post_id`, `name`)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexedColumnGroup<'a> {
    columns: Vec<IndexedColumn<'a>>,
}

impl<'a> IndexedColumnGroup<'a> {
    /// Creates a group from a list of columns.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyColumnGroup`] if `columns` is empty.
    pub fn new(columns: Vec<IndexedColumn<'a>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(SchemaError::EmptyColumnGroup);
        }
        Ok(Self { columns })
    }

    /// A group holding a single column without an explicit order.
    #[must_use]
    pub fn of(column: &'a ColumnDescriptor) -> Self {
        Self {
            columns: vec![IndexedColumn::new(column)],
        }
    }

    /// A group holding a single ordered column.
    #[must_use]
    pub fn ordered(column: &'a ColumnDescriptor, order: Order) -> Self {
        Self {
            columns: vec![IndexedColumn::ordered(column, order)],
        }
    }

    /// Returns a new group with `column` appended.
    #[must_use]
    pub fn and(self, column: &'a ColumnDescriptor) -> Self {
        self.push(IndexedColumn::new(column))
    }

    /// Returns a new group with `column` appended in the given `order`.
    #[must_use]
    pub fn and_ordered(self, column: &'a ColumnDescriptor, order: Order) -> Self {
        self.push(IndexedColumn::ordered(column, order))
    }

    /// Returns a new group with every column of `other` appended.
    #[must_use]
    pub fn and_group(mut self, other: Self) -> Self {
        self.columns.extend(other.columns);
        self
    }

    /// Returns a new group whose last column has the given `order`.
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        if let Some(last) = self.columns.last_mut() {
            last.order = Some(order);
        }
        self
    }

    /// Returns a new group where every column without an explicit order is
    /// given [`Order::default()`].
    #[must_use]
    pub fn with_default_order(mut self) -> Self {
        for column in &mut self.columns {
            column.order.get_or_insert_with(Order::default);
        }
        self
    }

    /// The columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[IndexedColumn<'a>] {
        &self.columns
    }

    /// Number of columns. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`; a group cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// SQL names of the columns, in order.
    #[must_use]
    pub fn sql_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.column.sql_name()).collect()
    }

    /// Example: ``(`post_id`, `name`, `email`)``.
    #[must_use]
    pub fn to_sql_without_order(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(IndexedColumn::to_sql_without_order)
            .collect();
        format!("({})", columns.join(", "))
    }

    fn push(mut self, column: IndexedColumn<'a>) -> Self {
        self.columns.push(column);
        self
    }
}

impl Clause for IndexedColumnGroup<'_> {
    /// Example: ``(`post_id` DESC, `name` ASC, `email`)``.
    fn to_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(Clause::to_sql).collect();
        format!("({})", columns.join(", "))
    }
}

impl<'a> From<&'a ColumnDescriptor> for IndexedColumnGroup<'a> {
    fn from(column: &'a ColumnDescriptor) -> Self {
        Self::of(column)
    }
}

impl<'a> From<IndexedColumn<'a>> for IndexedColumnGroup<'a> {
    fn from(column: IndexedColumn<'a>) -> Self {
        Self {
            columns: vec![column],
        }
    }
}
