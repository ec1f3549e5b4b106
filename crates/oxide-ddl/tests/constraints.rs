//! Tests for identifier naming and standalone constraint rendering.

mod common;
use common::*;

use oxide_ddl::clause::{IndexedColumn, IndexedColumnGroup};
use oxide_ddl::schema::{TableSchema, integer, text};
use oxide_ddl::{
    Check, Clause, ConflictAction, Constraint, ForeignKeyAction, Order, PrimaryKey, SchemaError,
    Unique, to_sql_name,
};

// =============================================================================
// Naming
// =============================================================================

#[test]
fn sql_names_split_on_uppercase_segments() {
    let cases = [
        ("Id", "id"),
        ("thisHasALongName", "this_has_a_long_name"),
        ("ThisExampleTableName", "this_example_table_name"),
        ("ParentTable", "parent_table"),
        ("parentTableId", "parent_table_id"),
        ("version2Name", "version2_name"),
        ("already_snake", "already_snake"),
    ];
    for (identifier, expected) in cases {
        assert_eq!(to_sql_name(identifier), expected, "identifier {identifier}");
    }
}

#[test]
fn sql_names_join_every_segment() {
    let segments = ["Alpha", "Beta", "Gamma", "D"];
    for n in 1..=segments.len() {
        let identifier: String = segments[..n].concat();
        let expected = segments[..n]
            .iter()
            .map(|s| s.to_lowercase())
            .collect::<Vec<_>>()
            .join("_");
        assert_eq!(to_sql_name(&identifier), expected);
    }
}

// =============================================================================
// Indexed column groups
// =============================================================================

#[test]
fn empty_group_always_fails() {
    assert_eq!(
        IndexedColumnGroup::new(Vec::new()).unwrap_err(),
        SchemaError::EmptyColumnGroup
    );
}

#[test]
fn group_renders_one_token_per_column() {
    let table = schema(
        TableSchema::builder("Wide")
            .column(integer("a"))
            .column(integer("b"))
            .column(text("c"))
            .column(text("d")),
    );
    for n in 1..=table.columns().len() {
        let columns = table.columns()[..n]
            .iter()
            .map(IndexedColumn::new)
            .collect();
        let group = IndexedColumnGroup::new(columns).unwrap();
        let sql = group.to_sql();
        assert_eq!(group.len(), n);
        assert_eq!(sql.matches('`').count(), 2 * n, "{sql}");
        assert_eq!(sql.split(", ").count(), n, "{sql}");
    }
}

#[test]
fn group_keeps_composition_order() {
    let table = child_table();
    let group = IndexedColumnGroup::ordered(table.column("label").unwrap(), Order::Desc)
        .and(table.column("id").unwrap())
        .and_group(IndexedColumnGroup::of(table.column("parentTableId").unwrap()).order(Order::Asc));
    assert_eq!(group.to_sql(), "(`label` DESC, `id`, `parent_table_id` ASC)");
    assert_eq!(group.sql_names(), ["label", "id", "parent_table_id"]);
}

// =============================================================================
// Check
// =============================================================================

#[test]
fn check_validation() {
    assert!(matches!(
        Check::named("bad name!", "1=1").unwrap_err(),
        SchemaError::InvalidCheckName { .. }
    ));
    assert!(matches!(
        Check::named("ck_x", "").unwrap_err(),
        SchemaError::BlankCheckExpression { .. }
    ));
    assert_eq!(Check::new("1=1").unwrap().to_sql(), "CONSTRAINT CHECK (1=1)");
}

// =============================================================================
// Unique / Primary key
// =============================================================================

#[test]
fn unique_from_group_applies_defaults() {
    let table = schema(
        TableSchema::builder("Pair")
            .column(integer("a"))
            .column(integer("b")),
    );
    let unique = Unique::from(
        IndexedColumnGroup::of(table.column("a").unwrap()).and(table.column("b").unwrap()),
    );
    assert_eq!(unique.constraint_name().as_deref(), Some("uq_a_b"));
    assert_eq!(
        unique.to_sql(),
        "CONSTRAINT `uq_a_b` UNIQUE (`a` ASC, `b` ASC) ON CONFLICT ABORT"
    );
}

#[test]
fn primary_key_rendering() {
    let table = child_table();
    let key = PrimaryKey::on(table.column("id").unwrap())
        .and(table.column("parentTableId").unwrap())
        .order(Order::Desc)
        .on_conflict(ConflictAction::Replace);
    assert_eq!(
        key.to_sql(),
        "CONSTRAINT PRIMARY KEY(`id` ASC, `parent_table_id` DESC) ON CONFLICT REPLACE"
    );
    assert_eq!(key.constraint_name(), None);
}

// =============================================================================
// Foreign key
// =============================================================================

#[test]
fn foreign_key_clause_is_exact() {
    let parent = parent_table();
    let child = child_table();
    let fk = child
        .column("parentTableId")
        .unwrap()
        .references(parent.column("id").unwrap())
        .on_update(ForeignKeyAction::Cascade)
        .on_delete(ForeignKeyAction::Restrict);
    assert_eq!(
        fk.to_sql(),
        "CONSTRAINT `fk_child_table_parent_table_id` FOREIGN KEY (`parent_table_id`) \
         REFERENCES `parent_table`(`id`) ON UPDATE CASCADE ON DELETE RESTRICT"
    );
    assert_eq!(fk.to_sql(), fk.to_sql());
}

#[test]
fn foreign_key_set_actions() {
    let parent = parent_table();
    let child = child_table();
    let fk = child
        .column("parentTableId")
        .unwrap()
        .references(parent.column("id").unwrap())
        .on_update(ForeignKeyAction::SetDefault)
        .on_delete(ForeignKeyAction::SetNull);
    assert!(
        fk.to_sql()
            .ends_with("ON UPDATE SET DEFAULT ON DELETE SET NULL")
    );
}
