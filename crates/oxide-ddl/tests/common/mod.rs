#![allow(dead_code)]

use oxide_ddl::schema::{TableSchema, TableSchemaBuilder, integer, real, text};
use oxide_ddl::{CreateTable, CreateTableBuilder, SchemaError};

pub fn schema(builder: TableSchemaBuilder) -> TableSchema {
    builder
        .build()
        .unwrap_or_else(|e| panic!("Failed to build schema: {e}"))
}

pub fn parent_table() -> TableSchema {
    schema(
        TableSchema::builder("ParentTable")
            .column(integer("id"))
            .column(text("code")),
    )
}

pub fn child_table() -> TableSchema {
    schema(
        TableSchema::builder("ChildTable")
            .column(integer("id"))
            .column(integer("parentTableId"))
            .column(text("label").nullable()),
    )
}

/// One required column and one optional column.
pub fn counter_table() -> TableSchema {
    schema(
        TableSchema::builder("CounterTable")
            .column(integer("id"))
            .column(integer("value").optional()),
    )
}

pub fn measurement_table() -> TableSchema {
    schema(
        TableSchema::builder("Measurement")
            .column(integer("id"))
            .column(text("sensorName"))
            .column(real("reading"))
            .column(real("calibration").nullable().optional()),
    )
}

pub fn builder(table: &TableSchema) -> CreateTableBuilder<'_> {
    CreateTable::of(table)
        .unwrap_or_else(|e| panic!("Failed to start CREATE TABLE for {}: {e}", table.name()))
}

pub fn build_err(builder: CreateTableBuilder<'_>) -> SchemaError {
    builder
        .build()
        .expect_err("Expected CREATE TABLE validation to fail")
}
