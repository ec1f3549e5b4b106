//! Turns a [`SchemaDocument`] into validated `CREATE TABLE` statements.

use std::collections::HashMap;

use oxide_ddl::clause::{IndexedColumn, IndexedColumnGroup};
use oxide_ddl::schema::{ColumnBuilder, TableSchema};
use oxide_ddl::{
    Check, Clause, ColumnConstraint, CreateTable, PrimaryKey, SchemaError, Unique, to_sql_name,
};
use tracing::{debug, info};

use crate::document::{ColumnDocument, IndexedColumnDocument, SchemaDocument, TableDocument};
use crate::error::{CliError, Result};

/// The tables of a document, with their schemas built.
///
/// Statements borrow the schemas held here, so foreign keys can reference
/// any table of the document regardless of declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    documents: Vec<TableDocument>,
    schemas: Vec<TableSchema>,
}

impl Catalog {
    /// Builds every table schema of `document`.
    ///
    /// # Errors
    ///
    /// - [`CliError::EmptyDocument`] if the document has no table.
    /// - [`CliError::DuplicateTable`] if two tables map to the same SQL name,
    ///   e.g. `BlogPost` and `blog_post`.
    /// - [`CliError::Schema`] if a table or column name is invalid.
    pub fn new(document: SchemaDocument) -> Result<Self> {
        if document.tables.is_empty() {
            return Err(CliError::EmptyDocument);
        }
        let mut seen: HashMap<String, &str> = HashMap::new();
        let mut schemas = Vec::with_capacity(document.tables.len());
        for table in &document.tables {
            let sql_name = to_sql_name(&table.name);
            if let Some(existing) = seen.get(&sql_name) {
                return Err(CliError::DuplicateTable {
                    name: table.name.clone(),
                    existing: (*existing).to_string(),
                    sql_name,
                });
            }
            seen.insert(sql_name, table.name.as_str());
            schemas.push(table_schema(table)?);
        }
        debug!(tables = schemas.len(), "built table schemas");
        Ok(Self {
            documents: document.tables,
            schemas,
        })
    }

    /// Table names in document order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|t| t.name.as_str())
    }

    /// The schema of table `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownTable`] if no table has that name.
    pub fn schema(&self, name: &str) -> Result<&TableSchema> {
        self.schemas
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| CliError::UnknownTable(name.to_string()))
    }

    /// Builds the `CREATE TABLE` statement of table `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownTable`] for an undeclared table, or
    /// [`CliError::Schema`] if any declaration is rejected.
    pub fn statement(&self, name: &str) -> Result<CreateTable<'_>> {
        let document = self
            .documents
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| CliError::UnknownTable(name.to_string()))?;
        self.build(document)
    }

    /// Builds the statements of the selected tables: `table`, or every table
    /// in document order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Self::statement`].
    pub fn statements(&self, table: Option<&str>) -> Result<Vec<CreateTable<'_>>> {
        match table {
            Some(name) => Ok(vec![self.statement(name)?]),
            None => self.documents.iter().map(|d| self.build(d)).collect(),
        }
    }

    /// Renders the selected statements, optionally terminated by `;`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building a statement.
    pub fn render(&self, table: Option<&str>, semicolon: bool) -> Result<Vec<String>> {
        let terminator = if semicolon { ";" } else { "" };
        Ok(self
            .statements(table)?
            .iter()
            .map(|s| format!("{}{terminator}", s.to_sql()))
            .collect())
    }

    /// Describes the selected statements.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building a statement.
    pub fn describe(&self, table: Option<&str>) -> Result<Vec<String>> {
        Ok(self
            .statements(table)?
            .iter()
            .map(CreateTable::describe)
            .collect())
    }

    /// Validates every table and returns how many there are.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building a statement.
    pub fn check(&self) -> Result<usize> {
        let statements = self.statements(None)?;
        for statement in &statements {
            info!(table = %statement.table().name(), "table is valid");
        }
        Ok(statements.len())
    }

    fn build(&self, document: &TableDocument) -> Result<CreateTable<'_>> {
        let schema = self.schema(&document.name)?;
        let mut builder = CreateTable::of(schema)?.without_rowid(document.without_rowid);
        if document.if_not_exists {
            builder = builder.if_not_exists();
        }
        if let Some(name) = &document.schema_name {
            builder = builder.schema_name(name.as_str())?;
        }
        if let Some(column) = &document.autoincrement {
            builder = builder.auto_increment(schema.column(column)?)?;
        }

        for column in &document.columns {
            let descriptor = schema.column(&column.name)?;
            if let Some(value) = &column.default {
                builder = builder.default(descriptor, value.clone())?;
            }
            if column.collation.is_some() || column.not_null_on_conflict.is_some() {
                let mut constraint = ColumnConstraint::on(descriptor);
                if let Some(collation) = column.collation {
                    constraint = constraint.with_collation(collation);
                }
                if let Some(action) = column.not_null_on_conflict {
                    constraint = constraint.with_not_null_on_conflict(action)?;
                }
                builder = builder.column_constraint(constraint)?;
            }
        }

        if let Some(key) = &document.primary_key {
            let columns = column_group(schema, &key.columns)?;
            builder = builder.constraint(PrimaryKey::from(columns).on_conflict(key.on_conflict))?;
        }
        for key in &document.unique {
            let columns = column_group(schema, &key.columns)?;
            builder = builder.constraint(Unique::from(columns).on_conflict(key.on_conflict))?;
        }
        for check in &document.checks {
            let check = match &check.name {
                Some(name) => Check::named(name.as_str(), check.expression.as_str())?,
                None => Check::new(check.expression.as_str())?,
            };
            builder = builder.constraint(check)?;
        }
        for fk in &document.foreign_keys {
            let parent = self
                .schema(&fk.references.table)?
                .column(&fk.references.column)?;
            let constraint = schema
                .column(&fk.column)?
                .references(parent)
                .on_update(fk.on_update)
                .on_delete(fk.on_delete);
            builder = builder.constraint(constraint)?;
        }

        let statement = builder.build()?;
        debug!(table = %document.name, sql = %statement.to_sql(), "rendered table");
        Ok(statement)
    }
}

fn table_schema(document: &TableDocument) -> Result<TableSchema> {
    let mut builder = TableSchema::builder(document.name.as_str());
    for column in &document.columns {
        builder = builder.column(column_builder(column));
    }
    for field in &document.extra_fields {
        builder = builder.field(field.as_str());
    }
    Ok(builder.build()?)
}

fn column_builder(document: &ColumnDocument) -> ColumnBuilder {
    let mut column = ColumnBuilder::new(document.name.as_str(), document.data_type);
    if document.nullable {
        column = column.nullable();
    }
    if document.optional {
        column = column.optional();
    }
    column
}

fn column_group<'a>(
    schema: &'a TableSchema,
    columns: &[IndexedColumnDocument],
) -> Result<IndexedColumnGroup<'a>> {
    let columns = columns
        .iter()
        .map(|c| {
            let column = schema.column(&c.name)?;
            Ok(c.order.map_or_else(
                || IndexedColumn::new(column),
                |order| IndexedColumn::ordered(column, order),
            ))
        })
        .collect::<std::result::Result<Vec<_>, SchemaError>>()?;
    Ok(IndexedColumnGroup::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(json: &str) -> Catalog {
        Catalog::new(SchemaDocument::from_json(json).unwrap()).unwrap()
    }

    const PARENT_AND_CHILD: &str = r#"{"tables": [
        {"name": "ChildTable",
         "columns": [{"name": "id", "type": "INTEGER"},
                     {"name": "parentTableId", "type": "INTEGER"}],
         "autoincrement": "id",
         "foreign_keys": [{"column": "parentTableId",
                           "references": {"table": "ParentTable", "column": "id"},
                           "on_update": "CASCADE", "on_delete": "RESTRICT"}]},
        {"name": "ParentTable",
         "columns": [{"name": "id", "type": "INTEGER"}],
         "primary_key": {"columns": [{"name": "id"}]}}
    ]}"#;

    #[test]
    fn test_forward_reference() {
        let catalog = catalog(PARENT_AND_CHILD);
        let rendered = catalog.render(None, false).unwrap();
        assert_eq!(
            rendered,
            [
                "CREATE TABLE `child_table` (`id` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
                 `parent_table_id` INTEGER NOT NULL, \
                 CONSTRAINT `fk_child_table_parent_table_id` FOREIGN KEY (`parent_table_id`) \
                 REFERENCES `parent_table`(`id`) ON UPDATE CASCADE ON DELETE RESTRICT)",
                "CREATE TABLE `parent_table` (`id` INTEGER NOT NULL, \
                 CONSTRAINT PRIMARY KEY(`id` ASC) ON CONFLICT ABORT)",
            ]
        );
    }

    #[test]
    fn test_render_single_table_with_semicolon() {
        let catalog = catalog(PARENT_AND_CHILD);
        let rendered = catalog.render(Some("ParentTable"), true).unwrap();
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].ends_with("ON CONFLICT ABORT);"));
        assert_eq!(
            catalog.table_names().collect::<Vec<_>>(),
            ["ChildTable", "ParentTable"]
        );
    }

    #[test]
    fn test_unknown_table() {
        let catalog = catalog(PARENT_AND_CHILD);
        assert!(matches!(
            catalog.render(Some("Missing"), false),
            Err(CliError::UnknownTable(ref name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_duplicate_table() {
        let doc = SchemaDocument::from_json(
            r#"{"tables": [
                {"name": "Tag", "columns": [{"name": "id", "type": "INTEGER"}]},
                {"name": "Tag", "columns": [{"name": "id", "type": "INTEGER"}]}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            Catalog::new(doc),
            Err(CliError::DuplicateTable { ref name, .. }) if name == "Tag"
        ));
    }

    #[test]
    fn test_tables_sharing_a_sql_name() {
        let doc = SchemaDocument::from_json(
            r#"{"tables": [
                {"name": "BlogPost", "columns": [{"name": "id", "type": "INTEGER"}]},
                {"name": "blog_post", "columns": [{"name": "id", "type": "INTEGER"}]}
            ]}"#,
        )
        .unwrap();
        let err = Catalog::new(doc).unwrap_err();
        assert!(matches!(
            err,
            CliError::DuplicateTable { ref name, ref existing, ref sql_name }
                if name == "blog_post" && existing == "BlogPost" && sql_name == "blog_post"
        ));
    }

    #[test]
    fn test_empty_document() {
        let doc = SchemaDocument::from_json(r#"{"tables": []}"#).unwrap();
        assert!(matches!(Catalog::new(doc), Err(CliError::EmptyDocument)));
    }

    #[test]
    fn test_schema_errors_surface() {
        let catalog = catalog(
            r#"{"tables": [{"name": "Counter",
                "columns": [{"name": "value", "type": "INTEGER", "optional": true}]}]}"#,
        );
        let err = catalog.check().unwrap_err();
        assert!(matches!(
            err,
            CliError::Schema(SchemaError::MissingDefaultForOptionalColumn { .. })
        ));
        assert!(err.to_string().contains("Counter.value"));
    }

    #[test]
    fn test_empty_key_columns() {
        let catalog = catalog(
            r#"{"tables": [{"name": "Tag",
                "columns": [{"name": "id", "type": "INTEGER"}],
                "unique": [{"columns": []}]}]}"#,
        );
        assert!(matches!(
            catalog.check(),
            Err(CliError::Schema(SchemaError::EmptyColumnGroup))
        ));
    }

    #[test]
    fn test_column_options() {
        let catalog = catalog(
            r#"{"tables": [{"name": "Label",
                "if_not_exists": true,
                "schema_name": "main",
                "columns": [{"name": "value", "type": "TEXT", "optional": true,
                             "default": "none", "collation": "NOCASE",
                             "not_null_on_conflict": "FAIL"}],
                "checks": [{"expression": "length(value) > 0"}]}]}"#,
        );
        assert_eq!(
            catalog.render(None, false).unwrap(),
            ["CREATE TABLE IF NOT EXISTS `main`.`label` (\
              `value` TEXT NOT NULL ON CONFLICT FAIL DEFAULT `none` COLLATE NOCASE, \
              CONSTRAINT CHECK (length(value) > 0))"]
        );
        assert_eq!(catalog.check().unwrap(), 1);
    }
}
