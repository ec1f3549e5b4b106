//! Identifier naming.
//!
//! Tables and columns are declared with Rust-style pascal or camel case
//! identifiers (`ChildTable`, `parentTableId`) and written to SQLite in
//! snake case (`child_table`, `parent_table_id`). Every table, column and
//! derived constraint name goes through [`to_sql_name`], so its output must
//! never change.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern every table, column, schema and check constraint name must match.
pub const IDENTIFIER_PATTERN: &str = "^[A-Za-z][A-Za-z0-9_]*$";

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"));

/// Converts a pascal or camel case identifier into its snake case SQL name.
///
/// An underscore is inserted before every uppercase letter other than the
/// first character, then the whole string is lowercased. Digits and
/// existing underscores pass through untouched.
///
/// ```
/// use oxide_ddl::naming::to_sql_name;
///
/// assert_eq!(to_sql_name("ThisExampleTableName"), "this_example_table_name");
/// assert_eq!(to_sql_name("thisHasALongName"), "this_has_a_long_name");
/// assert_eq!(to_sql_name("Id"), "id");
/// ```
#[must_use]
pub fn to_sql_name(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Returns `true` if `name` matches [`IDENTIFIER_PATTERN`].
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

/// Quotes an already snake-cased SQL name with backticks.
pub(crate) fn quote(sql_name: &str) -> String {
    format!("`{sql_name}`")
}
