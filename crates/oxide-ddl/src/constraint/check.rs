use super::Constraint;
use crate::clause::Clause;
use crate::error::{Result, SchemaError};
use crate::naming::{IDENTIFIER_PATTERN, is_valid_identifier};

/// A `CHECK` table constraint.
///
/// The expression is evaluated on every `INSERT` and `UPDATE`; a result of
/// zero is a constraint violation. The optional name should be table-unique
/// and, by convention, start with `ck_`.
///
/// See <https://www.sqlite.org/lang_createtable.html#constraints>.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Check {
    expression: String,
    name: Option<String>,
}

impl Check {
    /// An unnamed check constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::BlankCheckExpression`] if `expression` is
    /// blank.
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        Self::build(expression.into(), None)
    }

    /// A named check constraint.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidCheckName`] if `name` is not a valid
    ///   identifier.
    /// - [`SchemaError::BlankCheckExpression`] if `expression` is blank.
    pub fn named(name: impl Into<String>, expression: impl Into<String>) -> Result<Self> {
        Self::build(expression.into(), Some(name.into()))
    }

    fn build(expression: String, name: Option<String>) -> Result<Self> {
        if let Some(name) = &name {
            if !is_valid_identifier(name) {
                return Err(SchemaError::InvalidCheckName {
                    name: name.clone(),
                    pattern: IDENTIFIER_PATTERN.to_string(),
                });
            }
        }
        if expression.trim().is_empty() {
            return Err(SchemaError::BlankCheckExpression { name });
        }
        Ok(Self { expression, name })
    }

    /// The SQL logic expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The constraint name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Example: `Check 'length(name) > 0'`.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("Check {name} '{}'", self.expression),
            None => format!("Check '{}'", self.expression),
        }
    }
}

impl Clause for Check {
    /// Example: `CONSTRAINT CHECK (1 = 1)` or ``CONSTRAINT `ck_example` CHECK (1 = 1)``.
    fn to_sql(&self) -> String {
        self.name.as_ref().map_or_else(
            || format!("CONSTRAINT CHECK ({})", self.expression),
            |name| format!("CONSTRAINT `{name}` CHECK ({})", self.expression),
        )
    }
}

impl Constraint for Check {
    fn constraint_name(&self) -> Option<String> {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed_check() {
        let check = Check::new("1=1").unwrap();
        assert_eq!(check.to_sql(), "CONSTRAINT CHECK (1=1)");
        assert_eq!(check.constraint_name(), None);
    }

    #[test]
    fn test_named_check() {
        let check = Check::named("ck_example", "1 = 1").unwrap();
        assert_eq!(check.to_sql(), "CONSTRAINT `ck_example` CHECK (1 = 1)");
        assert_eq!(check.constraint_name().as_deref(), Some("ck_example"));
        assert_eq!(check.name(), Some("ck_example"));
    }

    #[test]
    fn test_invalid_name() {
        let err = Check::named("bad name!", "1=1").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidCheckName { ref name, .. } if name == "bad name!"));
        assert!(err.to_string().contains(IDENTIFIER_PATTERN));
    }

    #[test]
    fn test_blank_expression() {
        assert_eq!(
            Check::named("ck_x", "").unwrap_err(),
            SchemaError::BlankCheckExpression {
                name: Some("ck_x".into())
            }
        );
        assert_eq!(
            Check::new("   \t").unwrap_err(),
            SchemaError::BlankCheckExpression { name: None }
        );
    }

    #[test]
    fn test_describe() {
        let check = Check::new("`a` != `b`").unwrap();
        assert_eq!(check.describe(), "Check '`a` != `b`'");
        assert_eq!(check.expression(), "`a` != `b`");
    }
}
