//! Schema validation over untyped documents.
//!
//! A [`Schema`] lists the fields a mapping must (or may) carry and the
//! [`ValueKind`] each one must have. Fields the schema does not mention are
//! ignored, so older validators keep accepting documents that grow new
//! optional keys.
//!
//! # Examples
//!
//! ```
//! use rayforge_package_core::*;
//!
//! const SCHEMA: Schema = Schema::new(&[
//!     FieldRule::required("name", ValueKind::String),
//!     FieldRule::optional("tags", ValueKind::Sequence),
//! ]);
//!
//! let mut doc = Mapping::new();
//! doc.insert("name".into(), Value::from("demo"));
//! assert!(SCHEMA.validate(&doc, None).is_ok());
//!
//! // Missing required key, reported with its dotted path
//! let err = SCHEMA.validate(&Mapping::new(), Some("author")).unwrap_err();
//! assert_eq!(err, ValidationError::MissingKey("author.name".into()));
//! ```

use crate::{Mapping, ValidationError, ValueKind};

/// Rule for a single schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Key name inside the mapping.
    pub name: &'static str,
    /// Required value type when the key is present.
    pub kind: ValueKind,
    /// Whether the key must be present.
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Declarative field list for one mapping level.
///
/// Schemas are `const` data; nested mappings get their own schema and are
/// validated with a key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    fields: &'static [FieldRule],
}

impl Schema {
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    /// Field rules in declaration order.
    pub fn fields(&self) -> &'static [FieldRule] {
        self.fields
    }

    /// Validates `document`, stopping at the first failing field.
    ///
    /// Fields are checked in declaration order, so the reported failure is
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingKey`] for an absent required field or
    /// [`ValidationError::WrongType`] for a present field of the wrong kind.
    pub fn validate(
        &self,
        document: &Mapping,
        prefix: Option<&str>,
    ) -> Result<(), ValidationError> {
        match self.check_fields(document, prefix).next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Validates `document` and returns every failing field.
    pub fn collect(&self, document: &Mapping, prefix: Option<&str>) -> Vec<ValidationError> {
        self.check_fields(document, prefix).collect()
    }

    fn check_fields<'a>(
        &'a self,
        document: &'a Mapping,
        prefix: Option<&'a str>,
    ) -> impl Iterator<Item = ValidationError> + 'a {
        self.fields
            .iter()
            .filter_map(move |rule| match document.get(rule.name) {
                None if rule.required => {
                    Some(ValidationError::MissingKey(key_path(prefix, rule.name)))
                }
                None => None,
                Some(value) if value.kind() != rule.kind => Some(ValidationError::WrongType {
                    key: key_path(prefix, rule.name),
                    expected: rule.kind,
                    actual: value.kind(),
                }),
                Some(_) => None,
            })
    }
}

/// Joins a key onto an optional dotted prefix.
///
/// ```
/// use rayforge_package_core::key_path;
///
/// assert_eq!(key_path(None, "name"), "name");
/// assert_eq!(key_path(Some("author"), "email"), "author.email");
/// ```
pub fn key_path(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{key}"),
        _ => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{AUTHOR_SCHEMA, PACKAGE_SCHEMA, Value};

    use super::*;

    fn valid_package() -> Mapping {
        let mut author = Mapping::new();
        author.insert("name".into(), Value::from("Ada"));
        author.insert("email".into(), Value::from("ada@example.com"));

        let mut doc = Mapping::new();
        doc.insert("name".into(), Value::from("laser-tools"));
        doc.insert("description".into(), Value::from("Tools"));
        doc.insert("author".into(), Value::Mapping(author));
        doc.insert("provides".into(), Value::Mapping(Mapping::new()));
        doc
    }

    #[test]
    fn test_validate_accepts_complete_package() {
        assert_eq!(PACKAGE_SCHEMA.validate(&valid_package(), None), Ok(()));
    }

    #[test]
    fn test_validate_reports_each_missing_top_level_field() {
        for rule in PACKAGE_SCHEMA.fields() {
            let mut doc = valid_package();
            doc.remove(rule.name);
            assert_eq!(
                PACKAGE_SCHEMA.validate(&doc, None),
                Err(ValidationError::MissingKey(rule.name.to_string()))
            );
        }
    }

    #[test]
    fn test_validate_reports_wrong_type_with_both_kinds() {
        let mut doc = valid_package();
        doc.insert("author".into(), Value::from("Ada"));
        assert_eq!(
            PACKAGE_SCHEMA.validate(&doc, None),
            Err(ValidationError::WrongType {
                key: "author".into(),
                expected: ValueKind::Mapping,
                actual: ValueKind::String,
            })
        );
    }

    #[test]
    fn test_validate_stops_at_first_field_in_declaration_order() {
        let mut doc = valid_package();
        doc.remove("description");
        doc.insert("name".into(), Value::from(42));
        assert_eq!(
            PACKAGE_SCHEMA.validate(&doc, None),
            Err(ValidationError::WrongType {
                key: "name".into(),
                expected: ValueKind::String,
                actual: ValueKind::Integer,
            })
        );
    }

    #[test]
    fn test_validate_ignores_unknown_fields() {
        let mut doc = valid_package();
        doc.insert("homepage".into(), Value::from(vec![Value::Null]));
        assert!(PACKAGE_SCHEMA.validate(&doc, None).is_ok());
    }

    #[test]
    fn test_nested_schema_uses_prefix() {
        let mut author = Mapping::new();
        author.insert("name".into(), Value::from("Ada"));
        author.insert("email".into(), Value::Null);
        assert_eq!(
            AUTHOR_SCHEMA.validate(&author, Some("author")),
            Err(ValidationError::WrongType {
                key: "author.email".into(),
                expected: ValueKind::String,
                actual: ValueKind::Null,
            })
        );
    }

    #[test]
    fn test_optional_field_only_type_checked_when_present() {
        const SCHEMA: Schema = Schema::new(&[FieldRule::optional("code", ValueKind::String)]);
        assert!(SCHEMA.validate(&Mapping::new(), None).is_ok());

        let mut doc = Mapping::new();
        doc.insert("code".into(), Value::from(true));
        assert!(matches!(
            SCHEMA.validate(&doc, None),
            Err(ValidationError::WrongType { .. })
        ));
    }

    #[test]
    fn test_collect_returns_all_failures() {
        let errors = PACKAGE_SCHEMA.collect(&Mapping::new(), None);
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingKey("name".into()),
                ValidationError::MissingKey("description".into()),
                ValidationError::MissingKey("author".into()),
                ValidationError::MissingKey("provides".into()),
            ]
        );
    }
}
