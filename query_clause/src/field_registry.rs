//! Field registry
//!
//! Maps caller-chosen aliases to the SQL expressions they stand for.

use crate::errors::QueryClauseError;
use indexmap::IndexMap;

/// One entry of a bulk field registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEntry {
    /// Positional entry, the expression doubles as its own alias
    Expression(String),
    /// Named entry
    Aliased { alias: String, sql_form: String },
}

impl FieldEntry {
    pub fn alias(&self) -> &str {
        match self {
            FieldEntry::Expression(sql_form) => sql_form,
            FieldEntry::Aliased { alias, .. } => alias,
        }
    }

    pub fn sql_form(&self) -> &str {
        match self {
            FieldEntry::Expression(sql_form) => sql_form,
            FieldEntry::Aliased { sql_form, .. } => sql_form,
        }
    }
}

impl From<&str> for FieldEntry {
    fn from(sql_form: &str) -> Self {
        FieldEntry::Expression(sql_form.to_string())
    }
}

impl From<String> for FieldEntry {
    fn from(sql_form: String) -> Self {
        FieldEntry::Expression(sql_form)
    }
}

impl From<(&str, &str)> for FieldEntry {
    fn from((alias, sql_form): (&str, &str)) -> Self {
        FieldEntry::Aliased {
            alias: alias.to_string(),
            sql_form: sql_form.to_string(),
        }
    }
}

impl From<(String, String)> for FieldEntry {
    fn from((alias, sql_form): (String, String)) -> Self {
        FieldEntry::Aliased { alias, sql_form }
    }
}

/// Alias to SQL expression mapping, kept in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRegistry {
    fields: IndexMap<String, String>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from bulk entries
    pub fn from_entries<I, E>(entries: I) -> Result<Self, QueryClauseError>
    where
        I: IntoIterator<Item = E>,
        E: Into<FieldEntry>,
    {
        let mut registry = Self::new();
        for entry in entries {
            let entry = entry.into();
            registry.add_field(entry.alias(), Some(entry.sql_form()))?;
        }
        Ok(registry)
    }

    /// Register `alias`. A missing or empty `sql_form` makes the alias its own expression.
    ///
    /// Registering the same pair twice is a no-op; a different expression for a known
    /// alias fails with [`QueryClauseError::Conflict`].
    pub fn add_field(&mut self, alias: &str, sql_form: Option<&str>) -> Result<(), QueryClauseError> {
        let sql_form = Self::resolve_sql_form(alias, sql_form);
        self.check(alias, sql_form)?;

        if !self.fields.contains_key(alias) {
            trace_log!("Registered field '{}' as '{}'", alias, sql_form);
            self.fields.insert(alias.to_string(), sql_form.to_string());
        }
        Ok(())
    }

    /// Replace the registered field set with `entries`.
    ///
    /// The replacement is atomic: on a collision inside `entries` the previous
    /// field set is kept.
    pub fn add_fields<I, E>(&mut self, entries: I) -> Result<(), QueryClauseError>
    where
        I: IntoIterator<Item = E>,
        E: Into<FieldEntry>,
    {
        *self = Self::from_entries(entries)?;
        Ok(())
    }

    /// Copy every field of `other` into this registry.
    ///
    /// All entries are checked before any is inserted.
    pub fn merge(&mut self, other: &FieldRegistry) -> Result<(), QueryClauseError> {
        for (alias, sql_form) in other.iter() {
            self.check(alias, sql_form)?;
        }
        for (alias, sql_form) in other.iter() {
            self.fields
                .entry(alias.to_string())
                .or_insert_with(|| sql_form.to_string());
        }
        Ok(())
    }

    /// Verify that `alias` could be registered as `sql_form` without a collision
    pub fn check(&self, alias: &str, sql_form: &str) -> Result<(), QueryClauseError> {
        match self.fields.get(alias) {
            Some(existing) if existing != sql_form => {
                debug_log!(
                    "Field collision for '{}': '{}' vs '{}'",
                    alias,
                    existing,
                    sql_form
                );
                Err(QueryClauseError::Conflict {
                    alias: alias.to_string(),
                    existing: existing.clone(),
                    requested: sql_form.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.fields.get(alias).map(String::as_str)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.fields.contains_key(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(alias, sql)| (alias.as_str(), sql.as_str()))
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn resolve_sql_form<'a>(alias: &'a str, sql_form: Option<&'a str>) -> &'a str {
        match sql_form {
            Some(sql_form) if !sql_form.is_empty() => sql_form,
            _ => alias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_field_defaults_sql_form_to_alias() {
        let mut registry = FieldRegistry::new();
        registry.add_field("name", None).unwrap();
        registry.add_field("email", Some("")).unwrap();

        assert_eq!(registry.get("name"), Some("name"));
        assert_eq!(registry.get("email"), Some("email"));
    }

    #[test]
    fn test_add_field_is_idempotent() {
        let mut registry = FieldRegistry::new();
        registry.add_field("age", Some("u.age")).unwrap();
        registry.add_field("age", Some("u.age")).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("age"), Some("u.age"));
    }

    #[test]
    fn test_add_field_conflict() {
        let mut registry = FieldRegistry::new();
        registry.add_field("age", Some("u.age")).unwrap();

        let err = registry.add_field("age", Some("p.age")).unwrap_err();
        assert_eq!(
            err,
            QueryClauseError::Conflict {
                alias: "age".to_string(),
                existing: "u.age".to_string(),
                requested: "p.age".to_string(),
            }
        );
        assert_eq!(registry.get("age"), Some("u.age"));
    }

    #[test]
    fn test_add_fields_positional_and_named() {
        let mut registry = FieldRegistry::new();
        registry
            .add_fields(vec![
                FieldEntry::from("created_at"),
                FieldEntry::from(("age", "u.age")),
            ])
            .unwrap();

        let fields: Vec<_> = registry.iter().collect();
        assert_eq!(fields, vec![("created_at", "created_at"), ("age", "u.age")]);
    }

    #[test]
    fn test_add_fields_replaces_previous_set() {
        let mut registry = FieldRegistry::new();
        registry.add_field("old", None).unwrap();
        registry.add_fields(vec![("age", "u.age")]).unwrap();

        assert!(!registry.contains("old"));
        assert!(registry.contains("age"));
    }

    #[test]
    fn test_add_fields_conflict_keeps_previous_set() {
        let mut registry = FieldRegistry::new();
        registry.add_field("old", None).unwrap();

        let result = registry.add_fields(vec![("age", "u.age"), ("age", "p.age")]);
        assert!(matches!(result, Err(QueryClauseError::Conflict { .. })));
        assert!(registry.contains("old"));
        assert!(!registry.contains("age"));
    }

    #[test]
    fn test_merge_is_all_or_nothing() {
        let mut parent = FieldRegistry::from_entries(vec![("age", "u.age")]).unwrap();
        let child =
            FieldRegistry::from_entries(vec![("name", "u.name"), ("age", "p.age")]).unwrap();

        assert!(parent.merge(&child).is_err());
        assert!(!parent.contains("name"));

        let child = FieldRegistry::from_entries(vec![("name", "u.name"), ("age", "u.age")]).unwrap();
        parent.merge(&child).unwrap();
        assert_eq!(parent.aliases().collect::<Vec<_>>(), vec!["age", "name"]);
    }
}
