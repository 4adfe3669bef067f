//! Ordering spec
//!
//! Named sort conditions rendered in a mutable order that can be promoted,
//! replaced or reset to a saved default.

use crate::errors::QueryClauseError;
use crate::field_registry::FieldRegistry;
use crate::ordering::sort_order::{NullsPlacement, SortOrder};
use indexmap::IndexMap;

/// Registered sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCondition {
    pub alias: String,
    pub sql_form: String,
    pub direction: SortOrder,
}

/// One entry of a bulk sort registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    pub alias: String,
    pub sql_form: Option<String>,
    pub direction: SortOrder,
}

impl From<&str> for SortEntry {
    fn from(sql_form: &str) -> Self {
        Self {
            alias: sql_form.to_string(),
            sql_form: None,
            direction: SortOrder::default(),
        }
    }
}

impl From<String> for SortEntry {
    fn from(sql_form: String) -> Self {
        Self {
            alias: sql_form,
            sql_form: None,
            direction: SortOrder::default(),
        }
    }
}

impl From<(&str, &str)> for SortEntry {
    fn from((alias, sql_form): (&str, &str)) -> Self {
        Self {
            alias: alias.to_string(),
            sql_form: Some(sql_form.to_string()),
            direction: SortOrder::default(),
        }
    }
}

impl From<(String, String)> for SortEntry {
    fn from((alias, sql_form): (String, String)) -> Self {
        Self {
            alias,
            sql_form: Some(sql_form),
            direction: SortOrder::default(),
        }
    }
}

impl From<(&str, &str, SortOrder)> for SortEntry {
    fn from((alias, sql_form, direction): (&str, &str, SortOrder)) -> Self {
        Self {
            alias: alias.to_string(),
            sql_form: Some(sql_form.to_string()),
            direction,
        }
    }
}

impl From<(String, String, SortOrder)> for SortEntry {
    fn from((alias, sql_form, direction): (String, String, SortOrder)) -> Self {
        Self {
            alias,
            sql_form: Some(sql_form),
            direction,
        }
    }
}

/// ORDER BY builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderingSpec {
    fields: FieldRegistry,
    conditions: IndexMap<String, SortCondition>,
    current_order: Vec<String>,
    default_order: Vec<String>,
    nulls: NullsPlacement,
}

impl OrderingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conditions<I, E>(entries: I) -> Result<Self, QueryClauseError>
    where
        I: IntoIterator<Item = E>,
        E: Into<SortEntry>,
    {
        let mut spec = Self::new();
        spec.add_conditions(entries)?;
        Ok(spec)
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn condition(&self, alias: &str) -> Option<&SortCondition> {
        self.conditions.get(alias)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn nulls(&self) -> NullsPlacement {
        self.nulls
    }

    pub fn set_nulls_placement(&mut self, nulls: NullsPlacement) {
        self.nulls = nulls;
    }

    /// Register `alias` or update its direction. New aliases join the end of
    /// the current order.
    pub fn add_condition(
        &mut self,
        alias: &str,
        sql_form: Option<&str>,
        direction: SortOrder,
    ) -> Result<(), QueryClauseError> {
        self.fields.add_field(alias, sql_form)?;
        let sql_form = FieldRegistry::resolve_sql_form(alias, sql_form);

        match self.conditions.get_mut(alias) {
            Some(condition) => condition.direction = direction,
            None => {
                debug_log!("Adding sort condition '{}' {}", alias, direction);
                self.conditions.insert(
                    alias.to_string(),
                    SortCondition {
                        alias: alias.to_string(),
                        sql_form: sql_form.to_string(),
                        direction,
                    },
                );
                self.current_order.push(alias.to_string());
            }
        }
        Ok(())
    }

    /// Replace every sort condition with `entries`; the current order becomes
    /// the entry order and the saved default is dropped.
    ///
    /// Nothing changes when an entry collides with an earlier one.
    pub fn add_conditions<I, E>(&mut self, entries: I) -> Result<(), QueryClauseError>
    where
        I: IntoIterator<Item = E>,
        E: Into<SortEntry>,
    {
        let mut replacement = Self {
            nulls: self.nulls,
            ..Self::default()
        };
        for entry in entries {
            let entry = entry.into();
            replacement.add_condition(&entry.alias, entry.sql_form.as_deref(), entry.direction)?;
        }
        *self = replacement;
        Ok(())
    }

    pub fn set_direction(&mut self, alias: &str, direction: SortOrder) -> Result<(), QueryClauseError> {
        let condition = self
            .conditions
            .get_mut(alias)
            .ok_or_else(|| QueryClauseError::UnknownCondition(alias.to_string()))?;
        condition.direction = direction;
        Ok(())
    }

    /// Render `aliases` first, in the given sequence. Registered aliases not
    /// listed follow in registration order.
    pub fn set_order<I, S>(&mut self, aliases: I, update_default: bool) -> Result<(), QueryClauseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let order = self.validated(aliases)?;
        debug_log!("Setting sort order {:?} (update default: {})", order, update_default);
        if update_default {
            self.default_order = order.clone();
        }
        self.current_order = order;
        Ok(())
    }

    /// Save `aliases` as the order [`reset_order`](Self::reset_order) returns to
    pub fn set_default_order<I, S>(&mut self, aliases: I) -> Result<(), QueryClauseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.default_order = self.validated(aliases)?;
        Ok(())
    }

    /// Move `aliases` to the front, keeping their given sequence and the
    /// relative order of everything else
    pub fn raise_conditions_in_order<I, S>(&mut self, aliases: I) -> Result<(), QueryClauseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut order = self.validated(aliases)?;
        let rest: Vec<String> = self
            .current_order()
            .into_iter()
            .filter(|alias| !order.iter().any(|raised| raised == alias))
            .map(str::to_string)
            .collect();
        order.extend(rest);

        debug_log!("Raised sort order to {:?}", order);
        self.current_order = order;
        Ok(())
    }

    /// Restore the last saved default order
    pub fn reset_order(&mut self) {
        self.current_order = self.default_order.clone();
    }

    /// Remove every sort condition
    pub fn clear(&mut self) {
        self.fields = FieldRegistry::new();
        self.conditions.clear();
        self.current_order.clear();
        self.default_order.clear();
    }

    /// Aliases in render order
    pub fn current_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = self.current_order.iter().map(String::as_str).collect();
        for alias in self.conditions.keys() {
            if !order.contains(&alias.as_str()) {
                order.push(alias);
            }
        }
        order
    }

    pub fn default_order(&self) -> &[String] {
        &self.default_order
    }

    /// `ORDER BY ...` over every registered condition, or an empty string
    pub fn get_order_by(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }

        let parts: Vec<String> = self
            .current_order()
            .into_iter()
            .filter_map(|alias| self.conditions.get(alias))
            .map(|condition| format!("{} {}", condition.sql_form, condition.direction))
            .collect();

        format!("ORDER BY {} {}", parts.join(", "), self.nulls.to_sql())
    }

    fn validated<I, S>(&self, aliases: I) -> Result<Vec<String>, QueryClauseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut order: Vec<String> = Vec::new();
        for alias in aliases {
            let alias = alias.as_ref();
            if !self.conditions.contains_key(alias) {
                return Err(QueryClauseError::UnknownCondition(alias.to_string()));
            }
            if !order.iter().any(|known| known == alias) {
                order.push(alias.to_string());
            }
        }
        Ok(order)
    }
}
