//! Resource presets
//!
//! A resource bundles the filterable fields and sort conditions of one
//! queryable entity, so request handlers can start from fresh builders that
//! already know every alias.

use config::{NullsOrder, ResourceConfig, SortDirection};
use query_clause::{
    Combinator, FieldRegistry, NullsPlacement, OrderingSpec, PredicateTree, QueryClauseError,
    SortEntry, SortOrder,
};

/// Field and sort templates for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceClauses {
    fields: FieldRegistry,
    order: OrderingSpec,
}

impl ResourceClauses {
    pub fn new(fields: FieldRegistry, order: OrderingSpec) -> Self {
        Self { fields, order }
    }

    /// Build templates from configuration
    pub fn from_config(config: &ResourceConfig, nulls: NullsOrder) -> Result<Self, QueryClauseError> {
        let fields = FieldRegistry::from_entries(config.fields.iter().map(|field| {
            (
                field.alias.clone(),
                field.sql.clone().unwrap_or_else(|| field.alias.clone()),
            )
        }))?;

        let mut order = OrderingSpec::with_conditions(config.order.iter().map(|sort| SortEntry {
            alias: sort.alias.clone(),
            sql_form: sort.sql.clone(),
            direction: sort_order(sort.direction),
        }))?;
        order.set_nulls_placement(nulls_placement(nulls));
        if !config.default_order.is_empty() {
            order.set_order(&config.default_order, true)?;
        }

        Ok(Self { fields, order })
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn order(&self) -> &OrderingSpec {
        &self.order
    }

    /// Empty predicate tree that knows every field of the resource
    pub fn where_builder(&self, combinator: Combinator) -> PredicateTree {
        PredicateTree::with_registry(combinator, self.fields.clone())
    }

    /// Ordering spec preset with the resource's conditions and default order
    pub fn order_builder(&self) -> OrderingSpec {
        self.order.clone()
    }
}

pub(crate) fn sort_order(direction: SortDirection) -> SortOrder {
    match direction {
        SortDirection::Asc => SortOrder::Asc,
        SortDirection::Desc => SortOrder::Desc,
    }
}

pub(crate) fn nulls_placement(nulls: NullsOrder) -> NullsPlacement {
    match nulls {
        NullsOrder::First => NullsPlacement::First,
        NullsOrder::Last => NullsPlacement::Last,
    }
}
