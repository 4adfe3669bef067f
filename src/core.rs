//! Core ClauseHaus functionality
//!
//! This module contains the main ClauseHaus struct and its implementation,
//! providing a registry of resource presets and the render settings shared
//! by the builders it hands out.

use std::collections::HashMap;

use query_clause::{Combinator, Cursor, OrderingSpec, PredicateTree};

use crate::errors::ClauseHausError;
use crate::resource::{ResourceClauses, nulls_placement};
use config::{AppConfig, RenderConfig};

/// Main ClauseHaus coordinator that manages resource presets
#[derive(Debug, Clone, Default)]
pub struct ClauseHaus {
    render: RenderConfig,
    resources: HashMap<String, ResourceClauses>,
}

impl ClauseHaus {
    /// Create an empty ClauseHaus with the given render settings
    pub fn new(render: RenderConfig) -> Self {
        Self {
            render,
            resources: HashMap::new(),
        }
    }

    /// Build ClauseHaus with every resource declared in `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, ClauseHausError> {
        let mut clausehaus = Self::new(config.render.clone());

        for (name, resource) in &config.resources {
            let clauses = ResourceClauses::from_config(resource, config.render.nulls).map_err(
                |source| ClauseHausError::InvalidResource {
                    resource: name.clone(),
                    source,
                },
            )?;
            clausehaus.register_resource(name.clone(), clauses)?;
        }

        crate::debug_log!(
            "Loaded {} resources from configuration",
            clausehaus.resources.len()
        );
        Ok(clausehaus)
    }

    /// Load configuration via [`AppConfig::load`] and build from it
    pub fn load() -> Result<Self, ClauseHausError> {
        let config = AppConfig::load()?;
        Self::from_config(&config)
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Fresh cursor at the configured start position
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.render.placeholder_start)
    }

    /// Register resource presets under a given name
    pub fn register_resource(
        &mut self,
        name: String,
        resource: ResourceClauses,
    ) -> Result<(), ClauseHausError> {
        if self.resources.contains_key(&name) {
            return Err(ClauseHausError::ResourceAlreadyRegistered(name));
        }

        crate::trace_log!("Registered resource '{}'", name);
        self.resources.insert(name, resource);
        Ok(())
    }

    /// Get registered resource presets by name
    pub fn resource(&self, name: &str) -> Result<&ResourceClauses, ClauseHausError> {
        self.resources
            .get(name)
            .ok_or_else(|| ClauseHausError::ResourceNotFound(name.to_string()))
    }

    /// Fresh predicate tree for `name`
    pub fn where_builder(
        &self,
        name: &str,
        combinator: Combinator,
    ) -> Result<PredicateTree, ClauseHausError> {
        Ok(self.resource(name)?.where_builder(combinator))
    }

    /// Fresh ordering spec for `name`, using the configured NULL placement
    pub fn order_builder(&self, name: &str) -> Result<OrderingSpec, ClauseHausError> {
        let mut order = self.resource(name)?.order_builder();
        order.set_nulls_placement(nulls_placement(self.render.nulls));
        Ok(order)
    }

    /// List all registered resource names
    pub fn list_resources(&self) -> Vec<&String> {
        self.resources.keys().collect()
    }

    /// Remove resource presets by name
    pub fn unregister_resource(&mut self, name: &str) -> Result<(), ClauseHausError> {
        self.resources
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ClauseHausError::ResourceNotFound(name.to_string()))
    }
}
