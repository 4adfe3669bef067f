//! # Configuration Management for Clausehaus
//!
//! This crate provides the configuration structures used to preset the WHERE
//! and ORDER BY builders: render settings plus named resources, each with its
//! filterable fields and sort conditions.
//!
//! ## Quick Start
//!
//! ### TOML File Configuration
//! ```toml
//! [render]
//! placeholder_start = 1
//! nulls = "LAST"
//!
//! [resources.users]
//! fields = [
//!     { alias = "age", sql = "u.age" },
//!     { alias = "status", sql = "u.status" },
//!     { alias = "email" },
//! ]
//! order = [
//!     { alias = "name", sql = "u.name" },
//!     { alias = "created", sql = "u.created_at", direction = "DESC" },
//! ]
//! default_order = ["created", "name"]
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from clausehaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./clausehaus.toml";
const CONFIG_PATH_VAR: &str = "CLAUSEHAUS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceConfig>,
}

/// Rendering settings shared by every resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// First cursor position used for placeholder names
    #[serde(default = "default_placeholder_start")]
    pub placeholder_start: u32,
    #[serde(default)]
    pub nulls: NullsOrder,
}

fn default_placeholder_start() -> u32 {
    1
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder_start: default_placeholder_start(),
            nulls: NullsOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NullsOrder {
    First,
    #[default]
    Last,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Fields and sort presets of one queryable resource
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub order: Vec<SortConfig>,
    #[serde(default)]
    pub default_order: Vec<String>,
}

/// Filterable field; `sql` defaults to the alias
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub alias: String,
    #[serde(default)]
    pub sql: Option<String>,
}

/// Sort condition; `sql` defaults to the alias
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    pub alias: String,
    #[serde(default)]
    pub sql: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl AppConfig {
    /// Load configuration from the TOML file named in the environment (or `.env`),
    /// falling back to the default path
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        // Try CLAUSEHAUS_CONFIG first
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)
        }
        // Then DEFAULT_CONFIG_PATH
        else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified as {} (environment or .env file) or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, resource) in &self.resources {
            resource.validate(name)?;
        }
        Ok(())
    }
}

impl ResourceConfig {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let fields = self
            .fields
            .iter()
            .map(|field| (field.alias.as_str(), field.sql.as_deref()));
        check_aliases(name, "field", fields)?;

        let order = self
            .order
            .iter()
            .map(|sort| (sort.alias.as_str(), sort.sql.as_deref()));
        check_aliases(name, "order", order)?;

        for alias in &self.default_order {
            if !self.order.iter().any(|sort| &sort.alias == alias) {
                return Err(ConfigError::Invalid(format!(
                    "Resource '{}' default_order names unknown order alias '{}'",
                    name, alias
                )));
            }
        }

        Ok(())
    }
}

fn check_aliases<'a>(
    resource: &str,
    kind: &str,
    entries: impl Iterator<Item = (&'a str, Option<&'a str>)>,
) -> Result<(), ConfigError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (alias, sql) in entries {
        if alias.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "Resource '{}' has a {} with an empty alias",
                resource, kind
            )));
        }
        let sql = sql.filter(|sql| !sql.is_empty()).unwrap_or(alias);
        if let Some(existing) = seen.insert(alias, sql) {
            if existing != sql {
                return Err(ConfigError::Invalid(format!(
                    "Resource '{}' maps {} '{}' to both '{}' and '{}'",
                    resource, kind, alias, existing, sql
                )));
            }
        }
    }
    Ok(())
}

impl RenderConfig {
    /// Create a new render configuration
    pub fn new(placeholder_start: u32, nulls: NullsOrder) -> Self {
        Self {
            placeholder_start,
            nulls,
        }
    }
}
