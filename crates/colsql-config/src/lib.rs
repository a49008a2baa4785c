//! TOML-backed column context.
//!
//! A [`ColumnsConfig`] describes one deployment of a table: its name, the
//! identifier column, and per-column overrides for the physical name, whether
//! the column exists, and whether null writes use the store default. It is
//! itself the context type for [`ConfigColumn`] descriptors.

mod column;
mod error;


pub use column::{ConfigColumn, DependentConfigColumn};
pub use error::ConfigError;

use colsql_core::sql::{HandlerConfig, PredicateCompiler};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

///
/// ColumnsConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    pub table: String,

    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Append ` COLLATE NOCASE` to case-insensitive comparisons.
    #[serde(default)]
    pub no_case_collation: bool,

    #[serde(default)]
    pub columns: BTreeMap<String, ColumnSettings>,
}

fn default_id_column() -> String {
    "id".to_string()
}

impl ColumnsConfig {
    /// Config for `table` with every column at its defaults.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            id_column: default_id_column(),
            no_case_collation: false,
            columns: BTreeMap::new(),
        }
    }

    /// Builder-style override for one column.
    #[must_use]
    pub fn with_column(mut self, key: impl Into<String>, settings: ColumnSettings) -> Self {
        self.columns.insert(key.into(), settings);
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;

        tracing::debug!(
            path = %path.display(),
            table = %config.table,
            columns = config.columns.len(),
            "loaded column config"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.trim().is_empty() {
            return Err(ConfigError::Invalid("table name is empty".into()));
        }
        if self.id_column.trim().is_empty() {
            return Err(ConfigError::Invalid("id column name is empty".into()));
        }
        if let Some(key) = self.columns.keys().find(|key| key.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "column key '{key}' is blank"
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn column(&self, key: &str) -> Option<&ColumnSettings> {
        self.columns.get(key)
    }

    /// Physical name of `key`; the key itself unless overridden.
    #[must_use]
    pub fn resolve_name(&self, key: &str) -> String {
        self.column(key)
            .and_then(|settings| settings.name.clone())
            .unwrap_or_else(|| key.to_string())
    }

    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        self.column(key).is_none_or(|settings| settings.enabled)
    }

    #[must_use]
    pub fn default_on_null(&self, key: &str) -> bool {
        self.column(key)
            .is_some_and(|settings| settings.default_on_null)
    }

    #[must_use]
    pub const fn compiler(&self) -> PredicateCompiler {
        PredicateCompiler::new().with_no_case_collation(self.no_case_collation)
    }

    /// Handler configuration for this table, with the collation setting
    /// carried into the compiler.
    pub fn into_handler_config<F>(self, statements: F) -> HandlerConfig<Self, F> {
        let compiler = self.compiler();
        let (table, id_column) = (self.table.clone(), self.id_column.clone());

        HandlerConfig::new(statements, self, table, id_column).with_compiler(compiler)
    }
}

///
/// ColumnSettings
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnSettings {
    /// Physical name; defaults to the column key. Empty disables an
    /// optional column.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub default_on_null: bool,
}

const fn default_enabled() -> bool {
    true
}

impl ColumnSettings {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_default_on_null(mut self, enabled: bool) -> Self {
        self.default_on_null = enabled;
        self
    }
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            name: None,
            enabled: default_enabled(),
            default_on_null: false,
        }
    }
}
