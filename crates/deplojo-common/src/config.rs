//! Deployment configuration model.
//!
//! The configuration file is YAML with three recognized top-level keys:
//! `environment`, `environment_groups`, and `task_definitions`. Other keys
//! (cluster and service settings consumed by the orchestration client) are
//! accepted and ignored here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DeplojoError, Result};
use crate::types::{Environment, Overrides};

/// Root deployment configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeplojoConfig {
    /// Environment applied to every container of every task definition.
    #[serde(default, deserialize_with = "environment")]
    pub environment: Environment,
    /// Named environments layered on top of the global one.
    #[serde(default, deserialize_with = "environment_groups")]
    pub environment_groups: BTreeMap<String, Environment>,
    /// Task definitions to generate, keyed by family name.
    #[serde(default)]
    pub task_definitions: BTreeMap<String, TaskDefinitionConfig>,
}

/// Per task definition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinitionConfig {
    /// Path to the JSON template, relative to the configuration file.
    pub template: PathBuf,
    /// Environment group overlaid on the global environment.
    #[serde(default)]
    pub environment_group: Option<String>,
    /// Per-container field overrides.
    #[serde(default)]
    pub overrides: Overrides,
}

impl TaskDefinitionConfig {
    /// Creates a task definition entry for a template with no group or overrides.
    #[must_use]
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            environment_group: None,
            overrides: Overrides::new(),
        }
    }
}

impl DeplojoConfig {
    /// Parses a configuration from YAML text.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns `DeplojoError::ConfigParse` if the text is not valid YAML or
    /// does not match the configuration model.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| DeplojoError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path).map_err(|source| DeplojoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content, path)?;
        tracing::info!(
            path = %path.display(),
            task_definitions = config.task_definitions.len(),
            environment_groups = config.environment_groups.len(),
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Scalar accepted as an environment value; YAML numbers and booleans are
/// stored in their textual form.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnvScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<EnvScalar> for String {
    fn from(value: EnvScalar) -> Self {
        match value {
            EnvScalar::Text(s) => s,
            EnvScalar::Integer(n) => n.to_string(),
            EnvScalar::Float(f) => f.to_string(),
            EnvScalar::Bool(b) => b.to_string(),
        }
    }
}

fn environment<'de, D>(deserializer: D) -> std::result::Result<Environment, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, EnvScalar>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.into()))
        .collect())
}

fn environment_groups<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Environment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<BTreeMap<String, EnvScalar>>>>::deserialize(
        deserializer,
    )?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(group, vars)| {
            let env = vars
                .unwrap_or_default()
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect();
            (group, env)
        })
        .collect())
}
