//! Environment composition across global and group scopes.

use deplojo_common::config::DeplojoConfig;
use deplojo_common::error::{DeplojoError, Result};
use deplojo_common::types::Environment;

/// Overlays `group` on `global`. Group values win on key collision.
#[must_use]
pub fn merge_environment(global: &Environment, group: Option<&Environment>) -> Environment {
    let mut merged = global.clone();
    if let Some(group) = group {
        merged.extend(group.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// Resolves the environment for task definition `definition`, overlaying
/// `group` from `config.environment_groups` when one is named.
///
/// # Errors
///
/// Returns `DeplojoError::UnknownEnvironmentGroup` if `group` is not
/// configured.
pub fn resolve_environment(
    config: &DeplojoConfig,
    definition: &str,
    group: Option<&str>,
) -> Result<Environment> {
    let Some(group) = group else {
        return Ok(config.environment.clone());
    };

    let overlay = config.environment_groups.get(group).ok_or_else(|| {
        DeplojoError::UnknownEnvironmentGroup {
            definition: definition.to_owned(),
            group: group.to_owned(),
        }
    })?;
    tracing::debug!(definition, group, "overlaying environment group");
    Ok(merge_environment(&config.environment, Some(overlay)))
}
