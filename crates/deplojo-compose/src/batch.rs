//! Batch generation of every task definition in a configuration.
//!
//! Each entry resolves its own template path and environment; only the
//! configuration and the template variables are shared, read-only.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use deplojo_common::config::{DeplojoConfig, TaskDefinitionConfig};
use deplojo_common::error::{DeplojoError, Result};
use deplojo_common::types::TemplateVars;

use crate::composer::generate_task_definition;
use crate::definition::GeneratedTaskDefinition;
use crate::environment::resolve_environment;

/// Generates every task definition in `config.task_definitions`.
///
/// Relative template paths are joined onto `base_path` when one is given.
/// Generation stops at the first failing entry.
///
/// # Errors
///
/// Returns `DeplojoError::UnknownEnvironmentGroup` for an unconfigured
/// group, or `DeplojoError::Definition` wrapping the failure of the first
/// entry that could not be generated.
pub fn generate_task_definitions(
    config: &DeplojoConfig,
    template_vars: &TemplateVars,
    base_path: Option<&Path>,
) -> Result<BTreeMap<String, GeneratedTaskDefinition>> {
    tracing::info!(
        count = config.task_definitions.len(),
        "generating task definitions"
    );
    let mut generated = BTreeMap::new();
    for (name, def_config) in &config.task_definitions {
        let entry = generate_entry(config, name, def_config, template_vars, base_path)?;
        let _ = generated.insert(name.clone(), entry);
    }
    Ok(generated)
}

/// Generates the single entry `name` of a batch.
///
/// # Errors
///
/// Same as [`generate_task_definitions`].
pub fn generate_entry(
    config: &DeplojoConfig,
    name: &str,
    def_config: &TaskDefinitionConfig,
    template_vars: &TemplateVars,
    base_path: Option<&Path>,
) -> Result<GeneratedTaskDefinition> {
    let template = resolve_template_path(&def_config.template, base_path);
    let environment = resolve_environment(config, name, def_config.environment_group.as_deref())?;

    let definition = generate_task_definition(
        &template,
        &environment,
        template_vars,
        &def_config.overrides,
        name,
    )
    .map_err(|source| DeplojoError::Definition {
        name: name.to_owned(),
        template: template.clone(),
        source: Box::new(source),
    })?;

    Ok(GeneratedTaskDefinition { definition })
}

/// Joins a relative `template` onto `base_path`; absolute paths, or any path
/// when no base is given, are returned unchanged.
#[must_use]
pub fn resolve_template_path(template: &Path, base_path: Option<&Path>) -> PathBuf {
    match base_path {
        Some(base) if template.is_relative() => base.join(template),
        _ => template.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_relative_template_against_base() {
        let path = resolve_template_path(Path::new("templates/web.json"), Some(Path::new("/srv")));
        assert_eq!(path, PathBuf::from("/srv/templates/web.json"));
    }

    #[test]
    fn resolve_absolute_template_ignores_base() {
        let path = resolve_template_path(Path::new("/abs/web.json"), Some(Path::new("/srv")));
        assert_eq!(path, PathBuf::from("/abs/web.json"));
    }

    #[test]
    fn resolve_without_base_is_unchanged() {
        let path = resolve_template_path(Path::new("web.json"), None);
        assert_eq!(path, PathBuf::from("web.json"));
    }

    #[test]
    fn generate_empty_config_yields_empty_map() {
        let result =
            generate_task_definitions(&DeplojoConfig::default(), &TemplateVars::new(), None)
                .expect("should generate");
        assert!(result.is_empty());
    }

    #[test]
    fn generate_unknown_group_fails_before_loading_template() {
        let mut config = DeplojoConfig::default();
        let mut entry = TaskDefinitionConfig::new("/nonexistent/web.json");
        entry.environment_group = Some("missing".into());
        let _ = config.task_definitions.insert("web".into(), entry);

        let err = generate_task_definitions(&config, &TemplateVars::new(), None)
            .expect_err("should fail");
        assert!(matches!(
            err,
            DeplojoError::UnknownEnvironmentGroup { ref group, .. } if group == "missing"
        ));
    }

    #[test]
    fn generate_missing_template_reports_definition_and_path() {
        let mut config = DeplojoConfig::default();
        let _ = config
            .task_definitions
            .insert("web".into(), TaskDefinitionConfig::new("missing.json"));

        let err = generate_task_definitions(&config, &TemplateVars::new(), Some(Path::new("/srv")))
            .expect_err("should fail");
        match &err {
            DeplojoError::Definition { name, template, .. } => {
                assert_eq!(name, "web");
                assert_eq!(template, &PathBuf::from("/srv/missing.json"));
            }
            other => unreachable!("unexpected error: {other}"),
        }
        assert!(matches!(err.root_cause(), DeplojoError::TemplateNotFound { .. }));
    }
}
