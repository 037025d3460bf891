//! Single task definition generation.
//!
//! Loads a template, renders its placeholders, stamps the family name and
//! environment onto it, and applies container overrides.

use std::collections::HashSet;
use std::path::Path;

use deplojo_common::constants::{
    CONTAINER_DEFINITIONS_FIELD, CONTAINER_NAME_FIELD, ENVIRONMENT_FIELD, FAMILY_FIELD,
};
use deplojo_common::error::{DeplojoError, Result};
use deplojo_common::types::{Environment, Overrides, TemplateVars};
use serde_json::{Map, Value};

use crate::definition::TaskDefinition;
use crate::overrides::apply_container_override;
use crate::validator::validate_template;

/// Generates the task definition `name` from the template at `template_path`.
///
/// Every container receives a copy of `environment`, even when it is empty.
/// Overrides naming a container absent from the template are ignored.
///
/// # Errors
///
/// Returns an error if the template cannot be read or parsed, references an
/// undefined variable, or does not have the shape of a task definition.
pub fn generate_task_definition(
    template_path: &Path,
    environment: &Environment,
    template_vars: &TemplateVars,
    overrides: &Overrides,
    name: &str,
) -> Result<TaskDefinition> {
    let template = deplojo_template::load_template(template_path)?;
    let definition =
        compose_task_definition(&template, environment, template_vars, overrides, name)?;
    tracing::info!(
        name,
        template = %template_path.display(),
        containers = definition.containers().count(),
        "task definition generated"
    );
    Ok(definition)
}

/// Composes a task definition from an already parsed template.
///
/// # Errors
///
/// Same as [`generate_task_definition`], minus the I/O failures.
pub fn compose_task_definition(
    template: &Value,
    environment: &Environment,
    template_vars: &TemplateVars,
    overrides: &Overrides,
    name: &str,
) -> Result<TaskDefinition> {
    let rendered = deplojo_template::render(template, template_vars)?;
    validate_template(&rendered)?;
    let Value::Object(mut document) = rendered else {
        return Err(DeplojoError::InvalidTemplate {
            message: "template root must be an object".into(),
        });
    };

    let _ = document.insert(FAMILY_FIELD.to_owned(), Value::String(name.to_owned()));

    let environment = environment_value(environment);
    let mut matched = HashSet::new();
    if let Some(Value::Array(containers)) = document.get_mut(CONTAINER_DEFINITIONS_FIELD) {
        for container in containers.iter_mut().filter_map(Value::as_object_mut) {
            let _ = container.insert(ENVIRONMENT_FIELD.to_owned(), environment.clone());

            let Some(container_name) = container_name(container) else {
                continue;
            };
            if let Some((key, patch)) = overrides.get_key_value(container_name.as_str()) {
                apply_container_override(container, patch);
                let _ = matched.insert(key.as_str());
            }
        }
    }

    for unknown in overrides.keys().filter(|k| !matched.contains(k.as_str())) {
        tracing::warn!(
            task_definition = name,
            container = %unknown,
            "override references a container not present in the template, ignoring"
        );
    }

    Ok(TaskDefinition::from_map(document))
}

fn container_name(container: &Map<String, Value>) -> Option<String> {
    container
        .get(CONTAINER_NAME_FIELD)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn environment_value(environment: &Environment) -> Value {
    Value::Object(
        environment
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}
