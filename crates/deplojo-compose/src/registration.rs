//! Registration payload for the orchestration service.
//!
//! The service takes container environments as a list of `{name, value}`
//! pairs rather than a mapping.

use deplojo_common::constants::{CONTAINER_DEFINITIONS_FIELD, ENVIRONMENT_FIELD};
use serde_json::{Map, Value, json};

use crate::definition::TaskDefinition;

/// Builds the registration payload for `definition`.
///
/// Each container's `environment` mapping becomes a list of
/// `{"name": ..., "value": ...}` objects sorted by name. Environments that
/// are already lists are left as they are. Non-string values are rendered
/// as JSON text.
#[must_use]
pub fn to_registration_payload(definition: &TaskDefinition) -> Value {
    let mut payload = definition.as_map().clone();
    if let Some(Value::Array(containers)) = payload.get_mut(CONTAINER_DEFINITIONS_FIELD) {
        for container in containers.iter_mut().filter_map(Value::as_object_mut) {
            if let Some(Value::Object(environment)) = container.get(ENVIRONMENT_FIELD) {
                let pairs = environment_pairs(environment);
                let _ = container.insert(ENVIRONMENT_FIELD.to_owned(), pairs);
            }
        }
    }
    Value::Object(payload)
}

fn environment_pairs(environment: &Map<String, Value>) -> Value {
    let mut names: Vec<&String> = environment.keys().collect();
    names.sort();
    Value::Array(
        names
            .into_iter()
            .map(|name| {
                let value = match &environment[name] {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                json!({"name": name, "value": value})
            })
            .collect(),
    )
}
