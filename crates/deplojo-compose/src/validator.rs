//! Structural validation of rendered templates.
//!
//! Checks that the document has the shape the composer relies on before
//! any field is stamped onto it.

use std::collections::HashSet;

use deplojo_common::constants::{CONTAINER_DEFINITIONS_FIELD, CONTAINER_NAME_FIELD};
use deplojo_common::error::{DeplojoError, Result};
use serde_json::Value;

/// Validates a rendered template document.
///
/// # Checks performed
///
/// 1. The root is an object.
/// 2. `containerDefinitions` is present and is a list of objects.
/// 3. Every container has a string `name`.
/// 4. Container names are unique.
///
/// # Errors
///
/// Returns `DeplojoError::InvalidTemplate` if any check fails.
pub fn validate_template(document: &Value) -> Result<()> {
    let root = document
        .as_object()
        .ok_or_else(|| invalid("template root must be an object".into()))?;

    let containers = root
        .get(CONTAINER_DEFINITIONS_FIELD)
        .ok_or_else(|| invalid(format!("missing \"{CONTAINER_DEFINITIONS_FIELD}\"")))?
        .as_array()
        .ok_or_else(|| invalid(format!("\"{CONTAINER_DEFINITIONS_FIELD}\" must be a list")))?;

    let mut seen = HashSet::new();
    for (idx, container) in containers.iter().enumerate() {
        let name = container
            .as_object()
            .ok_or_else(|| invalid(format!("container #{idx} must be an object")))?
            .get(CONTAINER_NAME_FIELD)
            .and_then(Value::as_str)
            .ok_or_else(|| invalid(format!("container #{idx} has no string \"name\"")))?;
        if !seen.insert(name) {
            return Err(invalid(format!("duplicate container name: \"{name}\"")));
        }
    }
    Ok(())
}

const fn invalid(message: String) -> DeplojoError {
    DeplojoError::InvalidTemplate { message }
}
