//! Domain primitive types used across the deplojo workspace.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Environment variable name to value.
pub type Environment = BTreeMap<String, String>;

/// Template placeholder name to substituted value.
pub type TemplateVars = BTreeMap<String, String>;

/// Field name to override value for a single container, in declaration order.
pub type ContainerOverride = Map<String, Value>;

/// Container name to its field overrides.
pub type Overrides = BTreeMap<String, ContainerOverride>;
