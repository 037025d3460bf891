//! Generated task definition documents.

use deplojo_common::constants::{
    CONTAINER_DEFINITIONS_FIELD, CONTAINER_NAME_FIELD, FAMILY_FIELD,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// A fully rendered task definition, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TaskDefinition(Map<String, Value>);

impl TaskDefinition {
    /// Wraps an already composed document.
    #[must_use]
    pub const fn from_map(document: Map<String, Value>) -> Self {
        Self(document)
    }

    /// Returns the family name.
    #[must_use]
    pub fn family(&self) -> Option<&str> {
        self.0.get(FAMILY_FIELD).and_then(Value::as_str)
    }

    /// Iterates over the container specifications in template order.
    pub fn containers(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.0
            .get(CONTAINER_DEFINITIONS_FIELD)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }

    /// Looks up a container by name.
    #[must_use]
    pub fn container(&self, name: &str) -> Option<&Map<String, Value>> {
        self.containers().find(|c| {
            c.get(CONTAINER_NAME_FIELD).and_then(Value::as_str) == Some(name)
        })
    }

    /// Borrows the underlying document.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the document as a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<TaskDefinition> for Value {
    fn from(definition: TaskDefinition) -> Self {
        definition.into_value()
    }
}

/// One entry of a batch generation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedTaskDefinition {
    /// The generated document.
    pub definition: TaskDefinition,
}
