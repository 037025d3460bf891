//! Per-container field overrides.
//!
//! Each override field becomes a [`FieldOverride`]: a full replacement of
//! the base value, or a keyed merge into a base list. `portMappings` given
//! as a list merges on `containerPort`; every other field is replaced.

use deplojo_common::constants::{CONTAINER_PORT_KEY, PORT_MAPPINGS_FIELD};
use deplojo_common::types::ContainerOverride;
use serde_json::{Map, Value};

/// Operation applied to one field of a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldOverride<'a> {
    /// Replace the base value outright. No deep merge.
    Replace(&'a Value),
    /// Merge `entries` into the base list, matching entries on `key`.
    MergeByKey {
        /// Field identifying an entry within the list.
        key: &'static str,
        /// Override entries, in declaration order.
        entries: &'a [Value],
    },
}

impl<'a> FieldOverride<'a> {
    /// Picks the operation for an override of `field` with `value`.
    #[must_use]
    pub fn classify(field: &str, value: &'a Value) -> Self {
        match (field, value) {
            (PORT_MAPPINGS_FIELD, Value::Array(entries)) => Self::MergeByKey {
                key: CONTAINER_PORT_KEY,
                entries,
            },
            _ => Self::Replace(value),
        }
    }

    /// Applies the operation to `field` of `container`.
    pub fn apply(&self, container: &mut Map<String, Value>, field: &str) {
        match *self {
            Self::Replace(value) => {
                let _ = container.insert(field.to_owned(), value.clone());
            }
            Self::MergeByKey { key, entries } => match container.get_mut(field) {
                Some(Value::Array(base)) => merge_by_key(base, entries, key),
                _ => {
                    let mut merged = Vec::with_capacity(entries.len());
                    merge_by_key(&mut merged, entries, key);
                    let _ = container.insert(field.to_owned(), Value::Array(merged));
                }
            },
        }
    }
}

/// Merges `entries` into `base`. An entry whose `key` equals that of an
/// original base entry replaces it in place; all others are appended in
/// order. Entries without `key` never match.
pub fn merge_by_key(base: &mut Vec<Value>, entries: &[Value], key: &str) {
    let original_len = base.len();
    for entry in entries {
        let position = entry.get(key).and_then(|wanted| {
            base[..original_len]
                .iter()
                .position(|existing| existing.get(key) == Some(wanted))
        });
        match position {
            Some(idx) => base[idx] = entry.clone(),
            None => base.push(entry.clone()),
        }
    }
}

/// Applies every field of `overrides` to `container`, in declaration order.
pub fn apply_container_override(
    container: &mut Map<String, Value>,
    overrides: &ContainerOverride,
) {
    for (field, value) in overrides {
        let op = FieldOverride::classify(field, value);
        tracing::debug!(field = %field, op = ?op, "applying container override");
        op.apply(container, field);
    }
}
