//! Placeholder substitution over a JSON document tree.
//!
//! Only string scalars are rewritten. Numbers, booleans, and nulls pass
//! through untouched, object keys are never substituted, and key order is
//! preserved.

use std::collections::BTreeSet;

use deplojo_common::error::{DeplojoError, Result};
use deplojo_common::types::TemplateVars;
use serde_json::{Map, Value};

use crate::placeholder::{Segment, segments};

/// Renders every string in `document`, replacing `${name}` with
/// `variables[name]`. The input document is left untouched.
///
/// # Errors
///
/// Returns `DeplojoError::UndefinedVariable` if a placeholder names a
/// variable missing from `variables`, or `DeplojoError::InvalidPlaceholder`
/// for a malformed `${`.
pub fn render(document: &Value, variables: &TemplateVars) -> Result<Value> {
    tracing::debug!(variables = variables.len(), "rendering template document");
    render_value(document, variables)
}

fn render_value(value: &Value, variables: &TemplateVars) -> Result<Value> {
    match value {
        Value::String(text) => Ok(Value::String(render_str(text, variables)?)),
        Value::Array(items) => items
            .iter()
            .map(|item| render_value(item, variables))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(fields) => {
            let mut rendered = Map::with_capacity(fields.len());
            for (key, field) in fields {
                let _ = rendered.insert(key.clone(), render_value(field, variables)?);
            }
            Ok(Value::Object(rendered))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(value.clone()),
    }
}

/// Renders a single string value.
///
/// # Errors
///
/// Same as [`render`].
pub fn render_str(text: &str, variables: &TemplateVars) -> Result<String> {
    if !text.contains('$') {
        return Ok(text.to_owned());
    }

    let mut out = String::with_capacity(text.len());
    for segment in segments(text)? {
        match segment {
            Segment::Literal(literal) => out.push_str(literal),
            Segment::Placeholder(name) => {
                let value = variables
                    .get(name)
                    .ok_or_else(|| DeplojoError::UndefinedVariable {
                        name: name.to_owned(),
                    })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

/// Collects the names of all placeholders referenced anywhere in `document`.
///
/// # Errors
///
/// Returns `DeplojoError::InvalidPlaceholder` for a malformed `${`.
pub fn placeholders(document: &Value) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    collect_placeholders(document, &mut names)?;
    Ok(names)
}

fn collect_placeholders(value: &Value, names: &mut BTreeSet<String>) -> Result<()> {
    match value {
        Value::String(text) => {
            for segment in segments(text)? {
                if let Segment::Placeholder(name) = segment {
                    let _ = names.insert(name.to_owned());
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_placeholders(item, names)?;
            }
        }
        Value::Object(fields) => {
            for field in fields.values() {
                collect_placeholders(field, names)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> TemplateVars {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn render_substitutes_nested_strings() {
        let doc = json!({
            "family": "default",
            "containerDefinitions": [
                {"name": "web", "image": "${image}", "command": ["run", "--env=${stage}"]}
            ]
        });
        let rendered = render(&doc, &vars(&[("image", "app:1.0"), ("stage", "prod")]))
            .expect("should render");
        assert_eq!(rendered["containerDefinitions"][0]["image"], "app:1.0");
        assert_eq!(
            rendered["containerDefinitions"][0]["command"],
            json!(["run", "--env=prod"])
        );
    }

    #[test]
    fn render_leaves_non_string_scalars_untouched() {
        let doc = json!({"memory": 256, "cpu": 0, "essential": true, "ratio": 0.5, "x": null});
        let rendered = render(&doc, &TemplateVars::new()).expect("should render");
        assert_eq!(rendered, doc);
        assert!(rendered["memory"].is_u64());
        assert!(rendered["ratio"].is_f64());
    }

    #[test]
    fn render_does_not_substitute_keys() {
        let doc = json!({"${image}": "value"});
        let rendered = render(&doc, &vars(&[("image", "app")])).expect("should render");
        assert!(rendered.get("${image}").is_some());
    }

    #[test]
    fn render_preserves_key_order() {
        let doc: Value =
            serde_json::from_str(r#"{"zeta": 1, "alpha": "${a}", "mid": [1, 2]}"#).expect("json");
        let rendered = render(&doc, &vars(&[("a", "x")])).expect("should render");
        let keys: Vec<&str> = rendered
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn render_missing_variable_is_error() {
        let doc = json!({"image": "${image}"});
        let err = render(&doc, &TemplateVars::new()).expect_err("should fail");
        assert!(matches!(err, DeplojoError::UndefinedVariable { ref name } if name == "image"));
    }

    #[test]
    fn render_does_not_mutate_input() {
        let doc = json!({"image": "${image}"});
        let _ = render(&doc, &vars(&[("image", "app")])).expect("should render");
        assert_eq!(doc["image"], "${image}");
    }

    #[test]
    fn render_is_idempotent() {
        let doc = json!({"image": "${image}", "tags": ["${tag}", "static"], "n": 3});
        let variables = vars(&[("image", "app:1.0"), ("tag", "v1")]);
        let once = render(&doc, &variables).expect("should render");
        let twice = render(&once, &variables).expect("should render");
        assert_eq!(once, twice);
    }

    #[test]
    fn render_str_keeps_lone_dollar() {
        let rendered = render_str("echo $HOME ${user}", &vars(&[("user", "root")]))
            .expect("should render");
        assert_eq!(rendered, "echo $HOME root");
    }

    #[test]
    fn render_str_value_is_not_rescanned() {
        let rendered = render_str("${a}", &vars(&[("a", "${b}")])).expect("should render");
        assert_eq!(rendered, "${b}");
    }

    #[test]
    fn placeholders_lists_unique_names() {
        let doc = json!({
            "image": "${repo}:${tag}",
            "containers": [{"image": "${repo}"}, {"cmd": ["${entry}"]}],
            "memory": 128
        });
        let names = placeholders(&doc).expect("should scan");
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["entry".to_owned(), "repo".to_owned(), "tag".to_owned()]
        );
    }

    #[test]
    fn placeholders_malformed_is_error() {
        assert!(placeholders(&json!({"image": "${repo"})).is_err());
    }
}
