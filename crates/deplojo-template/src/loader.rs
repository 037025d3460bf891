//! Template file loading.
//!
//! Templates are re-read and re-parsed on every call so that no two
//! generations share a document.

use std::path::Path;

use deplojo_common::error::{DeplojoError, Result};
use serde_json::Value;

/// Reads and parses the JSON template at `path`.
///
/// # Errors
///
/// Returns `DeplojoError::TemplateNotFound` if the file cannot be read, or
/// `DeplojoError::TemplateParse` if it is not valid JSON.
pub fn load_template(path: &Path) -> Result<Value> {
    tracing::debug!(path = %path.display(), "loading template");
    let content = std::fs::read_to_string(path).map_err(|source| DeplojoError::TemplateNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DeplojoError::TemplateParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_valid_template() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("task.json");
        std::fs::write(&path, r#"{"family": "default", "memory": 256}"#).expect("failed to write");
        let doc = load_template(&path).expect("load failed");
        assert_eq!(doc["family"], "default");
        assert_eq!(doc["memory"], 256);
    }

    #[test]
    fn load_missing_file_returns_not_found() {
        let err = load_template(Path::new("/nonexistent/task.json")).expect_err("should fail");
        assert!(matches!(err, DeplojoError::TemplateNotFound { .. }));
    }

    #[test]
    fn load_malformed_json_returns_parse_error() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("task.json");
        std::fs::write(&path, r#"{"family": "default",,}"#).expect("failed to write");
        let err = load_template(&path).expect_err("should fail");
        assert!(matches!(
            err,
            DeplojoError::TemplateParse { ref path, .. } if path.ends_with("task.json")
        ));
    }

    #[test]
    fn load_directory_returns_not_found() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let err = load_template(dir.path()).expect_err("should fail");
        assert!(matches!(err, DeplojoError::TemplateNotFound { .. }));
    }
}
