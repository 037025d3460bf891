//! Unified error types for the deplojo workspace.
//!
//! Every failure of the generation pipeline surfaces as a [`DeplojoError`]
//! and is propagated to the immediate caller; nothing is retried locally.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DeplojoError {
    /// The template path does not resolve to a readable file.
    #[error("template not found at {path}: {source}")]
    TemplateNotFound {
        /// Path of the template that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The template content is not valid JSON.
    #[error("failed to parse template {path}: {source}")]
    TemplateParse {
        /// Path of the malformed template.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A template placeholder has no matching template variable.
    #[error("undefined template variable: {name}")]
    UndefinedVariable {
        /// Name referenced by the placeholder.
        name: String,
    },

    /// A `${` sequence that does not form a valid placeholder.
    #[error("invalid placeholder in template: {fragment}")]
    InvalidPlaceholder {
        /// Text starting at the offending `${`.
        fragment: String,
    },

    /// The template parsed but does not have the shape of a task definition.
    #[error("invalid task definition template: {message}")]
    InvalidTemplate {
        /// Description of the structural problem.
        message: String,
    },

    /// A task definition names an environment group that is not configured.
    #[error("task definition {definition} references unknown environment group {group}")]
    UnknownEnvironmentGroup {
        /// Task definition that referenced the group.
        definition: String,
        /// Missing group name.
        group: String,
    },

    /// Generating a single task definition of a batch failed.
    #[error("task definition {name} (template {template}): {source}")]
    Definition {
        /// Name of the failing task definition.
        name: String,
        /// Resolved template path.
        template: PathBuf,
        /// Underlying failure.
        source: Box<DeplojoError>,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML or does not match the model.
    #[error("failed to parse configuration {path}: {source}")]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

impl DeplojoError {
    /// Returns the innermost error, unwrapping any [`DeplojoError::Definition`]
    /// context layers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Definition { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DeplojoError>;
