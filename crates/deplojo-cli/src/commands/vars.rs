//! `deplojo vars`: List the placeholders a template references.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `vars` command.
#[derive(Args, Debug)]
pub struct VarsArgs {
    /// Path to the JSON task definition template.
    pub template: PathBuf,
}

/// Executes the `vars` command.
///
/// # Errors
///
/// Returns an error if the template cannot be loaded or contains a
/// malformed placeholder.
pub fn execute(args: VarsArgs) -> anyhow::Result<()> {
    tracing::info!(template = %args.template.display(), "scanning template variables");
    let document = deplojo_template::load_template(&args.template)?;
    for name in deplojo_template::placeholders(&document)? {
        println!("{name}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_lists_template_placeholders() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let template = dir.path().join("web.json");
        std::fs::write(
            &template,
            r#"{"containerDefinitions": [{"name": "web", "image": "${repo}:${tag}"}]}"#,
        )
        .expect("failed to write template");

        execute(VarsArgs { template }).expect("vars should succeed");
    }

    #[test]
    fn execute_rejects_malformed_placeholder() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let template = dir.path().join("web.json");
        std::fs::write(&template, r#"{"image": "${repo"}"#).expect("failed to write template");

        assert!(execute(VarsArgs { template }).is_err());
    }

    #[test]
    fn execute_missing_template_is_error() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let template = dir.path().join("absent.json");
        assert!(execute(VarsArgs { template }).is_err());
    }
}
