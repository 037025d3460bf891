//! `deplojo generate`: Render task definitions from a configuration file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use deplojo_common::config::DeplojoConfig;
use deplojo_common::types::TemplateVars;

use crate::output::{OutputFormat, render_documents, write_documents};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the deployment configuration file.
    #[arg(short, long, default_value = deplojo_common::constants::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Template variable as KEY=VALUE. May be repeated.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// YAML or JSON file with template variables. `--var` values win.
    #[arg(long)]
    pub var_file: Option<PathBuf>,

    /// Only generate the named task definition. May be repeated.
    #[arg(short, long = "definition", value_name = "NAME")]
    pub definitions: Vec<String>,

    /// Shape of the emitted documents.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
    pub format: OutputFormat,

    /// Write one `<name>.json` per task definition into this directory
    /// instead of printing to stdout.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Parses a `KEY=VALUE` template variable.
///
/// # Errors
///
/// Returns a message if the `=` is missing or the key is empty.
pub fn parse_var(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty variable name in `{raw}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

/// Merges the variable file (if any) with `--var` pairs; pairs win.
///
/// # Errors
///
/// Returns an error if the variable file cannot be read or parsed.
pub fn collect_template_vars(
    var_file: Option<&Path>,
    pairs: &[(String, String)],
) -> anyhow::Result<TemplateVars> {
    let mut vars = match var_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read variable file {}", path.display()))?;
            serde_yaml::from_str::<Option<TemplateVars>>(&content)
                .with_context(|| format!("failed to parse variable file {}", path.display()))?
                .unwrap_or_default()
        }
        None => TemplateVars::new(),
    };
    vars.extend(pairs.iter().cloned());
    Ok(vars)
}

/// Restricts `config` to the task definitions in `only`, if any.
///
/// # Errors
///
/// Returns an error naming the first requested definition that is not in
/// the configuration.
pub fn select_definitions(config: &mut DeplojoConfig, only: &[String]) -> anyhow::Result<()> {
    if only.is_empty() {
        return Ok(());
    }
    if let Some(missing) = only
        .iter()
        .find(|name| !config.task_definitions.contains_key(name.as_str()))
    {
        anyhow::bail!("task definition not found in configuration: {missing}");
    }
    config
        .task_definitions
        .retain(|name, _| only.iter().any(|wanted| wanted == name));
    Ok(())
}

/// Executes the `generate` command.
///
/// Loads the configuration, generates every selected task definition with
/// templates resolved relative to the configuration file, and emits them.
///
/// # Errors
///
/// Returns an error if loading, generation, or output fails.
pub fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    tracing::info!(config = %args.config.display(), "generating task definitions");

    let mut config = DeplojoConfig::load(&args.config)?;
    select_definitions(&mut config, &args.definitions)?;
    let template_vars = collect_template_vars(args.var_file.as_deref(), &args.vars)?;

    let base_path = args.config.parent();
    let generated =
        deplojo_compose::generate_task_definitions(&config, &template_vars, base_path)?;
    let documents = render_documents(&generated, args.format);

    match args.output_dir {
        Some(ref dir) => {
            let written = write_documents(dir, &documents)?;
            for path in &written {
                println!("Wrote {}", path.display());
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&documents)?),
    }

    Ok(())
}
