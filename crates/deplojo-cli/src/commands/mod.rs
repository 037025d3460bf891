//! CLI command definitions and dispatch.

pub mod generate;
pub mod vars;

use clap::{Parser, Subcommand};

/// deplojo: task definition generator for container deployments.
#[derive(Parser, Debug)]
#[command(name = "deplojo", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the task definitions described by a configuration file.
    Generate(generate::GenerateArgs),
    /// List the template variables a task definition template expects.
    Vars(vars::VarsArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate(args) => generate::execute(args),
        Command::Vars(args) => vars::execute(args),
    }
}
