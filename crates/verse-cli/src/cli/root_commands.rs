use std::path::PathBuf;

use clap::{Args, Subcommand};
use verse_core::Language;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List all projects.
    Projects,
    /// Create a project seeded with placeholder code.
    Create(CreateArgs),
    /// Show a project and its code.
    Show(ShowArgs),
    /// Run a project's code (optionally replacing it first) and save it.
    Run(RunArgs),
    /// Replace a project's code.
    Save(SaveArgs),
    /// Delete a project.
    Delete(DeleteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    /// Project name
    #[arg(long)]
    pub name: String,

    /// One of: python, cpp, java, javascript (defaults to config)
    #[arg(long, value_parser = parse_language)]
    pub language: Option<Language>,

    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    pub id: String,

    /// File to run instead of the stored code, or `-` for stdin
    #[arg(long)]
    pub source: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SaveArgs {
    pub id: String,

    /// File with the new code, or `-` for stdin
    #[arg(long)]
    pub source: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_language(value: &str) -> Result<Language, String> {
    value.parse().map_err(|error: verse_core::ValidationError| error.to_string())
}
