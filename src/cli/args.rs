//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, generate::GenerateArgs,
    parse::ParseArgs, schema::SchemaCommands, session::SessionArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "sda")]
#[command(author, version, about = "Structured Data Assistant")]
#[command(long_about = "Structured Data Assistant: generate schema.org JSON-LD markup for FAQ pages, articles, local businesses, events, products and organizations.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the supported schema types and their fields
    #[command(subcommand)]
    Schema(SchemaCommands),

    /// Check field values without generating markup
    Validate(ValidateArgs),

    /// Generate JSON-LD markup from field values
    Generate(GenerateArgs),

    /// Run a free-text field parser (faq, address, hours, contact)
    Parse(ParseArgs),

    /// Interactive form session with templates
    Session(SessionArgs),

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Form values supplied on the command line
#[derive(clap::Args, Clone, Debug, Default)]
pub struct FieldArgs {
    /// Field value as NAME=VALUE (repeatable)
    #[arg(long = "field", short = 'F', value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// JSON or YAML file mapping field names to values
    #[arg(long = "values", value_name = "FILE")]
    pub values_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Choose based on context (text for listings, json for markup)
    #[default]
    Auto,
    /// Human-readable text
    Text,
    /// JSON
    Json,
    /// JSON-LD wrapped in a <script> element
    Html,
}
