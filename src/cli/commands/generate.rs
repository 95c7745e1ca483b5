//! `sda generate` command - Produce JSON-LD markup
//!
//! Values are validated first; nothing is written when validation fails.
//! Markup goes to stdout unless `--output` or `--download` is given, so the
//! command can be piped. Status messages go to stderr.

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::args::FieldArgs;
use crate::cli::helpers::{collect_values, warn_unrecognized};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::export::{copy_to_clipboard, render_script_tag, DownloadArtifact};
use crate::core::Config;
use crate::schema::generator::generate_validated;
use crate::schema::registry::SchemaRegistry;

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Schema type (faq, article, localbusiness, event, product, organization)
    pub schema: String,

    #[command(flatten)]
    pub values: FieldArgs,

    /// Write the markup to this file
    #[arg(long, short = 'o', conflicts_with = "download")]
    pub output: Option<PathBuf>,

    /// Save as schema-<id>-<timestamp>.json in the output directory
    #[arg(long)]
    pub download: bool,

    /// Directory for --download (default: config output_dir, else current directory)
    #[arg(long, requires = "download")]
    pub dir: Option<PathBuf>,

    /// Also copy the markup to the clipboard
    #[arg(long)]
    pub copy: bool,
}

pub fn run(args: GenerateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let def = SchemaRegistry::find(&args.schema)?;
    let values = collect_values(&args.values)?;

    if !global.quiet {
        for warning in warn_unrecognized(def, &values) {
            eprintln!("{} {}", style("!").yellow(), warning);
        }
    }

    let document = generate_validated(def.kind, &values)?;
    let json = document.to_pretty_json();

    let format = resolve_format(global.format, &config);
    let markup = match format {
        OutputFormat::Html => render_script_tag(&json)?,
        _ => json.clone(),
    };

    if let Some(path) = &args.output {
        std::fs::write(path, &markup).into_diagnostic()?;
        status(global, format!("Wrote {}", style(path.display()).cyan()));
    } else if args.download {
        let dir = args.dir.clone().unwrap_or_else(|| config.output_dir());
        let artifact = DownloadArtifact::new(def.kind, json.clone(), Utc::now());
        let path = artifact.write_to(&dir)?;
        status(global, format!("Downloaded {}", style(path.display()).cyan()));
    } else {
        println!("{}", markup);
    }

    if args.copy {
        // A failed copy is a notice, not a failed generate
        match copy_to_clipboard(&markup, config.clipboard_command.as_deref()) {
            Ok(_) => status(global, "Copied to clipboard".to_string()),
            Err(e) => eprintln!("{} Failed to copy: {}", style("!").yellow(), e),
        }
    }

    Ok(())
}

fn resolve_format(requested: OutputFormat, config: &Config) -> OutputFormat {
    if requested != OutputFormat::Auto {
        return requested;
    }
    match config.default_format.as_deref() {
        Some("html") => OutputFormat::Html,
        _ => OutputFormat::Json,
    }
}

fn status(global: &GlobalOpts, message: String) {
    if !global.quiet {
        eprintln!("{} {}", style("✓").green(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format() {
        let config = Config::default();
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Html, &config), OutputFormat::Html);

        let config = Config {
            default_format: Some("html".into()),
            ..Config::default()
        };
        assert_eq!(resolve_format(OutputFormat::Auto, &config), OutputFormat::Html);
        assert_eq!(resolve_format(OutputFormat::Json, &config), OutputFormat::Json);
    }
}
