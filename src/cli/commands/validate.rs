//! `sda validate` command - Check field values against a schema type

use console::style;
use miette::Result;

use crate::cli::args::FieldArgs;
use crate::cli::helpers::{collect_values, warn_unrecognized};
use crate::cli::GlobalOpts;
use crate::schema::registry::SchemaRegistry;
use crate::schema::validator::validate;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Schema type (faq, article, localbusiness, event, product, organization)
    pub schema: String,

    #[command(flatten)]
    pub values: FieldArgs,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let def = SchemaRegistry::find(&args.schema)?;
    let values = collect_values(&args.values)?;

    if !global.quiet {
        for warning in warn_unrecognized(def, &values) {
            eprintln!("{} {}", style("!").yellow(), warning);
        }
    }

    validate(def.kind, &values).into_result()?;

    if !global.quiet {
        println!(
            "{} {} values are valid",
            style("✓").green(),
            style(def.display_name).cyan()
        );
    }
    Ok(())
}
