//! `sda schema` command - Browse the schema catalog
//!
//! Lists the supported schema types and shows each type's form fields, so
//! values files can be written without the interactive session.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{first_line, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::schema::registry::{SchemaDefinition, SchemaRegistry};

#[derive(Subcommand, Debug)]
pub enum SchemaCommands {
    /// List all available schema types
    List,

    /// Show the fields of a schema type
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Schema type (faq, article, localbusiness, event, product, organization)
    pub schema: String,
}

pub fn run(cmd: SchemaCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SchemaCommands::List => list_schemas(global),
        SchemaCommands::Show(args) => show_schema(args, global),
    }
}

fn list_schemas(global: &GlobalOpts) -> Result<()> {
    let definitions = SchemaRegistry::list();

    if global.format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(definitions).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    println!(
        "{:<14} {:<16} {:<14} {}",
        style("ID").bold(),
        style("NAME").bold(),
        style("@TYPE").bold(),
        style("DESCRIPTION").bold()
    );
    println!("{}", "-".repeat(90));

    for def in definitions {
        println!(
            "{:<14} {:<16} {:<14} {}",
            def.id(),
            def.display_name,
            def.json_ld_type(),
            truncate_str(def.description, 44)
        );
    }

    if !global.quiet {
        println!();
        println!(
            "Use {} for field details",
            style("sda schema show <id>").yellow()
        );
    }
    Ok(())
}

fn show_schema(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let def = SchemaRegistry::find(&args.schema)?;

    if global.format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(def).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    print_definition(def);
    Ok(())
}

fn print_definition(def: &SchemaDefinition) {
    let title = format!("{} ({})", def.display_name, def.json_ld_type());
    println!("{}", style(&title).bold());
    println!("{}", "=".repeat(title.chars().count()));
    println!("{}\n", def.description);

    println!(
        "{:<16} {:<26} {:<10} {:<5} {}",
        "NAME", "LABEL", "KIND", "REQ", "EXAMPLE"
    );
    println!("{}", "-".repeat(90));

    for field in def.fields {
        let example = field.placeholder.map(first_line).unwrap_or_default();
        println!(
            "{:<16} {:<26} {:<10} {:<5} {}",
            field.name,
            field.label,
            field.kind.as_str(),
            if field.required { "yes" } else { "" },
            truncate_str(&example, 30)
        );
    }

    let selects: Vec<_> = def.fields.iter().filter(|f| !f.options.is_empty()).collect();
    if !selects.is_empty() {
        println!("\nOptions:");
        for field in selects {
            let values: Vec<_> = field.options.iter().map(|o| o.value).collect();
            println!("  {}: {}", field.name, values.join(", "));
        }
    }
}
