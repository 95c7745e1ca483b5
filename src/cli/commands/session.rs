//! `sda session` command - Interactive form with templates
//!
//! Mirrors the form workflow: pick a schema type, fill the fields, generate,
//! then copy or download the markup. Templates saved here last until the
//! session ends.

use chrono::{Local, Utc};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::helpers::{first_line, print_errors};
use crate::cli::GlobalOpts;
use crate::core::export::{copy_to_clipboard, render_script_tag};
use crate::core::{Config, SchemaKind, Session};
use crate::schema::registry::SchemaRegistry;
use crate::schema::wizard::FormWizard;

#[derive(clap::Args, Debug)]
pub struct SessionArgs {
    /// Schema type to start with (default: config default_schema, else faq)
    #[arg(long, short = 's')]
    pub schema: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    FillForm,
    EditField,
    ChangeSchema,
    Generate,
    Copy,
    Download,
    ShowSnippet,
    SaveTemplate,
    LoadTemplate,
    DeleteTemplate,
    ClearForm,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::FillForm => "Fill in form",
            Action::EditField => "Edit one field",
            Action::ChangeSchema => "Change schema type",
            Action::Generate => "Generate schema",
            Action::Copy => "Copy to clipboard",
            Action::Download => "Download",
            Action::ShowSnippet => "Show <script> embed snippet",
            Action::SaveTemplate => "Save as template",
            Action::LoadTemplate => "Load template",
            Action::DeleteTemplate => "Delete template",
            Action::ClearForm => "Clear form",
            Action::Quit => "Quit",
        }
    }
}

/// Actions that make sense in the current state
fn available_actions(session: &Session) -> Vec<Action> {
    let mut actions = vec![Action::FillForm, Action::EditField, Action::ChangeSchema, Action::Generate];
    if session.output().is_some() {
        actions.extend([Action::Copy, Action::Download, Action::ShowSnippet]);
    }
    actions.push(Action::SaveTemplate);
    if !session.templates().is_empty() {
        actions.extend([Action::LoadTemplate, Action::DeleteTemplate]);
    }
    actions.extend([Action::ClearForm, Action::Quit]);
    actions
}

pub fn run(args: SessionArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let schema = match &args.schema {
        Some(id) => id.parse::<SchemaKind>()?,
        None => config.default_schema(),
    };

    let theme = ColorfulTheme::default();
    let wizard = FormWizard::new();
    let mut session = Session::new(schema);

    if !global.quiet {
        println!("{}", style("Structured Data Assistant").bold());
        println!(
            "{}",
            style("Create JSON-LD schema markup for search engines").dim()
        );
    }

    loop {
        print_status(&session);

        let actions = available_actions(&session);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;

        match actions[choice] {
            Action::FillForm => {
                let values = wizard.run(session.definition(), session.values())?;
                session.set_values(values);
            }
            Action::EditField => {
                let def = session.definition();
                let names: Vec<String> = def
                    .fields
                    .iter()
                    .map(|f| {
                        let current = first_line(session.values().get(f.name));
                        format!("{:<26} {}", f.label, style(current).dim())
                    })
                    .collect();
                let idx = Select::with_theme(&theme)
                    .with_prompt("Field")
                    .items(&names)
                    .default(0)
                    .interact()
                    .into_diagnostic()?;
                let field = &def.fields[idx];
                let value = wizard.prompt_field(field, session.values().get(field.name))?;
                session.set_field(field.name, value);
            }
            Action::ChangeSchema => {
                let defs = SchemaRegistry::list();
                let names: Vec<&str> = defs.iter().map(|d| d.display_name).collect();
                let current = defs
                    .iter()
                    .position(|d| d.kind == session.schema())
                    .unwrap_or(0);
                let idx = Select::with_theme(&theme)
                    .with_prompt("Schema type")
                    .items(&names)
                    .default(current)
                    .interact()
                    .into_diagnostic()?;
                session.select_schema(defs[idx].kind);
                println!("{}", style(defs[idx].description).dim());
            }
            Action::Generate => match session.generate() {
                Ok(text) => {
                    println!();
                    println!("{}", text);
                    println!();
                    println!(
                        "{} Schema generated successfully! {}",
                        style("✓").green(),
                        style("Valid").green().bold()
                    );
                }
                Err(_) => print_errors(session.errors()),
            },
            Action::Copy => {
                if let Some(text) = session.output() {
                    match copy_to_clipboard(text, config.clipboard_command.as_deref()) {
                        Ok(_) => println!("{} Copied to clipboard!", style("✓").green()),
                        Err(e) => eprintln!(
                            "{} Failed to copy: {}. Please copy the schema manually.",
                            style("!").yellow(),
                            e
                        ),
                    }
                }
            }
            Action::Download => {
                download(&session, &config.output_dir());
            }
            Action::ShowSnippet => {
                if let Some(text) = session.output() {
                    show_snippet(text);
                }
            }
            Action::SaveTemplate => save_template(&mut session, &theme)?,
            Action::LoadTemplate => {
                if let Some(idx) = pick_template(&session, &theme, "Load which template?")? {
                    let id = session.templates().list()[idx].id.clone();
                    session.load_template(&id)?;
                    let name = &session.templates().list()[idx].name;
                    println!("{} Template \"{}\" has been loaded.", style("✓").green(), name);
                }
            }
            Action::DeleteTemplate => {
                if let Some(idx) = pick_template(&session, &theme, "Delete which template?")? {
                    let id = session.templates().list()[idx].id.clone();
                    if let Some(removed) = session.delete_template(&id) {
                        println!("{} Template \"{}\" deleted.", style("✓").green(), removed.name);
                    }
                }
            }
            Action::ClearForm => {
                let confirmed = Confirm::with_theme(&theme)
                    .with_prompt("Clear all fields?")
                    .default(false)
                    .interact()
                    .into_diagnostic()?;
                if confirmed {
                    session.clear_form();
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Write the current output to `dir`. Failures are reported and the session carries on.
fn download(session: &Session, dir: &Path) -> Option<PathBuf> {
    let artifact = session.download_artifact(Utc::now())?;
    match artifact.write_to(dir) {
        Ok(path) => {
            println!("{} Downloaded {}", style("✓").green(), style(path.display()).cyan());
            Some(path)
        }
        Err(e) => {
            eprintln!("{} Download failed: {}", style("!").yellow(), e);
            None
        }
    }
}

fn show_snippet(text: &str) {
    match render_script_tag(text) {
        Ok(html) => {
            println!();
            println!("{}", html);
            println!(
                "{}",
                style("Paste this into your page, then check it with a rich results test.").dim()
            );
        }
        Err(e) => eprintln!("{} Could not build the snippet: {}", style("!").yellow(), e),
    }
}

fn print_status(session: &Session) {
    let def = session.definition();
    let filled = def
        .fields
        .iter()
        .filter(|f| !session.values().is_blank(f.name))
        .count();

    let badge = if session.is_valid_output() {
        style("Valid").green().bold().to_string()
    } else {
        String::new()
    };

    println!();
    println!(
        "{} {} {} {}",
        style("◆").cyan(),
        style(def.display_name).bold(),
        style(format!(
            "({}/{} fields, {} template(s))",
            filled,
            def.fields.len(),
            session.templates().len()
        ))
        .dim(),
        badge
    );
}

fn save_template(session: &mut Session, theme: &ColorfulTheme) -> Result<()> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Template name")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    let description: String = Input::with_theme(theme)
        .with_prompt("Description (optional)")
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    match session.save_template(&name, &description) {
        Ok(template) => println!(
            "{} \"{}\" has been saved to your templates.",
            style("✓").green(),
            template.name
        ),
        Err(err) => print_errors(&err.messages()),
    }
    Ok(())
}

fn pick_template(session: &Session, theme: &ColorfulTheme, prompt: &str) -> Result<Option<usize>> {
    let templates = session.templates().list();
    if templates.is_empty() {
        return Ok(None);
    }

    let items: Vec<String> = templates
        .iter()
        .map(|t| {
            let def = SchemaRegistry::get(t.schema);
            let created = t.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
            if t.description.is_empty() {
                format!("{} · {} · {}", t.name, def.display_name, created)
            } else {
                format!("{} · {} · {} - {}", t.name, def.display_name, created, t.description)
            }
        })
        .collect();

    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()
        .into_diagnostic()
}
