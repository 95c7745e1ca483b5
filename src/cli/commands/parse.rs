//! `sda parse` command - Preview how free text becomes structured data

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;

use crate::schema::parsers::{parse_address, parse_contact_points, parse_faq, parse_hours};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserKind {
    /// "Q:" / "A:" blocks separated by blank lines
    Faq,
    /// Street, city, region and postal code on separate lines
    Address,
    /// One opening-hours entry per line
    Hours,
    /// "type: value" lines
    Contact,
}

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Which parser to run
    #[arg(value_enum)]
    pub parser: ParserKind,

    /// Text to parse (reads stdin when neither TEXT nor --file is given)
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn run(args: ParseArgs) -> Result<()> {
    let input = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).into_diagnostic()?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
            buf
        }
    };

    let output = parse_to_json(args.parser, &input);
    println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    Ok(())
}

/// The JSON-LD fragment a parser contributes to a document
pub fn parse_to_json(parser: ParserKind, input: &str) -> Value {
    match parser {
        ParserKind::Faq => Value::Array(parse_faq(input).iter().map(|i| i.to_json_ld()).collect()),
        ParserKind::Address => parse_address(input).to_json_ld(),
        ParserKind::Hours => json!(parse_hours(input)),
        ParserKind::Contact => Value::Array(
            parse_contact_points(input)
                .iter()
                .map(|p| p.to_json_ld())
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_to_json_address() {
        let value = parse_to_json(ParserKind::Address, "123 Main St\nSpringfield\nIL\n62704");
        assert_eq!(value["postalCode"], "62704");
        assert_eq!(value["@type"], "PostalAddress");
    }

    #[test]
    fn test_parse_to_json_empty_inputs() {
        assert_eq!(parse_to_json(ParserKind::Faq, ""), json!([]));
        assert_eq!(parse_to_json(ParserKind::Hours, "\n\n"), json!([]));
        assert_eq!(parse_to_json(ParserKind::Contact, "nothing"), json!([]));
        assert_eq!(
            parse_to_json(ParserKind::Address, ""),
            json!({"@type": "PostalAddress"})
        );
    }
}
