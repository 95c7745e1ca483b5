//! Getting generated markup out of the tool: downloads, clipboard, embed snippet

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use rust_embed::Embed;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tera::Tera;
use thiserror::Error;

use crate::core::identity::SchemaKind;

pub const JSON_MIME_TYPE: &str = "application/json";

const SCRIPT_TAG_TEMPLATE: &str = "script-tag.html.tera";

/// Clipboard commands tried in order when none is configured
const CLIPBOARD_CANDIDATES: &[&str] = &["pbcopy", "wl-copy", "xclip -selection clipboard", "clip"];

#[derive(Embed)]
#[folder = "snippets/"]
struct EmbeddedSnippets;

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("failed to write {path}")]
    #[diagnostic(code(sda::export::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy to clipboard with '{command}': {reason}")]
    #[diagnostic(
        code(sda::export::clipboard),
        help("set a clipboard command with `sda config set clipboard_command \"xclip -selection clipboard\"`, or copy the output manually")
    )]
    Clipboard { command: String, reason: String },

    #[error("no clipboard command available")]
    #[diagnostic(
        code(sda::export::no_clipboard),
        help("install pbcopy, wl-copy or xclip, or set SDA_CLIPBOARD")
    )]
    NoClipboard,

    #[error("failed to render snippet: {0}")]
    #[diagnostic(code(sda::export::render))]
    Render(String),
}

/// A generated document packaged as a downloadable file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl DownloadArtifact {
    /// Package `contents` as `schema-<id>-<unix-millis>.json`
    pub fn new(kind: SchemaKind, contents: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            file_name: format!("schema-{}-{}.json", kind.as_str(), at.timestamp_millis()),
            mime_type: JSON_MIME_TYPE,
            contents: contents.into(),
        }
    }

    /// Write into `dir` (created if missing) and return the full path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        log::info!("downloaded {} ({} bytes)", path.display(), self.contents.len());
        Ok(path)
    }
}

/// Wrap JSON-LD in a `<script type="application/ld+json">` element for embedding in a page
pub fn render_script_tag(json: &str) -> Result<String, ExportError> {
    let mut tera = Tera::default();

    let snippet = EmbeddedSnippets::get(SCRIPT_TAG_TEMPLATE)
        .ok_or_else(|| ExportError::Render(format!("missing {}", SCRIPT_TAG_TEMPLATE)))?;
    let template_str = std::str::from_utf8(&snippet.data)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    tera.add_raw_template(SCRIPT_TAG_TEMPLATE, template_str)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    // "</" would end the script element early; "<\/" is the same JSON string
    let mut context = tera::Context::new();
    context.insert("json", &json.replace("</", "<\\/"));

    tera.render(SCRIPT_TAG_TEMPLATE, &context)
        .map_err(|e| ExportError::Render(e.to_string()))
}

/// Pipe `text` into a clipboard command.
///
/// Uses `command` when given, otherwise the first available platform tool.
/// Returns the command that succeeded.
pub fn copy_to_clipboard(text: &str, command: Option<&str>) -> Result<String, ExportError> {
    if let Some(command) = command {
        return pipe_to(command, text).map(|_| command.to_string());
    }

    for candidate in CLIPBOARD_CANDIDATES {
        match pipe_to(candidate, text) {
            Ok(()) => return Ok(candidate.to_string()),
            Err(ExportError::Clipboard { reason, .. }) => {
                log::debug!("clipboard command '{}' unavailable: {}", candidate, reason);
            }
            Err(e) => return Err(e),
        }
    }

    Err(ExportError::NoClipboard)
}

fn pipe_to(command: &str, text: &str) -> Result<(), ExportError> {
    let clipboard_err = |reason: String| ExportError::Clipboard {
        command: command.to_string(),
        reason,
    };

    let parts: Vec<&str> = command.split_whitespace().collect();
    let Some((program, args)) = parts.split_first() else {
        return Err(clipboard_err("empty command".to_string()));
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| clipboard_err(e.to_string()))?;

    // stdin is dropped before waiting so the child sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    // Always reap the child, even when the write failed
    let status = child.wait().map_err(|e| clipboard_err(e.to_string()))?;
    written.map_err(|e| clipboard_err(e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(clipboard_err(format!("exited with {}", status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_download_file_name_pattern() {
        let at = Utc.timestamp_millis_opt(1_717_171_717_123).unwrap();
        let artifact = DownloadArtifact::new(SchemaKind::LocalBusiness, "{}", at);
        assert_eq!(artifact.file_name, "schema-localbusiness-1717171717123.json");
        assert_eq!(artifact.mime_type, "application/json");
    }

    #[test]
    fn test_write_to_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("out/nested");
        let artifact = DownloadArtifact::new(SchemaKind::Faq, "{\n  \"a\": 1\n}", Utc::now());

        let path = artifact.write_to(&dir).unwrap();
        assert!(path.starts_with(&dir));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_script_tag_wraps_json() {
        let html = render_script_tag("{\n  \"@type\": \"FAQPage\"\n}").unwrap();
        assert!(html.starts_with("<script type=\"application/ld+json\">\n{\n  \"@type\""));
        assert!(html.trim_end().ends_with("</script>"));
        // Not HTML-escaped
        assert!(html.contains("\"@type\": \"FAQPage\""));
    }

    #[test]
    fn test_script_tag_escapes_closing_tags() {
        let html = render_script_tag(r#"{"text": "</script><b>"}"#).unwrap();
        assert!(html.contains(r#""<\/script><b>""#));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_clipboard_configured_command() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("clip.txt");
        let command = format!("tee {}", target.display());

        let used = copy_to_clipboard("copied text", Some(&command)).unwrap();
        assert_eq!(used, command);
        assert_eq!(std::fs::read_to_string(target).unwrap(), "copied text");
    }

    #[test]
    fn test_clipboard_failure_is_reported() {
        let err = copy_to_clipboard("x", Some("definitely-not-a-real-clipboard-tool")).unwrap_err();
        assert!(matches!(err, ExportError::Clipboard { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_clipboard_command_that_ignores_input() {
        // More than a pipe buffer, so the write fails once `true` has exited
        let text = "x".repeat(1 << 20);
        let err = copy_to_clipboard(&text, Some("true")).unwrap_err();
        assert!(matches!(err, ExportError::Clipboard { ref command, .. } if command == "true"));

        assert_eq!(copy_to_clipboard("short", Some("cat")).unwrap(), "cat");
    }
}
