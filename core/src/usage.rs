//! Usage and error text for a schema.
//!
//! Rendering is pure: callers decide where the text goes and whether the
//! process exits.

use std::fmt::Display;
use std::path::Path;

use crate::{ArgumentDefinition, DefaultValue, Schema, schema::HELP_FLAG};

/// Returns the file name of the running executable, or `"program"`.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "program".to_string())
}

/// Renders the usage text for `schema`.
///
/// Required flags are listed first, then optional ones, then `--help`.
///
/// # Examples
///
/// ```
/// use argschema_core::{ArgumentDefinition, Schema, render_usage};
///
/// let schema = Schema::builder()
///     .arg(ArgumentDefinition::optional("file", "Output file", "out.txt"))
///     .arg(ArgumentDefinition::required("n", "Count", 1))
///     .positional_names(["input"])
///     .build()
///     .unwrap();
///
/// let usage = render_usage(&schema, "copy");
/// assert!(usage.starts_with("Usage: copy <INPUT> [Flags]\n"));
/// assert!(usage.contains("-n "));
/// assert!(usage.contains("[Default = \"out.txt\"]"));
/// ```
pub fn render_usage(schema: &Schema, program: &str) -> String {
    let mut out = format!("Usage: {program}");

    let positionals = positional_labels(schema);
    if !positionals.is_empty() {
        out.push(' ');
        out.push_str(&positionals.join(" "));
    }
    out.push_str(" [Flags]\n\nFlags:\n");

    let defs = schema.definitions();
    let ordered: Vec<&ArgumentDefinition> = defs
        .iter()
        .filter(|def| def.required && def.name != HELP_FLAG)
        .chain(defs.iter().filter(|def| !def.required && def.name != HELP_FLAG))
        .chain(defs.iter().filter(|def| def.name == HELP_FLAG))
        .collect();

    let rows: Vec<(String, &str, String)> = ordered
        .iter()
        .map(|def| (flag_label(&def.name), def.help.as_str(), annotation(def)))
        .collect();

    let name_width = rows.iter().map(|(name, _, _)| name.len()).max().unwrap_or(0);
    let help_width = rows.iter().map(|(_, help, _)| help.len()).max().unwrap_or(0);

    for (name, help, extra) in &rows {
        out.push_str(&format!(
            "    {name:<name_width$}  {help:<help_width$}  [{extra}]\n"
        ));
    }

    out
}

/// Renders an error message followed by the usage text.
///
/// # Examples
///
/// ```
/// use argschema_core::{ParseError, Schema, render_failure};
///
/// let schema = Schema::builder().build().unwrap();
/// let err = ParseError::UnknownFlag { name: "x".into() };
/// let text = render_failure(&schema, "tool", &err);
/// assert!(text.starts_with("Error:\n    an unknown flag 'x' was supplied\n\nUsage: tool"));
/// ```
pub fn render_failure(schema: &Schema, program: &str, err: &impl Display) -> String {
    format!("Error:\n    {err}\n\n{}", render_usage(schema, program))
}

fn positional_labels(schema: &Schema) -> Vec<String> {
    if schema.positional_names().is_empty() {
        (1..=schema.expected_positionals())
            .map(|n| format!("<ARG{n}>"))
            .collect()
    } else {
        schema
            .positional_names()
            .iter()
            .map(|name| format!("<{}>", name.to_uppercase()))
            .collect()
    }
}

fn flag_label(name: &str) -> String {
    if name.chars().count() > 1 {
        format!("--{name}")
    } else {
        format!("-{name}")
    }
}

fn annotation(def: &ArgumentDefinition) -> String {
    if def.required {
        return "Required".to_string();
    }
    match &def.default {
        DefaultValue::Str(value) => format!("Default = \"{value}\""),
        other => format!("Default = {}", other.render()),
    }
}
