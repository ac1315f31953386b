//! Schema files read by the `argschema` binary.
//!
//! A schema file is YAML (or JSON, chosen by a `.json` extension):
//!
//! ```yaml
//! program: copy
//! flags:
//!   - name: file
//!     help: Output file
//!     default: out.txt
//!   - name: n
//!     help: Number of copies
//!     default: 1
//!     required: true
//! positionals: [input]
//! ```
//!
//! `positional_count: N` may be used instead of `positionals` when the
//! positionals are unnamed.

use std::io::BufReader;
use std::path::Path;

use argschema_core::{ArgumentDefinition, Schema, SchemaError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a schema file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The declared arguments do not form a valid schema.
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("set either `positionals` or `positional_count`, not both")]
    ConflictingPositionals,
}

/// On-disk schema declaration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Program name shown in usage text.
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub flags: Vec<ArgumentDefinition>,
    /// Positional names, in order.
    #[serde(default)]
    pub positionals: Vec<String>,
    #[serde(default)]
    pub positional_count: Option<usize>,
}

impl SchemaFile {
    /// Loads a schema file; `.json` files are read as JSON, anything else as
    /// YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let file: Self = if is_json {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        Ok(file)
    }

    /// Registers the declared flags and positionals.
    pub fn to_schema(&self) -> Result<Schema, ConfigError> {
        let builder = Schema::builder().args(self.flags.iter().cloned());
        let builder = match (self.positionals.is_empty(), self.positional_count) {
            (false, Some(_)) => return Err(ConfigError::ConflictingPositionals),
            (false, None) => builder.positional_names(self.positionals.iter().cloned()),
            (true, count) => builder.positional_count(count.unwrap_or(0)),
        };
        Ok(builder.build()?)
    }

    /// Program name for usage text, falling back to `fallback`.
    pub fn program_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.program.as_deref().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use argschema_core::DefaultValue;

    use super::*;

    #[test]
    fn test_yaml_schema_file() {
        let yaml = r#"
program: copy
flags:
  - name: file
    help: Output file
    default: out.txt
  - name: n
    default: 2
    required: true
positionals: [input]
"#;
        let file: SchemaFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.program_or("x"), "copy");
        assert_eq!(file.flags[1].default, DefaultValue::Int(2));

        let schema = file.to_schema().unwrap();
        assert_eq!(schema.expected_positionals(), 1);
        assert!(schema.find("n").unwrap().required);
    }

    #[test]
    fn test_positional_count_only() {
        let file: SchemaFile = serde_yaml::from_str("positional_count: 2").unwrap();
        let schema = file.to_schema().unwrap();
        assert_eq!(schema.expected_positionals(), 2);
        assert!(schema.positional_names().is_empty());
        assert_eq!(file.program_or("fallback"), "fallback");
    }

    #[test]
    fn test_conflicting_positionals() {
        let file: SchemaFile =
            serde_yaml::from_str("positionals: [a]\npositional_count: 1").unwrap();
        assert!(matches!(
            file.to_schema(),
            Err(ConfigError::ConflictingPositionals)
        ));
    }

    #[test]
    fn test_schema_error_is_wrapped() {
        let file: SchemaFile = serde_json::from_str(
            r#"{"flags": [{"name": "help", "default": false}]}"#,
        )
        .unwrap();
        assert!(matches!(
            file.to_schema(),
            Err(ConfigError::Schema(SchemaError::ReservedName(_)))
        ));
    }
}
