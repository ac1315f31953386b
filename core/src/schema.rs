//! Argument definitions and the schema they are registered into.
//!
//! A [`Schema`] is built once through [`Schema::builder`] and is immutable
//! afterwards. Parsing is only available on a built schema, so there is no
//! way to parse input before the arguments have been declared.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Name of the flag that requests usage output. Registered implicitly.
pub const HELP_FLAG: &str = "help";

/// Shape of a flag value, derived from the kind of its default.
///
/// # Examples
///
/// ```
/// use argschema_core::{DefaultValue, ValueKind};
///
/// assert_eq!(DefaultValue::Int(5).kind(), ValueKind::Integer);
/// assert_eq!(DefaultValue::UInt(5).kind(), ValueKind::Integer);
/// assert_eq!(ValueKind::Float.to_string(), "float");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Bool,
    Integer,
    Float,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
        };
        f.write_str(name)
    }
}

/// Default value of an argument definition.
///
/// The variant decides which inputs the validator accepts for the flag and
/// how the default is written into the result when the flag is omitted.
///
/// Deserializes untagged, so schema files can write `default: 5`,
/// `default: 2.5`, `default: true` or `default: "out.txt"`.
///
/// # Examples
///
/// ```
/// use argschema_core::DefaultValue;
///
/// assert_eq!(DefaultValue::Int(-3).render(), "-3");
/// assert_eq!(DefaultValue::Float(2.5).render(), "2.500000");
/// assert_eq!(DefaultValue::Bool(false).render(), "false");
/// assert_eq!(DefaultValue::from("out.txt").render(), "out.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl DefaultValue {
    /// Returns the value kind used for type checks.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) | Self::UInt(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::String,
        }
    }

    /// Renders the value the way it is stored in a validated result.
    ///
    /// Integers are decimal, floats fixed-point with six decimals, booleans
    /// `true`/`false` and strings verbatim.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::UInt(value) => value.to_string(),
            Self::Float(value) => format!("{value:.6}"),
            Self::Str(value) => value.clone(),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u64> for DefaultValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A declared flag.
///
/// Use [`optional`](ArgumentDefinition::optional) or
/// [`required`](ArgumentDefinition::required) and register the definition
/// with [`SchemaBuilder::arg`].
///
/// # Examples
///
/// ```
/// use argschema_core::{ArgumentDefinition, ValueKind};
///
/// let file = ArgumentDefinition::optional("file", "Output file", "out.txt");
/// assert!(!file.required);
/// assert_eq!(file.kind(), ValueKind::String);
///
/// let count = ArgumentDefinition::required("n", "Repeat count", 1);
/// assert!(count.required);
/// assert_eq!(count.kind(), ValueKind::Integer);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    /// Flag name without dashes (`file` for `--file`, `v` for `-v`).
    pub name: String,
    /// Help text shown in usage output.
    #[serde(default)]
    pub help: String,
    /// Default value, also deciding the flag's type.
    pub default: DefaultValue,
    /// Whether the flag must be supplied.
    #[serde(default)]
    pub required: bool,
}

impl ArgumentDefinition {
    /// Creates an optional flag.
    pub fn optional(name: &str, help: &str, default: impl Into<DefaultValue>) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            default: default.into(),
            required: false,
        }
    }

    /// Creates a required flag. The default only decides the flag's type.
    pub fn required(name: &str, help: &str, default: impl Into<DefaultValue>) -> Self {
        Self {
            required: true,
            ..Self::optional(name, help, default)
        }
    }

    /// Returns the value kind of this flag.
    pub fn kind(&self) -> ValueKind {
        self.default.kind()
    }

    fn help_flag() -> Self {
        Self::optional(HELP_FLAG, "Print help", false)
    }
}

/// Positional argument declaration: a bare count or a list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Positionals {
    Count(usize),
    Named(Vec<String>),
}

impl Default for Positionals {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// A registered set of flags and positionals.
///
/// # Examples
///
/// ```
/// use argschema_core::{ArgumentDefinition, Schema};
///
/// let schema = Schema::builder()
///     .arg(ArgumentDefinition::optional("file", "Output file", "out.txt"))
///     .positional_names(["input"])
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.expected_positionals(), 1);
/// assert!(schema.find("file").is_some());
/// assert!(schema.find("help").is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    definitions: Vec<ArgumentDefinition>,
    expected_positionals: usize,
    positional_names: Vec<String>,
}

impl Schema {
    /// Starts a schema declaration.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Definitions in registration order, starting with the `help` flag.
    pub fn definitions(&self) -> &[ArgumentDefinition] {
        &self.definitions
    }

    /// Finds a definition by flag name.
    pub fn find(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.definitions.iter().find(|def| def.name == name)
    }

    /// Number of positionals every input must carry.
    pub fn expected_positionals(&self) -> usize {
        self.expected_positionals
    }

    /// Declared positional names; empty when only a count was given.
    pub fn positional_names(&self) -> &[String] {
        &self.positional_names
    }
}

/// Builder for [`Schema`].
///
/// All checks run in [`build`](SchemaBuilder::build).
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    args: Vec<ArgumentDefinition>,
    positionals: Positionals,
}

impl SchemaBuilder {
    /// Registers a flag.
    pub fn arg(mut self, def: ArgumentDefinition) -> Self {
        self.args.push(def);
        self
    }

    /// Registers several flags in order.
    pub fn args(mut self, defs: impl IntoIterator<Item = ArgumentDefinition>) -> Self {
        self.args.extend(defs);
        self
    }

    /// Expects exactly `count` unnamed positionals.
    pub fn positional_count(mut self, count: usize) -> Self {
        self.positionals = Positionals::Count(count);
        self
    }

    /// Expects one positional per name, in order.
    pub fn positional_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.positionals = Positionals::Named(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the positional declaration directly.
    pub fn positionals(mut self, positionals: Positionals) -> Self {
        self.positionals = positionals;
        self
    }

    /// Validates the declaration and builds the schema.
    ///
    /// The `help` flag is injected first.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] for empty, duplicate or reserved flag names
    /// and for positional names that are also flag names.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::{ArgumentDefinition, Schema, SchemaError};
    ///
    /// let err = Schema::builder()
    ///     .arg(ArgumentDefinition::optional("v", "Verbose", false))
    ///     .arg(ArgumentDefinition::optional("v", "Version", false))
    ///     .build()
    ///     .unwrap_err();
    /// assert_eq!(err, SchemaError::DuplicateFlag("v".into()));
    /// ```
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut definitions = Vec::with_capacity(self.args.len() + 1);
        definitions.push(ArgumentDefinition::help_flag());

        let mut seen: HashSet<String> = HashSet::new();
        for def in self.args {
            if def.name.is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if def.name == HELP_FLAG {
                return Err(SchemaError::ReservedName(def.name));
            }
            if !seen.insert(def.name.clone()) {
                return Err(SchemaError::DuplicateFlag(def.name));
            }
            definitions.push(def);
        }

        let (expected_positionals, positional_names) = match self.positionals {
            Positionals::Count(count) => (count, Vec::new()),
            Positionals::Named(names) => (names.len(), names),
        };

        if let Some(name) = positional_names
            .iter()
            .find(|name| definitions.iter().any(|def| &def.name == *name))
        {
            return Err(SchemaError::PositionalCollision(name.clone()));
        }

        Ok(Schema {
            definitions,
            expected_positionals,
            positional_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_injects_help_first() {
        let schema = Schema::builder()
            .arg(ArgumentDefinition::optional("v", "Verbose", false))
            .build()
            .unwrap();

        let names: Vec<&str> = schema
            .definitions()
            .iter()
            .map(|def| def.name.as_str())
            .collect();
        assert_eq!(names, vec!["help", "v"]);
        assert_eq!(schema.expected_positionals(), 0);
    }

    #[test]
    fn test_build_rejects_reserved_help() {
        let err = Schema::builder()
            .arg(ArgumentDefinition::optional("help", "Custom help", false))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::ReservedName("help".to_string()));
    }

    #[test]
    fn test_build_rejects_positional_collision() {
        let err = Schema::builder()
            .arg(ArgumentDefinition::optional("file", "Output", "out.txt"))
            .positional_names(["input", "file"])
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::PositionalCollision("file".to_string()));

        let err = Schema::builder()
            .positional_names(["help"])
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::PositionalCollision("help".to_string()));
    }

    #[test]
    fn test_build_rejects_empty_name() {
        let err = Schema::builder()
            .arg(ArgumentDefinition::optional("", "Nameless", 0))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyName);
    }

    #[test]
    fn test_positionals_default_to_none_expected() {
        assert_eq!(Positionals::default(), Positionals::Count(0));

        let schema = Schema::builder()
            .positional_count(2)
            .positionals(Positionals::default())
            .build()
            .unwrap();
        assert_eq!(schema.expected_positionals(), 0);
        assert!(schema.positional_names().is_empty());
    }

    #[test]
    fn test_positional_names_set_count() {
        let schema = Schema::builder()
            .positional_names(["src", "dest", "src"])
            .build()
            .unwrap();
        assert_eq!(schema.expected_positionals(), 3);
        assert_eq!(schema.positional_names().len(), 3);
    }

    #[test]
    fn test_default_value_deserializes_untagged() {
        let def: ArgumentDefinition =
            serde_json::from_str(r#"{"name": "n", "default": 5}"#).unwrap();
        assert_eq!(def.default, DefaultValue::Int(5));
        assert!(!def.required);

        let def: ArgumentDefinition =
            serde_json::from_str(r#"{"name": "r", "default": 0.25, "required": true}"#).unwrap();
        assert_eq!(def.default, DefaultValue::Float(0.25));
        assert!(def.required);

        let def: ArgumentDefinition =
            serde_json::from_str(r#"{"name": "v", "default": true}"#).unwrap();
        assert_eq!(def.kind(), ValueKind::Bool);

        let def: ArgumentDefinition =
            serde_json::from_str(r#"{"name": "file", "default": "out.txt"}"#).unwrap();
        assert_eq!(def.default, DefaultValue::Str("out.txt".to_string()));

        let def: ArgumentDefinition =
            serde_json::from_str(r#"{"name": "big", "default": 18446744073709551615}"#).unwrap();
        assert_eq!(def.default, DefaultValue::UInt(u64::MAX));
    }

    #[test]
    fn test_render_default_values() {
        assert_eq!(DefaultValue::UInt(42).render(), "42");
        assert_eq!(DefaultValue::Float(-0.5).render(), "-0.500000");
        assert_eq!(DefaultValue::Bool(true).render(), "true");
        assert_eq!(DefaultValue::Str(String::new()).render(), "");
    }
}
