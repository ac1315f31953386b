//! Validated parse results and their typed getters.

use serde::Serialize;

use crate::{AccessError, ValueKind};

/// Where a flag's stored value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// The user supplied the flag.
    Explicit,
    /// The flag was omitted and its default was filled in.
    Defaulted,
}

/// One flag of a [`ValidatedResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFlag {
    pub name: String,
    pub value: String,
    pub provenance: Provenance,
    /// Rendered default of the flag's definition.
    #[serde(skip)]
    pub(crate) default: Option<String>,
}

/// Outcome of a successful validation.
///
/// Holds an entry for every flag in the schema (supplied or defaulted) and
/// exactly the expected number of positionals. Values are stored as strings
/// and converted on read.
///
/// # Examples
///
/// ```
/// use argschema_core::{ArgumentDefinition, ParseOutcome, Schema};
///
/// let schema = Schema::builder()
///     .arg(ArgumentDefinition::optional("n", "Count", 5))
///     .arg(ArgumentDefinition::optional("v", "Verbose", false))
///     .positional_names(["input"])
///     .build()
///     .unwrap();
///
/// let ParseOutcome::Parsed(result) = schema.parse_from(["-v", "data.csv"]).unwrap() else {
///     panic!("help requested");
/// };
/// assert_eq!(result.int_flag("n").unwrap(), 5);
/// assert!(result.is_default("n"));
/// assert!(result.bool_flag("v"));
/// assert_eq!(result.string_named("input").unwrap(), "data.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedResult {
    pub(crate) flags: Vec<ResolvedFlag>,
    pub(crate) positionals: Vec<String>,
    #[serde(skip)]
    pub(crate) positional_names: Vec<String>,
}

impl ValidatedResult {
    /// All flags, in schema registration order.
    pub fn flags(&self) -> impl Iterator<Item = &ResolvedFlag> {
        self.flags.iter()
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn flag(&self, key: &str) -> Option<&ResolvedFlag> {
        self.flags.iter().find(|flag| flag.name == key)
    }

    /// Returns the stored string of a flag.
    ///
    /// # Errors
    ///
    /// [`AccessError::FlagNotFound`] if the result has no such flag.
    pub fn string_flag(&self, key: &str) -> Result<&str, AccessError> {
        self.flag(key)
            .map(|flag| flag.value.as_str())
            .ok_or_else(|| AccessError::FlagNotFound {
                key: key.to_string(),
            })
    }

    /// Returns a flag converted to an integer.
    pub fn int_flag(&self, key: &str) -> Result<i64, AccessError> {
        let value = self.string_flag(key)?;
        convert(value, ValueKind::Integer, || format!("flag '{key}'"))
    }

    /// Returns a flag converted to an unsigned integer.
    pub fn uint_flag(&self, key: &str) -> Result<u64, AccessError> {
        let value = self.string_flag(key)?;
        convert(value, ValueKind::Integer, || format!("flag '{key}'"))
    }

    /// Returns a flag converted to a float.
    pub fn float_flag(&self, key: &str) -> Result<f64, AccessError> {
        let value = self.string_flag(key)?;
        convert(value, ValueKind::Float, || format!("flag '{key}'"))
    }

    /// Returns `true` if the user supplied the flag.
    ///
    /// Presence decides, not the stored value: `-v` stores an empty string
    /// and still reads as `true`, while a defaulted `true` reads as `false`.
    pub fn bool_flag(&self, key: &str) -> bool {
        self.is_present(key)
    }

    /// Returns `true` if the flag was given on the command line.
    pub fn is_present(&self, key: &str) -> bool {
        self.flag(key)
            .is_some_and(|flag| flag.provenance == Provenance::Explicit)
    }

    /// Returns `true` if the flag's stored value equals its rendered default.
    ///
    /// An explicitly supplied value identical to the default counts as
    /// default. Unknown flags are never at their default.
    pub fn is_default(&self, key: &str) -> bool {
        self.flag(key).is_some_and(|flag| {
            flag.default
                .as_deref()
                .is_some_and(|default| default == flag.value)
        })
    }

    /// Returns the positional at `idx`.
    ///
    /// # Errors
    ///
    /// [`AccessError::IndexOutOfBounds`] if `idx >= len`.
    pub fn string_at(&self, idx: usize) -> Result<&str, AccessError> {
        self.positionals
            .get(idx)
            .map(String::as_str)
            .ok_or(AccessError::IndexOutOfBounds {
                idx,
                len: self.positionals.len(),
            })
    }

    pub fn int_at(&self, idx: usize) -> Result<i64, AccessError> {
        let value = self.string_at(idx)?;
        convert(value, ValueKind::Integer, || format!("index {idx}"))
    }

    pub fn uint_at(&self, idx: usize) -> Result<u64, AccessError> {
        let value = self.string_at(idx)?;
        convert(value, ValueKind::Integer, || format!("index {idx}"))
    }

    pub fn float_at(&self, idx: usize) -> Result<f64, AccessError> {
        let value = self.string_at(idx)?;
        convert(value, ValueKind::Float, || format!("index {idx}"))
    }

    /// Index of the first positional declared under `name`.
    pub fn positional_index(&self, name: &str) -> Option<usize> {
        self.positional_names.iter().position(|n| n == name)
    }

    /// Returns the positional declared under `name`.
    ///
    /// # Errors
    ///
    /// [`AccessError::PositionalNotFound`] if the schema declares no
    /// positional with that name.
    pub fn string_named(&self, name: &str) -> Result<&str, AccessError> {
        let idx = self.named_index(name)?;
        self.string_at(idx)
    }

    pub fn int_named(&self, name: &str) -> Result<i64, AccessError> {
        let idx = self.named_index(name)?;
        self.int_at(idx)
    }

    pub fn uint_named(&self, name: &str) -> Result<u64, AccessError> {
        let idx = self.named_index(name)?;
        self.uint_at(idx)
    }

    pub fn float_named(&self, name: &str) -> Result<f64, AccessError> {
        let idx = self.named_index(name)?;
        self.float_at(idx)
    }

    fn named_index(&self, name: &str) -> Result<usize, AccessError> {
        self.positional_index(name)
            .ok_or_else(|| AccessError::PositionalNotFound {
                name: name.to_string(),
            })
    }
}

fn convert<T: std::str::FromStr>(
    value: &str,
    expected: ValueKind,
    location: impl FnOnce() -> String,
) -> Result<T, AccessError> {
    value.parse().map_err(|_| AccessError::TypeConversion {
        value: value.to_string(),
        location: location(),
        expected,
    })
}
