//! Validation of split arguments against a [`Schema`].
//!
//! Checks run in a fixed order and the first failure is returned:
//!
//! 1. `--help` short-circuits to [`ParseOutcome::HelpRequested`].
//! 2. positional count
//! 3. unknown flags, in the order they were typed
//! 4. value shape of every supplied flag
//! 5. required flags; omitted optional flags receive their default
//!
//! # Examples
//!
//! ```
//! use argschema_core::*;
//!
//! let schema = Schema::builder()
//!     .arg(ArgumentDefinition::optional("file", "Output file", "out.txt"))
//!     .positional_count(1)
//!     .build()
//!     .unwrap();
//!
//! let parsed = split_flags(&["input.txt"]).unwrap();
//! let ParseOutcome::Parsed(result) = validate(&schema, parsed).unwrap() else {
//!     panic!("help requested");
//! };
//! assert_eq!(result.string_flag("file").unwrap(), "out.txt");
//!
//! let parsed = split_flags(&["input.txt", "--nope", "x"]).unwrap();
//! assert_eq!(
//!     validate(&schema, parsed),
//!     Err(ParseError::UnknownFlag { name: "nope".into() })
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    ParseError, ParsedArgs, Provenance, ResolvedFlag, Schema, ValidatedResult, ValueKind,
    schema::HELP_FLAG,
};

/// Terminal states of a successful parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Input satisfied the schema.
    Parsed(ValidatedResult),
    /// `--help` was supplied; the caller should print usage.
    HelpRequested,
}

impl ParseOutcome {
    /// Returns the validated result, or `None` if help was requested.
    pub fn into_result(self) -> Option<ValidatedResult> {
        match self {
            Self::Parsed(result) => Some(result),
            Self::HelpRequested => None,
        }
    }

    pub fn is_help(&self) -> bool {
        matches!(self, Self::HelpRequested)
    }
}

/// Returns `true` if `value` has the shape required by `kind`.
fn value_fits(kind: ValueKind, value: &str) -> bool {
    // SAFETY: compile-time constant pattern, exercised by tests.
    static INTEGER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[+-]?[0-9]*$").expect("static regex must compile"));

    match kind {
        ValueKind::String | ValueKind::Bool => true,
        // An empty or sign-only value passes here and fails on read.
        ValueKind::Integer => INTEGER_RE.is_match(value),
        ValueKind::Float => value.parse::<f64>().is_ok(),
    }
}

/// Validates split arguments against `schema`, filling in defaults.
///
/// # Errors
///
/// Returns the first of [`ParseError::PositionalCountMismatch`],
/// [`ParseError::UnknownFlag`], [`ParseError::TypeMismatch`] or
/// [`ParseError::MissingRequiredFlag`] encountered.
pub fn validate(schema: &Schema, parsed: ParsedArgs) -> Result<ParseOutcome, ParseError> {
    if parsed.flags.contains(HELP_FLAG) {
        debug!("Help flag supplied, skipping validation");
        return Ok(ParseOutcome::HelpRequested);
    }

    let expected = schema.expected_positionals();
    if parsed.positionals.len() != expected {
        return Err(ParseError::PositionalCountMismatch {
            expected,
            actual: parsed.positionals.len(),
        });
    }

    if let Some((name, _)) = parsed
        .flags
        .iter()
        .find(|(name, _)| schema.find(name).is_none())
    {
        return Err(ParseError::UnknownFlag {
            name: name.to_string(),
        });
    }

    for (name, value) in parsed.flags.iter() {
        let Some(def) = schema.find(name) else {
            continue;
        };
        if !value_fits(def.kind(), value) {
            return Err(ParseError::TypeMismatch {
                flag: name.to_string(),
                expected: def.kind(),
                value: value.to_string(),
            });
        }
    }

    let mut flags = Vec::with_capacity(schema.definitions().len());
    for def in schema.definitions() {
        let default = def.default.render();
        let resolved = match parsed.flags.get(&def.name) {
            Some(value) => ResolvedFlag {
                name: def.name.clone(),
                value: value.to_string(),
                provenance: Provenance::Explicit,
                default: Some(default),
            },
            None if def.required => {
                return Err(ParseError::MissingRequiredFlag {
                    name: def.name.clone(),
                });
            }
            None => {
                debug!(flag = %def.name, value = %default, "Using default value");
                ResolvedFlag {
                    name: def.name.clone(),
                    value: default.clone(),
                    provenance: Provenance::Defaulted,
                    default: Some(default),
                }
            }
        };
        flags.push(resolved);
    }

    // Normally empty: unknown flags were rejected above.
    for (name, value) in parsed.flags.iter() {
        if !flags.iter().any(|flag| flag.name == name) {
            flags.push(ResolvedFlag {
                name: name.to_string(),
                value: value.to_string(),
                provenance: Provenance::Explicit,
                default: None,
            });
        }
    }

    Ok(ParseOutcome::Parsed(ValidatedResult {
        flags,
        positionals: parsed.positionals,
        positional_names: schema.positional_names().to_vec(),
    }))
}
