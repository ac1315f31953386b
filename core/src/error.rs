//! Error types for tokenizing, validating and reading arguments.
//!
//! Failures are split by the stage that produces them:
//!
//! - [`ParseError`] — bad user input, returned from the parse entry points.
//! - [`AccessError`] — a typed read on a validated result that cannot be
//!   satisfied.
//! - [`SchemaError`] — a malformed schema declaration. These indicate a
//!   programming mistake rather than bad input.

use thiserror::Error;

use crate::ValueKind;

/// Failures produced while turning raw input into a validated result.
///
/// Each variant carries enough context for a usage renderer to produce a
/// precise message. The first violation found wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input ended while a quoted span was still open.
    #[error("unexpected end of input while parsing string opened with {delimiter}")]
    UnterminatedQuote {
        /// The quote character that opened the span.
        delimiter: char,
    },
    /// A short-flag stack contains a `-` after its leading dash.
    #[error("illegal character '-' in flag stack '{stack}'")]
    MalformedFlagStack {
        /// The stack without its leading dash.
        stack: String,
    },
    /// The same one-character flag appears twice in a single stack.
    #[error("flag '{flag}' defined twice in flag stack '{stack}'")]
    DuplicateFlagInStack {
        /// The repeated flag character.
        flag: char,
        /// The stack without its leading dash.
        stack: String,
    },
    /// The number of positional arguments differs from the schema.
    #[error("received invalid amount of positional arguments: expected {expected}, got {actual}")]
    PositionalCountMismatch { expected: usize, actual: usize },
    /// A flag was supplied that the schema does not define.
    #[error("an unknown flag '{name}' was supplied")]
    UnknownFlag { name: String },
    /// A supplied flag value does not have the shape of the flag's type.
    #[error("flag '{flag}' expects input of type '{expected}' but received '{value}'")]
    TypeMismatch {
        flag: String,
        expected: ValueKind,
        value: String,
    },
    /// A required flag was not supplied.
    #[error("did not receive required flag '{name}'")]
    MissingRequiredFlag { name: String },
}

/// Failures produced by the typed getters of
/// [`ValidatedResult`](crate::ValidatedResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A positional index outside `[0, len)`.
    #[error("index {idx} is out of bounds for length {len}")]
    IndexOutOfBounds { idx: usize, len: usize },
    /// The stored string could not be converted to the requested type.
    #[error("unable to convert value '{value}' at {location} to {expected}")]
    TypeConversion {
        value: String,
        /// Where the value came from, e.g. `flag 'n'` or `index 0`.
        location: String,
        expected: ValueKind,
    },
    /// No flag with this name exists in the result.
    #[error("no value for flag '{key}'")]
    FlagNotFound { key: String },
    /// No positional argument is declared under this name.
    #[error("positional argument '{name}' not found")]
    PositionalNotFound { name: String },
}

/// Schema declaration errors.
///
/// Returned by [`SchemaBuilder::build`](crate::SchemaBuilder::build). A
/// schema is fixed by the program that declares it, so callers usually treat
/// these as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two argument definitions share a name.
    #[error("tried to create flag '{0}' twice")]
    DuplicateFlag(String),
    /// A definition uses a name reserved by the parser.
    #[error("flag name '{0}' is reserved")]
    ReservedName(String),
    /// A positional name is also used by a flag.
    #[error("arg '{0}' is present in flags as well as positional args")]
    PositionalCollision(String),
    /// A definition has an empty name.
    #[error("flag name cannot be empty")]
    EmptyName,
}
