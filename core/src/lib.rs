//! Command-line argument splitting and schema validation.
//!
//! Parsing runs in two stages:
//!
//! - [`tokenize`] turns a shell-like string into word tokens, and
//!   [`split_flags`] classifies tokens into long flags (`--name value`),
//!   short-flag stacks (`-abc value`) and positionals.
//! - [`validate`] checks the split arguments against a [`Schema`]: positional
//!   count, unknown flags, value types and required flags. Omitted optional
//!   flags receive their default.
//!
//! The result is a [`ValidatedResult`] with typed getters, or
//! [`ParseOutcome::HelpRequested`] when `--help` was given. Nothing in this
//! crate prints or exits; [`render_usage`] and [`render_failure`] produce the
//! text a front end needs.
//!
//! # Example
//!
//! ```
//! use argschema_core::*;
//!
//! let schema = Schema::builder()
//!     .arg(ArgumentDefinition::optional("file", "Output file", "out.txt"))
//!     .arg(ArgumentDefinition::optional("v", "Verbose output", false))
//!     .positional_names(["input"])
//!     .build()
//!     .unwrap();
//!
//! match schema.parse_from(["input.txt", "-v", "--file", "result.txt"]) {
//!     Ok(ParseOutcome::Parsed(result)) => {
//!         assert_eq!(result.string_named("input").unwrap(), "input.txt");
//!         assert_eq!(result.string_flag("file").unwrap(), "result.txt");
//!         assert!(result.bool_flag("v"));
//!     }
//!     Ok(ParseOutcome::HelpRequested) => println!("{}", render_usage(&schema, "app")),
//!     Err(err) => eprintln!("{}", render_failure(&schema, "app", &err)),
//! }
//! ```

mod error;
mod parse;
mod result;
mod schema;
mod split;
mod tokenize;
mod usage;
mod validate;

pub use error::{AccessError, ParseError, SchemaError};
pub use result::{Provenance, ResolvedFlag, ValidatedResult};
pub use schema::{
    ArgumentDefinition, DefaultValue, HELP_FLAG, Positionals, Schema, SchemaBuilder, ValueKind,
};
pub use split::{FlagMap, ParsedArgs, split_flags};
pub use tokenize::tokenize;
pub use usage::{program_name, render_failure, render_usage};
pub use validate::{ParseOutcome, validate};
