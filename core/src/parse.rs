//! Parse entry points for the supported input sources.

use tracing::debug;

use crate::{ParseError, ParseOutcome, Schema, split_flags, tokenize, validate};

impl Schema {
    /// Tokenizes a shell-like command string and validates it.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::{ArgumentDefinition, Schema};
    ///
    /// let schema = Schema::builder()
    ///     .arg(ArgumentDefinition::optional("file", "Output file", "out.txt"))
    ///     .positional_count(1)
    ///     .build()
    ///     .unwrap();
    ///
    /// let result = schema
    ///     .parse_str(r#""my input.txt" --file 'result file.txt'"#)
    ///     .unwrap()
    ///     .into_result()
    ///     .unwrap();
    /// assert_eq!(result.string_at(0).unwrap(), "my input.txt");
    /// assert_eq!(result.string_flag("file").unwrap(), "result file.txt");
    /// ```
    pub fn parse_str(&self, input: &str) -> Result<ParseOutcome, ParseError> {
        let tokens = tokenize(input)?;
        debug!(tokens = tokens.len(), "Tokenized input string");
        self.parse_tokens(&tokens)
    }

    /// Validates an explicit list of arguments.
    ///
    /// The list must not contain the program name.
    pub fn parse_from<I, S>(&self, args: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        self.parse_tokens(&tokens)
    }

    /// Validates the arguments of the current process, without the program
    /// name. Arguments that are not valid UTF-8 are converted lossily.
    pub fn parse_env(&self) -> Result<ParseOutcome, ParseError> {
        self.parse_from(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    /// Splits and validates already-tokenized input.
    pub fn parse_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome, ParseError> {
        let parsed = split_flags(tokens)?;
        validate(self, parsed)
    }
}
