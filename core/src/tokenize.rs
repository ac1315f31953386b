//! Shell-like splitting of a single command-line string.

use crate::ParseError;

/// Returns `true` for the characters that open a quoted span.
fn is_quote(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '`')
}

/// Splits `input` into word tokens.
///
/// Tokens are separated by ASCII spaces. A span opened by `"`, `'` or
/// `` ` `` runs until the same character closes it and becomes a single
/// token without its quotes. Inside a span, a delimiter preceded by a
/// backslash does not close it and the backslash is kept.
///
/// # Errors
///
/// Returns [`ParseError::UnterminatedQuote`] if the input ends inside a
/// quoted span.
///
/// # Examples
///
/// ```
/// use argschema_core::tokenize;
///
/// let tokens = tokenize(r#"-d Hello --file "Some text file.txt" 'Hello there!'"#).unwrap();
/// assert_eq!(
///     tokens,
///     vec!["-d", "Hello", "--file", "Some text file.txt", "Hello there!"]
/// );
///
/// assert!(tokenize("--name 'open").is_err());
/// ```
pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut open: Option<char> = None;
    let mut prev: Option<char> = None;

    for ch in input.chars() {
        match open {
            Some(delimiter) => {
                if ch == delimiter && prev != Some('\\') {
                    tokens.push(std::mem::take(&mut current));
                    open = None;
                } else {
                    current.push(ch);
                }
            }
            None if is_quote(ch) => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                open = Some(ch);
            }
            None if ch == ' ' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(ch),
        }
        prev = Some(ch);
    }

    if let Some(delimiter) = open {
        return Err(ParseError::UnterminatedQuote { delimiter });
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}
