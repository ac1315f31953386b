//! Classification of argument tokens into flags and positionals.
//!
//! Supported syntax:
//!
//! - `--name value` — long flag; `value` is taken when the next token does
//!   not start with `-`, otherwise the flag gets an empty value.
//! - `-abc value` — short-flag stack; `a`, `b` and `c` are separate flags and
//!   only `c` may take `value`.
//! - anything else is a positional.
//!
//! `--name=value` is not recognized.

use tracing::debug;

use crate::ParseError;

/// Flag names mapped to their raw string values, in first-seen order.
///
/// Inserting a name that is already present replaces its value but keeps
/// its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagMap {
    entries: Vec<(String, String)>,
}

impl FlagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        // Linear scan keeps first-seen order; argv-sized maps stay small.
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlagMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Output of [`split_flags`]: raw flag values and positionals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub flags: FlagMap,
    pub positionals: Vec<String>,
}

/// Returns the following token if it can serve as a flag value.
fn value_candidate<S: AsRef<str>>(tokens: &[S], idx: usize) -> Option<&str> {
    tokens
        .get(idx + 1)
        .map(AsRef::as_ref)
        .filter(|next| !next.starts_with('-'))
}

fn assign(flags: &mut FlagMap, name: String, value: String) {
    if let Some(previous) = flags.insert(name.as_str(), value) {
        debug!(flag = %name, previous = %previous, "Repeated flag overwrote earlier value");
    }
}

/// Splits tokens into flags and positionals.
///
/// A token consumed as a flag value is never classified itself. A flag
/// repeated across tokens keeps its last value; a character repeated inside
/// one short-flag stack is an error.
///
/// # Errors
///
/// - [`ParseError::MalformedFlagStack`] when a stack contains `-` after its
///   leading dash (this includes a bare `--`).
/// - [`ParseError::DuplicateFlagInStack`] when a stack names a flag twice.
///
/// # Examples
///
/// ```
/// use argschema_core::split_flags;
///
/// let parsed = split_flags(&["-ab", "value", "input.txt", "--dry-run"]).unwrap();
/// assert_eq!(parsed.flags.get("a"), Some(""));
/// assert_eq!(parsed.flags.get("b"), Some("value"));
/// assert_eq!(parsed.flags.get("dry-run"), Some(""));
/// assert_eq!(parsed.positionals, vec!["input.txt"]);
/// ```
pub fn split_flags<S: AsRef<str>>(tokens: &[S]) -> Result<ParsedArgs, ParseError> {
    let mut parsed = ParsedArgs::default();
    let mut skip_next = false;

    for (idx, token) in tokens.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        let token = token.as_ref();

        if token.len() >= 3 && token.starts_with("--") {
            let value = value_candidate(tokens, idx);
            skip_next = value.is_some();
            assign(
                &mut parsed.flags,
                token[2..].to_string(),
                value.unwrap_or_default().to_string(),
            );
        } else if token.len() >= 2 && token.starts_with('-') {
            let stack = &token[1..];
            let mut stack_flags: Vec<char> = Vec::with_capacity(stack.len());
            let mut chars = stack.chars().peekable();

            while let Some(ch) = chars.next() {
                if ch == '-' {
                    return Err(ParseError::MalformedFlagStack {
                        stack: stack.to_string(),
                    });
                }
                if stack_flags.contains(&ch) {
                    return Err(ParseError::DuplicateFlagInStack {
                        flag: ch,
                        stack: stack.to_string(),
                    });
                }
                stack_flags.push(ch);

                let mut value = String::new();
                if chars.peek().is_none() {
                    if let Some(next) = value_candidate(tokens, idx) {
                        skip_next = true;
                        value = next.to_string();
                    }
                }
                assign(&mut parsed.flags, ch.to_string(), value);
            }
        } else {
            parsed.positionals.push(token.to_string());
        }
    }

    debug!(
        flags = parsed.flags.len(),
        positionals = parsed.positionals.len(),
        "Split argument tokens"
    );
    Ok(parsed)
}
