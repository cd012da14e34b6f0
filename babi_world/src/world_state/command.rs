//! Shell-style tokenizing of command lines.

use crate::WorldError;

/// Split a command into tokens on whitespace, honoring single and double
/// quotes and backslash escapes.
///
/// Inside double quotes a backslash only escapes `\` and `"`; before any
/// other character it is kept literally, as POSIX-mode `shlex` does.
pub fn split_command(command: &str) -> Result<Vec<String>, WorldError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = command.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"'), '\\') => {
                match chars.peek() {
                    Some(&next @ ('\\' | '"')) => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push('\\'),
                }
            }
            (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_token = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(WorldError::UnterminatedQuote(command.to_string()));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
