//! Strict parser for the textual list-of-strings literals stored in the
//! survey dataset's collection columns, e.g. `['python', 'math']`.
//!
//! The dataset can originate from untrusted or corrupted sources, so these
//! columns are parsed against a minimal grammar instead of any general
//! evaluator: a bracketed, comma-separated sequence of single- or
//! double-quoted strings with backslash escapes. Anything else fails.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("expected '[' at position {0}")]
    ExpectedOpenBracket(usize),

    #[error("expected quoted string at position {0}")]
    ExpectedString(usize),

    #[error("unterminated string starting at position {0}")]
    UnterminatedString(usize),

    #[error("invalid escape sequence at position {0}")]
    InvalidEscape(usize),

    #[error("expected ',' or ']' at position {0}")]
    ExpectedSeparator(usize),

    #[error("trailing content at position {0}")]
    TrailingContent(usize),
}

/// Parses a list-of-strings literal into its elements.
///
/// Positions in errors are character offsets into the input.
pub fn parse_string_list(input: &str) -> Result<Vec<String>, LiteralError> {
    let chars: Vec<char> = input.chars().collect();
    let mut pos = 0usize;

    skip_whitespace(&chars, &mut pos);
    if chars.get(pos) != Some(&'[') {
        return Err(LiteralError::ExpectedOpenBracket(pos));
    }
    pos += 1;

    let mut items = Vec::new();
    loop {
        skip_whitespace(&chars, &mut pos);
        match chars.get(pos) {
            Some(']') => {
                pos += 1;
                break;
            }
            Some('\'') | Some('"') => {
                items.push(parse_string(&chars, &mut pos)?);
                skip_whitespace(&chars, &mut pos);
                match chars.get(pos) {
                    Some(',') => pos += 1,
                    Some(']') => {
                        pos += 1;
                        break;
                    }
                    _ => return Err(LiteralError::ExpectedSeparator(pos)),
                }
            }
            _ => return Err(LiteralError::ExpectedString(pos)),
        }
    }

    skip_whitespace(&chars, &mut pos);
    if pos != chars.len() {
        return Err(LiteralError::TrailingContent(pos));
    }

    Ok(items)
}

fn parse_string(chars: &[char], pos: &mut usize) -> Result<String, LiteralError> {
    let start = *pos;
    let quote = chars[*pos];
    *pos += 1;

    let mut value = String::new();
    loop {
        match chars.get(*pos) {
            None => return Err(LiteralError::UnterminatedString(start)),
            Some(c) if *c == quote => {
                *pos += 1;
                return Ok(value);
            }
            Some('\\') => {
                match chars.get(*pos + 1) {
                    Some('\\') => value.push('\\'),
                    Some('\'') => value.push('\''),
                    Some('"') => value.push('"'),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(_) => return Err(LiteralError::InvalidEscape(*pos)),
                    None => return Err(LiteralError::UnterminatedString(start)),
                }
                *pos += 2;
            }
            Some(c) => {
                value.push(*c);
                *pos += 1;
            }
        }
    }
}

fn skip_whitespace(chars: &[char], pos: &mut usize) {
    while matches!(chars.get(*pos), Some(c) if c.is_whitespace()) {
        *pos += 1;
    }
}
