//! Flat key-value text format.
//!
//! Responsibilities:
//! - Parse the `.properties` line format: comments, `=`/`:`/whitespace
//!   separators, backslash line continuations, character escapes.
//!
//! Does NOT handle:
//! - Routing priority; this loader accepts everything and relies on the
//!   registry order to lose ties against more specific loaders.
//!
//! Invariants:
//! - Duplicate keys within one resource resolve to the last occurrence.
//! - Syntax errors carry the physical line number where the entry started.

use std::io::Read;

use super::{Loader, ParseError};
use crate::locator::Locator;
use crate::map::PropertyMap;

const INLINE_SPACE: [char; 3] = [' ', '\t', '\u{000C}'];

/// Loader for the flat key-value text format.
///
/// Registered as the fallback: it accepts every locator, so with the
/// built-in registry it handles whatever the markup loader declined.
#[derive(Debug, Default)]
pub struct PropertiesLoader;

impl PropertiesLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Loader for PropertiesLoader {
    fn name(&self) -> &str {
        "properties"
    }

    fn accept(&self, _locator: &Locator) -> bool {
        true
    }

    fn load(&self, map: &mut PropertyMap, stream: &mut dyn Read) -> Result<(), ParseError> {
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        let text = decode_utf8(buf)?;

        let mut physical = text.lines().enumerate();
        while let Some((idx, raw)) = physical.next() {
            let line_no = idx + 1;
            let trimmed = raw.trim_start_matches(INLINE_SPACE);
            if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                continue;
            }

            // Assemble the logical line across backslash continuations.
            let mut logical = String::from(trimmed);
            while ends_in_continuation(&logical) {
                logical.pop();
                match physical.next() {
                    Some((_, next)) => logical.push_str(next.trim_start_matches(INLINE_SPACE)),
                    None => break,
                }
            }

            let (raw_key, raw_value) = split_entry(&logical);
            let key = unescape(raw_key, line_no)?;
            let value = unescape(raw_value, line_no)?;
            map.insert(key, value);
        }
        Ok(())
    }
}

fn decode_utf8(buf: Vec<u8>) -> Result<String, ParseError> {
    String::from_utf8(buf).map_err(|err| {
        let valid = err.utf8_error().valid_up_to();
        let line = err.as_bytes()[..valid].iter().filter(|&&b| b == b'\n').count() + 1;
        ParseError::Line {
            line,
            message: "invalid UTF-8".to_string(),
        }
    })
}

/// A logical line continues when it ends in an odd run of backslashes.
fn ends_in_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value parts.
///
/// The key ends at the first unescaped `=`, `:`, or inline whitespace; the
/// separator may be surrounded by whitespace; a line without a separator
/// defines the key with an empty value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                break;
            }
            c if INLINE_SPACE.contains(&c) => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(INLINE_SPACE);
    if let Some(after) = rest.strip_prefix(['=', ':']) {
        rest = after.trim_start_matches(INLINE_SPACE);
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = chars.next().and_then(|c| c.to_digit(16)).ok_or_else(|| {
                        ParseError::Line {
                            line,
                            message: "incomplete \\u escape".to_string(),
                        }
                    })?;
                    code = code * 16 + digit;
                }
                let decoded = char::from_u32(code).ok_or_else(|| ParseError::Line {
                    line,
                    message: format!("\\u{code:04x} is not a valid character"),
                })?;
                out.push(decoded);
            }
            // Escaped separators, comment markers, and anything else decode
            // to the character itself.
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    Ok(out)
}
