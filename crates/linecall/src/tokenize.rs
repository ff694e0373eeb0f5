//! Splitting raw input into command segments and tokens.
//!
//! Two passes run over every input line:
//!
//! 1. [`split_segments`] cuts the line on top-level `;` into independently
//!    dispatched commands. Quotes, escapes and list brackets are kept verbatim.
//! 2. [`tokenize`] turns one segment into tokens, consuming quotes and escapes.
//!
//! ```text
//! calc -a 3 -op "*" ; printlist -items [1, "two; three"]
//! └──── segment 1 ─┘   └───────── segment 2 ──────────┘
//!
//! segment 2 → ["printlist", "-items", "[1, \"two; three\"]"]
//! ```

use crate::error::DispatchError;
use tracing::trace;

const QUOTE: char = '"';
const ESCAPE: char = '\\';
const LIST_START: char = '[';
const LIST_END: char = ']';
const SEGMENT_DELIMITER: char = ';';
const FLAG_PREFIX: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InQuote,
    InEscape,
    InList,
}

/// Splits a line on `;` that is not inside a quote or a list literal.
///
/// Segments are trimmed and empty segments are dropped.
pub fn split_segments(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut state = State::Outside;
    let mut start = 0;

    for (i, c) in line.char_indices() {
        state = match (state, c) {
            (State::Outside, SEGMENT_DELIMITER) => {
                segments.push(&line[start..i]);
                start = i + c.len_utf8();
                State::Outside
            }
            (State::Outside, QUOTE) => State::InQuote,
            (State::Outside, LIST_START) => State::InList,
            (State::InQuote, ESCAPE) => State::InEscape,
            (State::InQuote, QUOTE) => State::Outside,
            (State::InEscape, _) => State::InQuote,
            (State::InList, LIST_END) => State::Outside,
            (current, _) => current,
        };
    }
    segments.push(&line[start..]);

    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Tokenizes one command segment.
///
/// Whitespace separates tokens. A double-quoted run joins the surrounding
/// token with its quotes removed, and inside it `\` escapes the next
/// character. A `[` opens a list literal that is copied verbatim up to the
/// next `]`. Empty tokens are never produced.
///
/// Fails with [`DispatchError::MalformedLiteral`] when a quote is left open.
pub fn tokenize(segment: &str) -> Result<Vec<String>, DispatchError> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut state = State::Outside;

    for c in segment.chars() {
        match state {
            State::Outside => {
                if c.is_whitespace() {
                    if !token.is_empty() {
                        tokens.push(std::mem::take(&mut token));
                    }
                } else if c == QUOTE {
                    state = State::InQuote;
                } else if c == LIST_START {
                    state = State::InList;
                    token.push(c);
                } else {
                    token.push(c);
                }
            }
            State::InQuote => match c {
                ESCAPE => state = State::InEscape,
                QUOTE => state = State::Outside,
                _ => token.push(c),
            },
            State::InEscape => {
                token.push(c);
                state = State::InQuote;
            }
            State::InList => {
                token.push(c);
                if c == LIST_END {
                    state = State::Outside;
                }
            }
        }
    }

    if matches!(state, State::InQuote | State::InEscape) {
        return Err(DispatchError::malformed(format!(
            "unterminated quote in: {}",
            segment
        )));
    }
    if !token.is_empty() {
        tokens.push(token);
    }

    trace!(?tokens, "tokenized segment");
    Ok(tokens)
}

/// Returns `true` if the token names an argument.
///
/// A flag starts with `-`. The bare `-` is a flag; `-5` and `-.5` are
/// negative numbers, not flags.
pub fn is_flag_token(token: &str) -> bool {
    let mut chars = token.chars();
    if chars.next() != Some(FLAG_PREFIX) {
        return false;
    }
    match chars.next() {
        None => true,
        Some(c) => !(c.is_ascii_digit() || c == '.'),
    }
}
