//! Coercion of tokens into [`Value`]s.
//!
//! A bare token is tried as an integer, then a real, then a boolean, and
//! falls back to text. Every numeric attempt must consume the whole token, so
//! `12abc` stays text.
//!
//! A token starting with `[` is a list literal:
//!
//! ```text
//! [1, 2.5, "three, four", true]
//!  │  │    │              └─ Bool(true)
//!  │  │    └─ Text("three, four")   (quotes stripped, comma kept)
//!  │  └─ Real(2.5)
//!  └─ Int(1)
//! ```
//!
//! Items are coerced with the bare-token rule after quote stripping, so
//! `["3"]` yields `Int(3)`. Nested lists are rejected.

use crate::error::DispatchError;
use crate::value::Value;

const QUOTE: char = '"';
const ESCAPE: char = '\\';
const LIST_START: char = '[';
const LIST_END: char = ']';
const ITEM_SEPARATOR: char = ',';

/// Parses a value token, expanding list literals.
pub fn parse_token(token: &str) -> Result<Value, DispatchError> {
    if token.starts_with(LIST_START) {
        parse_list(token)
    } else {
        Ok(coerce(token))
    }
}

/// Coerces a bare token: integer, then finite real, then `true`/`false`,
/// otherwise text.
pub fn coerce(token: &str) -> Value {
    if let Ok(i) = token.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(r) = token.parse::<f64>() {
        // "inf" and "nan" are words here, not numbers.
        if r.is_finite() {
            return Value::Real(r);
        }
    }
    match token {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Text(token.to_string()),
    }
}

/// Parses a `[a, b, ...]` literal into a [`Value::List`].
pub fn parse_list(token: &str) -> Result<Value, DispatchError> {
    let inner = token
        .strip_prefix(LIST_START)
        .and_then(|rest| rest.strip_suffix(LIST_END))
        .ok_or_else(|| DispatchError::malformed(format!("unterminated list literal: {}", token)))?;

    let mut values = Vec::new();
    for item in split_list_items(inner).map_err(|reason| {
        DispatchError::malformed(format!("{} in list literal: {}", reason, token))
    })? {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        match strip_quotes(trimmed) {
            Some(unquoted) => values.push(coerce(&unquoted)),
            None => values.push(coerce(trimmed)),
        }
    }
    Ok(Value::List(values))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemState {
    Outside,
    InQuote,
    InEscape,
}

/// Splits a list body on top-level commas. Quotes and escapes are kept in the
/// items; [`strip_quotes`] resolves them later.
fn split_list_items(body: &str) -> Result<Vec<String>, &'static str> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut state = ItemState::Outside;

    for c in body.chars() {
        match state {
            ItemState::Outside => match c {
                QUOTE => {
                    state = ItemState::InQuote;
                    current.push(c);
                }
                ITEM_SEPARATOR => items.push(std::mem::take(&mut current)),
                LIST_START | LIST_END => return Err("nested brackets"),
                _ => current.push(c),
            },
            ItemState::InQuote => {
                match c {
                    ESCAPE => state = ItemState::InEscape,
                    QUOTE => state = ItemState::Outside,
                    _ => {}
                }
                current.push(c);
            }
            ItemState::InEscape => {
                current.push(c);
                state = ItemState::InQuote;
            }
        }
    }

    if state != ItemState::Outside {
        return Err("unterminated quote");
    }
    items.push(current);
    Ok(items)
}

/// Removes a wrapping pair of double quotes and resolves backslash escapes.
///
/// Returns `None` when the item is not wrapped in quotes.
fn strip_quotes(item: &str) -> Option<String> {
    if item.len() < 2 || !item.starts_with(QUOTE) || !item.ends_with(QUOTE) {
        return None;
    }
    let inner = &item[1..item.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod bare_tokens {
        use super::*;

        #[test]
        fn integers() {
            assert_eq!(coerce("42"), Value::Int(42));
            assert_eq!(coerce("-7"), Value::Int(-7));
            assert_eq!(coerce("+3"), Value::Int(3));
        }

        #[test]
        fn reals() {
            assert_eq!(coerce("4.5"), Value::Real(4.5));
            assert_eq!(coerce("-.5"), Value::Real(-0.5));
            assert_eq!(coerce("1e3"), Value::Real(1000.0));
        }

        #[test]
        fn integer_overflow_becomes_real() {
            assert_eq!(coerce("99999999999999999999"), Value::Real(1e20));
        }

        #[test]
        fn booleans_are_case_sensitive() {
            assert_eq!(coerce("true"), Value::Bool(true));
            assert_eq!(coerce("false"), Value::Bool(false));
            assert_eq!(coerce("True"), Value::Text("True".into()));
        }

        #[test]
        fn partial_numbers_are_text() {
            assert_eq!(coerce("12abc"), Value::Text("12abc".into()));
            assert_eq!(coerce("3.4.5"), Value::Text("3.4.5".into()));
            assert_eq!(coerce(""), Value::Text(String::new()));
        }

        #[test]
        fn non_finite_words_are_text() {
            assert_eq!(coerce("inf"), Value::Text("inf".into()));
            assert_eq!(coerce("NaN"), Value::Text("NaN".into()));
        }
    }

    mod lists {
        use super::*;

        #[test]
        fn mixed_items() {
            let value = parse_token(r#"[1, 2, "three"]"#).unwrap();
            assert_eq!(
                value,
                Value::List(vec![Value::Int(1), Value::Int(2), Value::Text("three".into())])
            );
        }

        #[test]
        fn quoted_comma_is_not_a_separator() {
            let value = parse_token(r#"["a, b", c]"#).unwrap();
            assert_eq!(
                value,
                Value::List(vec![Value::Text("a, b".into()), Value::Text("c".into())])
            );
        }

        #[test]
        fn escaped_quote_inside_item() {
            let value = parse_token(r#"["say \"hi\""]"#).unwrap();
            assert_eq!(value, Value::List(vec![Value::Text(r#"say "hi""#.into())]));
        }

        #[test]
        fn quoted_number_is_still_coerced() {
            let value = parse_token(r#"["3", "x"]"#).unwrap();
            assert_eq!(value, Value::List(vec![Value::Int(3), Value::Text("x".into())]));
        }

        #[test]
        fn empty_items_are_skipped() {
            assert_eq!(parse_token("[]").unwrap(), Value::List(vec![]));
            assert_eq!(
                parse_token("[1,, 2, ]").unwrap(),
                Value::List(vec![Value::Int(1), Value::Int(2)])
            );
        }

        #[test]
        fn empty_quoted_item_is_kept() {
            assert_eq!(
                parse_token(r#"[""]"#).unwrap(),
                Value::List(vec![Value::Text(String::new())])
            );
        }

        #[test]
        fn unterminated_list_is_malformed() {
            let err = parse_token("[1, 2").unwrap_err();
            assert!(matches!(err, DispatchError::MalformedLiteral(_)));
        }

        #[test]
        fn unterminated_quote_is_malformed() {
            let err = parse_token(r#"["abc, 2]"#).unwrap_err();
            assert!(err.to_string().contains("unterminated quote"));
        }

        #[test]
        fn nested_list_is_malformed() {
            let err = parse_token("[[1, 2], 3]").unwrap_err();
            assert!(err.to_string().contains("nested brackets"));
        }

        #[test]
        fn brackets_inside_quotes_are_allowed() {
            let value = parse_token(r#"["[x"]"#).unwrap();
            assert_eq!(value, Value::List(vec![Value::Text("[x".into())]));
        }
    }
}
