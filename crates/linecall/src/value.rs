//! Runtime argument values.
//!
//! A [`Value`] is what a token turns into after coercion (see
//! [`parse_token`](crate::parse_token)). An [`ArgKind`] is what an
//! [`ArgSpec`](crate::ArgSpec) declares it expects.

use serde::Serialize;
use std::fmt;

/// The kind of value an argument spec accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float. Also accepts integer input, coerced losslessly.
    Real,
    /// `true` or `false`.
    Bool,
    /// Free text.
    Text,
    /// A bracketed list literal.
    List,
}

impl ArgKind {
    /// Returns the lowercase name used in usage text and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgKind::Int => "int",
            ArgKind::Real => "real",
            ArgKind::Bool => "bool",
            ArgKind::Text => "text",
            ArgKind::List => "list",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed argument value.
///
/// Serializes untagged: integers and reals as numbers, lists as arrays,
/// [`Value::None`] as `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    #[default]
    None,
    Int(i64),
    Real(f64),
    Bool(bool),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Returns the kind of this value, or `None` for an absent value.
    pub fn kind(&self) -> Option<ArgKind> {
        match self {
            Value::None => None,
            Value::Int(_) => Some(ArgKind::Int),
            Value::Real(_) => Some(ArgKind::Real),
            Value::Bool(_) => Some(ArgKind::Bool),
            Value::Text(_) => Some(ArgKind::Text),
            Value::List(_) => Some(ArgKind::List),
        }
    }

    /// Returns the kind name, `"none"` for an absent value.
    pub fn kind_name(&self) -> &'static str {
        self.kind().map(|k| k.as_str()).unwrap_or("none")
    }

    /// Returns `true` if this is [`Value::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extracts a real. Integers are widened.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Coerces this value to fit `kind`, if it can.
    ///
    /// The only conversion performed is integer to real; every other
    /// combination must already match.
    pub fn coerce_to(&self, kind: ArgKind) -> Option<Value> {
        match (kind, self) {
            (ArgKind::Real, Value::Int(i)) => Some(Value::Real(*i as f64)),
            _ if self.kind() == Some(kind) => Some(self.clone()),
            _ => None,
        }
    }

    /// Renders the value as input text that parses back to the same value.
    ///
    /// Text is double-quoted with `"` and `\` escaped, lists are bracketed.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Text(s) => quote(s),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::to_literal).collect();
                format!("[{}]", inner.join(", "))
            }
            other => other.to_string(),
        }
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps a '.' or an exponent, so the text never reads back as an int.
            Value::Real(r) => write!(f, "{:?}", r),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Real(3.0).to_string(), "3.0");
        assert_eq!(Value::Real(0.25).to_string(), "0.25");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Text("hi there".into()).to_string(), "hi there");
        assert_eq!(Value::None.to_string(), "");
        let list = Value::List(vec![Value::Int(1), Value::Text("two".into())]);
        assert_eq!(list.to_string(), "[1, two]");
    }

    #[test]
    fn test_to_literal_quotes_text() {
        assert_eq!(Value::Text("a \"b\"".into()).to_literal(), r#""a \"b\"""#);
        assert_eq!(Value::Text(r"c:\tmp".into()).to_literal(), r#""c:\\tmp""#);
        let list = Value::List(vec![Value::Int(1), Value::Text("x".into())]);
        assert_eq!(list.to_literal(), r#"[1, "x"]"#);
        assert_eq!(Value::Real(2.5).to_literal(), "2.5");
    }

    #[test]
    fn test_coerce_to() {
        assert_eq!(Value::Int(3).coerce_to(ArgKind::Real), Some(Value::Real(3.0)));
        assert_eq!(Value::Int(3).coerce_to(ArgKind::Int), Some(Value::Int(3)));
        assert_eq!(Value::Real(3.5).coerce_to(ArgKind::Int), None);
        assert_eq!(Value::Text("3".into()).coerce_to(ArgKind::Int), None);
        assert_eq!(Value::None.coerce_to(ArgKind::Text), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Int(7).as_real(), Some(7.0));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::Text("t".into()).as_text(), Some("t"));
        assert!(Value::Text("t".into()).as_list().is_none());
        assert_eq!(Value::None.kind_name(), "none");
        assert_eq!(Value::List(vec![]).kind(), Some(ArgKind::List));
    }

    #[test]
    fn test_serialize_untagged() {
        let value = Value::List(vec![
            Value::Int(1),
            Value::Real(1.5),
            Value::Bool(true),
            Value::Text("x".into()),
            Value::None,
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,1.5,true,"x",null]"#);
        assert_eq!(serde_json::to_string(&ArgKind::Real).unwrap(), r#""real""#);
    }
}
