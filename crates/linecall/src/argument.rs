//! Supplied arguments and declared argument specs.

use crate::error::RegistrationError;
use crate::value::{ArgKind, Value};
use serde::Serialize;

/// A named argument with one or more values.
///
/// `-items 1 2 3` becomes `Argument { name: "items", values: [1, 2, 3] }`.
/// While parsing, an argument may briefly hold no values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub name: String,
    pub values: Vec<Value>,
}

impl Argument {
    /// Creates an argument with no values yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Creates an argument holding a single value.
    pub fn with_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// Returns the first value, the one checked against the [`ArgSpec`].
    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }
}

/// Declaration of one argument a command accepts.
///
/// # Example
///
/// ```
/// use linecall::{ArgKind, ArgSpec};
///
/// let spec = ArgSpec::optional("count", ArgKind::Int)
///     .with_default(10)
///     .unwrap()
///     .help("How many rows to show");
/// assert!(!spec.required);
/// assert!(spec.default.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgSpec {
    pub name: String,
    pub kind: ArgKind,
    pub required: bool,
    /// Used only when the caller omits the argument.
    pub default: Option<Value>,
    pub help: String,
}

impl ArgSpec {
    /// Declares a required argument.
    pub fn required(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            help: String::new(),
        }
    }

    /// Declares an optional argument.
    pub fn optional(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    /// Sets the help text shown in usage output.
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = text.into();
        self
    }

    /// Sets the default value.
    ///
    /// The default must fit the declared kind; an integer default for a real
    /// argument is widened here.
    pub fn with_default(mut self, value: impl Into<Value>) -> Result<Self, RegistrationError> {
        let value = value.into();
        let coerced =
            value
                .coerce_to(self.kind)
                .ok_or_else(|| RegistrationError::DefaultKindMismatch {
                    name: self.name.clone(),
                    expected: self.kind,
                    actual: value.kind_name(),
                })?;
        self.default = Some(coerced);
        Ok(self)
    }

    /// Returns `true` if a default value is set.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_optional() {
        let a = ArgSpec::required("a", ArgKind::Real).help("first operand");
        assert!(a.required);
        assert_eq!(a.help, "first operand");
        assert!(!a.has_default());

        let b = ArgSpec::optional("b", ArgKind::Text);
        assert!(!b.required);
        assert_eq!(b.kind, ArgKind::Text);
    }

    #[test]
    fn test_default_is_widened_for_real() {
        let spec = ArgSpec::optional("scale", ArgKind::Real).with_default(2).unwrap();
        assert_eq!(spec.default, Some(Value::Real(2.0)));
    }

    #[test]
    fn test_default_kind_mismatch() {
        let err = ArgSpec::optional("n", ArgKind::Int)
            .with_default("ten")
            .unwrap_err();
        assert_eq!(
            err,
            RegistrationError::DefaultKindMismatch {
                name: "n".into(),
                expected: ArgKind::Int,
                actual: "text",
            }
        );
    }

    #[test]
    fn test_required_with_default_is_allowed() {
        let spec = ArgSpec::required("mode", ArgKind::Text)
            .with_default("fast")
            .unwrap();
        assert!(spec.required);
        assert_eq!(spec.default, Some(Value::Text("fast".into())));
    }

    #[test]
    fn test_argument_first() {
        let arg = Argument::with_value("x", 5);
        assert_eq!(arg.first(), Some(&Value::Int(5)));
        assert!(Argument::new("y").first().is_none());
    }
}
