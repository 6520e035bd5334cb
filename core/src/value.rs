//! Option value coercion.
//!
//! Raw option tokens are coerced into typed values according to the owning
//! option's [`ValueHint`]. Coercion is deliberately permissive: a token that
//! fails to parse as a number becomes NaN, and a missing value token becomes
//! [`Value::Missing`]. Neither is a parse failure — validation, if any, is
//! the handler's business.

use std::fmt;

use crate::ValueHint;

/// A coerced option value.
///
/// # Examples
///
/// ```
/// use tyche_console_core::{Value, ValueHint};
///
/// assert_eq!(Value::coerce(Some("50"), ValueHint::Number), Value::Number(50.0));
/// assert_eq!(Value::coerce(Some("true"), ValueHint::Boolean), Value::Bool(true));
/// assert_eq!(Value::coerce(None, ValueHint::Number), Value::Missing);
///
/// // Unparseable numbers coerce to NaN instead of failing.
/// assert!(Value::coerce(Some("high"), ValueHint::Number).as_number().is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw token kept as-is.
    Str(String),
    /// Floating-point value; NaN for unparseable tokens.
    Number(f64),
    /// Boolean value; also the result of a presence-only flag.
    Bool(bool),
    /// The option appeared last on the line with no value token after it.
    Missing,
}

impl Value {
    /// Coerces a raw value token according to the hint.
    ///
    /// `raw` is `None` when the option sat at the end of the line; the
    /// matcher still records the option (the malformed trailing option is
    /// tolerated, not rejected) and the value is [`Value::Missing`].
    pub fn coerce(raw: Option<&str>, hint: ValueHint) -> Self {
        let Some(raw) = raw else {
            return Self::Missing;
        };
        match hint {
            ValueHint::Number => Self::Number(raw.parse().unwrap_or(f64::NAN)),
            ValueHint::Boolean => Self::Bool(raw == "true"),
            ValueHint::String => Self::Str(raw.to_string()),
        }
    }

    /// Numeric view of the value.
    ///
    /// Follows loose conversion rules: strings parse as floating point (NaN
    /// on failure), booleans map to 1/0, and a missing value is NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Str(s) => s.parse().unwrap_or(f64::NAN),
            Self::Bool(true) => 1.0,
            Self::Bool(false) => 0.0,
            Self::Missing => f64::NAN,
        }
    }

    /// Boolean view of the value: `true` flags, the literal boolean, or a
    /// non-empty non-NaN scalar.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::Missing => false,
        }
    }

    /// String view when the value is a raw string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value token was absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            // f64 Display prints integral values without a fraction and NaN
            // as "NaN", matching the console's expected output.
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Missing => Ok(()),
        }
    }
}
