use std::fmt;

/// A runtime value.
#[derive(Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    /// Absence of a value (printed as `nil`).
    Nil,
}

impl Value {
    pub fn cast_to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(val) => Some(*val),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Name of the value's type, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
            Self::Nil => "nil",
        }
    }
}

/// The canonical textual form, shared by output and string concatenation.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(val) => write!(f, "{}", val),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Str(val) => f.write_str(val),
            Value::Nil => f.write_str("nil"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(val) => write!(f, "{:?}", val),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Int(val)
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Str(val.to_string())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Str(val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-42).to_string(), "-42");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::from("as is").to_string(), "as is");
    }

    #[test]
    fn test_debug_quotes_strings() {
        assert_eq!(format!("{:?}", Value::from("hi")), "\"hi\"");
        assert_eq!(format!("{:?}", Value::Int(1)), "1");
    }

    #[test]
    fn test_cast_to_bool() {
        assert_eq!(Value::Bool(false).cast_to_bool(), Some(false));
        assert_eq!(Value::Int(1).cast_to_bool(), None);
        assert_eq!(Value::from("true").cast_to_bool(), None);
        assert_eq!(Value::Nil.cast_to_bool(), None);
    }

    #[test]
    fn test_mixed_equality() {
        assert_ne!(Value::from("1"), Value::Int(1));
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_ne!(Value::Int(0), Value::Nil);
        assert_eq!(Value::from(String::from("a")), Value::from("a"));
    }
}
