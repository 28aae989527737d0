use std::collections::HashMap;

/// A document: string keys mapped to values. Key order is irrelevant.
pub type Document = HashMap<String, Value>;

/// A dynamically typed value, both as stored in a document and as produced by
/// evaluating an expression.
///
/// Integers and floats are kept apart so that numbers delivered with any native
/// width can be stored as they arrive; the evaluator normalises both to `f64`
/// whenever it compares or computes.
///
/// # Examples
///
/// ```
/// use mapq::{Document, Value};
///
/// let null = Value::Null;
/// let flag = Value::from(true);
/// let small = Value::from(2_i32);
/// let ratio = Value::from(0.5_f32);
/// let name = Value::from("alice");
///
/// let mut doc = Document::new();
/// doc.insert("name".to_string(), name);
/// let object = Value::Object(doc);
/// assert_eq!(object.type_name(), "object");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// null
    Null,

    /// true/false
    Boolean(bool),

    /// Integer number of any native width
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Nested document
    Object(Document),
}

impl Value {
    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Object(_) => "object",
        }
    }

    /// Get as boolean, only for boolean values
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as float, only for numeric values
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as nested document
    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Numeric coercion used by arithmetic and ordering.
    ///
    /// Non-numeric values, booleans included, coerce to `0.0`.
    pub fn to_number(&self) -> f64 {
        self.as_float().unwrap_or(0.0)
    }

    /// Equality used by `==` and `!=`.
    ///
    /// Numbers compare by value as `f64` (IEEE rules, so `NaN` never equals
    /// itself). Everything else compares structurally as stored.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self.as_float(), other.as_float()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Float(n as f64),
        }
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Document> for Value {
    fn from(map: Document) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_widths_normalize_equal() {
        assert!(Value::from(2_i32).loose_eq(&Value::Float(2.0)));
        assert!(Value::from(2_u64).loose_eq(&Value::from(2.0_f32)));
        assert!(!Value::from(2_i8).loose_eq(&Value::Float(2.5)));
    }

    #[test]
    fn test_non_numeric_coerces_to_zero() {
        assert_eq!(Value::Boolean(true).to_number(), 0.0);
        assert_eq!(Value::from("12").to_number(), 0.0);
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::Object(Document::new()).to_number(), 0.0);
    }

    #[test]
    fn test_nan_is_not_loosely_equal_to_itself() {
        let nan = Value::Float(f64::NAN);
        assert!(!nan.loose_eq(&nan));
        let inf = Value::Float(f64::INFINITY);
        assert!(inf.loose_eq(&inf));
    }

    #[test]
    fn test_large_u64_becomes_float() {
        assert_eq!(Value::from(u64::MAX), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn test_different_kinds_are_unequal() {
        assert!(!Value::Null.loose_eq(&Value::Integer(0)));
        assert!(!Value::from("1").loose_eq(&Value::Integer(1)));
        assert!(!Value::Boolean(false).loose_eq(&Value::Null));
    }
}
