//! Attribute sets stored alongside each key.

use core::fmt;

/// Named attributes attached to a key. Attribute names are unique; merging
/// overwrites existing names and adds new ones.
pub type Attributes<V = Value> = hashbrown::HashMap<String, V>;

/// Dynamically typed attribute value, for tables that store heterogeneous
/// records such as `{age: 30, sex: "F"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
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
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// Builds an [`Attributes`] set of [`Value`]s from `name => value` pairs.
///
/// ```
/// use chained_table::{attributes, Value};
///
/// let attrs = attributes! { "age" => 30, "sex" => "F" };
/// assert_eq!(attrs["age"], Value::Int(30));
/// assert_eq!(attrs["sex"], Value::Str("F".into()));
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::Attributes::<$crate::Value>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut attrs = $crate::Attributes::<$crate::Value>::new();
        $(
            attrs.insert(
                ::std::string::String::from($name),
                $crate::Value::from($value),
            );
        )+
        attrs
    }};
}

#[cfg(test)]
mod tests {
    use super::Value;

    /// Invariant: the macro converts mixed literals and keeps the last value
    /// for a repeated name.
    #[test]
    fn macro_builds_mixed_attributes() {
        let attrs = crate::attributes! {
            "age" => 41,
            "sex" => "F",
            "height" => 1.72,
            "active" => true,
            "age" => 42,
        };
        assert_eq!(attrs.len(), 4);
        assert_eq!(attrs["age"].as_int(), Some(42));
        assert_eq!(attrs["sex"].as_str(), Some("F"));
        assert_eq!(attrs["height"], Value::Float(1.72));
        assert_eq!(attrs["active"], Value::Bool(true));
    }

    #[test]
    fn empty_macro() {
        assert!(crate::attributes! {}.is_empty());
    }

    #[test]
    fn display_is_bare() {
        assert_eq!(Value::from("F").to_string(), "F");
        assert_eq!(Value::from(2023).to_string(), "2023");
        assert_eq!(Value::from(false).to_string(), "false");
    }
}
