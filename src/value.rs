use serde::{Deserialize, Serialize};
use toml::Value;

/// Type tag for the kinds of values a configuration key may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    String,
    StringList,
    Int,
    IntList,
    Bool,
    Double,
}

/// A validated configuration value, tagged with its kind.
///
/// Every value cached by a store matches its key's declared [`ValueKind`],
/// unless an untyped [`set`](crate::ConfigStore::set) deliberately stored
/// something else. Conversion back to the concrete type goes through the
/// `as_*` accessors or the typed getters on the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    StringList(Vec<String>),
    Int(i64),
    IntList(Vec<i64>),
    Bool(bool),
    Double(f64),
}

impl ConfigValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::String(_) => ValueKind::String,
            ConfigValue::StringList(_) => ValueKind::StringList,
            ConfigValue::Int(_) => ValueKind::Int,
            ConfigValue::IntList(_) => ValueKind::IntList,
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::Double(_) => ValueKind::Double,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::StringList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            ConfigValue::IntList(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            ConfigValue::Double(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<&ConfigValue> for Value {
    fn from(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::String(s) => Value::String(s.clone()),
            ConfigValue::StringList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            ConfigValue::Int(n) => Value::Integer(*n),
            ConfigValue::IntList(items) => {
                Value::Array(items.iter().copied().map(Value::Integer).collect())
            }
            ConfigValue::Bool(b) => Value::Boolean(*b),
            ConfigValue::Double(f) => Value::Float(*f),
        }
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(items: Vec<String>) -> Self {
        ConfigValue::StringList(items)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<Vec<i64>> for ConfigValue {
    fn from(items: Vec<i64>) -> Self {
        ConfigValue::IntList(items)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Double(value)
    }
}
