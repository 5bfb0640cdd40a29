//! Dynamically shaped values shared by the config cache and the debug printer.
//!
//! A [`Value`] mirrors the shape of whatever it was built from: a scalar, a
//! sequence, a key-ordered mapping, or a named object. Config files parse
//! into it, the config cache stores its scalar leaves, and the dumper walks
//! it recursively.

use std::fmt;

use serde::Serialize;

/// A scalar, sequence, mapping, or named object.
///
/// Mappings keep their keys in insertion order. Lookups are linear, which is
/// fine for the small structures this type is meant for.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Vec<(String, Value)>),
    /// A mapping that also carries the name of the type it came from.
    Object {
        name: String,
        fields: Vec<(String, Value)>,
    },
}

impl Value {
    /// Builds a [`Value::Mapping`] from key/value pairs, keeping their order.
    pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a [`Value::Object`] named `name`.
    pub fn object<K, V>(name: impl Into<String>, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Converts any serializable value.
    ///
    /// Struct-like output becomes a [`Value::Object`] named after the last
    /// path segment of `T` (generic arguments stripped), so dumps read
    /// `object Server (2)` rather than `array (2)`.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_value(value)?;
        Ok(match Value::from(json) {
            Value::Mapping(fields) => Value::Object {
                name: short_type_name::<T>().to_string(),
                fields,
            },
            other => other,
        })
    }

    /// The tag the dumper prints in front of a value.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "double",
            Value::String(_) => "string",
            Value::Sequence(_) | Value::Mapping(_) => "array",
            Value::Object { .. } => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Sequence(_) | Value::Mapping(_) | Value::Object { .. }
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Key/value pairs of a container, in order.
    ///
    /// Sequence keys are the element indices. Returns `None` for scalars.
    pub fn entries(&self) -> Option<Vec<(String, &Value)>> {
        match self {
            Value::Sequence(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
            ),
            Value::Mapping(fields) | Value::Object { fields, .. } => {
                Some(fields.iter().map(|(k, v)| (k.clone(), v)).collect())
            }
            _ => None,
        }
    }

    /// Looks up a direct child by key (index for sequences).
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Sequence(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Mapping(fields) | Value::Object { fields, .. } => {
                fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }
}

/// Plain text of a value: nulls are empty, containers join their values with `,`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Sequence(items) => join(f, items.iter()),
            Value::Mapping(fields) | Value::Object { fields, .. } => {
                join(f, fields.iter().map(|(_, v)| v))
            }
        }
    }
}

fn join<'a>(f: &mut fmt::Formatter<'_>, values: impl Iterator<Item = &'a Value>) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Integer(i64::from(i))
            }
        })*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Integer)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::from(i as u64)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
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

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Integer(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => Value::from(table),
        }
    }
}

impl From<toml::Table> for Value {
    fn from(table: toml::Table) -> Self {
        Value::Mapping(table.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Server {
        host: String,
        port: u16,
    }

    #[test]
    fn test_from_serialize_names_structs() {
        let server = Server {
            host: "localhost".into(),
            port: 8080,
        };
        let value = Value::from_serialize(&server).unwrap();

        match &value {
            Value::Object { name, fields } => {
                assert_eq!(name, "Server");
                assert_eq!(fields[0].0, "host");
                assert_eq!(fields[1].0, "port");
            }
            other => panic!("expected object, got {other:?}"),
        }
        assert_eq!(value.get("port"), Some(&Value::Integer(8080)));
    }

    #[test]
    fn test_from_serialize_scalars_stay_scalars() {
        assert_eq!(Value::from_serialize(&3u8).unwrap(), Value::Integer(3));
        assert_eq!(Value::from_serialize("x").unwrap(), Value::from("x"));
    }

    #[test]
    fn test_toml_preserves_key_order() {
        let table: toml::Table = toml::from_str("zeta = 1\nalpha = 2\n").unwrap();
        let value = Value::from(table);
        let keys: Vec<String> = value.entries().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_toml_datetime_becomes_string() {
        let table: toml::Table = toml::from_str("at = 1979-05-27T07:32:00Z\n").unwrap();
        let value = Value::from(table);
        assert_eq!(value.get("at").and_then(Value::as_str), Some("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn test_json_numbers() {
        let value = Value::from(serde_json::json!({"i": 3, "f": 1.5, "n": null}));
        assert_eq!(value.get("i"), Some(&Value::Integer(3)));
        assert_eq!(value.get("f"), Some(&Value::Float(1.5)));
        assert_eq!(value.get("n"), Some(&Value::Null));
    }

    #[test]
    fn test_display_joins_containers() {
        let value = Value::from(vec![1, 2, 3]);
        assert_eq!(value.to_string(), "1,2,3");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(true).to_string(), "true");
    }

    #[test]
    fn test_sequence_entries_use_indices() {
        let value = Value::from(vec!["a", "b"]);
        let entries = value.entries().unwrap();
        assert_eq!(entries[1], ("1".to_string(), &Value::from("b")));
        assert!(Value::Integer(1).entries().is_none());
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(Value::Null.type_tag(), "NULL");
        assert_eq!(Value::Float(1.0).type_tag(), "double");
        assert_eq!(Value::mapping([("a", 1)]).type_tag(), "array");
        assert_eq!(Value::object("X", Vec::<(String, Value)>::new()).type_tag(), "object");
    }
}
