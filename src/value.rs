use crate::Timestamp;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// The fields of an object value. Keys are unique.
pub type ObjectMap = BTreeMap<String, Value>;

/// A document value. Mirrors the `value_type` oneof of the backend's `Value` message: exactly one
/// kind of value is present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    Timestamp(Timestamp),
    Map(ObjectMap),
}

static NULL: Value = Value::Null;

impl Value {
    /// Name of the value's type, for messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Str(_) => "Str",
            Value::Timestamp(_) => "Timestamp",
            Value::Map(_) => "Map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::Str(ref val) = *self {
            Some(val.as_str())
        } else {
            None
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        if let Value::Timestamp(val) = *self {
            Some(val)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&ObjectMap> {
        if let Value::Map(ref map) = *self {
            Some(map)
        } else {
            None
        }
    }

    pub fn as_mut_map(&mut self) -> Option<&mut ObjectMap> {
        match *self {
            Value::Map(ref mut map) => Some(map),
            _ => None,
        }
    }

    /// How many objects deep this value goes. Scalars are 0 deep, an object of scalars 1 deep.
    pub fn depth(&self) -> usize {
        match self {
            Value::Map(map) => 1 + map.values().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Timestamp(v) => write!(f, "{}", v),
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", k, v)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Look up a field of an object. Yields `Null` if the field is missing or this isn't an
    /// object.
    fn index(&self, key: &str) -> &Value {
        self.as_map().and_then(|map| map.get(key)).unwrap_or(&NULL)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_value_from_integer {
    ($t: ty) => {
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        }
    };
}

impl_value_from_integer!(u8);
impl_value_from_integer!(u16);
impl_value_from_integer!(u32);
impl_value_from_integer!(i8);
impl_value_from_integer!(i16);
impl_value_from_integer!(i32);
impl_value_from_integer!(i64);

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.into())
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl From<ObjectMap> for Value {
    fn from(v: ObjectMap) -> Self {
        Value::Map(v)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> Value {
        Value::from_iter([
            ("b", Value::from(true)),
            ("i", Value::from(1)),
            ("n", Value::Null),
            ("s", Value::from("foo")),
            (
                "o",
                Value::from_iter([
                    ("d", Value::from(100)),
                    ("nested", Value::from_iter([("e", Value::from(i64::MAX))])),
                ]),
            ),
        ])
    }

    #[test]
    fn index() {
        let v = sample();
        assert_eq!(v["b"], Value::Bool(true));
        assert_eq!(v["o"]["nested"]["e"].as_i64(), Some(i64::MAX));
        assert!(v["missing"].is_null());
        assert!(v["s"]["not a map"].is_null());
    }

    #[test]
    fn accessors() {
        let v = sample();
        assert!(v.is_map());
        assert_eq!(v["s"].as_str(), Some("foo"));
        assert_eq!(v["s"].as_i64(), None);
        assert_eq!(v["b"].as_bool(), Some(true));
        assert!(v["i"].is_int());
        assert_eq!(v.type_name(), "Map");
        let ts = Timestamp::from_sec(5).unwrap();
        assert_eq!(Value::from(ts).as_timestamp(), Some(ts));
        assert_eq!(Value::from(None::<bool>), Value::Null);
        assert_eq!(Value::from(Some(3u8)), Value::Int(3));
        assert_eq!(Value::default(), Value::Null);
    }

    #[test]
    fn depth() {
        assert_eq!(Value::Null.depth(), 0);
        assert_eq!(Value::Map(ObjectMap::new()).depth(), 1);
        assert_eq!(sample().depth(), 3);
    }

    #[test]
    fn mutate() {
        let mut v = sample();
        v.as_mut_map().unwrap().insert("new".into(), Value::from(2));
        assert_eq!(v["new"], Value::Int(2));
        assert!(Value::Null.as_mut_map().is_none());
    }

    #[test]
    fn display() {
        let v = Value::from_iter([("a", Value::from(1)), ("b", Value::from("x"))]);
        assert_eq!(v.to_string(), r#"{"a": 1, "b": "x"}"#);
    }
}
