use crate::types::TypeId;
use std::collections::BTreeMap;
use std::fmt;

/// In-memory runtime value.
///
/// A value carries no type of its own: it is interpreted through the
/// [`TypeId`] it is paired with (see [`Dynamic`]) or through the declared
/// type of the slot that holds it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),

    /// `None` is a null pointer
    Pointer(Option<Box<Value>>),

    /// `None` is an empty variant
    Variant(Option<Box<Dynamic>>),

    Array(Vec<Value>),

    /// `None` is an absent slice, distinct from an empty one
    Slice(Option<Vec<Value>>),

    Map(BTreeMap<MapKey, Value>),

    /// Field values by declaration index
    Struct(Vec<Value>),

    /// Callable, queue or raw pointer handle; cannot be inspected
    Opaque,
}

impl Value {
    pub fn pointer(target: Value) -> Self {
        Value::Pointer(Some(Box::new(target)))
    }

    pub fn null() -> Self {
        Value::Pointer(None)
    }

    pub fn variant(inner: Dynamic) -> Self {
        Value::Variant(Some(Box::new(inner)))
    }

    pub fn empty_variant() -> Self {
        Value::Variant(None)
    }

    pub fn slice(items: Vec<Value>) -> Self {
        Value::Slice(Some(items))
    }

    pub fn nil_slice() -> Self {
        Value::Slice(None)
    }

    pub fn map<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (MapKey, Value)>,
    {
        Value::Map(entries.into_iter().collect())
    }

    /// Short name of the value's variant, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Pointer(_) => "pointer",
            Value::Variant(_) => "variant",
            Value::Array(_) => "array",
            Value::Slice(_) => "slice",
            Value::Map(_) => "map",
            Value::Struct(_) => "struct",
            Value::Opaque => "opaque",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

/// Scalar usable as a map key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Str(String),
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        MapKey::Str(v.to_string())
    }
}

impl From<i64> for MapKey {
    fn from(v: i64) -> Self {
        MapKey::Int(v)
    }
}

impl From<u64> for MapKey {
    fn from(v: u64) -> Self {
        MapKey::Uint(v)
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(v) => write!(f, "{v}"),
            MapKey::Int(v) => write!(f, "{v}"),
            MapKey::Uint(v) => write!(f, "{v}"),
            MapKey::Str(v) => f.write_str(v),
        }
    }
}

/// A value together with its concrete runtime type
#[derive(Debug, Clone, PartialEq)]
pub struct Dynamic {
    pub ty: TypeId,
    pub value: Value,
}

impl Dynamic {
    pub fn new(ty: TypeId, value: Value) -> Self {
        Self { ty, value }
    }
}
