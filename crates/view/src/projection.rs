use std::collections::BTreeMap;
use std::sync::Arc;
use structview_shape::{MapKey, Value};

/// Result of rendering a value through a view.
///
/// Whatever did not need rewriting is borrowed from the input instead of
/// being copied.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection<'a> {
    /// The input value, untouched
    Same(&'a Value),

    /// Null pointer, absent slice or empty variant
    Absent,

    /// Struct rewritten into its selected fields, in declaration order
    Fields(FieldMap<'a>),

    /// Array or slice with every element projected
    Seq(Vec<Projection<'a>>),

    /// Map with the same keys and projected values
    Map(BTreeMap<&'a MapKey, Projection<'a>>),
}

impl<'a> Projection<'a> {
    pub fn is_same(&self) -> bool {
        matches!(self, Projection::Same(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Projection::Absent)
    }

    /// True when this is the identity projection of exactly `value` (same reference)
    pub fn is_same_as(&self, value: &Value) -> bool {
        matches!(self, Projection::Same(v) if std::ptr::eq(*v, value))
    }

    pub fn same_value(&self) -> Option<&'a Value> {
        match self {
            Projection::Same(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&FieldMap<'a>> {
        match self {
            Projection::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Projection<'a>]> {
        match self {
            Projection::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<&'a MapKey, Projection<'a>>> {
        match self {
            Projection::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Field lookup on a rewritten struct
    pub fn get(&self, name: &str) -> Option<&Projection<'a>> {
        self.as_fields().and_then(|fields| fields.get(name))
    }
}

/// Ordered field name to projection mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap<'a> {
    entries: Vec<(Arc<str>, Projection<'a>)>,
}

impl<'a> FieldMap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append a field; names are unique per struct, so no replacement happens
    pub fn insert(&mut self, name: Arc<str>, value: Projection<'a>) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Projection<'a>> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Projection<'a>)> {
        self.entries.iter().map(|(key, value)| (key.as_ref(), value))
    }
}

impl<'a> IntoIterator for FieldMap<'a> {
    type Item = (Arc<str>, Projection<'a>);
    type IntoIter = std::vec::IntoIter<(Arc<str>, Projection<'a>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn field_map_keeps_insertion_order() {
        let id = Value::Uint(7);
        let name = Value::from("Jon");
        let mut fields = FieldMap::new();
        fields.insert(Arc::from("Name"), Projection::Same(&name));
        fields.insert(Arc::from("Id"), Projection::Same(&id));

        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["Name", "Id"]);
        assert_eq!(fields.get("Id"), Some(&Projection::Same(&id)));
        assert!(!fields.contains("Password"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn identity_is_by_reference() {
        let a = Value::Uint(1);
        let b = Value::Uint(1);
        let projection = Projection::Same(&a);

        assert!(projection.is_same_as(&a));
        assert!(!projection.is_same_as(&b));
        assert_eq!(projection, Projection::Same(&b));
        assert!(!Projection::Absent.is_same_as(&a));
    }
}
