use crate::cache::Slot;
use crate::dispatch::Dispatcher;
use crate::field::Field;
use crate::projection::{FieldMap, Projection};
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use structview_shape::{TypeId, Value};

/// Failure signal raised when a value of an unrepresentable type is visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Unsupported(pub TypeId);

pub(crate) type Outcome<'v> = std::result::Result<Projection<'v>, Unsupported>;

/// Reference from a composite strategy to the strategy of a nested type
#[derive(Clone)]
pub(crate) enum Link {
    Ready(Arc<Strategy>),

    /// Placeholder of a key still being built. Held weakly: the cache owns
    /// the slot, and recursive types would otherwise form reference cycles.
    Pending(Weak<Slot>),
}

impl Link {
    pub(crate) fn apply<'v>(&self, value: &'v Value, dispatcher: &Dispatcher<'_>) -> Outcome<'v> {
        match self {
            Link::Ready(strategy) => strategy.apply(value, dispatcher),
            Link::Pending(slot) => {
                let Some(slot) = slot.upgrade() else {
                    unreachable!("strategy placeholder outlived its cache");
                };
                match slot.wait() {
                    Some(strategy) => strategy.apply(value, dispatcher),
                    None => Ok(Projection::Same(value)),
                }
            }
        }
    }
}

/// Field kept by a struct strategy, with its nested strategy if it needs one
#[derive(Clone)]
pub(crate) struct Selected {
    pub field: Field,
    pub link: Option<Link>,
}

pub(crate) enum Plan {
    Unsupported,
    Pointer(Link),
    Variant,
    Array(Link),
    Slice(Link),
    Map(Link),
    Struct { arity: usize, fields: Vec<Selected> },
}

impl Plan {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Plan::Unsupported => "unsupported",
            Plan::Pointer(_) => "pointer",
            Plan::Variant => "variant",
            Plan::Array(_) => "array",
            Plan::Slice(_) => "slice",
            Plan::Map(_) => "map",
            Plan::Struct { .. } => "struct",
        }
    }
}

/// Transformation for values of one type under one cache tag.
///
/// Immutable once built; shared by every caller through the cache.
pub(crate) struct Strategy {
    ty: TypeId,
    plan: Plan,
}

impl Strategy {
    pub(crate) fn new(ty: TypeId, plan: Plan) -> Self {
        Self { ty, plan }
    }

    #[cfg(test)]
    pub(crate) fn plan(&self) -> &Plan {
        &self.plan
    }

    pub(crate) fn apply<'v>(&self, value: &'v Value, dispatcher: &Dispatcher<'_>) -> Outcome<'v> {
        match (&self.plan, value) {
            (Plan::Unsupported, _) => Err(Unsupported(self.ty)),

            (Plan::Pointer(_), Value::Pointer(None))
            | (Plan::Variant, Value::Variant(None))
            | (Plan::Slice(_), Value::Slice(None)) => Ok(Projection::Absent),

            (Plan::Pointer(elem), Value::Pointer(Some(target))) => elem.apply(target, dispatcher),

            // Declared variant types carry no shape; dispatch on the held type
            (Plan::Variant, Value::Variant(Some(inner))) => {
                dispatcher.project(inner.ty, &inner.value)
            }

            (Plan::Array(elem), Value::Array(items))
            | (Plan::Slice(elem), Value::Slice(Some(items))) => items
                .iter()
                .map(|item| elem.apply(item, dispatcher))
                .collect::<Result<Vec<_>, _>>()
                .map(Projection::Seq),

            (Plan::Map(elem), Value::Map(entries)) => entries
                .iter()
                .map(|(key, item)| Ok((key, elem.apply(item, dispatcher)?)))
                .collect::<Result<BTreeMap<_, _>, Unsupported>>()
                .map(Projection::Map),

            (Plan::Struct { arity, fields }, Value::Struct(values)) if values.len() == *arity => {
                let mut out = FieldMap::with_capacity(fields.len());
                for selected in fields {
                    let field_value = &values[selected.field.index];
                    let projected = match &selected.link {
                        Some(link) => link.apply(field_value, dispatcher)?,
                        None => Projection::Same(field_value),
                    };
                    out.insert(Arc::clone(&selected.field.name), projected);
                }
                Ok(Projection::Fields(out))
            }

            (plan, value) => panic!(
                "{} value does not fit type {} ({} strategy)",
                value.kind_name(),
                dispatcher.type_name(self.ty),
                plan.kind_name()
            ),
        }
    }
}
