use crate::cache::{Lookup, Slot, StrategyCache};
use crate::config::ViewConfig;
use crate::field::FieldCache;
use crate::projection::Projection;
use crate::selector::FieldSelector;
use crate::strategy::{Link, Outcome, Plan, Selected, Strategy};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use structview_shape::{TypeId, TypeRegistry, TypeShape, Value};

/// Picks and builds strategies by type shape for one render pass
pub(crate) struct Dispatcher<'e> {
    registry: &'e TypeRegistry,
    config: &'e ViewConfig,
    fields: &'e FieldCache,
    strategies: &'e StrategyCache,
    selector: &'e dyn FieldSelector,

    /// Shared keys whose placeholder this pass inserted and is still building
    building: RefCell<Vec<TypeId>>,

    /// Keys rebuilt here because another thread holds their shared placeholder
    private: RefCell<HashMap<TypeId, Arc<Slot>>>,
}

impl<'e> Dispatcher<'e> {
    pub(crate) fn new(
        registry: &'e TypeRegistry,
        config: &'e ViewConfig,
        fields: &'e FieldCache,
        strategies: &'e StrategyCache,
        selector: &'e dyn FieldSelector,
    ) -> Self {
        Self {
            registry,
            config,
            fields,
            strategies,
            selector,
            building: RefCell::default(),
            private: RefCell::default(),
        }
    }

    pub(crate) fn type_name(&self, ty: TypeId) -> String {
        self.registry.type_name(ty)
    }

    /// Project a value whose type is `ty`
    pub(crate) fn project<'v>(&self, ty: TypeId, value: &'v Value) -> Outcome<'v> {
        match self.strategy_for(ty) {
            Some(link) => link.apply(value, self),
            None => Ok(Projection::Same(value)),
        }
    }

    /// Strategy for values of `ty`, or `None` when they pass through unchanged
    pub(crate) fn strategy_for(&self, ty: TypeId) -> Option<Link> {
        if matches!(self.registry.shape(ty), Some(TypeShape::Scalar(_))) {
            return None;
        }
        if let Some(link) = self.private_link(ty) {
            return link;
        }

        match self.strategies.lookup(ty, self.selector.cache_tag()) {
            Lookup::Ready(decision) => decision.map(Link::Ready),

            // Recursive reference back into this pass's own build
            Lookup::Pending(slot) if self.building.borrow().contains(&ty) => {
                Some(Link::Pending(slot))
            }

            // Another thread's placeholder says nothing about this type's
            // decision; rebuild it here instead of waiting or linking to it
            Lookup::Pending(_) => {
                log::trace!(
                    "{} is being built on another thread; rebuilding privately",
                    self.registry.type_name(ty)
                );
                let slot = self.strategies.detach();
                self.private.borrow_mut().insert(ty, Arc::clone(&slot));
                self.build_into(ty, &slot)
            }

            Lookup::Vacant(slot) => {
                self.building.borrow_mut().push(ty);
                let link = self.build_into(ty, &slot);
                self.building.borrow_mut().pop();
                link
            }
        }
    }

    /// Outer `None` when `ty` was not rebuilt privately in this pass
    fn private_link(&self, ty: TypeId) -> Option<Option<Link>> {
        let private = self.private.borrow();
        let slot = private.get(&ty)?;
        Some(match slot.get() {
            Some(decision) => decision.clone().map(Link::Ready),
            None => Some(Link::Pending(Arc::downgrade(slot))),
        })
    }

    fn build_into(&self, ty: TypeId, slot: &Slot) -> Option<Link> {
        let decision = self.build(ty).map(|plan| Arc::new(Strategy::new(ty, plan)));
        slot.publish(decision.clone());
        decision.map(Link::Ready)
    }

    fn build(&self, ty: TypeId) -> Option<Plan> {
        let plan = match self.registry.shape(ty) {
            // Undefined structs and unknown ids fall in with the opaque kinds
            None | Some(TypeShape::Opaque(_)) => Some(Plan::Unsupported),
            Some(TypeShape::Scalar(_)) => None,
            Some(TypeShape::Pointer(elem)) => self.strategy_for(*elem).map(Plan::Pointer),
            Some(TypeShape::Variant) => Some(Plan::Variant),
            Some(TypeShape::Array { elem, .. }) => self.strategy_for(*elem).map(Plan::Array),
            Some(TypeShape::Slice(elem)) => self.strategy_for(*elem).map(Plan::Slice),
            Some(TypeShape::Map { elem, .. }) => self.strategy_for(*elem).map(Plan::Map),
            Some(TypeShape::Struct(_)) => self.build_struct(ty),
        };

        match &plan {
            Some(plan) => log::debug!(
                "Built {} strategy for {} (tag {:?})",
                plan.kind_name(),
                self.registry.type_name(ty),
                self.selector.cache_tag()
            ),
            None => log::debug!(
                "{} passes through unchanged (tag {:?})",
                self.registry.type_name(ty),
                self.selector.cache_tag()
            ),
        }
        plan
    }

    /// A struct is left alone when the selection keeps every field (or none
    /// matched) and no field needs a nested rewrite.
    fn build_struct(&self, ty: TypeId) -> Option<Plan> {
        let Some(fields) = self.fields.fields(self.registry, ty, self.config) else {
            return Some(Plan::Unsupported);
        };

        let mut nested = false;
        let mut all = Vec::with_capacity(fields.len());
        let mut matched = Vec::new();
        for field in fields.iter() {
            let link = self.strategy_for(field.ty);
            nested |= link.is_some();
            let selected = Selected {
                field: field.clone(),
                link,
            };
            if self.selector.selects(field) {
                matched.push(selected.clone());
            }
            all.push(selected);
        }

        let filtering = !matched.is_empty() && matched.len() != fields.len();
        if !filtering && !nested {
            return None;
        }

        Some(Plan::Struct {
            arity: fields.len(),
            fields: if matched.is_empty() { all } else { matched },
        })
    }
}
