//! Strategy memoization.
//!
//! Each `(type, cache tag)` key owns a [`Slot`], a one-shot cell the key's
//! decision is published into. The slot is inserted *before* its strategy is
//! built, so a recursive reference to the key met during the build finds the
//! empty slot and links to it instead of recursing. Invoking a strategy through
//! an empty slot blocks until the builder publishes.
//!
//! A placeholder only stands in for its key inside the build that inserted
//! it. A builder that finds another thread's placeholder rebuilds that key in
//! a detached slot, never linking to work it does not own.
//!
//! The map itself is only locked for lookups and the placeholder insert; the
//! build runs with no lock held.

use crate::strategy::Strategy;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use structview_shape::TypeId;

/// Published outcome for one key; `None` means values pass through unchanged
pub(crate) type Decision = Option<Arc<Strategy>>;

#[derive(Default)]
pub(crate) struct Slot {
    cell: OnceCell<Decision>,
}

impl Slot {
    pub(crate) fn get(&self) -> Option<&Decision> {
        self.cell.get()
    }

    /// Block until the decision is published
    pub(crate) fn wait(&self) -> &Decision {
        if let Some(decision) = self.cell.get() {
            return decision;
        }
        log::trace!("waiting on strategy placeholder");
        self.cell.wait()
    }

    /// Publish the decision; the slot is write-once
    pub(crate) fn publish(&self, decision: Decision) {
        if self.cell.set(decision).is_err() {
            log::warn!("strategy placeholder published twice; keeping the first decision");
        }
    }
}

/// Outcome of consulting the cache
pub(crate) enum Lookup {
    /// Decision already published
    Ready(Decision),

    /// A build of this key is in progress, either further up the caller's
    /// own build (recursive type) or on another thread
    Pending(Weak<Slot>),

    /// Placeholder inserted for the caller, who must build and publish
    Vacant(Arc<Slot>),
}

/// Strategies per `(type, cache tag)`; entries are never evicted
#[derive(Default)]
pub(crate) struct StrategyCache {
    slots: RwLock<HashMap<String, HashMap<TypeId, Arc<Slot>>>>,

    /// Unkeyed slots of private rebuilds. Strategies may hold weak links into
    /// them, so they live as long as the cache.
    detached: Mutex<Vec<Arc<Slot>>>,
}

impl StrategyCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lookup(&self, ty: TypeId, tag: &str) -> Lookup {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tag)
            .and_then(|by_type| by_type.get(&ty))
        {
            return observe(slot);
        }

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let by_type = slots.entry(tag.to_string()).or_default();
        if let Some(slot) = by_type.get(&ty) {
            // Lost the race to another thread's placeholder
            return observe(slot);
        }
        let slot = Arc::new(Slot::default());
        by_type.insert(ty, Arc::clone(&slot));
        log::trace!("published placeholder for type {ty} (tag {tag:?})");
        Lookup::Vacant(slot)
    }

    /// Slot for a key rebuilt outside the shared map
    pub(crate) fn detach(&self) -> Arc<Slot> {
        let slot = Arc::new(Slot::default());
        self.detached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&slot));
        slot
    }

    /// Number of keys with a published decision
    pub(crate) fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .flat_map(HashMap::values)
            .filter(|slot| slot.get().is_some())
            .count()
    }
}

impl std::fmt::Debug for StrategyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyCache")
            .field("published", &self.len())
            .finish()
    }
}

fn observe(slot: &Arc<Slot>) -> Lookup {
    match slot.get() {
        Some(decision) => Lookup::Ready(decision.clone()),
        None => Lookup::Pending(Arc::downgrade(slot)),
    }
}
