use crate::cache::StrategyCache;
use crate::config::{CacheMode, ViewConfig};
use crate::dispatch::Dispatcher;
use crate::error::{Result, ViewError};
use crate::field::{Field, FieldCache};
use crate::projection::Projection;
use crate::selector::{FieldSelector, ViewSelector};
use crate::strategy::Unsupported;
use std::sync::Arc;
use structview_shape::{Dynamic, TypeId, TypeRegistry, Value};

/// Renders values through views.
///
/// Owns the field and strategy caches for one type registry. Construct one
/// per process (or per test) and share it; it is `Send + Sync`.
#[derive(Debug)]
pub struct ViewEngine {
    registry: Arc<TypeRegistry>,
    config: ViewConfig,
    fields: FieldCache,
    strategies: StrategyCache,
}

impl ViewEngine {
    /// Create an engine with the default configuration
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            config: ViewConfig::default(),
            fields: FieldCache::default(),
            strategies: StrategyCache::new(),
        }
    }

    /// Create an engine with explicit configuration
    pub fn with_config(registry: Arc<TypeRegistry>, config: ViewConfig) -> Result<Self> {
        config.validate().map_err(ViewError::invalid_config)?;
        Ok(Self {
            config,
            ..Self::new(registry)
        })
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Render `value` keeping only the fields tagged for `view`.
    ///
    /// Structs that need no filtering and hold nothing that does come back as
    /// [`Projection::Same`], borrowing the input.
    pub fn render<'v>(&self, value: &'v Dynamic, view: &str) -> Result<Projection<'v>> {
        self.render_with(value, &ViewSelector::new(view))
    }

    /// Render with a custom field selector
    pub fn render_with<'v>(
        &self,
        value: &'v Dynamic,
        selector: &dyn FieldSelector,
    ) -> Result<Projection<'v>> {
        self.render_typed_with(value.ty, &value.value, selector)
    }

    /// Render a value whose type is known statically
    pub fn render_typed<'v>(
        &self,
        ty: TypeId,
        value: &'v Value,
        view: &str,
    ) -> Result<Projection<'v>> {
        self.render_typed_with(ty, value, &ViewSelector::new(view))
    }

    pub fn render_typed_with<'v>(
        &self,
        ty: TypeId,
        value: &'v Value,
        selector: &dyn FieldSelector,
    ) -> Result<Projection<'v>> {
        let outcome = match self.config.cache {
            CacheMode::Shared => self.dispatcher(&self.strategies, selector).project(ty, value),
            CacheMode::PerCall => {
                let scratch = StrategyCache::new();
                self.dispatcher(&scratch, selector).project(ty, value)
            }
        };

        outcome.map_err(|Unsupported(ty)| ViewError::UnsupportedType {
            ty,
            type_name: self.registry.type_name(ty),
        })
    }

    /// Field metadata of a struct type, in declaration order
    pub fn fields(&self, ty: TypeId) -> Option<Arc<[Field]>> {
        self.fields.fields(&self.registry, ty, &self.config)
    }

    /// Number of published strategy decisions in the shared cache
    pub fn cached_strategies(&self) -> usize {
        self.strategies.len()
    }

    fn dispatcher<'e>(
        &'e self,
        strategies: &'e StrategyCache,
        selector: &'e dyn FieldSelector,
    ) -> Dispatcher<'e> {
        Dispatcher::new(&self.registry, &self.config, &self.fields, strategies, selector)
    }
}
