use crate::config::ViewConfig;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use structview_shape::{FieldDecl, TypeId, TypeRegistry, TypeShape};

/// Struct member with its parsed view membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Arc<str>,

    /// Position in the owning struct
    pub index: usize,

    /// Declared type of the member
    pub ty: TypeId,

    /// Raw view annotation as declared (empty when absent)
    pub tag: String,

    /// Views the field belongs to
    pub views: BTreeSet<String>,
}

impl Field {
    fn from_decl(index: usize, decl: &FieldDecl, config: &ViewConfig) -> Self {
        let tag = decl.tag.get(&config.tag_key).unwrap_or_default();
        let views = split_views(&tag, config.delimiter);
        Self {
            name: Arc::from(decl.name.as_str()),
            index,
            ty: decl.ty,
            tag,
            views,
        }
    }

    pub fn in_view(&self, view: &str) -> bool {
        self.views.contains(view)
    }
}

/// Split a view list, trimming whitespace and dropping empty names
pub fn split_views(raw: &str, delimiter: char) -> BTreeSet<String> {
    raw.split(delimiter)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Field lists per struct type, built on first use
#[derive(Debug, Default)]
pub(crate) struct FieldCache {
    by_type: RwLock<HashMap<TypeId, Arc<[Field]>>>,
}

impl FieldCache {
    /// Ordered fields of a struct type; `None` for anything that is not a defined struct
    pub(crate) fn fields(
        &self,
        registry: &TypeRegistry,
        ty: TypeId,
        config: &ViewConfig,
    ) -> Option<Arc<[Field]>> {
        if let Some(fields) = self
            .by_type
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ty)
        {
            return Some(Arc::clone(fields));
        }

        let Some(TypeShape::Struct(decls)) = registry.shape(ty) else {
            return None;
        };

        // Built without the lock held: racing builders produce equal lists
        // and the first insert wins.
        let built: Arc<[Field]> = decls
            .iter()
            .enumerate()
            .map(|(index, decl)| Field::from_decl(index, decl, config))
            .collect();
        log::debug!(
            "Built {} field descriptors for {}",
            built.len(),
            registry.type_name(ty)
        );

        let mut by_type = self.by_type.write().unwrap_or_else(PoisonError::into_inner);
        Some(Arc::clone(by_type.entry(ty).or_insert(built)))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.by_type
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
