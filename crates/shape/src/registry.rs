use crate::error::{Result, ShapeError};
use crate::types::{FieldDecl, OpaqueKind, ScalarKind, TypeId, TypeShape};
use std::collections::{HashMap, HashSet};

/// Unnamed types share one identity per structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Interned {
    Scalar(ScalarKind),
    Pointer(TypeId),
    Array(TypeId, usize),
    Slice(TypeId),
    Map(TypeId, TypeId),
    Opaque(OpaqueKind),
    AnyVariant,
}

#[derive(Debug, Clone)]
struct TypeDesc {
    name: Option<String>,
    /// `None` for a struct that was declared but not yet defined
    shape: Option<TypeShape>,
}

/// Registry of runtime type descriptions.
///
/// Build it up front, then share it (usually behind `Arc`) with every engine
/// that renders values of these types.
///
/// Holds at most `u32::MAX + 1` types; registering more panics instead of
/// reusing an identity.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDesc>,
    interned: HashMap<Interned, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.types.len()
    }

    /// Shape of a type, or `None` if the id is unknown or the struct is still undefined
    pub fn shape(&self, id: TypeId) -> Option<&TypeShape> {
        self.types.get(id.index()).and_then(|desc| desc.shape.as_ref())
    }

    /// Builtin scalar type
    pub fn scalar(&mut self, kind: ScalarKind) -> TypeId {
        self.intern(Interned::Scalar(kind), TypeShape::Scalar(kind))
    }

    /// Distinct named type over a scalar kind
    pub fn named_scalar(&mut self, name: impl Into<String>, kind: ScalarKind) -> TypeId {
        self.push(Some(name.into()), Some(TypeShape::Scalar(kind)))
    }

    pub fn pointer_to(&mut self, elem: TypeId) -> Result<TypeId> {
        self.require(elem)?;
        Ok(self.intern(Interned::Pointer(elem), TypeShape::Pointer(elem)))
    }

    pub fn slice_of(&mut self, elem: TypeId) -> Result<TypeId> {
        self.require(elem)?;
        Ok(self.intern(Interned::Slice(elem), TypeShape::Slice(elem)))
    }

    pub fn array_of(&mut self, elem: TypeId, len: usize) -> Result<TypeId> {
        self.require(elem)?;
        Ok(self.intern(Interned::Array(elem, len), TypeShape::Array { elem, len }))
    }

    pub fn map_of(&mut self, key: TypeId, elem: TypeId) -> Result<TypeId> {
        self.require(key)?;
        self.require(elem)?;
        if !matches!(self.shape(key), Some(TypeShape::Scalar(kind)) if *kind != ScalarKind::Float) {
            return Err(ShapeError::InvalidMapKey(self.type_name(key)));
        }
        Ok(self.intern(Interned::Map(key, elem), TypeShape::Map { key, elem }))
    }

    /// The empty variant that can hold a value of any type
    pub fn any(&mut self) -> TypeId {
        self.intern(Interned::AnyVariant, TypeShape::Variant)
    }

    /// Named variant type
    pub fn variant(&mut self, name: impl Into<String>) -> TypeId {
        self.push(Some(name.into()), Some(TypeShape::Variant))
    }

    /// Unnamed callable, queue or raw pointer type
    pub fn opaque(&mut self, kind: OpaqueKind) -> TypeId {
        self.intern(Interned::Opaque(kind), TypeShape::Opaque(kind))
    }

    pub fn named_opaque(&mut self, name: impl Into<String>, kind: OpaqueKind) -> TypeId {
        self.push(Some(name.into()), Some(TypeShape::Opaque(kind)))
    }

    /// Reserve an identity for a struct whose fields are supplied later.
    ///
    /// Needed for self-referential and mutually recursive structs.
    pub fn declare_struct(&mut self, name: impl Into<String>) -> TypeId {
        self.push(Some(name.into()), None)
    }

    pub fn define_struct(&mut self, id: TypeId, fields: Vec<FieldDecl>) -> Result<()> {
        self.require(id)?;
        let type_name = self.type_name(id);
        if self.types[id.index()].shape.is_some() {
            return Err(ShapeError::AlreadyDefined(type_name));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            self.require(field.ty)?;
            if !seen.insert(field.name.as_str()) {
                return Err(ShapeError::DuplicateField {
                    type_name,
                    field: field.name.clone(),
                });
            }
        }

        log::trace!("defined struct {type_name} with {} fields", fields.len());
        self.types[id.index()].shape = Some(TypeShape::Struct(fields));
        Ok(())
    }

    /// Declare and define a struct in one step
    pub fn struct_type(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FieldDecl>,
    ) -> Result<TypeId> {
        let id = self.declare_struct(name);
        self.define_struct(id, fields)?;
        Ok(id)
    }

    /// Human-readable type name (`*User`, `[]Product`, `map[string]int`)
    pub fn type_name(&self, id: TypeId) -> String {
        let Some(desc) = self.types.get(id.index()) else {
            return format!("<unknown {id}>");
        };
        if let Some(name) = &desc.name {
            return name.clone();
        }
        match &desc.shape {
            Some(TypeShape::Scalar(kind)) => kind.as_str().to_string(),
            Some(TypeShape::Pointer(elem)) => format!("*{}", self.type_name(*elem)),
            Some(TypeShape::Variant) => "interface {}".to_string(),
            Some(TypeShape::Array { elem, len }) => format!("[{len}]{}", self.type_name(*elem)),
            Some(TypeShape::Slice(elem)) => format!("[]{}", self.type_name(*elem)),
            Some(TypeShape::Map { key, elem }) => {
                format!("map[{}]{}", self.type_name(*key), self.type_name(*elem))
            }
            Some(TypeShape::Opaque(kind)) => kind.as_str().to_string(),
            Some(TypeShape::Struct(_)) | None => format!("<anonymous {id}>"),
        }
    }

    fn require(&self, id: TypeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(ShapeError::UnknownType(id))
        }
    }

    fn push(&mut self, name: Option<String>, shape: Option<TypeShape>) -> TypeId {
        let id = TypeId::from_index(self.types.len());
        self.types.push(TypeDesc { name, shape });
        id
    }

    fn intern(&mut self, key: Interned, shape: TypeShape) -> TypeId {
        if let Some(&id) = self.interned.get(&key) {
            return id;
        }
        let id = self.push(None, Some(shape));
        self.interned.insert(key, id);
        id
    }
}
