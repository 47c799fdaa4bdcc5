use crate::tag::StructTag;
use std::fmt;

/// Identity of a registered type.
///
/// Two types with identical shapes but separate definitions have different
/// ids; caches key on this identity, never on structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// # Panics
    ///
    /// Panics when `index` does not fit in a `u32`; wrapping would alias
    /// identities.
    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => Self(raw),
            Err(_) => panic!("type registry is full ({} types)", u64::from(u32::MAX) + 1),
        }
    }

    /// Position of this type in its registry
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Leaf value kinds that are always passed through as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Float,
    String,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Uint => "uint",
            ScalarKind::Float => "float64",
            ScalarKind::String => "string",
        }
    }
}

/// Kinds that have no representation in a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpaqueKind {
    /// Callable values
    Func,
    /// Queue/channel handles
    Chan,
    /// Raw unmanaged pointers
    UnsafePointer,
}

impl OpaqueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpaqueKind::Func => "func()",
            OpaqueKind::Chan => "chan",
            OpaqueKind::UnsafePointer => "unsafe.Pointer",
        }
    }
}

/// Declared struct member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeId,
    pub tag: StructTag,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: StructTag::default(),
        }
    }

    /// Attach a raw annotation string, e.g. `view:"support,admin" json:"id"`
    #[must_use]
    pub fn with_tag(mut self, raw: impl Into<String>) -> Self {
        self.tag = StructTag::new(raw);
        self
    }
}

/// Structural classification of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Scalar(ScalarKind),

    /// Optional reference to a value of the element type
    Pointer(TypeId),

    /// Holds a value whose concrete type is only known at runtime
    Variant,

    /// Fixed-length sequence
    Array { elem: TypeId, len: usize },

    /// Growable sequence that may be absent
    Slice(TypeId),

    Map { key: TypeId, elem: TypeId },

    /// Members in declaration order
    Struct(Vec<FieldDecl>),

    Opaque(OpaqueKind),
}

impl TypeShape {
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeShape::Scalar(_) => "scalar",
            TypeShape::Pointer(_) => "pointer",
            TypeShape::Variant => "variant",
            TypeShape::Array { .. } => "array",
            TypeShape::Slice(_) => "slice",
            TypeShape::Map { .. } => "map",
            TypeShape::Struct(_) => "struct",
            TypeShape::Opaque(_) => "opaque",
        }
    }
}
