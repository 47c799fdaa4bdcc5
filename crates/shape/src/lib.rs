//! # Structview Shape
//!
//! Runtime type model for view-based projection.
//!
//! Rust has no runtime reflection, so values that need to be projected are
//! described through a [`TypeRegistry`]: every type gets an identity
//! ([`TypeId`]) and a structural classification ([`TypeShape`]). Values are
//! plain data ([`Value`]) paired with their type when the type is only known
//! at runtime ([`Dynamic`]).
//!
//! ## Example
//!
//! ```rust
//! use structview_shape::{Dynamic, FieldDecl, ScalarKind, TypeRegistry, Value};
//!
//! let mut registry = TypeRegistry::new();
//! let uint = registry.scalar(ScalarKind::Uint);
//! let string = registry.scalar(ScalarKind::String);
//! let user = registry
//!     .struct_type(
//!         "User",
//!         vec![
//!             FieldDecl::new("Id", uint).with_tag(r#"view:"support,admin""#),
//!             FieldDecl::new("Name", string),
//!         ],
//!     )
//!     .unwrap();
//! let ptr = registry.pointer_to(user).unwrap();
//!
//! let value = Dynamic::new(
//!     ptr,
//!     Value::pointer(Value::Struct(vec![Value::Uint(7), Value::from("Jon")])),
//! );
//! assert_eq!(registry.type_name(value.ty), "*User");
//! ```

mod error;
mod registry;
mod tag;
mod types;
mod value;

pub use error::{Result, ShapeError};
pub use registry::TypeRegistry;
pub use tag::StructTag;
pub use types::{FieldDecl, OpaqueKind, ScalarKind, TypeId, TypeShape};
pub use value::{Dynamic, MapKey, Value};
