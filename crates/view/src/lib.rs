//! # Structview
//!
//! View-based structural projection of runtime values.
//!
//! Struct fields carry a view annotation (`view:"support,admin"`). Rendering a
//! value through a view rewrites every struct that needs it into an ordered
//! field mapping holding only the fields of that view, descending through
//! pointers, variants, arrays, slices and maps. Anything that would come out
//! unchanged is returned by reference instead of being copied.
//!
//! ## Architecture
//!
//! ```text
//! render(value, view)
//!     │
//!     ├──> Dispatcher (per type shape)
//!     │      ├─ Strategy cache: (type, view) -> strategy, placeholder first
//!     │      ├─ Field metadata: struct fields + parsed view sets
//!     │      └─ Identity short-circuit: "no strategy" propagates outward
//!     │
//!     └──> Strategy invocation
//!            ├─ Pointer / slice / variant: absent stays absent
//!            ├─ Variant: re-dispatch on the held runtime type
//!            └─ Unsupported kinds fail only when a value is visited
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use structview::ViewEngine;
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
//!             FieldDecl::new("Password", string).with_tag(r#"view:"user""#),
//!         ],
//!     )
//!     .unwrap();
//!
//! let engine = ViewEngine::new(Arc::new(registry));
//! let value = Dynamic::new(user, Value::Struct(vec![Value::Uint(7), Value::from("secret")]));
//!
//! let admin = engine.render(&value, "admin").unwrap();
//! assert_eq!(admin.get("Id").and_then(|p| p.same_value()), Some(&Value::Uint(7)));
//! assert!(admin.get("Password").is_none());
//!
//! // no field belongs to "system": the input comes back as-is
//! assert!(engine.render(&value, "system").unwrap().is_same_as(&value.value));
//! ```

mod cache;
mod config;
mod dispatch;
mod engine;
mod error;
mod field;
mod projection;
mod selector;
mod strategy;

pub use config::{CacheMode, ViewConfig};
pub use engine::ViewEngine;
pub use error::{Result, ViewError};
pub use field::{split_views, Field};
pub use projection::{FieldMap, Projection};
pub use selector::{FieldSelector, ViewSelector};
