use crate::types::TypeId;
use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Errors raised while registering types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Referenced type id was never registered
    #[error("Unknown type: {0}")]
    UnknownType(TypeId),

    /// Struct definition supplied twice, or for a type that is not a declared struct
    #[error("Type already defined: {0}")]
    AlreadyDefined(String),

    /// Two fields of one struct share a name
    #[error("Duplicate field {field} in {type_name}")]
    DuplicateField { type_name: String, field: String },

    /// Map keys must be scalars
    #[error("Invalid map key type: {0}")]
    InvalidMapKey(String),
}
