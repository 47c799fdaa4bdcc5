use structview_shape::TypeId;
use thiserror::Error;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, ViewError>;

/// Errors surfaced by the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A value of a type with no projection (callable, queue, raw pointer,
    /// or an unrecognized type) was visited
    #[error("Unsupported type: {type_name}")]
    UnsupportedType { ty: TypeId, type_name: String },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),
}

impl ViewError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a config parse error
    pub fn config_parse(msg: impl Into<String>) -> Self {
        Self::ConfigParse(msg.into())
    }
}
