use crate::error::{Result, ViewError};
use serde::{Deserialize, Serialize};

/// Configuration for view rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Annotation key holding a field's view list (`view:"admin,support"`)
    pub tag_key: String,

    /// Separator between view names inside the annotation
    pub delimiter: char,

    /// Where built strategies are kept
    pub cache: CacheMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tag_key: "view".to_string(),
            delimiter: ',',
            cache: CacheMode::Shared,
        }
    }
}

impl ViewConfig {
    /// Build strategies per render call instead of sharing them
    pub fn uncached() -> Self {
        Self {
            cache: CacheMode::PerCall,
            ..Default::default()
        }
    }

    /// Parse configuration from JSON or TOML text
    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = match serde_json::from_str(raw) {
            Ok(config) => config,
            Err(json_err) => toml::from_str(raw).map_err(|toml_err| {
                ViewError::config_parse(format!(
                    "not valid JSON ({json_err}) or TOML ({toml_err})"
                ))
            })?,
        };
        config.validate().map_err(ViewError::invalid_config)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.tag_key.is_empty() {
            return Err("tag_key must not be empty".to_string());
        }

        if let Some(bad) = self
            .tag_key
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, ':' | '"'))
        {
            return Err(format!("tag_key contains invalid character {bad:?}"));
        }

        if self.delimiter.is_whitespace() || self.delimiter == '"' {
            return Err(format!(
                "delimiter {:?} cannot be whitespace or a quote",
                self.delimiter
            ));
        }

        Ok(())
    }
}

/// Lifetime of built strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Strategies are built once and shared by every render on the engine
    #[default]
    Shared,

    /// Strategies live only for the duration of one render call
    PerCall,
}
