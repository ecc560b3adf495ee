//! Error types for Loupe

use thiserror::Error;

/// The main error type for Loupe operations
#[derive(Debug, Error)]
pub enum LoupeError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Canvas not found: #{0}")]
    CanvasNotFound(String),

    #[error("Plugin '{plugin}' requires capability '{capability}', which no earlier plugin provides")]
    MissingCapability { plugin: String, capability: String },

    #[error("Plugin error: {0}")]
    PluginError(String),

    #[error("Asset error: {0}")]
    AssetError(String),

    #[error("Import error: {0}")]
    ImportError(String),

    #[error("Invalid scroll anchor: {0}")]
    InvalidAnchor(String),

    #[error("Animation error: {0}")]
    AnimationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Loupe operations
pub type Result<T> = std::result::Result<T, LoupeError>;

impl From<toml::de::Error> for LoupeError {
    fn from(err: toml::de::Error) -> Self {
        LoupeError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for LoupeError {
    fn from(err: toml::ser::Error) -> Self {
        LoupeError::TomlSerError(err.to_string())
    }
}
