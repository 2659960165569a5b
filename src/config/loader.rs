use crate::codec::CodecSpec;
use crate::error::NumfieldError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Field codec configuration, usually read from a TOML file:
///
/// ```toml
/// [default]
/// codec = "float"
/// decimals = 2
///
/// [fields.gain]
/// codec = "percent"
/// decimals = 1
///
/// [fields.frequency]
/// codec = "si"
/// significant_digits = 4
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Codec for fields without their own entry
    #[serde(default)]
    pub default: CodecSpec,

    // Per-field codecs
    #[serde(default)]
    pub fields: HashMap<String, CodecSpec>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, NumfieldError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NumfieldError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, NumfieldError> {
        toml::from_str(content).map_err(|e| NumfieldError::ConfigError(e.to_string()))
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
