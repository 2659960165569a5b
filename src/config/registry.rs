// Registry of compiled field codecs built from a Config

use crate::codec::{CodecSpec, NumericCodec};
use crate::config::loader::Config;
use crate::error::NumfieldError;
use crate::field::FormattedInput;
use std::collections::HashMap;

/// A field's settings alongside the codec compiled from them
struct FieldEntry {
    spec: CodecSpec,
    codec: NumericCodec,
}

pub struct FieldRegistry {
    default: FieldEntry,
    fields: HashMap<String, FieldEntry>,
}

impl FieldRegistry {
    /// Compile every codec in the config up front so bad patterns surface at load time
    pub fn new(config: &Config) -> Result<Self, NumfieldError> {
        let default = FieldEntry {
            spec: config.default.clone(),
            codec: config.default.build()?,
        };
        let mut fields = HashMap::new();
        for (name, spec) in &config.fields {
            let codec = spec.build().map_err(|e| {
                NumfieldError::ConfigError(format!("field '{}': {}", name, e))
            })?;
            fields.insert(
                name.clone(),
                FieldEntry {
                    spec: spec.clone(),
                    codec,
                },
            );
        }
        Ok(Self { default, fields })
    }

    pub fn list_fields(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.fields.keys().collect();
        names.sort();
        names
    }

    pub fn default_codec(&self) -> &NumericCodec {
        &self.default.codec
    }

    pub fn default_spec(&self) -> &CodecSpec {
        &self.default.spec
    }

    /// Codec configured for `name`, or the default codec
    pub fn codec_for(&self, name: &str) -> &NumericCodec {
        self.fields
            .get(name)
            .map_or(&self.default.codec, |entry| &entry.codec)
    }

    /// Settings configured for `name`; unlike `codec_for`, no fallback
    pub fn field_spec(&self, name: &str) -> Result<&CodecSpec, NumfieldError> {
        self.fields
            .get(name)
            .map(|entry| &entry.spec)
            .ok_or_else(|| NumfieldError::UnknownField(name.to_string()))
    }

    /// Input for a named field, formatting and parsing with that field's codec
    pub fn input_for(&self, name: &str, value: Option<f64>) -> FormattedInput<Option<f64>> {
        FormattedInput::with_codec(value, self.codec_for(name).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Codec, CodecKind};

    fn registry() -> FieldRegistry {
        let config = Config::load_from_str(
            r#"
[default]
codec = "float"
decimals = 1

[fields.gain]
codec = "percent"

[fields.frequency]
codec = "si"
"#,
        )
        .unwrap();
        FieldRegistry::new(&config).unwrap()
    }

    #[test]
    fn test_codec_lookup_with_fallback() {
        let registry = registry();
        assert_eq!(registry.codec_for("gain").kind(), CodecKind::Percent);
        assert_eq!(registry.codec_for("frequency").kind(), CodecKind::Si);
        assert_eq!(registry.codec_for("anything").kind(), CodecKind::Float);
        assert_eq!(registry.default_codec().format(&Some(2.25)), "2.3");
    }

    #[test]
    fn test_field_spec_without_fallback() {
        let registry = registry();
        assert_eq!(registry.field_spec("gain").unwrap().kind(), CodecKind::Percent);
        assert_eq!(registry.default_spec().kind(), CodecKind::Float);
        assert!(matches!(
            registry.field_spec("anything"),
            Err(NumfieldError::UnknownField(name)) if name == "anything"
        ));
    }

    #[test]
    fn test_list_fields_sorted() {
        let registry = registry();
        assert_eq!(registry.list_fields(), vec!["frequency", "gain"]);
    }

    #[test]
    fn test_input_for_field() {
        let registry = registry();
        let mut input = registry.input_for("frequency", Some(2.2e6));
        assert_eq!(input.text(), "2.2 M");
        input.handle_change("abc");
        assert_eq!(input.text(), "abc");
        input.handle_blur();
        assert_eq!(input.text(), "2.2 M");
    }

    #[test]
    fn test_bad_pattern_names_the_field() {
        let config = Config::load_from_str(
            r#"
[fields.weight]
codec = "float"
ignore_chars = "["
"#,
        )
        .unwrap();
        match FieldRegistry::new(&config) {
            Err(NumfieldError::ConfigError(msg)) => assert!(msg.contains("weight")),
            _ => panic!("Expected ConfigError"),
        }
    }
}
