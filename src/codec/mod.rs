// Numeric codecs: parse/format pairs between user-typed text and numbers.

pub mod digits;
pub mod float;
pub mod percent;
pub mod prefix;
pub mod si;


pub use float::{
    format_float, parse_float, FloatCodec, FloatFormatOptions, FloatParseOptions,
};
pub use percent::{format_percent, parse_percent, PercentCodec, PercentFormatOptions};
pub use si::{format_si, parse_si, SiCodec, SiFormatOptions, SiParseOptions};

use crate::error::NumfieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parse/format pair between display text and a typed value.
///
/// Neither direction may fail: parse failures are expressed through the
/// value type (a fallback value or a sentinel such as `None`).
pub trait Codec {
    type Value;

    fn parse(&self, text: &str) -> Self::Value;
    fn format(&self, value: &Self::Value) -> String;
}

/// Which codec family to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    Float,
    Percent,
    Si,
}

impl CodecKind {
    pub fn default_spec(self) -> CodecSpec {
        match self {
            CodecKind::Float => CodecSpec::Float(FloatSettings::default()),
            CodecKind::Percent => CodecSpec::Percent(PercentFormatOptions::default()),
            CodecKind::Si => CodecSpec::Si(SiSettings::default()),
        }
    }
}

impl FromStr for CodecKind {
    type Err = NumfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "float" => Ok(CodecKind::Float),
            "percent" => Ok(CodecKind::Percent),
            "si" => Ok(CodecKind::Si),
            other => Err(NumfieldError::InvalidArgument(format!(
                "unknown codec '{}' (expected float, percent or si)",
                other
            ))),
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecKind::Float => write!(f, "float"),
            CodecKind::Percent => write!(f, "percent"),
            CodecKind::Si => write!(f, "si"),
        }
    }
}

/// Float codec settings as written in config files.
/// Parse-side character classes are regex sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FloatSettings {
    pub decimals: usize,
    pub thousand_sep: String,
    pub decimal_point: String,
    pub explicit_plus: bool,
    pub ignore_chars: String,
    pub decimal_point_chars: String,
}

impl Default for FloatSettings {
    fn default() -> Self {
        let format = FloatFormatOptions::default();
        Self {
            decimals: format.decimals,
            thousand_sep: format.thousand_sep,
            decimal_point: format.decimal_point,
            explicit_plus: format.explicit_plus,
            ignore_chars: "[ ]".to_string(),
            decimal_point_chars: "[.,]".to_string(),
        }
    }
}

impl FloatSettings {
    pub fn format_options(&self) -> FloatFormatOptions {
        FloatFormatOptions {
            decimals: self.decimals,
            thousand_sep: self.thousand_sep.clone(),
            decimal_point: self.decimal_point.clone(),
            explicit_plus: self.explicit_plus,
        }
    }

    pub fn parse_options(&self) -> Result<FloatParseOptions, NumfieldError> {
        FloatParseOptions::from_patterns(&self.ignore_chars, &self.decimal_point_chars)
    }
}

/// SI codec settings as written in config files
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiSettings {
    pub significant_digits: usize,
    pub empty_value: f64,
}

impl Default for SiSettings {
    fn default() -> Self {
        Self {
            significant_digits: SiFormatOptions::default().significant_digits,
            empty_value: SiParseOptions::default().empty_value,
        }
    }
}

/// Codec choice plus its options, e.g. `{ codec = "si", significant_digits = 4 }`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "codec", rename_all = "lowercase")]
pub enum CodecSpec {
    Float(FloatSettings),
    Percent(PercentFormatOptions),
    Si(SiSettings),
}

impl Default for CodecSpec {
    fn default() -> Self {
        CodecKind::Float.default_spec()
    }
}

impl CodecSpec {
    pub fn kind(&self) -> CodecKind {
        match self {
            CodecSpec::Float(_) => CodecKind::Float,
            CodecSpec::Percent(_) => CodecKind::Percent,
            CodecSpec::Si(_) => CodecKind::Si,
        }
    }

    /// Compile the settings into a usable codec.
    /// Fails only on invalid regex sources in float settings.
    pub fn build(&self) -> Result<NumericCodec, NumfieldError> {
        Ok(match self {
            CodecSpec::Float(settings) => NumericCodec::Float(FloatCodec::new(
                settings.parse_options()?,
                settings.format_options(),
            )),
            CodecSpec::Percent(options) => NumericCodec::Percent(PercentCodec { format: *options }),
            CodecSpec::Si(settings) => NumericCodec::Si(SiCodec {
                parse: SiParseOptions {
                    empty_value: settings.empty_value,
                },
                format: SiFormatOptions {
                    significant_digits: settings.significant_digits,
                },
            }),
        })
    }
}

/// Any of the numeric codecs behind a single value type.
///
/// Float and percent parsing always produce a number; only SI parsing can
/// yield `None`. `None` formats as an empty string for every codec.
#[derive(Debug, Clone)]
pub enum NumericCodec {
    Float(FloatCodec),
    Percent(PercentCodec),
    Si(SiCodec),
}

impl NumericCodec {
    pub fn kind(&self) -> CodecKind {
        match self {
            NumericCodec::Float(_) => CodecKind::Float,
            NumericCodec::Percent(_) => CodecKind::Percent,
            NumericCodec::Si(_) => CodecKind::Si,
        }
    }
}

impl Default for NumericCodec {
    fn default() -> Self {
        NumericCodec::Float(FloatCodec::default())
    }
}

impl Codec for NumericCodec {
    type Value = Option<f64>;

    fn parse(&self, text: &str) -> Option<f64> {
        match self {
            NumericCodec::Float(codec) => Some(codec.parse(text)),
            NumericCodec::Percent(codec) => Some(codec.parse(text)),
            NumericCodec::Si(codec) => codec.parse(text),
        }
    }

    fn format(&self, value: &Option<f64>) -> String {
        match (self, value) {
            (_, None) => String::new(),
            (NumericCodec::Float(codec), Some(v)) => codec.format(v),
            (NumericCodec::Percent(codec), Some(v)) => codec.format(v),
            (NumericCodec::Si(codec), Some(v)) => codec.format(&Some(*v)),
        }
    }
}
