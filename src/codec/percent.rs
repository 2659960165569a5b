use crate::codec::float::{format_float, parse_float, FloatFormatOptions, FloatParseOptions};
use crate::codec::Codec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PercentFormatOptions {
    pub decimals: usize,
}

impl Default for PercentFormatOptions {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

/// Parse "12.5" as `0.125`
pub fn parse_percent(s: &str) -> f64 {
    parse_float(s, &FloatParseOptions::default()) / 100.0
}

/// Format `0.125` as "12.50"
pub fn format_percent(value: f64, options: &PercentFormatOptions) -> String {
    format_float(value * 100.0, &FloatFormatOptions::with_decimals(options.decimals))
}

/// Ratio shown as a percentage
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentCodec {
    pub format: PercentFormatOptions,
}

impl PercentCodec {
    pub fn with_decimals(decimals: usize) -> Self {
        Self {
            format: PercentFormatOptions { decimals },
        }
    }
}

impl Codec for PercentCodec {
    type Value = f64;

    fn parse(&self, text: &str) -> f64 {
        parse_percent(text)
    }

    fn format(&self, value: &f64) -> String {
        format_percent(*value, &self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent("12.5"), 0.125);
        assert_eq!(parse_percent("100"), 1.0);
        assert_eq!(parse_percent("-50"), -0.5);
        assert_eq!(parse_percent(""), 0.0);
        assert_eq!(parse_percent("."), 0.0);
        assert_eq!(parse_percent("∞"), f64::INFINITY);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.125, &PercentFormatOptions::default()), "12.50");
        assert_eq!(format_percent(1.0, &PercentFormatOptions::default()), "100.00");
        assert_eq!(format_percent(0.5, &PercentFormatOptions { decimals: 0 }), "50");
        assert_eq!(format_percent(f64::INFINITY, &PercentFormatOptions::default()), "∞");
    }

    #[test]
    fn test_codec_round_trip() {
        let codec = PercentCodec::with_decimals(1);
        let text = codec.format(&0.4567);
        assert_eq!(text, "45.7");
        assert!((codec.parse(&text) - 0.457).abs() < 1e-12);
    }
}
