use crate::codec::digits::{round_significant, to_fixed};
use crate::codec::float::INFINITY_GLYPH;
use crate::codec::prefix::{exponent_for, symbol_for, MAX_EXPONENT, MIN_EXPONENT};
use crate::codec::Codec;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

lazy_static! {
    /// Number with optional thousands spaces, fraction, exponent and SI prefix
    /// Examples: "2.5k", "300m", "1 234,5 µ", "-4e-3 M", "+"
    static ref SI_PATTERN: Regex = Regex::new(
        r"^\s*(?P<sign>[+-]?)(?P<int_part>[0-9 ]*)(?:[.,](?P<frac_part>[0-9 ]*))?(?:[eE](?P<exp_part>[+-]?[0-9]+))? *(?P<prefix>[YZEPTGMkmuµμnpfazy])?\s*$"
    ).unwrap();
}

/// Exponents beyond this are already outside the range of `f64`
const EXPONENT_LIMIT: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiParseOptions {
    /// Returned for empty input (not for unparseable input)
    pub empty_value: f64,
}

impl Default for SiParseOptions {
    fn default() -> Self {
        Self {
            empty_value: f64::NAN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiFormatOptions {
    pub significant_digits: usize,
}

impl Default for SiFormatOptions {
    fn default() -> Self {
        Self {
            significant_digits: 3,
        }
    }
}

/// Parse a number with an optional SI prefix ("2.5k", "300 m", "1e-3 µ").
///
/// Returns `Some(options.empty_value)` for empty input and `None` when the
/// text does not follow the grammar at all, so callers can tell "nothing
/// typed yet" from "garbage typed".
pub fn parse_si(s: &str, options: &SiParseOptions) -> Option<f64> {
    if s.is_empty() {
        return Some(options.empty_value);
    }

    let caps = match SI_PATTERN.captures(s) {
        Some(caps) => caps,
        None => {
            debug!(input = s, "not an SI number");
            return None;
        }
    };

    let digits = |name: &str| -> String {
        caps.name(name)
            .map(|m| m.as_str().chars().filter(|c| *c != ' ').collect())
            .unwrap_or_default()
    };
    let int_part = digits("int_part");
    let frac_part = digits("frac_part");

    let mantissa: f64 = format!(
        "{}.{}",
        if int_part.is_empty() { "0" } else { int_part.as_str() },
        if frac_part.is_empty() { "0" } else { frac_part.as_str() },
    )
    .parse()
    .unwrap_or(0.0);

    let explicit_exponent = caps
        .name("exp_part")
        .map(|m| parse_exponent(m.as_str()))
        .unwrap_or(0);
    let prefix_exponent = caps
        .name("prefix")
        .and_then(|m| m.as_str().chars().next())
        .and_then(exponent_for)
        .unwrap_or(0);

    let magnitude = scale_by_power_of_ten(mantissa, explicit_exponent + prefix_exponent);
    let negative = caps.name("sign").map(|m| m.as_str()) == Some("-");

    Some(if negative { -magnitude } else { magnitude })
}

fn parse_exponent(s: &str) -> i32 {
    let saturated = if s.starts_with('-') {
        -EXPONENT_LIMIT
    } else {
        EXPONENT_LIMIT
    };
    s.parse::<i64>()
        .unwrap_or(saturated)
        .clamp(-EXPONENT_LIMIT, EXPONENT_LIMIT) as i32
}

/// `mantissa * 10^exponent`, dividing for negative exponents so that
/// "300m" comes out as exactly `0.3`.
fn scale_by_power_of_ten(mantissa: f64, exponent: i32) -> f64 {
    if mantissa == 0.0 {
        return 0.0;
    }
    if exponent >= 0 {
        mantissa * 10f64.powi(exponent)
    } else if exponent >= -300 {
        mantissa / 10f64.powi(-exponent)
    } else {
        mantissa / 1e300 / 10f64.powi(-exponent - 300)
    }
}

/// Format a number with an SI prefix, e.g. `2500.0` as "2.5 k".
///
/// The significand is kept in `[1, 1000)` while the prefix table allows it.
/// Beyond ±24 the exponent saturates: large values keep a long integer
/// significand ("5000 Y"), tiny values a long fraction.
pub fn format_si(value: f64, options: &SiFormatOptions) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}{}", sign, INFINITY_GLYPH);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let mut significand = value.abs();
    let mut exponent = 0;
    while significand >= 1000.0 && exponent < MAX_EXPONENT {
        significand /= 1000.0;
        exponent += 3;
    }
    while significand < 1.0 && exponent > MIN_EXPONENT {
        significand *= 1000.0;
        exponent -= 3;
    }

    if significand > 1000.0 {
        // Saturated at the top of the table; rounding to significant digits
        // would suggest precision the prefix cannot express.
        let symbol = symbol_for(exponent).unwrap_or_default();
        return format!("{}{} {}", sign, to_fixed(significand, 0), symbol);
    }

    let mut rounded = round_significant(significand, options.significant_digits);
    if rounded >= 1000.0 && exponent < MAX_EXPONENT {
        rounded /= 1000.0;
        exponent += 3;
    }

    let symbol = symbol_for(exponent).unwrap_or_default();
    format!("{}{} {}", sign, rounded, symbol)
}

/// Number with SI prefix.
///
/// The value is `Option<f64>`: `None` is the unparseable result and formats
/// as an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiCodec {
    pub parse: SiParseOptions,
    pub format: SiFormatOptions,
}

impl SiCodec {
    pub fn with_significant_digits(significant_digits: usize) -> Self {
        Self {
            parse: SiParseOptions::default(),
            format: SiFormatOptions { significant_digits },
        }
    }
}

impl Codec for SiCodec {
    type Value = Option<f64>;

    fn parse(&self, text: &str) -> Option<f64> {
        parse_si(text, &self.parse)
    }

    fn format(&self, value: &Option<f64>) -> String {
        match value {
            Some(v) => format_si(*v, &self.format),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<f64> {
        parse_si(s, &SiParseOptions::default())
    }

    fn format(value: f64) -> String {
        format_si(value, &SiFormatOptions::default())
    }

    #[test]
    fn test_parse_prefixes() {
        assert_eq!(parse("2.5k"), Some(2500.0));
        assert_eq!(parse("300m"), Some(0.3));
        assert_eq!(parse("1M"), Some(1e6));
        assert_eq!(parse("4G"), Some(4e9));
        assert_eq!(parse("1E"), Some(1e18));
        assert_eq!(parse("2u"), Some(2e-6));
        assert_eq!(parse("2µ"), Some(2e-6));
        assert_eq!(parse("2μ"), Some(2e-6));
        assert_eq!(parse("7n"), Some(7e-9));
        assert_eq!(parse("7p"), Some(7e-12));
        assert_eq!(parse("3a"), Some(3e-18));
    }

    #[test]
    fn test_parse_spacing_and_separators() {
        assert_eq!(parse("2.5 k"), Some(2500.0));
        assert_eq!(parse("  42  "), Some(42.0));
        assert_eq!(parse("1 234.5k"), Some(1234500.0));
        assert_eq!(parse("1 234 567"), Some(1234567.0));
        assert_eq!(parse("0,5"), Some(0.5));
        assert_eq!(parse("0.000 5"), Some(0.0005));
    }

    #[test]
    fn test_parse_sign_and_exponent() {
        assert_eq!(parse("-2.5k"), Some(-2500.0));
        assert_eq!(parse("+3"), Some(3.0));
        assert_eq!(parse("1e3"), Some(1000.0));
        assert_eq!(parse("1.5E-3"), Some(0.0015));
        assert_eq!(parse("2e3k"), Some(2e6));
        assert_eq!(parse("1e-3 k"), Some(1.0));
    }

    #[test]
    fn test_parse_degenerate_but_valid() {
        assert_eq!(parse("-"), Some(-0.0));
        assert_eq!(parse("+"), Some(0.0));
        assert_eq!(parse("."), Some(0.0));
        assert_eq!(parse("k"), Some(0.0));
        assert_eq!(parse(".5"), Some(0.5));
        assert_eq!(parse("5."), Some(5.0));
    }

    #[test]
    fn test_parse_empty_vs_unparseable() {
        assert!(parse("").unwrap().is_nan());
        let options = SiParseOptions { empty_value: 0.0 };
        assert_eq!(parse_si("", &options), Some(0.0));

        assert_eq!(parse("abc"), None);
        assert_eq!(parse_si("abc", &options), None);
        assert_eq!(parse("1.2.3"), None);
        assert_eq!(parse("5 kg"), None);
        assert_eq!(parse("5K"), None);
        assert_eq!(parse("--5"), None);
    }

    #[test]
    fn test_parse_extreme_exponents() {
        assert_eq!(parse("1e400"), Some(f64::INFINITY));
        assert_eq!(parse("1e-400"), Some(0.0));
        assert_eq!(parse("0e99999999999999999999"), Some(0.0));
        assert_eq!(parse("1e99999999999999999999"), Some(f64::INFINITY));
    }

    #[test]
    fn test_format_prefixes() {
        assert_eq!(format(2500.0), "2.5 k");
        assert_eq!(format(0.0), "0");
        assert_eq!(format(0.0000003), "300 n");
        assert_eq!(format(-1.5e6), "-1.5 M");
        assert_eq!(format(0.001), "1 m");
        assert_eq!(format(1e-9), "1 n");
        assert_eq!(format(12345.0), "12.3 k");
    }

    #[test]
    fn test_format_unit_magnitude_keeps_separator() {
        assert_eq!(format(5.0), "5 ");
        assert_eq!(format(999.0), "999 ");
    }

    #[test]
    fn test_format_rounding_carries_to_next_prefix() {
        assert_eq!(format(999_999.0), "1 M");
        assert_eq!(format(0.99999), "1 ");
    }

    #[test]
    fn test_format_significant_digits() {
        let options = SiFormatOptions {
            significant_digits: 5,
        };
        assert_eq!(format_si(123456.0, &options), "123.46 k");
        let options = SiFormatOptions {
            significant_digits: 1,
        };
        assert_eq!(format_si(2500.0, &options), "3 k");
        let options = SiFormatOptions {
            significant_digits: 0,
        };
        assert_eq!(format_si(2500.0, &options), "3 k");
        let options = SiFormatOptions {
            significant_digits: usize::MAX,
        };
        assert_eq!(format_si(2500.0, &options), "2.5 k");
    }

    #[test]
    fn test_format_saturates() {
        assert_eq!(format(5e27), "5000 Y");
        assert_eq!(format(1e-27), "0.001 y");
        assert_eq!(format(f64::INFINITY), "∞");
        assert_eq!(format(f64::NEG_INFINITY), "-∞");
        assert_eq!(format(f64::NAN), "NaN");
    }

    #[test]
    fn test_codec_none_formats_empty() {
        let codec = SiCodec::default();
        assert_eq!(codec.format(&None), "");
        assert_eq!(codec.format(&Some(2500.0)), "2.5 k");
        assert_eq!(codec.parse("2.5 k"), Some(2500.0));
        assert_eq!(codec.parse("nope"), None);
    }
}
