use crate::codec::digits::{group_from_left, group_from_right, to_fixed};
use crate::codec::Codec;
use crate::error::NumfieldError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Characters dropped before parsing (default: plain spaces used as thousands separators)
    static ref DEFAULT_IGNORE_CHARS: Regex = Regex::new(r"[ ]").unwrap();

    /// Characters accepted as the decimal point
    static ref DEFAULT_DECIMAL_POINT: Regex = Regex::new(r"[.,]").unwrap();

    /// Longest leading numeric prefix, mirroring lenient "parse what you can" float parsing.
    /// Matches: "12", "-1.5", ".5", "5.", "1e3", "+Infinity"
    /// An exponent marker only counts when digits follow it ("1e" parses as 1).
    static ref NUMERIC_PREFIX: Regex = Regex::new(
        r"^\s*([+-]?)(Infinity|[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?)"
    ).unwrap();
}

/// Glyph used for infinite values in both directions
pub const INFINITY_GLYPH: &str = "∞";

/// Options controlling how free-form text is read as a float
#[derive(Debug, Clone)]
pub struct FloatParseOptions {
    /// Every match is removed before parsing
    pub ignore_chars: Regex,
    /// Every match is replaced by `.` before parsing
    pub decimal_point: Regex,
}

impl Default for FloatParseOptions {
    fn default() -> Self {
        Self {
            ignore_chars: DEFAULT_IGNORE_CHARS.clone(),
            decimal_point: DEFAULT_DECIMAL_POINT.clone(),
        }
    }
}

impl FloatParseOptions {
    /// Build parse options from regex source patterns (as found in config files)
    pub fn from_patterns(ignore_chars: &str, decimal_point: &str) -> Result<Self, NumfieldError> {
        let ignore_chars = Regex::new(ignore_chars).map_err(|e| {
            NumfieldError::InvalidPattern(format!("ignore_chars '{}': {}", ignore_chars, e))
        })?;
        let decimal_point = Regex::new(decimal_point).map_err(|e| {
            NumfieldError::InvalidPattern(format!("decimal_point '{}': {}", decimal_point, e))
        })?;
        Ok(Self {
            ignore_chars,
            decimal_point,
        })
    }
}

/// Options controlling how a float is rendered
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FloatFormatOptions {
    pub decimals: usize,
    pub thousand_sep: String,
    pub decimal_point: String,
    /// Prefix non-negative values with `+`
    pub explicit_plus: bool,
}

impl Default for FloatFormatOptions {
    fn default() -> Self {
        Self {
            decimals: 3,
            thousand_sep: String::new(),
            decimal_point: ".".to_string(),
            explicit_plus: false,
        }
    }
}

impl FloatFormatOptions {
    pub fn with_decimals(decimals: usize) -> Self {
        Self {
            decimals,
            ..Self::default()
        }
    }
}

/// Parse user-typed text as a float.
///
/// Never fails: text without a numeric prefix yields `0.0`, so that partial
/// input such as "." or "-" keeps the field editable. "∞" and "-∞" parse to
/// the infinities, so formatted infinite values read back unchanged.
pub fn parse_float(s: &str, options: &FloatParseOptions) -> f64 {
    let stripped = options.ignore_chars.replace_all(s, "");
    let normalized = options.decimal_point.replace_all(&stripped, ".");

    if normalized == INFINITY_GLYPH {
        return f64::INFINITY;
    }
    if normalized.strip_prefix('-') == Some(INFINITY_GLYPH) {
        return f64::NEG_INFINITY;
    }

    let caps = match NUMERIC_PREFIX.captures(&normalized) {
        Some(caps) => caps,
        None => return 0.0,
    };
    let negative = &caps[1] == "-";
    let magnitude = match &caps[2] {
        "Infinity" => f64::INFINITY,
        digits => digits.parse::<f64>().unwrap_or(0.0),
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Render a float with a fixed number of decimals and optional digit grouping.
///
/// The fractional part is grouped in runs of three from the left, mirroring
/// the integer grouping: `1 234.567 890` with `decimals = 6`.
pub fn format_float(value: f64, options: &FloatFormatOptions) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == f64::INFINITY {
        return INFINITY_GLYPH.to_string();
    }
    if value == f64::NEG_INFINITY {
        return format!("-{}", INFINITY_GLYPH);
    }

    let sign = if value < 0.0 {
        "-"
    } else if options.explicit_plus {
        "+"
    } else {
        ""
    };

    let fixed = to_fixed(value.abs(), options.decimals);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::with_capacity(fixed.len() + 8);
    out.push_str(sign);
    out.push_str(&group_from_right(int_part, &options.thousand_sep));
    if options.decimals > 0 {
        out.push_str(&options.decimal_point);
        out.push_str(&group_from_left(frac_part, &options.thousand_sep));
    }
    out
}

/// Plain decimal codec
#[derive(Debug, Clone, Default)]
pub struct FloatCodec {
    pub parse: FloatParseOptions,
    pub format: FloatFormatOptions,
}

impl FloatCodec {
    pub fn new(parse: FloatParseOptions, format: FloatFormatOptions) -> Self {
        Self { parse, format }
    }

    pub fn with_decimals(decimals: usize) -> Self {
        Self {
            parse: FloatParseOptions::default(),
            format: FloatFormatOptions::with_decimals(decimals),
        }
    }
}

impl Codec for FloatCodec {
    type Value = f64;

    fn parse(&self, text: &str) -> f64 {
        parse_float(text, &self.parse)
    }

    fn format(&self, value: &f64) -> String {
        format_float(*value, &self.format)
    }
}
