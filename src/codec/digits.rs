// Decimal rendering helpers shared by the codecs.
//
// Rust's `{:.N}` formatting is exact but resolves exact ties to even. The
// codecs round ties away from zero, so ties are detected from the binary
// representation and rounded up by hand.

/// Upper bound on fractional digits, as for JavaScript's `toFixed`
pub const MAX_DECIMALS: usize = 100;

/// An f64 carries at most 17 significant decimal digits
pub const MAX_SIGNIFICANT_DIGITS: usize = 17;

/// Number of fractional binary digits in the exact value of `x`.
/// A value with `n` fractional bits has exactly `n` fractional decimal digits,
/// the last of which is always a 5.
fn fractional_bits(x: f64) -> u32 {
    let bits = x.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);

    let (mantissa, exponent) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };
    if mantissa == 0 {
        return 0;
    }

    let exponent = exponent + mantissa.trailing_zeros() as i32;
    if exponent >= 0 {
        0
    } else {
        exponent.unsigned_abs()
    }
}

/// Add one unit in the last place of a plain decimal digit string.
fn increment_last_digit(digits: &str) -> String {
    let mut out: Vec<u8> = digits.as_bytes().to_vec();
    let mut i = out.len();
    while i > 0 {
        i -= 1;
        match out[i] {
            b'.' => continue,
            b'9' => out[i] = b'0',
            d => {
                out[i] = d + 1;
                return out.into_iter().map(char::from).collect();
            }
        }
    }
    out.insert(0, b'1');
    out.into_iter().map(char::from).collect()
}

/// Render a finite, non-negative `abs` with exactly `decimals` fractional
/// digits, rounding half away from zero. `decimals` is capped at
/// [`MAX_DECIMALS`].
pub fn to_fixed(abs: f64, decimals: usize) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    if fractional_bits(abs) as usize == decimals + 1 {
        let exact = format!("{:.*}", decimals + 1, abs);
        let truncated = exact[..exact.len() - 1].trim_end_matches('.');
        return increment_last_digit(truncated);
    }
    format!("{:.*}", decimals, abs)
}

/// Round a finite, positive `x` to `digits` significant digits, clamped to
/// `1..=MAX_SIGNIFICANT_DIGITS`.
pub fn round_significant(x: f64, digits: usize) -> f64 {
    let digits = digits.clamp(1, MAX_SIGNIFICANT_DIGITS) as i32;
    let magnitude = x.log10().floor() as i32;
    let decimals = digits - 1 - magnitude;

    if decimals >= 0 {
        to_fixed(x, decimals as usize).parse().unwrap_or(x)
    } else {
        let scale = 10f64.powi(-decimals);
        let scaled = x / scale;
        let rounded: f64 = to_fixed(scaled, 0).parse().unwrap_or(scaled);
        rounded * scale
    }
}

/// Insert `sep` after every complete run of three digits, counted from the
/// left, as long as another digit follows.
pub fn group_from_left(digits: &str, sep: &str) -> String {
    let mut out = String::with_capacity(digits.len() + sep.len() * (digits.len() / 3));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
    out
}

/// Insert `sep` between three-digit runs counted from the right.
pub fn group_from_right(digits: &str, sep: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(digits.len() + sep.len() * (len / 3));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
    out
}
