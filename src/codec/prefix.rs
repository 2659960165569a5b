//! SI prefix table.
//!
//! Maps exponents of ten (multiples of 3 in `-24..=24`) to their
//! single-character symbol and back.

/// Largest exponent the table can express.
pub const MAX_EXPONENT: i32 = 24;
/// Smallest exponent the table can express.
pub const MIN_EXPONENT: i32 = -24;

/// `(exponent, symbol)` pairs ordered from largest to smallest magnitude.
pub const SI_PREFIXES: &[(i32, &str)] = &[
    (24, "Y"),
    (21, "Z"),
    (18, "E"),
    (15, "P"),
    (12, "T"),
    (9, "G"),
    (6, "M"),
    (3, "k"),
    (0, ""),
    (-3, "m"),
    (-6, "µ"),
    (-9, "n"),
    (-12, "p"),
    (-15, "f"),
    (-18, "a"),
    (-21, "z"),
    (-24, "y"),
];

/// Symbol for an exponent of ten, or `None` if it is not a table entry.
pub fn symbol_for(exponent: i32) -> Option<&'static str> {
    SI_PREFIXES
        .iter()
        .find(|(exp, _)| *exp == exponent)
        .map(|(_, symbol)| *symbol)
}

/// Exponent of ten for a prefix character.
///
/// `u` and the Greek letter `μ` are accepted as spellings of micro.
pub fn exponent_for(symbol: char) -> Option<i32> {
    let symbol = match symbol {
        'u' | 'μ' => 'µ',
        other => other,
    };
    SI_PREFIXES
        .iter()
        .find(|(_, s)| s.chars().eq(std::iter::once(symbol)))
        .map(|(exp, _)| *exp)
}

/// Iterate over all `(exponent, symbol)` entries, largest first.
pub fn iter() -> impl Iterator<Item = (i32, &'static str)> {
    SI_PREFIXES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(symbol_for(3), Some("k"));
        assert_eq!(symbol_for(0), Some(""));
        assert_eq!(symbol_for(-6), Some("µ"));
        assert_eq!(symbol_for(24), Some("Y"));
        assert_eq!(symbol_for(4), None);
        assert_eq!(symbol_for(27), None);
    }

    #[test]
    fn test_exponent_lookup() {
        assert_eq!(exponent_for('E'), Some(18));
        assert_eq!(exponent_for('k'), Some(3));
        assert_eq!(exponent_for('M'), Some(6));
        assert_eq!(exponent_for('m'), Some(-3));
        assert_eq!(exponent_for('u'), Some(-6));
        assert_eq!(exponent_for('µ'), Some(-6));
        assert_eq!(exponent_for('μ'), Some(-6));
        assert_eq!(exponent_for('n'), Some(-9));
        assert_eq!(exponent_for('a'), Some(-18));
        assert_eq!(exponent_for('K'), None);
        assert_eq!(exponent_for('x'), None);
    }

    #[test]
    fn test_table_is_bidirectional() {
        for (exp, symbol) in iter().filter(|(_, s)| !s.is_empty()) {
            let c = symbol.chars().next().unwrap();
            assert_eq!(exponent_for(c), Some(exp));
            assert_eq!(symbol_for(exp), Some(symbol));
        }
    }
}
