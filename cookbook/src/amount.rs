//! Conversion between human-readable token amounts and on-chain base units.
//!
//! Amounts are parsed from decimal strings rather than floats so that
//! values at the top of the u64 range stay exact.

use crate::error::{CookbookError, Result};

/// Parse a decimal amount string into base units for a mint with the given
/// number of decimals. `"1.5"` with 9 decimals becomes `1_500_000_000`.
pub fn parse_token_amount(input: &str, decimals: u8) -> Result<u64> {
    let input = input.trim();
    let invalid = |reason: &str| CookbookError::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let (integer, fraction) = match input.split_once('.') {
        Some((i, f)) => (i, f),
        None => (input, ""),
    };
    if integer.is_empty() && fraction.is_empty() {
        return Err(invalid("empty amount"));
    }
    if !integer.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid("expected an unsigned decimal number"));
    }
    if fraction.len() > decimals as usize {
        return Err(invalid("more fractional digits than the mint's decimals"));
    }

    let integer: u128 = if integer.is_empty() {
        0
    } else {
        integer.parse().map_err(|_| invalid("integer part too large"))?
    };
    let mut fraction_units: u128 = if fraction.is_empty() {
        0
    } else {
        fraction.parse().map_err(|_| invalid("fraction too large"))?
    };
    fraction_units *= 10u128.pow((decimals as usize - fraction.len()) as u32);

    let base_units = integer
        .checked_mul(10u128.pow(decimals as u32))
        .and_then(|v| v.checked_add(fraction_units))
        .ok_or_else(|| invalid("amount overflows u64"))?;

    u64::try_from(base_units).map_err(|_| invalid("amount overflows u64"))
}

/// Format base units as a decimal string, trimming trailing fractional
/// zeros. The inverse of [`parse_token_amount`].
pub fn format_token_amount(base_units: u64, decimals: u8) -> String {
    if decimals == 0 {
        return base_units.to_string();
    }
    let divisor = 10u64.pow(decimals as u32);
    let integer = base_units / divisor;
    let fraction = base_units % divisor;
    if fraction == 0 {
        return integer.to_string();
    }
    let fraction = format!("{fraction:0width$}", width = decimals as usize);
    format!("{integer}.{}", fraction.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_representative_values() {
        // Whole-token amounts at 9 decimals: 0, 1 and 1e9.
        assert_eq!(parse_token_amount("0", 9).unwrap(), 0);
        assert_eq!(parse_token_amount("1", 9).unwrap(), 1_000_000_000);
        assert_eq!(
            parse_token_amount("1000000000", 9).unwrap(),
            1_000_000_000_000_000_000
        );
    }

    #[test]
    fn parses_fractions() {
        assert_eq!(parse_token_amount("0.5", 9).unwrap(), 500_000_000);
        assert_eq!(parse_token_amount("1.000000001", 9).unwrap(), 1_000_000_001);
        assert_eq!(parse_token_amount(".25", 2).unwrap(), 25);
        assert_eq!(parse_token_amount("3.", 2).unwrap(), 300);
    }

    #[test]
    fn zero_decimals() {
        assert_eq!(parse_token_amount("42", 0).unwrap(), 42);
        assert!(parse_token_amount("4.2", 0).is_err());
    }

    #[test]
    fn rejects_excess_fractional_digits() {
        assert!(parse_token_amount("0.0000000001", 9).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_token_amount("", 9).is_err());
        assert!(parse_token_amount(".", 9).is_err());
        assert!(parse_token_amount("-1", 9).is_err());
        assert!(parse_token_amount("1,5", 9).is_err());
        assert!(parse_token_amount("1e9", 9).is_err());
    }

    #[test]
    fn rejects_u64_overflow() {
        // u64::MAX is 18446744073709551615; one more whole token overflows.
        assert!(parse_token_amount("18446744073709551616", 0).is_err());
        assert!(parse_token_amount("18446744074", 9).is_err());
        assert_eq!(
            parse_token_amount("18446744073709551615", 0).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn formats_and_round_trips() {
        assert_eq!(format_token_amount(0, 9), "0");
        assert_eq!(format_token_amount(1_500_000_000, 9), "1.5");
        assert_eq!(format_token_amount(1_000_000_001, 9), "1.000000001");
        assert_eq!(format_token_amount(42, 0), "42");

        for (input, decimals) in [("0", 9u8), ("1", 9), ("0.5", 9), ("123.456", 6)] {
            let units = parse_token_amount(input, decimals).unwrap();
            assert_eq!(
                parse_token_amount(&format_token_amount(units, decimals), decimals).unwrap(),
                units
            );
        }
    }
}
