//! Conversions between smallest-unit integers and decimal display strings.

use crate::error::WalletError;

fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

/// Format a smallest-unit amount with `places` fractional digits, rounding
/// half up. `format_units(10u128.pow(18), 18, 4) == "1.0000"`.
pub fn format_units(raw: u128, decimals: u32, places: u32) -> String {
    let scaled = if decimals >= places {
        let divisor = pow10(decimals - places).unwrap_or(u128::MAX);
        let quotient = raw / divisor;
        let remainder = raw % divisor;
        // remainder >= divisor / 2 without overflowing
        if remainder >= divisor - remainder {
            quotient.saturating_add(1)
        } else {
            quotient
        }
    } else {
        raw.saturating_mul(pow10(places - decimals).unwrap_or(u128::MAX))
    };

    if places == 0 {
        return scaled.to_string();
    }
    let unit = pow10(places).unwrap_or(u128::MAX);
    format!(
        "{}.{:0width$}",
        scaled / unit,
        scaled % unit,
        width = places as usize
    )
}

/// Parse a decimal amount such as `"1.5"` into smallest units.
pub fn parse_units(amount: &str, decimals: u32) -> Result<u128, WalletError> {
    let invalid = || WalletError::InvalidAmount(amount.to_string());
    let trimmed = amount.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(invalid());
    }

    let unit = pow10(decimals).ok_or_else(invalid)?;
    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction_value: u128 = if fraction.is_empty() {
        0
    } else {
        let padding = pow10(decimals - fraction.len() as u32).ok_or_else(invalid)?;
        fraction
            .parse::<u128>()
            .map_err(|_| invalid())?
            .checked_mul(padding)
            .ok_or_else(invalid)?
    };

    whole
        .checked_mul(unit)
        .and_then(|w| w.checked_add(fraction_value))
        .ok_or_else(invalid)
}

/// Parse an Ethereum JSON-RPC quantity (`"0x1bc16d674ec80000"`).
pub fn parse_hex_quantity(value: &str) -> Option<u128> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))?;
    if digits.is_empty() {
        return Some(0);
    }
    u128::from_str_radix(digits, 16).ok()
}

/// Encode an integer as an Ethereum JSON-RPC quantity.
pub fn to_hex_quantity(value: u128) -> String {
    format!("{:#x}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn one_native_token_each_chain() {
        assert_eq!(format_units(1_000_000_000_000_000_000, 18, 4), "1.0000");
        assert_eq!(format_units(1_000_000, 6, 4), "1.0000");
        assert_eq!(format_units(1_000_000_000, 9, 4), "1.0000");
    }

    #[test]
    fn fractional_wei() {
        assert_eq!(format_units(1_500_000_000_000_000_000, 18, 4), "1.5000");
        assert_eq!(format_units(0, 18, 4), "0.0000");
        assert_eq!(format_units(123_456_789, 6, 4), "123.4568");
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(format_units(12_345_000, 9, 4), "0.0123");
        assert_eq!(format_units(12_350_000, 9, 4), "0.0124");
        assert_eq!(format_units(99_999, 6, 4), "0.1000");
    }

    #[test]
    fn fewer_decimals_than_places() {
        assert_eq!(format_units(15, 1, 4), "1.5000");
        assert_eq!(format_units(7, 0, 0), "7");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(
            parse_units("1.5", 18).unwrap(),
            1_500_000_000_000_000_000
        );
        assert_eq!(parse_units("2", 6).unwrap(), 2_000_000);
        assert_eq!(parse_units(".25", 9).unwrap(), 250_000_000);
        assert_eq!(parse_units(" 0.000001 ", 6).unwrap(), 1);
    }

    #[test]
    fn parse_units_rejects_bad_input() {
        for bad in ["", ".", "abc", "1.2.3", "-1", "1e18", "0.0000001"] {
            let err = parse_units(bad, 6).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidAmount, "input {:?}", bad);
        }
    }

    #[test]
    fn hex_quantities() {
        assert_eq!(
            parse_hex_quantity("0xde0b6b3a7640000"),
            Some(1_000_000_000_000_000_000)
        );
        assert_eq!(parse_hex_quantity("0x"), Some(0));
        assert_eq!(parse_hex_quantity("1234"), None);
        assert_eq!(parse_hex_quantity("0xzz"), None);
        assert_eq!(to_hex_quantity(1_500_000_000_000_000_000), "0x14d1120d7b160000");
        assert_eq!(to_hex_quantity(0), "0x0");
    }
}
