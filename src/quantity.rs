//! # Quantity Formatting Module
//!
//! The display formatting rule for scaled amounts. It is deliberately a
//! pure, locale-independent function: the bilingual tables must show the
//! same number in both languages, and tests pin the exact output.

/// Format an amount for display.
///
/// Integral values render without a decimal point, fractional values
/// render to exactly one decimal place with half-away-from-zero rounding:
/// `2.0` → `"2"`, `1.5` → `"1.5"`, `2.25` → `"2.3"`.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values_have_no_decimal_point() {
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(10.0), "10");
        assert_eq!(format_quantity(144.0), "144");
    }

    #[test]
    fn test_fractional_values_have_one_decimal_place() {
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.3), "0.3");
        assert_eq!(format_quantity(12.75), "12.8");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_quantity(2.25), "2.3");
        assert_eq!(format_quantity(2.35), "2.4");
    }

    #[test]
    fn test_near_integral_keeps_decimal() {
        // 1.999 is not integral, so the one-decimal rule applies.
        assert_eq!(format_quantity(1.999), "2.0");
        assert_eq!(format_quantity(0.04), "0.0");
    }
}
