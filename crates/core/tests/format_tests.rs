// ═══════════════════════════════════════════════════════════════════
// Format Tests — price/number/percentage/chart/tooltip labels, dates
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use tti_core::errors::CoreError;
use tti_core::format::{
    format_day_label, label_for_chart, label_for_number, label_for_percentage, label_for_price,
    label_for_tooltip, month_name, parse_day_key, to_percent, PLACEHOLDER,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

mod price_label {
    use super::*;

    #[test]
    fn zero_is_placeholder() {
        assert_eq!(label_for_price(Some(0.0)), "-");
    }

    #[test]
    fn missing_is_placeholder() {
        assert_eq!(label_for_price(None), PLACEHOLDER);
    }

    #[test]
    fn nan_and_infinity_are_placeholders() {
        assert_eq!(label_for_price(Some(f64::NAN)), "-");
        assert_eq!(label_for_price(Some(f64::INFINITY)), "-");
    }

    #[test]
    fn millions() {
        assert_eq!(label_for_price(Some(1_234_567.0)), "$1.23m");
    }

    #[test]
    fn thousands_and_billions() {
        assert_eq!(label_for_price(Some(12_346.0)), "$12.35k");
        assert_eq!(label_for_price(Some(3_400_000_000.0)), "$3.40b");
        assert_eq!(label_for_price(Some(2_000_000_000_000.0)), "$2.00t");
    }

    #[test]
    fn rounding_moves_to_next_suffix() {
        assert_eq!(label_for_price(Some(999_999.0)), "$1.00m");
        assert_eq!(label_for_number(Some(999_999.0)), "1.00m");
        assert_eq!(label_for_chart(Some(999_990.0), None), "$1.0m");
    }

    #[test]
    fn below_one_thousand_has_no_suffix() {
        assert_eq!(label_for_price(Some(100.0)), "$100.00");
        assert_eq!(label_for_price(Some(0.5)), "$0.50");
    }
}

mod number_label {
    use super::*;

    #[test]
    fn compact_two_decimals() {
        assert_eq!(label_for_number(Some(1_500.0)), "1.50k");
    }

    #[test]
    fn sentinel_and_zero_are_placeholders() {
        assert_eq!(label_for_number(Some(-1.0)), "-");
        assert_eq!(label_for_number(Some(0.0)), "-");
        assert_eq!(label_for_number(None), "-");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(label_for_number(Some(-2_500_000.0)), "-2.50m");
    }
}

mod percentage_label {
    use super::*;

    #[test]
    fn negative_with_sign_flag() {
        assert_eq!(label_for_percentage(-3.456, true), "-3.46%");
    }

    #[test]
    fn positive_without_sign_flag() {
        assert_eq!(label_for_percentage(3.456, false), "3.46%");
    }

    #[test]
    fn positive_with_sign_flag() {
        assert_eq!(label_for_percentage(3.456, true), "+3.46%");
    }

    #[test]
    fn zero_never_gets_plus() {
        assert_eq!(label_for_percentage(0.0, true), "0.00%");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(label_for_percentage(1234.5, false), "1,234.50%");
    }

    #[test]
    fn nan_is_placeholder() {
        assert_eq!(label_for_percentage(f64::NAN, true), "-");
    }
}

mod chart_label {
    use super::*;

    #[test]
    fn price_axis_uses_dollar_and_one_decimal() {
        assert_eq!(label_for_chart(Some(1_260_000.0), Some("price")), "$1.3m");
        assert_eq!(label_for_chart(Some(1_260.0), None), "$1.3k");
    }

    #[test]
    fn ratio_axes_use_multiplier() {
        assert_eq!(label_for_chart(Some(12.0), Some("ps")), "12.0x");
        assert_eq!(label_for_chart(Some(3_000.0), Some("pe")), "3.0kx");
        assert_eq!(label_for_chart(Some(1.5), Some("ratio")), "1.5x");
    }

    #[test]
    fn zero_tick_is_rendered() {
        assert_eq!(label_for_chart(Some(0.0), None), "$0.0");
    }

    #[test]
    fn missing_is_placeholder() {
        assert_eq!(label_for_chart(None, Some("price")), "-");
        assert_eq!(label_for_chart(Some(f64::NAN), Some("ps")), "-");
    }
}

mod tooltip_label {
    use super::*;

    #[test]
    fn full_precision_with_grouping() {
        assert_eq!(label_for_tooltip(1_234_567.891), "$1,234,567.89");
        assert_eq!(label_for_tooltip(99.5), "$99.50");
    }

    #[test]
    fn nan_is_placeholder() {
        assert_eq!(label_for_tooltip(f64::NAN), "-");
    }
}

#[test]
fn to_percent_formats_fraction() {
    assert_eq!(to_percent(0.125, 1), "12.5%");
    assert_eq!(to_percent(0.5, 0), "50%");
    assert_eq!(to_percent(f64::NAN, 0), "-");
}

mod dates {
    use super::*;

    #[test]
    fn day_label_is_short_month_and_day() {
        assert_eq!(format_day_label(date("2021-01-01")), "Jan 1");
        assert_eq!(format_day_label(date("2021-11-23")), "Nov 23");
    }

    #[test]
    fn month_name_is_full() {
        assert_eq!(month_name(date("2021-01-01")), "January");
        assert_eq!(month_name(date("2021-09-01")), "September");
    }

    #[test]
    fn parse_accepts_canonical_keys() {
        assert_eq!(parse_day_key("2021-02-28").unwrap(), date("2021-02-28"));
    }

    #[test]
    fn parse_rejects_invalid_dates() {
        assert!(matches!(parse_day_key("2021-02-30"), Err(CoreError::InvalidDate(_))));
        assert!(matches!(parse_day_key("yesterday"), Err(CoreError::InvalidDate(_))));
        assert!(matches!(parse_day_key(""), Err(CoreError::InvalidDate(_))));
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        assert!(matches!(parse_day_key("2021-1-5"), Err(CoreError::InvalidDate(_))));
        assert!(matches!(
            parse_day_key("2021-01-05T00:00:00Z"),
            Err(CoreError::InvalidDate(_))
        ));
    }
}
