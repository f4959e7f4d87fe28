// ═══════════════════════════════════════════════════════════════════
// Model Tests — holdings, day records, composition rows, settings,
// chart toggles, viewport
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::BTreeMap;

use tti_core::errors::CoreError;
use tti_core::models::chart::{palette_color, ChartMode, ChartToggles, ChartView, PALETTE};
use tti_core::models::composition::CompositionRow;
use tti_core::models::day::DayRecord;
use tti_core::models::holding::AssetHolding;
use tti_core::models::rebalance::RebalanceRecord;
use tti_core::models::settings::PageSettings;
use tti_core::models::viewport::{DisplayMode, ViewportObserver};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn holding(component: &str, weight: f64, tokens: f64, price: f64) -> AssetHolding {
    AssetHolding {
        component: component.into(),
        id: component.to_lowercase(),
        weight,
        tokens,
        price,
        sp: None,
    }
}

// ═══════════════════════════════════════════════════════════════════
// AssetHolding
// ═══════════════════════════════════════════════════════════════════

mod asset_holding {
    use super::*;

    #[test]
    fn value_is_tokens_times_price() {
        assert_eq!(holding("Aave", 0.5, 4.0, 25.0).value(), 100.0);
    }

    #[test]
    fn deserializes_dataset_shape() {
        let json = r#"{"component":"Uniswap","id":"uniswap","weight":0.25,
                       "tokens":10.0,"price":5.0,"sp":0.031}"#;
        let h: AssetHolding = serde_json::from_str(json).unwrap();
        assert_eq!(h.component, "Uniswap");
        assert_eq!(h.id, "uniswap");
        assert_eq!(h.sp, Some(0.031));
        assert_eq!(h.value(), 50.0);
    }

    #[test]
    fn sp_is_optional() {
        let json = r#"{"component":"Aave","id":"aave","weight":1,"tokens":1,"price":1}"#;
        let h: AssetHolding = serde_json::from_str(json).unwrap();
        assert_eq!(h.sp, None);
    }

    #[test]
    fn validate_accepts_domain_bounds() {
        assert!(holding("A", 0.0, 0.0, 0.0).validate("2021-01-01").is_ok());
        assert!(holding("A", 1.0, 5.0, 2.0).validate("2021-01-01").is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_weight() {
        let err = holding("A", 1.2, 1.0, 1.0).validate("2021-01-01").unwrap_err();
        assert!(matches!(err, CoreError::MalformedData { ref day, .. } if day == "2021-01-01"));
    }

    #[test]
    fn validate_rejects_negative_tokens_and_price() {
        assert!(holding("A", 0.5, -1.0, 1.0).validate("d").is_err());
        assert!(holding("A", 0.5, 1.0, -1.0).validate("d").is_err());
        assert!(holding("A", 0.5, f64::NAN, 1.0).validate("d").is_err());
    }

    #[test]
    fn validate_rejects_empty_names() {
        assert!(holding(" ", 0.5, 1.0, 1.0).validate("d").is_err());
        let mut h = holding("A", 0.5, 1.0, 1.0);
        h.id.clear();
        assert!(h.validate("d").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// DayRecord
// ═══════════════════════════════════════════════════════════════════

mod day_record {
    use super::*;

    fn record() -> DayRecord {
        DayRecord {
            day: date("2021-02-01"),
            label: "Feb 1".into(),
            value: 120.0,
            holdings: vec![holding("A", 0.6, 2.0, 36.0), holding("B", 0.4, 4.0, 12.0)],
        }
    }

    #[test]
    fn day_key_is_canonical() {
        assert_eq!(record().day_key(), "2021-02-01");
    }

    #[test]
    fn holdings_value_and_weight() {
        let r = record();
        assert_eq!(r.holdings_value(), 120.0);
        assert!((r.total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn serializes_day_as_iso_string() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["day"], "2021-02-01");
        assert_eq!(json["label"], "Feb 1");
    }
}

// ═══════════════════════════════════════════════════════════════════
// CompositionRow
// ═══════════════════════════════════════════════════════════════════

mod composition_row {
    use super::*;

    fn row() -> CompositionRow {
        let mut values = BTreeMap::new();
        values.insert("Aave".to_string(), 60.0);
        values.insert("Uniswap".to_string(), 40.0);
        CompositionRow {
            day: date("2021-01-01"),
            label: "Jan 1".into(),
            values,
        }
    }

    #[test]
    fn serializes_flattened() {
        let json = serde_json::to_value(row()).unwrap();
        assert_eq!(json["day"], "2021-01-01");
        assert_eq!(json["label"], "Jan 1");
        assert_eq!(json["Aave"], 60.0);
        assert_eq!(json["Uniswap"], 40.0);
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn absent_asset_reads_as_zero() {
        let r = row();
        assert_eq!(r.get("Compound"), None);
        assert_eq!(r.value_or_zero("Compound"), 0.0);
        assert_eq!(r.value_or_zero("Aave"), 60.0);
    }

    #[test]
    fn total_sums_present_assets() {
        assert_eq!(row().total(), 100.0);
    }

    #[test]
    fn empty_row_has_only_day_and_label() {
        let r = CompositionRow {
            day: date("2021-01-02"),
            label: "Jan 2".into(),
            values: BTreeMap::new(),
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 2);
        assert_eq!(r.total(), 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// RebalanceRecord
// ═══════════════════════════════════════════════════════════════════

#[test]
fn rebalance_column_follows_average() {
    let mut record = RebalanceRecord {
        as_of: date("2021-02-01"),
        holdings: vec![],
        total_value: 0.0,
        total_weight_post: 1.0,
        avg_abs_rebalance: None,
    };
    assert!(!record.shows_rebalance());
    record.avg_abs_rebalance = Some(0.02);
    assert!(record.shows_rebalance());
}

// ═══════════════════════════════════════════════════════════════════
// PageSettings
// ═══════════════════════════════════════════════════════════════════

mod page_settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = PageSettings::default();
        assert_eq!(s.launch_date, date("2021-01-01"));
        assert_eq!(s.comparison_epoch_ms, 1_609_459_200_000);
        assert_eq!(s.page_size, 3);
        assert_eq!(s.mobile_breakpoint_px, 720);
        assert_eq!(s.comparison.coin_id, "defipulse-index");
        assert_eq!(s.comparison.display_name, "DPI");
    }

    #[test]
    fn epoch_matches_launch_midnight_utc() {
        let s = PageSettings::default();
        let epoch = s.comparison_epoch();
        assert_eq!(epoch.date_naive(), s.launch_date);
        assert_eq!(epoch.timestamp(), 1_609_459_200);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let s: PageSettings =
            serde_json::from_str(r#"{"page_size":5,"comparison":{"coin_id":"index-coop"}}"#).unwrap();
        assert_eq!(s.page_size, 5);
        assert_eq!(s.comparison.coin_id, "index-coop");
        assert_eq!(s.comparison.vs_currency, "usd");
        assert_eq!(s.launch_date, date("2021-01-01"));
    }

    #[test]
    fn project_link_appends_tracking() {
        assert_eq!(
            PageSettings::default().project_link("aave"),
            "https://www.tokenterminal.com/terminal/projects/aave?utm_source=index"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// Chart models
// ═══════════════════════════════════════════════════════════════════

mod chart_models {
    use super::*;

    #[test]
    fn palette_wraps_before_last_entry() {
        assert_eq!(palette_color(0), PALETTE[0]);
        assert_eq!(palette_color(12), PALETTE[12]);
        assert_eq!(palette_color(13), PALETTE[0]);
        assert_eq!(palette_color(14), PALETTE[1]);
    }

    #[test]
    fn toggles_start_in_line_mode() {
        let t = ChartToggles::default();
        assert_eq!(t.mode(), ChartMode::Line);
        assert!(t.composition_enabled());
        assert!(!t.comparison_enabled(false));
        assert!(t.comparison_enabled(true));
    }

    #[test]
    fn composition_disables_comparison() {
        let mut t = ChartToggles::default();
        assert!(t.set_composition(true));
        assert_eq!(t.mode(), ChartMode::Composition);
        assert!(!t.set_comparison(true, true));
        assert!(!t.comparison);
    }

    #[test]
    fn comparison_disables_composition() {
        let mut t = ChartToggles::default();
        assert!(t.set_comparison(true, true));
        assert!(!t.set_composition(true));
        assert_eq!(t.mode(), ChartMode::Line);
        assert!(t.set_comparison(false, true));
        assert!(t.set_composition(true));
    }

    #[test]
    fn switching_off_is_always_accepted() {
        let mut t = ChartToggles::default();
        assert!(t.set_comparison(true, true));
        assert!(t.set_comparison(false, false));
        assert!(!t.comparison);
        assert!(t.set_composition(true));
        assert!(t.set_composition(false));
        assert_eq!(t.mode(), ChartMode::Line);
    }

    #[test]
    fn comparison_needs_series() {
        let mut t = ChartToggles::default();
        assert!(!t.set_comparison(true, false));
        assert!(!t.comparison);
    }

    #[test]
    fn chart_view_loading_serializes_with_state_tag() {
        let view: ChartView<u32> = ChartView::Loading;
        assert!(view.is_loading());
        assert_eq!(serde_json::to_value(&view).unwrap()["state"], "loading");
        let ready = ChartView::Ready(7u32);
        assert_eq!(serde_json::to_value(&ready).unwrap()["data"], 7);
        assert_eq!(ready.ready(), Some(7));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Viewport
// ═══════════════════════════════════════════════════════════════════

mod viewport {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        let v = ViewportObserver::new(720);
        assert_eq!(v.classify(720), DisplayMode::Mobile);
        assert_eq!(v.classify(721), DisplayMode::Desktop);
    }

    #[test]
    fn observe_reports_only_switches() {
        let mut v = ViewportObserver::new(720);
        assert_eq!(v.mode(), DisplayMode::Desktop);
        assert!(!v.observe(1280));
        assert!(v.observe(375));
        assert!(v.is_mobile());
        assert!(!v.observe(400));
        assert!(v.observe(1024));
        assert!(!v.is_mobile());
    }

    #[test]
    fn breakpoint_from_settings() {
        let settings = PageSettings {
            mobile_breakpoint_px: 1024,
            ..PageSettings::default()
        };
        let v = ViewportObserver::from_settings(&settings);
        assert_eq!(v.breakpoint_px(), 1024);
        assert_eq!(v.classify(900), DisplayMode::Mobile);
        assert_eq!(ViewportObserver::from_settings(&PageSettings::default()).breakpoint_px(), 720);
    }

    #[test]
    fn layout_hints() {
        assert_eq!(DisplayMode::Mobile.axis_font_size(), 9);
        assert_eq!(DisplayMode::Desktop.axis_font_size(), 12);
        assert_eq!(DisplayMode::Mobile.chart_height(), 250);
        assert_eq!(DisplayMode::Desktop.chart_height(), 500);
        assert_eq!(DisplayMode::Mobile.chart_margin().left, 0);
        assert_eq!(DisplayMode::Desktop.chart_margin().left, 25);
    }
}
