//! Property tests for timestamp conversion, rounding and classification

use proptest::prelude::*;
use std::collections::HashSet;
use tradingview_csv::datetime::to_datetime;
use tradingview_csv::formatter::round_to;
use tradingview_csv::{Cell, ColumnClassifier};

// 0001-01-01 00:00:00 through 9999-12-31 23:59:59
const MIN_EPOCH: i64 = -62_135_596_800;
const MAX_EPOCH: i64 = 253_402_300_799;

fn column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("time".to_string()),
        Just("TIME".to_string()),
        Just("open".to_string()),
        Just("Close".to_string()),
        Just("Bullish".to_string()),
        Just("Neo Lag".to_string()),
        Just("RZ S1 Band".to_string()),
        Just("@valuewhen".to_string()),
        "[A-Za-z][A-Za-z0-9 ]{0,12}",
    ]
}

fn unique_columns() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(column_name(), 0..12).prop_map(|names| {
        let mut seen = HashSet::new();
        names.into_iter().filter(|n| seen.insert(n.clone())).collect()
    })
}

fn is_datetime_text(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

proptest! {
    #[test]
    fn valid_epochs_render_fixed_width(secs in MIN_EPOCH..=MAX_EPOCH) {
        let text = to_datetime(&Cell::Number(secs as f64));
        prop_assert!(is_datetime_text(&text), "unexpected rendering: {}", text);
    }

    #[test]
    fn rendering_preserves_order(a in MIN_EPOCH..=MAX_EPOCH, b in MIN_EPOCH..=MAX_EPOCH) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_text = to_datetime(&Cell::Number(lo as f64));
        let hi_text = to_datetime(&Cell::Number(hi as f64));
        prop_assert!(lo_text <= hi_text);
    }

    #[test]
    fn out_of_range_epochs_are_flagged(secs in (MAX_EPOCH + 1)..i64::MAX / 2) {
        let text = to_datetime(&Cell::Number(secs as f64));
        prop_assert!(text.starts_with("Invalid timestamp: "));
    }

    #[test]
    fn rounding_is_idempotent(value in -1.0e6f64..1.0e6, places in 0u32..=6) {
        let once = round_to(value, places);
        prop_assert_eq!(round_to(once, places), once);
    }

    #[test]
    fn rounding_stays_within_half_unit(value in -1.0e6f64..1.0e6, places in 0u32..=6) {
        let unit = 10f64.powi(places as i32);
        let rounded = round_to(value, places);
        prop_assert!((rounded - value).abs() <= 0.5 / unit + 1e-9);
    }

    #[test]
    fn classification_partitions_columns(columns in unique_columns(), with_datetime in any::<bool>()) {
        let mut columns = columns;
        columns.retain(|name| name != "datetime");
        let datetime = if with_datetime {
            columns.insert(0, "datetime".to_string());
            Some("datetime")
        } else {
            None
        };

        let classification = ColumnClassifier::default().classify(&columns, datetime);

        let mut assigned: Vec<&str> = classification
            .iter()
            .flat_map(|group| group.columns.iter().map(String::as_str))
            .collect();
        let claimed_twice = assigned.len() != assigned.iter().collect::<HashSet<_>>().len();
        prop_assert!(!claimed_twice, "a column was claimed twice: {:?}", assigned);

        let mut expected: Vec<&str> = columns.iter().map(String::as_str).collect();
        if with_datetime && classification.get("OHLC").is_none() {
            // datetime only travels with the time-series group
            expected.retain(|name| *name != "datetime");
        }
        assigned.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(assigned, expected);

        prop_assert!(classification.iter().all(|group| !group.columns.is_empty()));
    }

    #[test]
    fn time_column_is_time_series_in_any_case(upper in prop::collection::vec(any::<bool>(), 4)) {
        let name: String = "time"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let classification = ColumnClassifier::default().classify(&[name.as_str(), "foo"], None);
        prop_assert_eq!(classification.get("OHLC").map(<[String]>::to_vec), Some(vec![name]));
    }
}
