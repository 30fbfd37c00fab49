//! Per-chart reshaping of aggregated analytics rows
//!
//! Every function here is a pure, single-pass mapping from wire rows to the
//! record shape one chart renders. Nothing is mutated after receipt; each
//! chart owns its transformed copy.

use crate::data::{normalize_key, DemographicRow, LocatedDemographicRow, MonthlyReportRow, TimeToLocatedRow};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Z-score magnitude at or above which a month is flagged anomalous
pub const ANOMALY_THRESHOLD: f64 = 2.0;

/// Fixed display order for time-to-located buckets
pub const BUCKET_ORDER: [&str; 7] = [
    "0-1d",
    "2-7d",
    "8-20d",
    "21-89d",
    "90+d",
    "Still Missing",
    "Unknown/Invalid",
];

/// Whether a month's z-score crosses the anomaly threshold.
/// A null z-score (insufficient history) is never anomalous.
pub fn is_anomalous(zscore: Option<f64>) -> bool {
    zscore.map(|z| z.abs() >= ANOMALY_THRESHOLD).unwrap_or(false)
}

/// Bar color for a histogram bucket; unrecognized buckets share a default
pub fn bucket_color(bucket: &str) -> &'static str {
    match bucket {
        "0-1d" => "#10b981",
        "2-7d" => "#3b82f6",
        "8-20d" => "#f59e0b",
        "21-89d" => "#f97316",
        "90+d" => "#ef4444",
        "Still Missing" => "#dc2626",
        _ => "#6b7280",
    }
}

/// Long-form bucket label for tooltips
pub fn bucket_label(bucket: &str) -> &str {
    match bucket {
        "0-1d" => "0 to 1 day",
        "2-7d" => "2 to 7 days",
        "8-20d" => "8 to 20 days",
        "21-89d" => "21 to 89 days",
        "90+d" => "90+ days",
        _ => bucket,
    }
}

/// Short axis label and full tooltip label for an ISO month key.
/// Unparseable keys fall back to the raw string for both.
fn month_labels(mon: &str) -> (String, String) {
    match NaiveDate::parse_from_str(mon, "%Y-%m-%d") {
        Ok(date) => (
            date.format("%b %y").to_string(),
            date.format("%b %-d, %Y").to_string(),
        ),
        Err(_) => (mon.to_string(), mon.to_string()),
    }
}

/// One month on the trend chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyPoint {
    /// Short axis label (e.g. "Jan 24")
    pub date: String,
    /// Full tooltip label (e.g. "Jan 1, 2024")
    pub tooltip_date: String,
    pub reports: u64,
    pub mean_12mo: f64,
    pub is_anomaly: bool,
}

/// Derive trend-chart points from monthly rows, in arrival order
pub fn monthly_series(rows: &[MonthlyReportRow]) -> Vec<MonthlyPoint> {
    rows.iter()
        .map(|row| {
            let (date, tooltip_date) = month_labels(&row.mon);
            MonthlyPoint {
                date,
                tooltip_date,
                reports: row.reports,
                mean_12mo: row.mean_12mo,
                is_anomaly: is_anomalous(row.zscore_12mo),
            }
        })
        .collect()
}

/// One histogram bar, in arrival order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistogramBar {
    pub bucket: String,
    /// Long-form label for tooltips
    pub label: String,
    pub count: u64,
    pub pct_of_total: f64,
    pub color: &'static str,
}

/// Attach display labels and colors to histogram rows.
/// Rows keep the order they arrived in; they are never resorted.
pub fn histogram_bars(rows: &[TimeToLocatedRow]) -> Vec<HistogramBar> {
    rows.iter()
        .map(|row| HistogramBar {
            bucket: row.bucket.clone(),
            label: bucket_label(&row.bucket).to_string(),
            count: row.count,
            pct_of_total: row.pct_of_total,
            color: bucket_color(&row.bucket),
        })
        .collect()
}

/// One named series of values aligned with a shared axis
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StackedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Stacked-area data: one aligned series per demographic category
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct StackedArea {
    pub dates: Vec<String>,
    pub tooltip_dates: Vec<String>,
    pub series: Vec<StackedSeries>,
}

/// Pivot per-month demographic rows into one aligned series per category.
///
/// Categories are looked up by canonical key, so the lookup matches
/// whichever naming convention the endpoint used. A month missing a
/// category contributes 0 to that series.
pub fn demographic_series(rows: &[DemographicRow], categories: &[&str]) -> StackedArea {
    let mut area = StackedArea::default();

    let normalized: Vec<_> = rows.iter().map(DemographicRow::normalized_values).collect();
    for row in rows {
        let (date, tooltip_date) = month_labels(&row.mon);
        area.dates.push(date);
        area.tooltip_dates.push(tooltip_date);
    }

    for category in categories {
        let key = normalize_key(category);
        let values = normalized
            .iter()
            .map(|month| month.get(&key).copied().unwrap_or(0.0))
            .collect();
        area.series.push(StackedSeries {
            name: category.to_string(),
            values,
        });
    }

    area
}

/// Stacked-bar data: one series per category across the ordered buckets
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct StackedBars {
    pub buckets: Vec<String>,
    pub series: Vec<StackedSeries>,
}

/// Group flat (bucket, category, count) rows into stacked bars.
///
/// Counts sum per (bucket, category). Output buckets follow [`BUCKET_ORDER`],
/// dropping buckets absent from the input; a category absent for a present
/// bucket contributes a 0 segment rather than being omitted. Categories keep
/// first-seen order; an empty category label counts as "Unknown".
pub fn located_by_demographic(rows: &[LocatedDemographicRow]) -> StackedBars {
    let mut totals: HashMap<(&str, &str), u64> = HashMap::new();
    let mut categories: Vec<&str> = Vec::new();

    for row in rows {
        let category = if row.category.is_empty() {
            "Unknown"
        } else {
            row.category.as_str()
        };
        if !categories.contains(&category) {
            categories.push(category);
        }
        *totals.entry((row.bucket.as_str(), category)).or_default() += row.count;
    }

    let buckets: Vec<String> = BUCKET_ORDER
        .iter()
        .filter(|bucket| rows.iter().any(|row| row.bucket == **bucket))
        .map(|bucket| bucket.to_string())
        .collect();

    let series = categories
        .iter()
        .map(|&category| StackedSeries {
            name: category.to_string(),
            values: buckets
                .iter()
                .map(|bucket| {
                    totals
                        .get(&(bucket.as_str(), category))
                        .copied()
                        .unwrap_or(0) as f64
                })
                .collect(),
        })
        .collect();

    StackedBars { buckets, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn located_row(bucket: &str, category: &str, count: u64) -> LocatedDemographicRow {
        LocatedDemographicRow {
            bucket: bucket.to_string(),
            category: category.to_string(),
            count,
        }
    }

    #[test]
    fn test_anomaly_threshold() {
        assert!(!is_anomalous(None));
        assert!(is_anomalous(Some(2.0)));
        assert!(is_anomalous(Some(2.5)));
        assert!(is_anomalous(Some(-2.0)));
        assert!(is_anomalous(Some(-3.1)));
        assert!(!is_anomalous(Some(1.99)));
        assert!(!is_anomalous(Some(0.0)));
    }

    #[test]
    fn test_monthly_series_end_to_end() {
        let rows = vec![MonthlyReportRow {
            mon: "2024-01-01".to_string(),
            reports: 10,
            ma_6mo: None,
            ma_12mo: None,
            mean_12mo: 8.0,
            sd_12mo: 1.0,
            zscore_12mo: Some(2.5),
        }];

        let series = monthly_series(&rows);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].reports, 10);
        assert_eq!(series[0].date, "Jan 24");
        assert_eq!(series[0].tooltip_date, "Jan 1, 2024");
        assert!(series[0].is_anomaly);
    }

    #[test]
    fn test_monthly_series_null_zscore_not_anomalous() {
        let rows = vec![MonthlyReportRow {
            mon: "2016-02-01".to_string(),
            reports: 4,
            ma_6mo: None,
            ma_12mo: None,
            mean_12mo: 0.0,
            sd_12mo: 0.0,
            zscore_12mo: None,
        }];

        assert!(!monthly_series(&rows)[0].is_anomaly);
    }

    #[test]
    fn test_month_labels_fall_back_to_raw() {
        let (date, tooltip) = month_labels("not-a-date");
        assert_eq!(date, "not-a-date");
        assert_eq!(tooltip, "not-a-date");
    }

    #[test]
    fn test_histogram_bars_keep_arrival_order() {
        let rows = vec![
            TimeToLocatedRow {
                bucket: "90+d".to_string(),
                count: 5,
                pct_of_total: 1.0,
            },
            TimeToLocatedRow {
                bucket: "0-1d".to_string(),
                count: 100,
                pct_of_total: 50.0,
            },
        ];

        let bars = histogram_bars(&rows);
        assert_eq!(bars[0].bucket, "90+d");
        assert_eq!(bars[0].color, "#ef4444");
        assert_eq!(bars[1].bucket, "0-1d");
        assert_eq!(bars[1].color, "#10b981");
    }

    #[test]
    fn test_histogram_default_color_and_label() {
        let rows = vec![TimeToLocatedRow {
            bucket: "mystery".to_string(),
            count: 1,
            pct_of_total: 0.1,
        }];

        let bars = histogram_bars(&rows);
        assert_eq!(bars[0].color, "#6b7280");
        assert_eq!(bars[0].label, "mystery");
    }

    #[test]
    fn test_demographic_series_matches_by_canonical_key() {
        let rows: Vec<DemographicRow> = serde_json::from_value(json!([
            {"mon": "2024-01-01", "Adult": "25", "Juvenile": 13},
            {"mon": "2024-02-01", "adult": 30}
        ]))
        .unwrap();

        let area = demographic_series(&rows, &["Adult", "Juvenile", "Unknown"]);
        assert_eq!(area.dates, vec!["Jan 24", "Feb 24"]);
        assert_eq!(area.series.len(), 3);
        assert_eq!(area.series[0].name, "Adult");
        assert_eq!(area.series[0].values, vec![25.0, 30.0]);
        assert_eq!(area.series[1].values, vec![13.0, 0.0]);
        // category never present in the data stays a flat zero series
        assert_eq!(area.series[2].values, vec![0.0, 0.0]);
    }

    #[test]
    fn test_located_sums_duplicate_keys() {
        let rows = vec![
            located_row("0-1d", "White", 3),
            located_row("0-1d", "White", 4),
        ];

        let bars = located_by_demographic(&rows);
        assert_eq!(bars.buckets, vec!["0-1d"]);
        assert_eq!(bars.series.len(), 1);
        assert_eq!(bars.series[0].values, vec![7.0]);
    }

    #[test]
    fn test_located_bucket_order_imposed() {
        // arrival order deliberately scrambled and by descending count
        let rows = vec![
            located_row("Still Missing", "Male", 500),
            located_row("0-1d", "Male", 90),
            located_row("8-20d", "Male", 300),
        ];

        let bars = located_by_demographic(&rows);
        assert_eq!(bars.buckets, vec!["0-1d", "8-20d", "Still Missing"]);
        assert_eq!(bars.series[0].values, vec![90.0, 300.0, 500.0]);
    }

    #[test]
    fn test_located_missing_category_defaults_to_zero() {
        let rows = vec![
            located_row("0-1d", "Male", 10),
            located_row("0-1d", "Female", 12),
            located_row("2-7d", "Male", 5),
        ];

        let bars = located_by_demographic(&rows);
        let female = bars.series.iter().find(|s| s.name == "Female").unwrap();
        assert_eq!(female.values, vec![12.0, 0.0]);
    }

    #[test]
    fn test_located_unrecognized_bucket_dropped() {
        let rows = vec![
            located_row("0-1d", "Male", 1),
            located_row("1-2y", "Male", 9),
        ];

        let bars = located_by_demographic(&rows);
        assert_eq!(bars.buckets, vec!["0-1d"]);
    }

    #[test]
    fn test_located_empty_category_becomes_unknown() {
        let rows = vec![located_row("0-1d", "", 2)];

        let bars = located_by_demographic(&rows);
        assert_eq!(bars.series[0].name, "Unknown");
        assert_eq!(bars.series[0].values, vec![2.0]);
    }

    #[test]
    fn test_located_empty_input() {
        let bars = located_by_demographic(&[]);
        assert!(bars.buckets.is_empty());
        assert!(bars.series.is_empty());
    }
}
