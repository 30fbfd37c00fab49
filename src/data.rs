//! Wire types for the analytics API and the on-disk snapshot store
//!
//! The backend serves pre-aggregated rows; some deployments serialize
//! numeric columns as strings. All of that tolerance lives here, at the
//! deserialization boundary: counts accept `"42"` and `42` alike, and
//! demographic field names are reduced to one canonical form so the chart
//! layer never has to guess a naming convention.

use chrono::{DateTime, Utc};
use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// KPI summary scalars
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiSummary {
    /// Total number of case reports
    #[serde(deserialize_with = "de_count")]
    pub total_reports: u64,
    /// Median days missing across located cases
    #[serde(deserialize_with = "de_f64")]
    pub median_days_missing: f64,
    /// Percentage of cases still missing
    #[serde(deserialize_with = "de_f64")]
    pub pct_still_missing: f64,
}

/// One month of report counts with trailing statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyReportRow {
    /// Month key, first of month as an ISO date (e.g. "2024-01-01")
    pub mon: String,
    /// Raw report count for the month
    #[serde(deserialize_with = "de_count")]
    pub reports: u64,
    /// Trailing 6-month moving average, when the backend provides it
    #[serde(default, deserialize_with = "de_opt_f64", skip_serializing_if = "Option::is_none")]
    pub ma_6mo: Option<f64>,
    /// Trailing 12-month moving average, when the backend provides it
    #[serde(default, deserialize_with = "de_opt_f64", skip_serializing_if = "Option::is_none")]
    pub ma_12mo: Option<f64>,
    /// Trailing 12-month mean
    #[serde(deserialize_with = "de_f64")]
    pub mean_12mo: f64,
    /// Trailing 12-month standard deviation
    #[serde(deserialize_with = "de_f64")]
    pub sd_12mo: f64,
    /// Z-score against the trailing window; null with insufficient history
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub zscore_12mo: Option<f64>,
}

/// One time-to-located histogram bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeToLocatedRow {
    /// Bucket label ("0-1d" .. "90+d", "Still Missing", "Unknown/Invalid")
    pub bucket: String,
    #[serde(deserialize_with = "de_count")]
    pub count: u64,
    #[serde(deserialize_with = "de_f64")]
    pub pct_of_total: f64,
}

/// One month of demographic counts; the category columns vary by dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemographicRow {
    /// Month key, first of month as an ISO date
    pub mon: String,
    /// Category columns as received; see [`DemographicRow::normalized_values`]
    #[serde(flatten)]
    pub values: BTreeMap<String, serde_json::Value>,
}

impl DemographicRow {
    /// Coerced copy of the category fields, keyed by canonical name.
    ///
    /// Strings parse as base-10 integers (float fallback); numbers pass
    /// through. Values that coerce to nothing count as 0 and are logged.
    pub fn normalized_values(&self) -> BTreeMap<String, f64> {
        let mut out = BTreeMap::new();
        for (name, value) in &self.values {
            let n = match coerce_number(value) {
                Some(n) => n,
                None => {
                    warn!(field = %name, month = %self.mon, "non-numeric demographic value, using 0");
                    0.0
                }
            };
            out.insert(normalize_key(name), n);
        }
        out
    }
}

/// One flat (bucket, category, count) row of the time-to-located breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocatedDemographicRow {
    pub bucket: String,
    /// Demographic category; the wire name varies by dataset
    #[serde(alias = "misstype_category", alias = "sex_category", alias = "race_category")]
    pub category: String,
    #[serde(deserialize_with = "de_count")]
    pub count: u64,
}

/// One fetched batch of every chart dataset.
///
/// Each slot is `None` until its endpoint resolves; a batch failure leaves
/// every slot empty, which the renderer surfaces as per-chart failure
/// states.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AnalyticsSnapshot {
    /// When the batch was fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    pub kpi: Option<KpiSummary>,
    pub monthly: Option<Vec<MonthlyReportRow>>,
    pub time_to_located: Option<Vec<TimeToLocatedRow>>,
    pub misstype: Option<Vec<DemographicRow>>,
    pub sex: Option<Vec<DemographicRow>>,
    pub race: Option<Vec<DemographicRow>>,
    /// Opt-in extra dataset, outside the default batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub located_breakdown: Option<Vec<LocatedDemographicRow>>,
}

impl AnalyticsSnapshot {
    /// Create a snapshot with every slot empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no endpoint ever delivered data
    pub fn is_empty(&self) -> bool {
        self.kpi.is_none()
            && self.monthly.is_none()
            && self.time_to_located.is_none()
            && self.misstype.is_none()
            && self.sex.is_none()
            && self.race.is_none()
            && self.located_breakdown.is_none()
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| crate::error::Error::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?;

        let snapshot: Self = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Save the snapshot to a JSON file
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| crate::error::Error::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| crate::error::Error::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }
}

/// Canonical form for demographic field names and category labels:
/// lowercase, runs of non-alphanumeric characters collapsed to `_`.
///
/// Both wire column names and display labels pass through here, so lookups
/// agree no matter which convention an endpoint uses.
pub fn normalize_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

fn coerce_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(|v| v as f64)
                .ok()
                .or_else(|| s.parse::<f64>().ok())
        }
        _ => None,
    }
}

/// Helper for numeric fields that some backends serialize as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeNum {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MaybeNum {
    fn into_count<E: DeError>(self) -> std::result::Result<u64, E> {
        match self {
            MaybeNum::Int(v) if v >= 0 => Ok(v as u64),
            MaybeNum::Int(v) => Err(E::custom(format!("negative count: {}", v))),
            MaybeNum::Float(v) if v >= 0.0 => Ok(v as u64),
            MaybeNum::Float(v) => Err(E::custom(format!("negative count: {}", v))),
            MaybeNum::Text(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| E::custom(format!("invalid count: {:?}", s))),
        }
    }

    fn into_f64<E: DeError>(self) -> std::result::Result<f64, E> {
        match self {
            MaybeNum::Int(v) => Ok(v as f64),
            MaybeNum::Float(v) => Ok(v),
            MaybeNum::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid number: {:?}", s))),
        }
    }
}

fn de_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    MaybeNum::deserialize(deserializer)?.into_count()
}

fn de_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    MaybeNum::deserialize(deserializer)?.into_f64()
}

fn de_opt_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<MaybeNum>::deserialize(deserializer)?
        .map(MaybeNum::into_f64)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_count_accepts_string_and_number() {
        let from_str: TimeToLocatedRow =
            serde_json::from_value(json!({"bucket": "0-1d", "count": "42", "pct_of_total": 10.5}))
                .unwrap();
        let from_num: TimeToLocatedRow =
            serde_json::from_value(json!({"bucket": "0-1d", "count": 42, "pct_of_total": 10.5}))
                .unwrap();
        assert_eq!(from_str.count, 42);
        assert_eq!(from_str, from_num);
    }

    #[test]
    fn test_count_rejects_garbage() {
        let row: std::result::Result<TimeToLocatedRow, _> =
            serde_json::from_value(json!({"bucket": "0-1d", "count": "n/a", "pct_of_total": 0}));
        assert!(row.is_err());
    }

    #[test]
    fn test_monthly_row_nullable_zscore() {
        let row: MonthlyReportRow = serde_json::from_value(json!({
            "mon": "2016-03-01",
            "reports": 12,
            "mean_12mo": 10.0,
            "sd_12mo": 2.0,
            "zscore_12mo": null
        }))
        .unwrap();
        assert_eq!(row.zscore_12mo, None);
        assert_eq!(row.ma_6mo, None);
    }

    #[test]
    fn test_monthly_row_stringly_numerics() {
        let row: MonthlyReportRow = serde_json::from_value(json!({
            "mon": "2024-01-01",
            "reports": "10",
            "mean_12mo": "8",
            "sd_12mo": "1",
            "zscore_12mo": "2.5"
        }))
        .unwrap();
        assert_eq!(row.reports, 10);
        assert_eq!(row.mean_12mo, 8.0);
        assert_eq!(row.zscore_12mo, Some(2.5));
    }

    #[test]
    fn test_located_row_category_aliases() {
        let by_race: LocatedDemographicRow = serde_json::from_value(
            json!({"bucket": "0-1d", "race_category": "White", "count": "12"}),
        )
        .unwrap();
        let by_sex: LocatedDemographicRow =
            serde_json::from_value(json!({"bucket": "0-1d", "sex_category": "Male", "count": 3}))
                .unwrap();
        assert_eq!(by_race.category, "White");
        assert_eq!(by_race.count, 12);
        assert_eq!(by_sex.category, "Male");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Adult"), "adult");
        assert_eq!(
            normalize_key("Asian / Pacific Islander"),
            "asian_pacific_islander"
        );
        assert_eq!(
            normalize_key("american_indian_alaskan_native"),
            "american_indian_alaskan_native"
        );
        assert_eq!(normalize_key("  Unknown  "), "unknown");
    }

    #[test]
    fn test_demographic_row_normalized_values() {
        let row: DemographicRow = serde_json::from_value(json!({
            "mon": "2024-01-01",
            "Adult": "25",
            "Juvenile": 13,
            "Unknown": "bad"
        }))
        .unwrap();

        let values = row.normalized_values();
        assert_eq!(values.get("adult"), Some(&25.0));
        assert_eq!(values.get("juvenile"), Some(&13.0));
        // unparseable coerces to 0 rather than dropping the field
        assert_eq!(values.get("unknown"), Some(&0.0));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let mut snapshot = AnalyticsSnapshot::empty();
        snapshot.kpi = Some(KpiSummary {
            total_reports: 22731,
            median_days_missing: 2.0,
            pct_still_missing: 3.4,
        });
        snapshot.save_to_file(&path).unwrap();

        let loaded = AnalyticsSnapshot::load_from_file(&path).unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!loaded.is_empty());
    }

    #[test]
    fn test_snapshot_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = AnalyticsSnapshot::load_from_file(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(AnalyticsSnapshot::empty().is_empty());
    }
}
