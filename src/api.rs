//! HTTP client for the analytics API
//!
//! Six read-only endpoints under one base URL. The whole batch is fetched
//! concurrently and succeeds or fails as a unit; callers decide whether to
//! surface the failure or render an empty dashboard.

use crate::data::{
    AnalyticsSnapshot, DemographicRow, KpiSummary, LocatedDemographicRow, MonthlyReportRow,
    TimeToLocatedRow,
};
use crate::error::{Error, Result};
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Default base URL when `ANALYTICS_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// The demographic datasets the backend aggregates by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemographicKind {
    Misstype,
    Sex,
    Race,
}

impl DemographicKind {
    /// Path segment used by the demographics endpoints
    pub fn as_str(&self) -> &'static str {
        match self {
            DemographicKind::Misstype => "misstype",
            DemographicKind::Sex => "sex",
            DemographicKind::Race => "race",
        }
    }
}

impl fmt::Display for DemographicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemographicKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "misstype" => Ok(DemographicKind::Misstype),
            "sex" => Ok(DemographicKind::Sex),
            "race" => Ok(DemographicKind::Race),
            other => Err(format!(
                "unknown demographic kind '{}' (expected misstype, sex or race)",
                other
            )),
        }
    }
}

/// Analytics API client
pub struct AnalyticsClient {
    client: reqwest::Client,
    api_base: String,
}

impl AnalyticsClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        // Validate early so a bad --api-url fails before any request fires
        url::Url::parse(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("mp-dash"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_base: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an analytics endpoint path
    fn url_for(&self, path: &str) -> String {
        format!("{}/api/analytics/{}", self.api_base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url_for(path);
        debug!(%url, "fetching analytics endpoint");

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::ApiError(format!("Request to {} failed: {}", url, e)))?;

        Ok(response.json().await?)
    }

    /// KPI summary scalars
    pub async fn kpi(&self) -> Result<KpiSummary> {
        self.get_json("kpi").await
    }

    /// Monthly report counts with trailing statistics and z-scores
    pub async fn monthly_reports_with_anomaly(&self) -> Result<Vec<MonthlyReportRow>> {
        self.get_json("monthly-reports-with-anomaly").await
    }

    /// Time-to-located histogram buckets
    pub async fn time_to_located_histogram(&self) -> Result<Vec<TimeToLocatedRow>> {
        self.get_json("time-to-located-histogram").await
    }

    /// Monthly demographic counts for one dataset
    pub async fn demographics(&self, kind: DemographicKind) -> Result<Vec<DemographicRow>> {
        self.get_json(&format!("demographics/{}", kind.as_str()))
            .await
    }

    /// Time-to-located counts broken down by one demographic dataset.
    /// Not part of the default batch; fetched on explicit opt-in.
    pub async fn time_to_located_by_demographic(
        &self,
        kind: DemographicKind,
    ) -> Result<Vec<LocatedDemographicRow>> {
        self.get_json(&format!("time-to-located-by-demographic/{}", kind.as_str()))
            .await
    }

    /// Fetch the whole batch concurrently.
    ///
    /// All six requests fire at once; the first failure fails the batch and
    /// no partial snapshot is returned.
    pub async fn fetch_all(&self) -> Result<AnalyticsSnapshot> {
        let (kpi, monthly, time_to_located, misstype, sex, race) = tokio::try_join!(
            self.kpi(),
            self.monthly_reports_with_anomaly(),
            self.time_to_located_histogram(),
            self.demographics(DemographicKind::Misstype),
            self.demographics(DemographicKind::Sex),
            self.demographics(DemographicKind::Race),
        )?;

        Ok(AnalyticsSnapshot {
            fetched_at: Some(Utc::now()),
            kpi: Some(kpi),
            monthly: Some(monthly),
            time_to_located: Some(time_to_located),
            misstype: Some(misstype),
            sex: Some(sex),
            race: Some(race),
            located_breakdown: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_url_for() {
        let client = AnalyticsClient::new("http://localhost:3001").unwrap();
        assert_eq!(
            client.url_for("kpi"),
            "http://localhost:3001/api/analytics/kpi"
        );
        assert_eq!(
            client.url_for("demographics/sex"),
            "http://localhost:3001/api/analytics/demographics/sex"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = AnalyticsClient::new("http://example.com/").unwrap();
        assert_eq!(
            client.url_for("time-to-located-histogram"),
            "http://example.com/api/analytics/time-to-located-histogram"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(AnalyticsClient::new("not a url").is_err());
    }

    #[test]
    fn test_demographic_kind_round_trip() {
        for kind in [
            DemographicKind::Misstype,
            DemographicKind::Sex,
            DemographicKind::Race,
        ] {
            assert_eq!(kind.as_str().parse::<DemographicKind>().unwrap(), kind);
        }
        assert!("age".parse::<DemographicKind>().is_err());
    }
}
