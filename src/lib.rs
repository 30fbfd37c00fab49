//! mp-dash - Static dashboard generator for missing-persons case analytics
//!
//! This library fetches precomputed analytics about missing-persons case
//! reports from a backend API and renders them as a self-contained HTML
//! dashboard with Chart.js.
//!
//! # Features
//!
//! - Concurrent batch fetch of all analytics endpoints
//! - Per-chart reshaping: anomaly flags, bucket ordering, demographic pivots
//! - Snapshot save/load for offline re-rendering
//! - HTML dashboard generation with per-chart failure states
//!
//! # Example
//!
//! ```no_run
//! use mp_dash::api::AnalyticsClient;
//! use mp_dash::html::{self, DashboardConfig};
//!
//! # async fn run() -> mp_dash::Result<()> {
//! let client = AnalyticsClient::new("http://localhost:3001")?;
//! let snapshot = client.fetch_all().await?;
//!
//! let config = DashboardConfig::default();
//! html::write_dashboard(&snapshot, &config, std::path::Path::new("."))?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod data;
pub mod error;
pub mod html;
pub mod transform;

pub use error::{Error, Result};
