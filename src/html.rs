//! HTML dashboard generator with Chart.js

use crate::data::AnalyticsSnapshot;
use crate::error::Result;
use crate::transform;
use minijinja::{context, Environment};
use serde::Serialize;
use std::path::Path;

/// HTML template for the analytics dashboard
const DASHBOARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <style>
        :root {
            --bg-primary: #0d1117;
            --bg-secondary: #161b22;
            --bg-tertiary: #21262d;
            --text-primary: #c9d1d9;
            --text-secondary: #8b949e;
            --text-muted: #6e7681;
            --border-color: #30363d;
            --accent-blue: #58a6ff;
            --accent-green: #3fb950;
            --accent-red: #f85149;
            --accent-orange: #d29922;
        }

        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
            min-height: 100vh;
        }

        .container {
            max-width: 1200px;
            margin: 0 auto;
            padding: 2rem;
        }

        header {
            text-align: center;
            margin-bottom: 3rem;
            padding: 2rem;
            background: linear-gradient(135deg, var(--bg-secondary) 0%, var(--bg-tertiary) 100%);
            border-radius: 16px;
            border: 1px solid var(--border-color);
        }

        h1 {
            font-size: 2.25rem;
            font-weight: 600;
            color: var(--text-primary);
            margin-bottom: 0.5rem;
        }

        .subtitle {
            color: var(--text-secondary);
            font-size: 1.1rem;
        }

        .fetched-at {
            color: var(--text-muted);
            font-size: 0.9rem;
            margin-top: 1rem;
        }

        .kpi-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
            gap: 1rem;
            margin-bottom: 2rem;
        }

        .kpi-card {
            background: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 12px;
            padding: 1.5rem;
            text-align: center;
        }

        .kpi-value {
            font-size: 2rem;
            font-weight: 700;
        }

        .kpi-value.blue { color: var(--accent-blue); }
        .kpi-value.green { color: var(--accent-green); }
        .kpi-value.orange { color: var(--accent-orange); }

        .kpi-label {
            color: var(--text-secondary);
            font-size: 0.9rem;
            margin-top: 0.25rem;
        }

        .chart-card {
            background: var(--bg-secondary);
            border: 1px solid var(--border-color);
            border-radius: 12px;
            margin-bottom: 2rem;
            overflow: hidden;
        }

        .chart-header {
            padding: 1.25rem 1.5rem;
            background: var(--bg-tertiary);
            border-bottom: 1px solid var(--border-color);
            display: flex;
            justify-content: space-between;
            align-items: center;
        }

        .chart-header h2 {
            font-size: 1.25rem;
            font-weight: 600;
            color: var(--text-primary);
        }

        .chart-stats {
            display: flex;
            gap: 1rem;
        }

        .stat {
            padding: 0.25rem 0.75rem;
            background: var(--bg-primary);
            border-radius: 20px;
            font-size: 0.85rem;
            color: var(--text-secondary);
        }

        .stat-value {
            font-weight: 600;
            color: var(--accent-blue);
        }

        .chart-container {
            padding: 1.5rem;
            height: 380px;
            position: relative;
        }

        .demo-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(460px, 1fr));
            gap: 2rem;
        }

        .demo-grid .chart-card {
            margin-bottom: 0;
        }

        .bucket-list {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
            gap: 0.5rem;
            padding: 0 1.5rem 1rem;
            font-size: 0.9rem;
        }

        .bucket-name {
            font-weight: 600;
        }

        .footnote {
            padding: 0 1.5rem 1.25rem;
            color: var(--text-muted);
            font-size: 0.8rem;
        }

        .load-error {
            padding: 2.5rem 1.5rem;
            text-align: center;
            color: var(--accent-red);
        }

        footer {
            text-align: center;
            padding: 2rem;
            color: var(--text-muted);
            font-size: 0.9rem;
        }

        @media (max-width: 768px) {
            .container {
                padding: 1rem;
            }

            h1 {
                font-size: 1.6rem;
            }

            .chart-header {
                flex-direction: column;
                gap: 1rem;
            }

            .chart-container {
                height: 300px;
            }
        }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>{{ title }}</h1>
            <p class="subtitle">Missing persons case report analytics</p>
            {% if fetched_at %}
            <p class="fetched-at">Fetched: {{ fetched_at }}</p>
            {% endif %}
        </header>

        {% if kpi %}
        <div class="kpi-grid">
            <div class="kpi-card">
                <div class="kpi-value blue">{{ kpi.total_reports }}</div>
                <div class="kpi-label">Total Reports</div>
            </div>
            <div class="kpi-card">
                <div class="kpi-value green">{{ kpi.median_days_missing }} days</div>
                <div class="kpi-label">Median Days Missing</div>
            </div>
            <div class="kpi-card">
                <div class="kpi-value orange">{{ kpi.pct_still_missing }}%</div>
                <div class="kpi-label">Still Missing</div>
            </div>
        </div>
        {% else %}
        <div class="chart-card">
            <p class="load-error">Failed to load KPI data</p>
        </div>
        {% endif %}

        <div class="chart-card">
            <div class="chart-header">
                <h2>Monthly Reports with Anomaly Detection</h2>
                {% if monthly %}
                <div class="chart-stats">
                    <span class="stat"><span class="stat-value">{{ monthly.labels | length }}</span> months</span>
                    <span class="stat"><span class="stat-value">{{ monthly.anomaly_count }}</span> anomalies</span>
                </div>
                {% endif %}
            </div>
            {% if monthly %}
            <div class="chart-container">
                <canvas id="chart-monthly"></canvas>
            </div>
            <p class="footnote">Red markers indicate anomalous months (z-score of 2 or beyond, in either direction)</p>
            {% else %}
            <p class="load-error">Failed to load monthly reports data</p>
            {% endif %}
        </div>

        <div class="chart-card">
            <div class="chart-header">
                <h2>Time to Located Distribution</h2>
            </div>
            {% if histogram %}
            <div class="chart-container">
                <canvas id="chart-histogram"></canvas>
            </div>
            <div class="bucket-list">
                {% for row in histogram.rows %}
                <div><span class="bucket-name">{{ row.bucket }}:</span> {{ row.count }} ({{ row.pct }}%)</div>
                {% endfor %}
            </div>
            <p class="footnote">
                Still Missing: person not yet found (no located date but a valid last seen date).
                Unknown/Invalid: last seen date missing, or located date before last seen date.
            </p>
            {% else %}
            <p class="load-error">Failed to load time to located data</p>
            {% endif %}
        </div>

        <div class="demo-grid">
            {% for section in demographics %}
            <div class="chart-card">
                <div class="chart-header">
                    <h2>{{ section.title }}</h2>
                </div>
                {% if section.loaded %}
                <div class="chart-container">
                    <canvas id="chart-{{ section.id }}"></canvas>
                </div>
                {% else %}
                <p class="load-error">Failed to load {{ section.title | lower }} data</p>
                {% endif %}
            </div>
            {% endfor %}
        </div>

        {% if located_loaded %}
        <div class="chart-card" style="margin-top: 2rem;">
            <div class="chart-header">
                <h2>Time to Located by Demographic</h2>
            </div>
            <div class="chart-container">
                <canvas id="chart-located"></canvas>
            </div>
            <p class="footnote">
                Each bar totals one time-to-located bucket, divided by demographic group.
            </p>
        </div>
        {% endif %}

        <footer>
            <p>Generated by mp-dash</p>
        </footer>
    </div>

    <script>
        window.DASHBOARD_DATA = {{ charts_json | safe }};

        document.addEventListener('DOMContentLoaded', function() {
            const data = window.DASHBOARD_DATA;
            const gridColor = '#30363d';
            const tickColor = '#8b949e';
            const legendColor = '#c9d1d9';

            const baseScales = function(stackedX, stackedY) {
                return {
                    x: {
                        stacked: stackedX,
                        grid: { color: gridColor },
                        ticks: { color: tickColor, maxRotation: 45, minRotation: 0 }
                    },
                    y: {
                        stacked: stackedY,
                        beginAtZero: true,
                        grid: { color: gridColor },
                        ticks: { color: tickColor }
                    }
                };
            };

            if (data.monthly) {
                const m = data.monthly;
                new Chart(document.getElementById('chart-monthly'), {
                    type: 'line',
                    data: {
                        labels: m.labels,
                        datasets: [
                            {
                                label: 'Reports',
                                data: m.reports,
                                borderColor: '#2563eb',
                                backgroundColor: '#2563eb33',
                                borderWidth: 2,
                                tension: 0.3,
                                pointRadius: m.point_radii,
                                pointHoverRadius: 6,
                                pointBackgroundColor: m.point_colors,
                                pointBorderColor: m.point_colors
                            },
                            {
                                label: '12-mo Average',
                                data: m.mean,
                                borderColor: '#16a34a',
                                borderWidth: 2,
                                borderDash: [5, 5],
                                tension: 0.3,
                                pointRadius: 0
                            }
                        ]
                    },
                    options: {
                        responsive: true,
                        maintainAspectRatio: false,
                        interaction: { mode: 'index', intersect: false },
                        plugins: {
                            legend: { position: 'top', labels: { color: legendColor, usePointStyle: true } },
                            tooltip: {
                                callbacks: {
                                    title: function(items) {
                                        return 'Date: ' + m.tooltips[items[0].dataIndex];
                                    }
                                }
                            }
                        },
                        scales: baseScales(false, false)
                    }
                });
            }

            if (data.histogram) {
                const h = data.histogram;
                new Chart(document.getElementById('chart-histogram'), {
                    type: 'bar',
                    data: {
                        labels: h.labels,
                        datasets: [{
                            data: h.counts,
                            backgroundColor: h.colors,
                            borderRadius: 4
                        }]
                    },
                    options: {
                        responsive: true,
                        maintainAspectRatio: false,
                        plugins: {
                            legend: { display: false },
                            tooltip: {
                                callbacks: {
                                    title: function(items) {
                                        return h.long_labels[items[0].dataIndex];
                                    },
                                    label: function(item) {
                                        return item.parsed.y.toLocaleString() +
                                            ' (' + h.pcts[item.dataIndex] + '%)';
                                    }
                                }
                            }
                        },
                        scales: baseScales(false, false)
                    }
                });
            }

            for (const chart of data.stacked) {
                const canvas = document.getElementById('chart-' + chart.id);
                if (!canvas) continue;

                const area = chart.kind === 'area';
                new Chart(canvas, {
                    type: area ? 'line' : 'bar',
                    data: {
                        labels: chart.labels,
                        datasets: chart.series.map(function(s) {
                            if (area) {
                                return {
                                    label: s.name,
                                    data: s.values,
                                    borderColor: s.color,
                                    backgroundColor: s.color + '99',
                                    fill: true,
                                    tension: 0.3,
                                    pointRadius: 0
                                };
                            }
                            return {
                                label: s.name,
                                data: s.values,
                                backgroundColor: s.color,
                                stack: 'total'
                            };
                        })
                    },
                    options: {
                        responsive: true,
                        maintainAspectRatio: false,
                        interaction: { mode: 'index', intersect: false },
                        plugins: {
                            legend: { position: 'top', labels: { color: legendColor } },
                            tooltip: {
                                callbacks: {
                                    title: function(items) {
                                        const label = chart.tooltips[items[0].dataIndex];
                                        return area ? 'Date: ' + label : label;
                                    }
                                }
                            }
                        },
                        scales: baseScales(!area, true)
                    }
                });
            }
        });
    </script>
</body>
</html>
"#;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Title for the dashboard
    pub title: String,
    /// Path to output directory
    pub output_dir: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Missing Persons Analytics".to_string(),
            output_dir: "dist".to_string(),
        }
    }
}

/// Categories and palette for one demographics chart
struct DemographicSpec {
    id: &'static str,
    title: &'static str,
    categories: &'static [&'static str],
    colors: &'static [&'static str],
}

const DEMOGRAPHIC_SPECS: [DemographicSpec; 3] = [
    DemographicSpec {
        id: "misstype",
        title: "Demographics by Missing Type",
        categories: &["Adult", "Juvenile", "Unknown"],
        colors: &["#3b82f6", "#10b981", "#6b7280"],
    },
    DemographicSpec {
        id: "sex",
        title: "Demographics by Sex",
        categories: &["Male", "Female", "Unknown"],
        colors: &["#3b82f6", "#ec4899", "#6b7280"],
    },
    DemographicSpec {
        id: "race",
        title: "Demographics by Race",
        categories: &[
            "White",
            "Black",
            "Asian / Pacific Islander",
            "American Indian / Alaskan Native",
            "Unknown",
        ],
        colors: &["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#6b7280"],
    },
];

/// Palette for the located-by-demographic stack; categories cycle through it
const LOCATED_COLORS: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#6b7280"];

/// KPI scalars, formatted for display
#[derive(Debug, Clone, Serialize)]
struct KpiView {
    total_reports: String,
    median_days_missing: String,
    pct_still_missing: String,
}

/// Monthly trend chart data for the inline script
#[derive(Debug, Clone, Serialize)]
struct MonthlyView {
    labels: Vec<String>,
    tooltips: Vec<String>,
    reports: Vec<u64>,
    mean: Vec<f64>,
    point_radii: Vec<u32>,
    point_colors: Vec<&'static str>,
    anomaly_count: usize,
}

/// Histogram chart data plus the per-bucket rows listed below it
#[derive(Debug, Clone, Serialize)]
struct HistogramView {
    labels: Vec<String>,
    long_labels: Vec<String>,
    counts: Vec<u64>,
    pcts: Vec<f64>,
    colors: Vec<&'static str>,
    rows: Vec<HistogramRowView>,
}

#[derive(Debug, Clone, Serialize)]
struct HistogramRowView {
    bucket: String,
    count: String,
    pct: String,
}

/// One stacked chart (area or bar) for the inline script
#[derive(Debug, Clone, Serialize)]
struct StackedChartView {
    id: String,
    kind: &'static str,
    labels: Vec<String>,
    tooltips: Vec<String>,
    series: Vec<SeriesView>,
}

#[derive(Debug, Clone, Serialize)]
struct SeriesView {
    name: String,
    color: String,
    values: Vec<f64>,
}

/// Section descriptor for template rendering
#[derive(Debug, Clone, Serialize)]
struct ChartSection {
    id: String,
    title: String,
    loaded: bool,
}

/// Everything the inline Chart.js script consumes
#[derive(Debug, Clone, Serialize)]
struct ChartsData {
    monthly: Option<MonthlyView>,
    histogram: Option<HistogramView>,
    stacked: Vec<StackedChartView>,
}

fn monthly_view(rows: &[crate::data::MonthlyReportRow]) -> MonthlyView {
    let points = transform::monthly_series(rows);
    let anomaly_count = points.iter().filter(|p| p.is_anomaly).count();

    let mut view = MonthlyView {
        labels: Vec::with_capacity(points.len()),
        tooltips: Vec::with_capacity(points.len()),
        reports: Vec::with_capacity(points.len()),
        mean: Vec::with_capacity(points.len()),
        point_radii: Vec::with_capacity(points.len()),
        point_colors: Vec::with_capacity(points.len()),
        anomaly_count,
    };

    for point in points {
        view.labels.push(point.date);
        view.tooltips.push(point.tooltip_date);
        view.reports.push(point.reports);
        view.mean.push(point.mean_12mo);
        // anomalous points get a visible red marker; the rest stay hidden
        view.point_radii.push(if point.is_anomaly { 4 } else { 0 });
        view.point_colors
            .push(if point.is_anomaly { "#ef4444" } else { "#2563eb" });
    }

    view
}

fn histogram_view(rows: &[crate::data::TimeToLocatedRow]) -> HistogramView {
    let bars = transform::histogram_bars(rows);

    let mut view = HistogramView {
        labels: Vec::with_capacity(bars.len()),
        long_labels: Vec::with_capacity(bars.len()),
        counts: Vec::with_capacity(bars.len()),
        pcts: Vec::with_capacity(bars.len()),
        colors: Vec::with_capacity(bars.len()),
        rows: Vec::with_capacity(bars.len()),
    };

    for bar in bars {
        view.rows.push(HistogramRowView {
            bucket: bar.bucket.clone(),
            count: format_thousands(bar.count),
            pct: format_scalar(bar.pct_of_total),
        });
        view.labels.push(bar.bucket);
        view.long_labels.push(bar.label);
        view.counts.push(bar.count);
        view.pcts.push(bar.pct_of_total);
        view.colors.push(bar.color);
    }

    view
}

/// Generate the HTML dashboard
pub fn generate_dashboard(snapshot: &AnalyticsSnapshot, config: &DashboardConfig) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("dashboard", DASHBOARD_TEMPLATE)?;

    let template = env.get_template("dashboard")?;

    let kpi = snapshot.kpi.as_ref().map(|k| KpiView {
        total_reports: format_thousands(k.total_reports),
        median_days_missing: format_scalar(k.median_days_missing),
        pct_still_missing: format_scalar(k.pct_still_missing),
    });

    let monthly = snapshot.monthly.as_deref().map(monthly_view);
    let histogram = snapshot.time_to_located.as_deref().map(histogram_view);

    let mut stacked = Vec::new();
    let mut demographics = Vec::new();
    for spec in &DEMOGRAPHIC_SPECS {
        let rows = match spec.id {
            "misstype" => snapshot.misstype.as_deref(),
            "sex" => snapshot.sex.as_deref(),
            _ => snapshot.race.as_deref(),
        };

        demographics.push(ChartSection {
            id: spec.id.to_string(),
            title: spec.title.to_string(),
            loaded: rows.is_some(),
        });

        if let Some(rows) = rows {
            let area = transform::demographic_series(rows, spec.categories);
            stacked.push(StackedChartView {
                id: spec.id.to_string(),
                kind: "area",
                labels: area.dates,
                tooltips: area.tooltip_dates,
                series: area
                    .series
                    .into_iter()
                    .enumerate()
                    .map(|(i, s)| SeriesView {
                        name: s.name,
                        color: spec.colors[i % spec.colors.len()].to_string(),
                        values: s.values,
                    })
                    .collect(),
            });
        }
    }

    let located_loaded = snapshot.located_breakdown.is_some();
    if let Some(rows) = snapshot.located_breakdown.as_deref() {
        let bars = transform::located_by_demographic(rows);
        stacked.push(StackedChartView {
            id: "located".to_string(),
            kind: "bar",
            tooltips: bars
                .buckets
                .iter()
                .map(|b| transform::bucket_label(b).to_string())
                .collect(),
            labels: bars.buckets,
            series: bars
                .series
                .into_iter()
                .enumerate()
                .map(|(i, s)| SeriesView {
                    name: s.name,
                    color: LOCATED_COLORS[i % LOCATED_COLORS.len()].to_string(),
                    values: s.values,
                })
                .collect(),
        });
    }

    let fetched_at = snapshot
        .fetched_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    let charts_json = serde_json::to_string(&ChartsData {
        monthly: monthly.clone(),
        histogram: histogram.clone(),
        stacked,
    })?;

    let html = template.render(context! {
        title => &config.title,
        fetched_at => fetched_at,
        kpi => kpi,
        monthly => monthly,
        histogram => histogram,
        demographics => demographics,
        located_loaded => located_loaded,
        charts_json => charts_json,
    })?;

    Ok(html)
}

/// Write the dashboard to a directory
pub fn write_dashboard(
    snapshot: &AnalyticsSnapshot,
    config: &DashboardConfig,
    base_path: &Path,
) -> Result<()> {
    let output_dir = base_path.join(&config.output_dir);
    std::fs::create_dir_all(&output_dir)?;

    let html = generate_dashboard(snapshot, config)?;
    let index_path = output_dir.join("index.html");

    std::fs::write(&index_path, html)?;

    // Also write the raw snapshot as JSON
    let data_path = output_dir.join("data.json");
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(&data_path, json)?;

    Ok(())
}

/// Format an integer with thousands separators (e.g. 22731 -> "22,731")
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a scalar, dropping the fraction when it is whole
pub fn format_scalar(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{KpiSummary, MonthlyReportRow, TimeToLocatedRow};
    use pretty_assertions::assert_eq;

    fn populated_snapshot() -> AnalyticsSnapshot {
        let mut snapshot = AnalyticsSnapshot::empty();
        snapshot.kpi = Some(KpiSummary {
            total_reports: 22731,
            median_days_missing: 2.0,
            pct_still_missing: 3.4,
        });
        snapshot.monthly = Some(vec![MonthlyReportRow {
            mon: "2024-01-01".to_string(),
            reports: 10,
            ma_6mo: None,
            ma_12mo: None,
            mean_12mo: 8.0,
            sd_12mo: 1.0,
            zscore_12mo: Some(2.5),
        }]);
        snapshot.time_to_located = Some(vec![TimeToLocatedRow {
            bucket: "0-1d".to_string(),
            count: 12000,
            pct_of_total: 52.8,
        }]);
        snapshot
    }

    #[test]
    fn test_generate_dashboard_empty() {
        let snapshot = AnalyticsSnapshot::empty();
        let config = DashboardConfig::default();

        let html = generate_dashboard(&snapshot, &config).unwrap();
        assert!(html.contains("Failed to load KPI data"));
        assert!(html.contains("Failed to load monthly reports data"));
        assert!(html.contains("Failed to load time to located data"));
        assert!(html.contains("Failed to load demographics by sex data"));
    }

    #[test]
    fn test_generate_dashboard_with_data() {
        let config = DashboardConfig {
            title: "Test Dashboard".to_string(),
            ..Default::default()
        };

        let html = generate_dashboard(&populated_snapshot(), &config).unwrap();
        assert!(html.contains("Test Dashboard"));
        assert!(html.contains("22,731"));
        assert!(html.contains("chart-monthly"));
        assert!(html.contains("chart-histogram"));
        assert!(html.contains("12,000"));
        assert!(html.contains("(52.8%)"));
        // demographic slots never populated still render their failure state
        assert!(html.contains("Failed to load demographics by race data"));
    }

    #[test]
    fn test_end_to_end_monthly_values_in_output() {
        let html =
            generate_dashboard(&populated_snapshot(), &DashboardConfig::default()).unwrap();
        // one anomalous month at z-score 2.5, raw value 10
        assert!(html.contains("\"reports\":[10]"));
        assert!(html.contains("\"anomaly_count\":1"));
    }

    #[test]
    fn test_write_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::default();

        write_dashboard(&AnalyticsSnapshot::empty(), &config, dir.path()).unwrap();

        assert!(dir.path().join("dist").join("index.html").exists());
        assert!(dir.path().join("dist").join("data.json").exists());
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(22731), "22,731");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_scalar() {
        assert_eq!(format_scalar(2.0), "2");
        assert_eq!(format_scalar(3.4), "3.4");
        assert_eq!(format_scalar(0.0), "0");
    }
}
