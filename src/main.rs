//! mp-dash CLI - Dashboard generator for missing-persons case analytics
//!
//! Fetches precomputed analytics from a backend API and renders them as a
//! static HTML dashboard.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use mp_dash::{
    api::{AnalyticsClient, DemographicKind, DEFAULT_API_URL},
    data::AnalyticsSnapshot,
    html::{self, format_scalar, format_thousands, DashboardConfig},
    transform,
};

/// mp-dash: static dashboard generator for missing-persons case analytics
#[derive(Parser, Debug)]
#[command(name = "mp-dash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch analytics and write the HTML dashboard
    Render(RenderArgs),

    /// Fetch analytics and save the snapshot as JSON
    Fetch(FetchArgs),

    /// Write the HTML dashboard from a saved snapshot
    Dashboard(DashboardArgs),

    /// Print a text summary of the analytics
    Summary(SummaryArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Base URL of the analytics API
    #[arg(long, env = "ANALYTICS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Output directory for the dashboard
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Dashboard title
    #[arg(long, default_value = "Missing Persons Analytics")]
    title: String,

    /// Also fetch the time-to-located breakdown for this demographic
    /// (misstype, sex or race)
    #[arg(long, value_name = "KIND")]
    located_breakdown: Option<DemographicKind>,
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Base URL of the analytics API
    #[arg(long, env = "ANALYTICS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Path to the snapshot JSON file
    #[arg(long, default_value = "analytics-snapshot.json")]
    data_file: PathBuf,

    /// Also fetch the time-to-located breakdown for this demographic
    #[arg(long, value_name = "KIND")]
    located_breakdown: Option<DemographicKind>,
}

#[derive(Parser, Debug)]
struct DashboardArgs {
    /// Path to the snapshot JSON file
    #[arg(long, default_value = "analytics-snapshot.json")]
    data_file: PathBuf,

    /// Output directory for the dashboard
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Dashboard title
    #[arg(long, default_value = "Missing Persons Analytics")]
    title: String,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    /// Base URL of the analytics API
    #[arg(long, env = "ANALYTICS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Render(args) => render_command(args).await,
        Commands::Fetch(args) => fetch_command(args).await,
        Commands::Dashboard(args) => dashboard_command(args),
        Commands::Summary(args) => summary_command(args).await,
    }
}

/// Fetch the batch and write the dashboard.
///
/// A batch failure is absorbed here: the error is logged once and the
/// dashboard is still written, with every chart in its failure state.
async fn render_command(args: RenderArgs) -> Result<()> {
    info!("Rendering dashboard from {}", args.api_url);

    let client =
        AnalyticsClient::new(&args.api_url).with_context(|| "Failed to create API client")?;

    let mut snapshot = match client.fetch_all().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to fetch analytics batch: {}", e);
            AnalyticsSnapshot::empty()
        }
    };

    if let Some(kind) = args.located_breakdown {
        if snapshot.is_empty() {
            warn!("Skipping {} breakdown, batch fetch failed", kind);
        } else {
            match client.time_to_located_by_demographic(kind).await {
                Ok(rows) => snapshot.located_breakdown = Some(rows),
                Err(e) => warn!("Failed to fetch {} breakdown: {}", kind, e),
            }
        }
    }

    let config = DashboardConfig {
        title: args.title,
        output_dir: args.output_dir.to_string_lossy().to_string(),
    };

    let base_path = std::env::current_dir()?;
    html::write_dashboard(&snapshot, &config, &base_path)
        .with_context(|| "Failed to generate dashboard")?;

    info!(
        "Generated dashboard at {:?}",
        args.output_dir.join("index.html")
    );

    Ok(())
}

/// Fetch the batch and save the snapshot JSON
async fn fetch_command(args: FetchArgs) -> Result<()> {
    info!("Fetching analytics from {}", args.api_url);

    let client =
        AnalyticsClient::new(&args.api_url).with_context(|| "Failed to create API client")?;

    let mut snapshot = client
        .fetch_all()
        .await
        .with_context(|| "Failed to fetch analytics batch")?;

    if let Some(kind) = args.located_breakdown {
        snapshot.located_breakdown = Some(
            client
                .time_to_located_by_demographic(kind)
                .await
                .with_context(|| format!("Failed to fetch {} breakdown", kind))?,
        );
    }

    snapshot
        .save_to_file(&args.data_file)
        .with_context(|| "Failed to save snapshot")?;

    info!("Saved snapshot to {:?}", args.data_file);

    Ok(())
}

/// Write the dashboard from a saved snapshot
fn dashboard_command(args: DashboardArgs) -> Result<()> {
    let snapshot = AnalyticsSnapshot::load_from_file(&args.data_file)
        .with_context(|| "Failed to load snapshot")?;

    let config = DashboardConfig {
        title: args.title,
        output_dir: args.output_dir.to_string_lossy().to_string(),
    };

    let base_path = std::env::current_dir()?;
    html::write_dashboard(&snapshot, &config, &base_path)
        .with_context(|| "Failed to generate dashboard")?;

    info!(
        "Generated dashboard at {:?}",
        args.output_dir.join("index.html")
    );

    Ok(())
}

/// Print KPI scalars and the time-to-located table
async fn summary_command(args: SummaryArgs) -> Result<()> {
    let client =
        AnalyticsClient::new(&args.api_url).with_context(|| "Failed to create API client")?;

    let snapshot = client
        .fetch_all()
        .await
        .with_context(|| "Failed to fetch analytics batch")?;

    if let Some(kpi) = &snapshot.kpi {
        println!("Total reports:       {}", format_thousands(kpi.total_reports));
        println!(
            "Median days missing: {}",
            format_scalar(kpi.median_days_missing)
        );
        println!(
            "Still missing:       {}%",
            format_scalar(kpi.pct_still_missing)
        );
    }

    if let Some(rows) = &snapshot.time_to_located {
        println!();
        println!("Time to located:");
        for bar in transform::histogram_bars(rows) {
            println!(
                "  {:<16} {:>10} ({}%)",
                bar.bucket,
                format_thousands(bar.count),
                format_scalar(bar.pct_of_total)
            );
        }
    }

    if let Some(monthly) = &snapshot.monthly {
        let anomalies: Vec<_> = transform::monthly_series(monthly)
            .into_iter()
            .filter(|p| p.is_anomaly)
            .collect();

        println!();
        println!(
            "Months: {} ({} anomalous)",
            monthly.len(),
            anomalies.len()
        );
        for point in anomalies {
            println!("  {:<14} {} reports", point.tooltip_date, point.reports);
        }
    }

    Ok(())
}
