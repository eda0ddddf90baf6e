//! Encuestas Dashboard binary: dashboard window or headless JSON report.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use encuestas_dashboard::charts::StaticChartRenderer;
use encuestas_dashboard::config::Args;
use encuestas_dashboard::data::{write_summary_csv, DataLoader, SurveyRecord};
use encuestas_dashboard::gui::DashboardApp;
use encuestas_dashboard::stats::{AggregateResult, Aggregator};
use log::{info, warn};
use serde::Serialize;

/// JSON document printed by `--report`.
#[derive(Serialize)]
struct Report<'a> {
    filter: String,
    record_count: u64,
    #[serde(flatten)]
    result: &'a AggregateResult,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();
    args.validate()?;

    let mut loader = DataLoader::new();
    loader
        .load_csv(&args.csv)
        .with_context(|| format!("Cannot load survey data from {}", args.csv.display()))?;

    if args.report {
        run_report(&args, loader.records())
    } else {
        run_dashboard(args, loader)
    }
}

/// Headless mode: aggregate once, print JSON, optionally write the CSV and PNGs.
fn run_report(args: &Args, records: &[SurveyRecord]) -> Result<()> {
    let Some(result) = Aggregator::refresh(records, &args.date) else {
        warn!("Nothing to report for {}", args.date.label());
        return Ok(());
    };

    let report = Report {
        filter: args.date.to_string(),
        record_count: result.summary.total(),
        result: &result,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(path) = &args.summary_out {
        write_summary_csv(&result.summary, path)
            .with_context(|| format!("Cannot write {}", path.display()))?;
    }

    if let Some(dir) = &args.charts_dir {
        let written = StaticChartRenderer::render_dashboard_pngs(&result, dir)
            .with_context(|| format!("Cannot render charts into {}", dir.display()))?;
        info!("{} charts written to {}", written.len(), dir.display());
    }

    Ok(())
}

fn run_dashboard(args: Args, loader: DataLoader) -> Result<()> {
    let csv_path = args.csv.clone();
    let dropped_rows = loader.dropped_rows();
    let records = loader.into_records();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Encuestas Heraldo — Partidos Políticos"),
        ..Default::default()
    };

    eframe::run_native(
        "Encuestas Dashboard",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                records,
                csv_path,
                dropped_rows,
                args.date,
            )))
        }),
    )
    .map_err(|e| anyhow!("Dashboard window failed: {e}"))
}
