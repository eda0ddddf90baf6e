//! Static Chart Renderer
//! Writes the dashboard charts as PNG files with plotters.
//!
//! Layout per file:
//! 1. Preference charts: title, one bar per canonical party in ranking order
//! 2. Approval chart: title, donut with label and percentage per non-empty rating

use super::palette::{approval_rgb, party_rgb};
use crate::data::PartyQuestion;
use crate::stats::{AggregateResult, ApprovalDistribution, PreferenceRanking};
use log::info;
use plotters::element::Pie;
use plotters::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BAR_SIZE: (u32, u32) = (1200, 700);
const DONUT_SIZE: (u32, u32) = (800, 800);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Plot(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn plot_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Plot(e.to_string())
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// The three charts of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticChart {
    Preference1,
    Preference2,
    Approval,
}

impl StaticChart {
    pub const ALL: [StaticChart; 3] = [
        StaticChart::Preference1,
        StaticChart::Preference2,
        StaticChart::Approval,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            StaticChart::Preference1 => "preferencia_partido1.png",
            StaticChart::Preference2 => "preferencia_partido2.png",
            StaticChart::Approval => "calificacion_gobierno.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StaticChart::Preference1 => "Preferencia de Partido Político",
            StaticChart::Preference2 => "Segunda Preferencia de Partido Político",
            StaticChart::Approval => "Calificación al Gobierno",
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render every chart into `dir`, one file each, in parallel.
    pub fn render_dashboard_pngs(
        result: &AggregateResult,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, RenderError> {
        std::fs::create_dir_all(dir)?;

        let charts: &[StaticChart] = &StaticChart::ALL;
        let paths = charts
            .par_iter()
            .map(|chart| {
                let path = dir.join(chart.file_name());
                match chart {
                    StaticChart::Preference1 => {
                        Self::render_preference_chart(&result.preference_1, chart.title(), &path)?
                    }
                    StaticChart::Preference2 => {
                        Self::render_preference_chart(&result.preference_2, chart.title(), &path)?
                    }
                    StaticChart::Approval => {
                        Self::render_approval_donut(&result.approval, chart.title(), &path)?
                    }
                }
                info!("Rendered {}", path.display());
                Ok::<PathBuf, RenderError>(path)
            })
            .collect::<Result<Vec<PathBuf>, RenderError>>()?;

        Ok(paths)
    }

    pub fn render_preference_chart(
        ranking: &PreferenceRanking,
        title: &str,
        path: &Path,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, BAR_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let labels: Vec<String> = ranking.rows.iter().map(|r| r.party.clone()).collect();
        let max = ranking.rows.iter().map(|r| r.count).max().unwrap_or(0);
        let y_max = max + max / 10 + 1;
        let x_desc = match ranking.question {
            PartyQuestion::First => "Respuesta",
            PartyQuestion::Second => "Partido",
        };

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(60)
            .build_cartesian_2d((0..labels.len()).into_segmented(), 0u64..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc(x_desc)
            .y_desc("Total")
            .label_style(("sans-serif", 16))
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(ranking.rows.iter().enumerate().map(|(i, row)| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0),
                        (SegmentValue::Exact(i + 1), row.count),
                    ],
                    rgb(party_rgb(&row.party)).filled(),
                );
                bar.set_margin(0, 0, 10, 10);
                bar
            }))
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;
        Ok(())
    }

    pub fn render_approval_donut(
        approval: &ApprovalDistribution,
        title: &str,
        path: &Path,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, DONUT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        let area = root.titled(title, ("sans-serif", 30)).map_err(plot_err)?;

        let (w, h) = area.dim_in_pixel();
        let center = ((w / 2) as i32, (h / 2) as i32);

        let slices: Vec<_> = approval.buckets.iter().filter(|b| b.count > 0).collect();
        if slices.is_empty() {
            area.draw(&Text::new(
                "Sin respuestas",
                (center.0 - 80, center.1),
                ("sans-serif", 28).into_font(),
            ))
            .map_err(plot_err)?;
            root.present().map_err(plot_err)?;
            return Ok(());
        }

        let radius = f64::from(w.min(h)) * 0.38;
        let sizes: Vec<f64> = slices.iter().map(|b| b.count as f64).collect();
        let colors: Vec<RGBColor> = slices.iter().map(|b| rgb(approval_rgb(&b.rating))).collect();
        let labels: Vec<String> = slices.iter().map(|b| b.rating.clone()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.donut_hole(radius * 0.6);
        pie.label_style(("sans-serif", 20).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 18).into_font().color(&BLACK));
        area.draw(&pie).map_err(plot_err)?;

        root.present().map_err(plot_err)?;
        Ok(())
    }
}
