//! Chart Plotter Module
//! Interactive dashboard charts and tables drawn with egui_plot.

use super::palette::{approval_rgb, party_rgb};
use crate::stats::{ApprovalDistribution, CrossTab, PreferenceRanking, SummaryTable, TOTAL_LABEL};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, PlotPoints, Polygon, Text};
use std::f64::consts::{FRAC_PI_2, TAU};

const DONUT_OUTER: f64 = 1.0;
const DONUT_INNER: f64 = 0.6;
/// Max arc swept by one polygon; keeps every piece convex.
const DONUT_STEP: f64 = 0.05;

pub fn color32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draws the dashboard widgets.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bar chart of a preference ranking; bars keep the ranking order.
    pub fn draw_preference_chart(ui: &mut egui::Ui, id: &str, ranking: &PreferenceRanking) {
        let labels: Vec<String> = ranking.rows.iter().map(|r| r.party.clone()).collect();

        let bars: Vec<Bar> = ranking
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(i as f64, row.count as f64)
                    .width(0.7)
                    .name(&row.party)
                    .fill(color32(party_rgb(&row.party)))
            })
            .collect();

        Plot::new(id)
            .height(320.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .show_x(false)
            .x_axis_label("Partido")
            .y_axis_label("Total")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < f64::EPSILON && idx >= 0.0 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Donut chart of the approval scale with percentage labels.
    pub fn draw_approval_donut(ui: &mut egui::Ui, approval: &ApprovalDistribution) {
        let total = approval.total();

        Plot::new("approval_donut")
            .height(420.0)
            .data_aspect(1.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .include_x(-1.2)
            .include_x(1.2)
            .include_y(-1.2)
            .include_y(1.2)
            .show(ui, |plot_ui| {
                if total == 0 {
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.0, 0.0),
                        RichText::new("Sin respuestas").size(16.0),
                    ));
                    return;
                }

                // clockwise from twelve o'clock
                let mut start = FRAC_PI_2;
                for bucket in &approval.buckets {
                    if bucket.count == 0 {
                        continue;
                    }
                    let share = bucket.count as f64 / total as f64;
                    let end = start - share * TAU;
                    let color = color32(approval_rgb(&bucket.rating));

                    for piece in Self::ring_segment(start, end) {
                        plot_ui.polygon(
                            Polygon::new(piece)
                                .fill_color(color)
                                .stroke(egui::Stroke::new(0.5, color))
                                .name(&bucket.rating),
                        );
                    }

                    let mid = (start + end) / 2.0;
                    let radius = (DONUT_OUTER + DONUT_INNER) / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(radius * mid.cos(), radius * mid.sin()),
                        RichText::new(format!("{}\n{:.1}%", bucket.rating, share * 100.0))
                            .size(12.0)
                            .color(Color32::BLACK),
                    ));

                    start = end;
                }
            });
    }

    /// Split the arc between two angles into small convex quads.
    fn ring_segment(start: f64, end: f64) -> Vec<PlotPoints> {
        let sweep = end - start;
        let steps = ((sweep.abs() / DONUT_STEP).ceil() as usize).max(1);

        (0..steps)
            .map(|k| {
                let a0 = start + sweep * k as f64 / steps as f64;
                let a1 = start + sweep * (k + 1) as f64 / steps as f64;
                PlotPoints::new(vec![
                    [DONUT_OUTER * a0.cos(), DONUT_OUTER * a0.sin()],
                    [DONUT_OUTER * a1.cos(), DONUT_OUTER * a1.sin()],
                    [DONUT_INNER * a1.cos(), DONUT_INNER * a1.sin()],
                    [DONUT_INNER * a0.cos(), DONUT_INNER * a0.sin()],
                ])
            })
            .collect()
    }

    /// Interaction summary; the total row is bold.
    pub fn draw_summary_table(ui: &mut egui::Ui, summary: &SummaryTable) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_table")
                    .striped(true)
                    .min_col_width(160.0)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Descripción").strong().size(14.0));
                        ui.label(RichText::new("# Registros").strong().size(14.0));
                        ui.end_row();

                        for row in &summary.rows {
                            let is_total = row.label == TOTAL_LABEL;
                            let label = RichText::new(&row.label).size(14.0);
                            let count = RichText::new(row.count.to_string()).size(14.0);
                            if is_total {
                                ui.label(label.strong());
                                ui.label(count.strong());
                            } else {
                                ui.label(label);
                                ui.label(count);
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Support reason × party grid.
    pub fn draw_cross_tab(ui: &mut egui::Ui, id: &str, tab: &CrossTab) {
        if tab.is_empty() {
            ui.label(RichText::new("Sin respuestas").color(Color32::GRAY));
            return;
        }

        egui::ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
            egui::Grid::new(ui.make_persistent_id(id))
                .striped(true)
                .min_col_width(50.0)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Razón de apoyo").strong().size(12.0));
                    for party in &tab.parties {
                        ui.label(RichText::new(party).strong().size(12.0));
                    }
                    ui.end_row();

                    for (reason, counts) in tab.reasons.iter().zip(&tab.counts) {
                        ui.label(RichText::new(reason).size(12.0));
                        for count in counts {
                            ui.label(RichText::new(count.to_string()).size(12.0));
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
