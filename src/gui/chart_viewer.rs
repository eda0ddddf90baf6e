//! Chart Viewer Widget
//! Central scrollable panel with the summary table, preference charts and approval donut.

use crate::charts::ChartPlotter;
use crate::stats::{AggregateResult, CrossTab, PreferenceRanking};
use egui::{RichText, ScrollArea};

const SECTION_SPACING: f32 = 30.0;
const CHART_SHARE: f32 = 0.58;

/// Shows the latest aggregate. Keeps it until a new one is set.
#[derive(Default)]
pub struct ChartViewer {
    result: Option<AggregateResult>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result(&mut self, result: AggregateResult) {
        self.result = Some(result);
    }

    pub fn result(&self) -> Option<&AggregateResult> {
        self.result.as_ref()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(result) = &self.result else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Sin datos").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Encuestas Heraldo — Partidos Políticos");
                    ui.add_space(10.0);
                    ChartPlotter::draw_summary_table(ui, &result.summary);
                });

                ui.add_space(SECTION_SPACING);
                Self::draw_preference_row(
                    ui,
                    "Preferencia de Partido Político",
                    "preference_1",
                    &result.preference_1,
                    &result.cross_tab_1,
                );

                ui.add_space(SECTION_SPACING);
                Self::draw_preference_row(
                    ui,
                    "Segunda Preferencia de Partido Político",
                    "preference_2",
                    &result.preference_2,
                    &result.cross_tab_2,
                );

                ui.add_space(SECTION_SPACING);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Calificación al Gobierno").size(18.0).strong());
                    ui.set_max_width(450.0);
                    ChartPlotter::draw_approval_donut(ui, &result.approval);
                });
            });
    }

    /// Bar chart on the left, its cross-tab on the right.
    fn draw_preference_row(
        ui: &mut egui::Ui,
        title: &str,
        id: &str,
        ranking: &PreferenceRanking,
        cross_tab: &CrossTab,
    ) {
        let chart_width = ui.available_width() * CHART_SHARE;
        let table = cross_tab.ranked_columns(ranking);

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(chart_width);
                ui.label(RichText::new(title).size(18.0).strong());
                ChartPlotter::draw_preference_chart(ui, id, ranking);
            });

            ui.add_space(20.0);

            ui.vertical(|ui| {
                ui.add_space(40.0);
                ChartPlotter::draw_cross_tab(ui, &format!("{id}_cross_tab"), &table);
            });
        });
    }
}
