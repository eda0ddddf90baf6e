//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::data::{write_summary_csv, DataProcessor, DateFilter, SurveyRecord, SUMMARY_FILENAME};
use crate::gui::control_panel::NO_RECORDS_STATUS;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::Aggregator;
use egui::SidePanel;
use log::{error, info};
use std::path::PathBuf;

/// Main application window.
pub struct DashboardApp {
    records: Vec<SurveyRecord>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    /// `records` is the full dataset; it is never modified afterwards.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        records: Vec<SurveyRecord>,
        csv_path: PathBuf,
        dropped_rows: usize,
        initial: DateFilter,
    ) -> Self {
        let control_panel = ControlPanel::new(
            csv_path,
            records.len(),
            dropped_rows,
            DataProcessor::date_options(&records),
        );

        let mut app = Self {
            records,
            control_panel,
            chart_viewer: ChartViewer::new(),
        };

        app.handle_date_changed(DateFilter::All);
        if initial != DateFilter::All {
            app.handle_date_changed(initial);
        }
        app
    }

    /// Re-aggregate for the new selection; an empty selection keeps what is shown.
    fn handle_date_changed(&mut self, filter: DateFilter) {
        self.control_panel.selected = filter;

        match Aggregator::refresh(&self.records, &filter) {
            Some(result) => {
                let status = refresh_status(&filter, Some(result.summary.total()));
                self.chart_viewer.set_result(result);
                self.control_panel.download_enabled = true;
                self.control_panel.set_status(&status);
            }
            None => {
                self.control_panel.set_status(&refresh_status(&filter, None));
            }
        }
    }

    /// Save the summary currently on screen.
    fn handle_download_csv(&mut self) {
        let Some(result) = self.chart_viewer.result() else {
            self.control_panel.set_status("Nada que descargar");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(SUMMARY_FILENAME)
            .save_file()
        else {
            return; // User cancelled
        };

        match write_summary_csv(&result.summary, &path) {
            Ok(()) => {
                info!("Summary downloaded to {}", path.display());
                self.control_panel.set_status(&format!("Guardado en {}", path.display()));
            }
            Err(e) => {
                error!("Summary download failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

/// Status line after a date change. `None` means the selection had no records.
fn refresh_status(filter: &DateFilter, shown: Option<u64>) -> String {
    match shown {
        Some(count) => format!("Mostrando {} registros de {}", count, filter.label()),
        None => format!(
            "{} para {}; se mantiene la selección anterior",
            NO_RECORDS_STATUS,
            filter.label()
        ),
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::DateChanged(filter) => self.handle_date_changed(filter),
                        ControlPanelAction::DownloadCsv => self.handle_download_csv(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
