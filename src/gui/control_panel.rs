//! Control Panel Widget
//! Left side panel with the data source, date selector and CSV download.

use crate::data::DateFilter;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Prefix of the status shown when a date selection has no records.
pub const NO_RECORDS_STATUS: &str = "Sin registros";

/// Left side control panel.
pub struct ControlPanel {
    pub csv_path: PathBuf,
    pub record_count: usize,
    pub dropped_rows: usize,
    pub date_options: Vec<DateFilter>,
    pub selected: DateFilter,
    pub status: String,
    pub download_enabled: bool,
}

impl ControlPanel {
    pub fn new(
        csv_path: PathBuf,
        record_count: usize,
        dropped_rows: usize,
        date_options: Vec<DateFilter>,
    ) -> Self {
        Self {
            csv_path,
            record_count,
            dropped_rows,
            date_options,
            selected: DateFilter::All,
            status: "Listo".to_string(),
            download_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Encuestas Heraldo")
                    .size(22.0)
                    .color(Color32::from_rgb(66, 133, 244)),
            );
            ui.label(
                RichText::new("Partidos Políticos")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Origen de datos").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = self
                    .csv_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| self.csv_path.display().to_string());
                ui.label(RichText::new(file_name).size(12.0));
                ui.label(
                    RichText::new(format!(
                        "{} registros, {} filas sin fecha válida",
                        self.record_count, self.dropped_rows
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Date Filter Section =====
        ui.label(RichText::new("📅 Fecha").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("date_filter")
            .width(200.0)
            .selected_text(self.selected.label())
            .show_ui(ui, |ui| {
                for option in &self.date_options {
                    if ui
                        .selectable_label(self.selected == *option, option.label())
                        .clicked()
                        && self.selected != *option
                    {
                        self.selected = *option;
                        action = ControlPanelAction::DateChanged(*option);
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.download_enabled, |ui| {
                let button = egui::Button::new(RichText::new("⬇ Descargar CSV").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::DownloadCsv;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(
            RichText::new(&self.status)
                .size(11.0)
                .color(status_color(&self.status)),
        );

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

pub(crate) fn status_color(status: &str) -> Color32 {
    if status.starts_with("Error") {
        Color32::from_rgb(220, 53, 69)
    } else if status.starts_with(NO_RECORDS_STATUS) {
        Color32::from_rgb(243, 156, 18)
    } else {
        Color32::GRAY
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    DateChanged(DateFilter),
    DownloadCsv,
}
