//! Summary Export Module
//! Serializes the interaction summary to the downloadable CSV and parses it back.

use crate::stats::SummaryTable;
use log::info;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// File name offered by the download button.
pub const SUMMARY_FILENAME: &str = "tabla_resumen.csv";

pub const LABEL_COLUMN: &str = "tipo_interaccion";
pub const COUNT_COLUMN: &str = "conteo";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid count {value:?} for {label:?}")]
    InvalidCount { label: String, value: String },
}

/// Summary table as UTF-8 CSV bytes: header, one row per category, total last, no index.
pub fn summary_to_csv(summary: &SummaryTable) -> Result<Vec<u8>, ExportError> {
    let labels: Vec<String> = summary.rows.iter().map(|r| r.label.clone()).collect();
    let counts: Vec<u64> = summary.rows.iter().map(|r| r.count).collect();

    let mut df = DataFrame::new(vec![
        Column::new(LABEL_COLUMN.into(), labels),
        Column::new(COUNT_COLUMN.into(), counts),
    ])?;

    let mut buf: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;
    Ok(buf)
}

/// Parse CSV produced by `summary_to_csv` into (label, count) pairs.
pub fn summary_from_csv(bytes: &[u8]) -> Result<Vec<(String, u64)>, ExportError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    let labels = df.column(LABEL_COLUMN)?.as_materialized_series().str()?;
    let counts = df.column(COUNT_COLUMN)?.as_materialized_series().str()?;

    labels
        .into_iter()
        .zip(counts.into_iter())
        .map(|(label, value)| {
            let label = label.unwrap_or_default().to_string();
            let value = value.unwrap_or_default();
            let count = value.trim().parse::<u64>().map_err(|_| ExportError::InvalidCount {
                label: label.clone(),
                value: value.to_string(),
            })?;
            Ok::<_, ExportError>((label, count))
        })
        .collect()
}

/// Write the summary CSV to `path`.
pub fn write_summary_csv(summary: &SummaryTable, path: &Path) -> Result<(), ExportError> {
    let bytes = summary_to_csv(summary)?;
    std::fs::write(path, &bytes)?;
    info!("Summary CSV written to {}", path.display());
    Ok(())
}
