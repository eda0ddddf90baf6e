//! CSV Data Loader Module
//! Reads the call-log export with Polars and turns it into typed survey records.

use super::record::SurveyRecord;
use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns the export must contain, in the order `SurveyRecord::from_raw` takes them.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "START_DATE",
    "interaction_user",
    "STATUS",
    "partido1_apoyo",
    "partido1_preferencia",
    "partido2_apoyo",
    "partido2_preferencia",
    "gobierno_calificacion",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Holds the survey dataset. Loaded once, read-only afterwards.
#[derive(Default)]
pub struct DataLoader {
    records: Vec<SurveyRecord>,
    file_path: Option<PathBuf>,
    dropped_rows: usize,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a CSV file. Every column is read as text; coercion happens per row.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&[SurveyRecord], LoaderError> {
        self.file_path = Some(file_path.to_path_buf());

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let (records, dropped) = records_from_dataframe(&df)?;
        info!(
            "Loaded {} records from {} ({} rows dropped for invalid START_DATE)",
            records.len(),
            file_path.display(),
            dropped
        );

        self.records = records;
        self.dropped_rows = dropped;
        Ok(&self.records)
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    /// Number of source rows discarded because their timestamp did not parse.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    pub fn into_records(self) -> Vec<SurveyRecord> {
        self.records
    }
}

/// Convert a text DataFrame into records, returning them with the count of dropped rows.
pub fn records_from_dataframe(df: &DataFrame) -> Result<(Vec<SurveyRecord>, usize), LoaderError> {
    let columns = REQUIRED_COLUMNS
        .iter()
        .map(|name| {
            let column = df
                .column(name)
                .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
            Ok::<Column, LoaderError>(column.cast(&DataType::String)?)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let text = columns
        .iter()
        .map(|c| c.as_materialized_series().str())
        .collect::<PolarsResult<Vec<&StringChunked>>>()?;

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = 0;

    for i in 0..df.height() {
        let record = SurveyRecord::from_raw(
            text[0].get(i),
            text[1].get(i),
            text[2].get(i),
            text[3].get(i),
            text[4].get(i),
            text[5].get(i),
            text[6].get(i),
            text[7].get(i),
        );
        match record {
            Some(record) => records.push(record),
            None => {
                dropped += 1;
                debug!("Dropping row {}: START_DATE {:?}", i, text[0].get(i));
            }
        }
    }

    Ok((records, dropped))
}
