//! Data module - CSV loading, date selection and summary export

mod export;
mod loader;
mod processor;
mod record;

pub use export::{
    summary_from_csv, summary_to_csv, write_summary_csv, ExportError, COUNT_COLUMN, LABEL_COLUMN,
    SUMMARY_FILENAME,
};
pub use loader::{records_from_dataframe, DataLoader, LoaderError, REQUIRED_COLUMNS};
pub use processor::{DataProcessor, DateFilter, ProcessorError, ALL_DATES};
pub use record::{parse_flag, parse_timestamp, PartyQuestion, SurveyRecord};
