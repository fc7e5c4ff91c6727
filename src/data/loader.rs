use std::fs::File;
use std::path::Path;

use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::{CleanReport, clean_records};
use super::model::{FundingDataset, REQUIRED_COLUMNS, RawRecord};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a funding dataset.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one funding event per line
/// * `.json`    – `[{ "date": "...", "startup": "...", ... }, ...]`
/// * `.parquet` – any column types; cells are read as text
pub fn load_file(path: &Path) -> Result<FundingDataset, LoadError> {
    load_file_with_report(path).map(|(dataset, _)| dataset)
}

/// Like [`load_file`], also returning what the cleaner dropped.
pub fn load_file_with_report(path: &Path) -> Result<(FundingDataset, CleanReport), LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let (dataset, report) = clean_records(raw);
    log::info!(
        "Loaded {} funding records from {} ({} of {} rows dropped)",
        report.rows_kept,
        path.display(),
        report.rows_dropped(),
        report.rows_read
    );
    log::debug!("Clean report: {report:?}");
    Ok((dataset, report))
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn require_columns<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<(), LoadError> {
    let present: Vec<&str> = headers.into_iter().collect();
    match REQUIRED_COLUMNS.into_iter().find(|c| !present.contains(c)) {
        Some(missing) => Err(LoadError::MissingColumn(missing)),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, extra columns ignored.
/// Short rows are read with the trailing cells missing.
fn read_csv(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(open(path)?);
    require_columns(reader.headers()?.iter())?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawRecord>() {
        rows.push(result?);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "date": "2015-01-01", "startup": "Ola", "amount": 100.0, ... },
///   ...
/// ]
/// ```
///
/// Dates may also be epoch milliseconds, the pandas default for datetime
/// columns.
fn read_json(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::JsonShape("expected top-level JSON array".into()))?;

    if let Some(first) = records.first().and_then(JsonValue::as_object) {
        require_columns(first.keys().map(String::as_str))?;
    }

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .ok_or_else(|| LoadError::JsonShape(format!("row {i} is not a JSON object")))?;
            let mut row = RawRecord::default();
            for (key, val) in obj {
                row.set(key, json_cell(val));
            }
            Ok(row)
        })
        .collect()
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Columns may be of any type; each cell goes through Arrow's display
/// formatter, so timestamps arrive as `2015-01-01T00:00:00` and numbers in
/// their shortest form.
fn read_parquet(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        require_columns(schema.fields().iter().map(|f| f.name().as_str()))?;

        let columns: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, f)| REQUIRED_COLUMNS.contains(&f.name().as_str()))
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row_idx in 0..batch.num_rows() {
            let mut row = RawRecord::default();
            for (col_idx, name) in &columns {
                let array = batch.column(*col_idx);
                let cell = if array.is_null(row_idx) {
                    None
                } else {
                    Some(array_value_to_string(array.as_ref(), row_idx)?)
                };
                row.set(name, cell);
            }
            rows.push(row);
        }
    }

    Ok(rows)
}
