use std::path::PathBuf;

/// Failure to turn an input file into a [`FundingDataset`](crate::data::model::FundingDataset).
///
/// Row-level problems (bad dates, bad amounts, blank names) are never reported
/// here; the cleaner drops those rows and counts them instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed JSON: {0}")]
    JsonShape(String),

    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Recoverable failure of an aggregation query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("no funding records to aggregate")]
    EmptyDataset,

    #[error("no funding records for '{0}'")]
    NotFound(String),
}
