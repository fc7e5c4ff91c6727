use chrono::NaiveDate;
use serde::Deserialize;

/// Column names every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "date",
    "startup",
    "vertical",
    "subvertical",
    "city",
    "round",
    "amount",
    "investors",
];

// ---------------------------------------------------------------------------
// RawRecord – one unvalidated input row
// ---------------------------------------------------------------------------

/// A row exactly as read from the input file, before any cleaning.
///
/// Every format (CSV, JSON, Parquet) is lowered to this shape so the cleaning
/// rules live in one place. `None` means the cell was absent or null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    pub date: Option<String>,
    pub startup: Option<String>,
    pub vertical: Option<String>,
    pub subvertical: Option<String>,
    pub city: Option<String>,
    pub round: Option<String>,
    pub amount: Option<String>,
    pub investors: Option<String>,
}

impl RawRecord {
    /// Store `value` under the named column. Unknown columns are ignored.
    pub fn set(&mut self, column: &str, value: Option<String>) {
        let slot = match column {
            "date" => &mut self.date,
            "startup" => &mut self.startup,
            "vertical" => &mut self.vertical,
            "subvertical" => &mut self.subvertical,
            "city" => &mut self.city,
            "round" => &mut self.round,
            "amount" => &mut self.amount,
            "investors" => &mut self.investors,
            _ => return,
        };
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// FundingRecord – one row of the cleaned dataset
// ---------------------------------------------------------------------------

/// A single validated funding event.
#[derive(Debug, Clone, PartialEq)]
pub struct FundingRecord {
    pub date: NaiveDate,
    /// Trimmed, never empty.
    pub startup: String,
    /// Sector.
    pub vertical: String,
    pub subvertical: String,
    pub city: String,
    /// Funding stage label, may be empty.
    pub round: String,
    /// Crore.
    pub amount: f64,
    /// Comma-separated investor names, as read.
    pub investors: String,
    pub month: u32,
    pub year: i32,
}

impl FundingRecord {
    /// Individual investor names: split on `,`, trimmed, blanks dropped.
    pub fn investor_names(&self) -> impl Iterator<Item = &str> {
        self.investors
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

// ---------------------------------------------------------------------------
// FundingDataset – the complete cleaned table
// ---------------------------------------------------------------------------

/// The cleaned table. Immutable once built; queries borrow it.
#[derive(Debug, Clone, Default)]
pub struct FundingDataset {
    records: Vec<FundingRecord>,
}

impl FundingDataset {
    /// Wrap already-cleaned records, keeping their order.
    pub fn from_records(records: Vec<FundingRecord>) -> Self {
        FundingDataset { records }
    }

    pub fn records(&self) -> &[FundingRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records belonging to one startup, in input order.
    pub fn records_for_startup<'a>(
        &'a self,
        startup: &'a str,
    ) -> impl Iterator<Item = &'a FundingRecord> + 'a {
        self.records.iter().filter(move |r| r.startup == startup)
    }
}
