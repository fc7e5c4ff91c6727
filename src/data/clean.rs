use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use super::model::{FundingDataset, FundingRecord, RawRecord};

/// Substituted for a missing or `0` subvertical.
pub const SUBVERTICAL_FALLBACK: &str = "Education";

/// Cell contents that count as missing, matching the usual NA spellings found
/// in exported dataframes.
const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
    "#N/A N/A", "#NA", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y",
    "%m/%d/%y", "%d/%m/%y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];

// ---------------------------------------------------------------------------
// Clean report
// ---------------------------------------------------------------------------

/// What the cleaner did to the input. Each dropped row is counted under the
/// first rule it failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub missing_required: usize,
    pub bad_date: usize,
    pub bad_amount: usize,
    pub blank_investors: usize,
    pub blank_startup: usize,
    pub subvertical_filled: usize,
}

impl CleanReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingRequired,
    BadDate,
    BadAmount,
    BlankInvestors,
    BlankStartup,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Validate raw rows and build the dataset.
///
/// Rows are dropped, never repaired, except for `city`/`round` (missing
/// becomes empty) and `subvertical` (missing or `0` becomes
/// [`SUBVERTICAL_FALLBACK`]). Surviving rows keep their input order.
pub fn clean_records(raw: impl IntoIterator<Item = RawRecord>) -> (FundingDataset, CleanReport) {
    let mut report = CleanReport::default();
    let mut records = Vec::new();

    for row in raw {
        report.rows_read += 1;
        match clean_row(row) {
            Ok((record, filled)) => {
                if filled {
                    report.subvertical_filled += 1;
                }
                records.push(record);
            }
            Err(Rejection::MissingRequired) => report.missing_required += 1,
            Err(Rejection::BadDate) => report.bad_date += 1,
            Err(Rejection::BadAmount) => report.bad_amount += 1,
            Err(Rejection::BlankInvestors) => report.blank_investors += 1,
            Err(Rejection::BlankStartup) => report.blank_startup += 1,
        }
    }

    report.rows_kept = records.len();
    (FundingDataset::from_records(records), report)
}

fn clean_row(row: RawRecord) -> Result<(FundingRecord, bool), Rejection> {
    let (Some(date), Some(startup), Some(amount), Some(investors), Some(vertical)) = (
        present(row.date),
        present(row.startup),
        present(row.amount),
        present(row.investors),
        present(row.vertical),
    ) else {
        return Err(Rejection::MissingRequired);
    };

    let date = parse_date(&date).ok_or(Rejection::BadDate)?;
    let amount = parse_amount(&amount).ok_or(Rejection::BadAmount)?;
    if investors.trim().is_empty() {
        return Err(Rejection::BlankInvestors);
    }
    let startup = startup.trim();
    if startup.is_empty() {
        return Err(Rejection::BlankStartup);
    }

    let subvertical = present(row.subvertical).filter(|s| s.trim() != "0");
    let filled = subvertical.is_none();

    let record = FundingRecord {
        date,
        startup: startup.to_string(),
        vertical,
        subvertical: subvertical.unwrap_or_else(|| SUBVERTICAL_FALLBACK.to_string()),
        city: present(row.city).unwrap_or_default(),
        round: present(row.round).unwrap_or_default(),
        amount,
        investors,
        month: date.month(),
        year: date.year(),
    };
    Ok((record, filled))
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

/// Whether a cell holds an NA spelling.
pub fn is_na(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

fn present(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !is_na(s))
}

/// Parse a calendar date, accepting the layouts commonly found in exported
/// funding sheets. Slash dates are read month-first, falling back to
/// day-first when that is the only valid reading. A 12 or 13 digit integer is
/// read as epoch milliseconds (UTC). Time of day is discarded.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }

    if (12..=13).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit()) {
        let millis: i64 = s.parse().ok()?;
        return DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive());
    }

    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s[0..4].parse().ok()?;
        let month = s[4..6].parse().ok()?;
        let day = s[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            // "%Y" happily reads "15" as year 15; leave short years to "%y".
            if fmt.contains("%Y") && date.year() < 1000 {
                continue;
            }
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Parse a funding amount. Non-finite values are rejected.
pub fn parse_amount(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
