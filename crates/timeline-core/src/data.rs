// File: crates/timeline-core/src/data.rs
// Summary: Data model and CSV loaders for the score series, milestones and usage percentages.
// Notes:
// - Numeric fields that fail to parse become NaN and flow into the scales untouched;
//   only dates/years are rejected because there is no "undefined" calendar date.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::error::LoadError;

/// Date format used by both timeline CSV files.
pub const DATE_FORMAT: &str = "%d.%m.%Y";
/// Default name of the percentage column in the usage CSV.
pub const DEFAULT_PERCENTAGE_COLUMN: &str = "Has in use a mobile phone with a touch screen, %";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Milestone {
    pub date: NaiveDate,
    pub description: String,
    /// Computed by [`crate::layout::layout_milestones`]; 0.0 until laid out.
    pub vertical_offset: f64,
}

impl Milestone {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self { date, description: description.into(), vertical_offset: 0.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsageRow {
    pub year: i32,
    pub percentage: f64,
}

/// Parse a `DD.MM.YYYY` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Numeric coercion: blank cells read as 0, malformed strings give NaN.
fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(rdr)
}

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

/// Load the score series (`Date`, `Reading`), sorted ascending by date.
pub fn load_series(path: impl AsRef<Path>) -> Result<Vec<DataPoint>, LoadError> {
    let path = path.as_ref();
    let series = read_series(open(path)?)?;
    info!(path = %path.display(), points = series.len(), "loaded score series");
    Ok(series)
}

pub fn read_series<R: Read>(rdr: R) -> Result<Vec<DataPoint>, LoadError> {
    let mut rdr = reader(rdr);
    let headers = rdr.headers()?.clone();
    let i_date = column(&headers, "Date")?;
    let i_reading = column(&headers, "Reading")?;

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let raw_date = rec.get(i_date).unwrap_or_default();
        let date = parse_date(raw_date)
            .ok_or_else(|| LoadError::InvalidDate { row: row + 1, value: raw_date.to_string() })?;
        let score = parse_number(rec.get(i_reading).unwrap_or_default());
        out.push(DataPoint { date, score });
    }
    out.sort_by_key(|d| d.date);
    Ok(out)
}

/// Load the milestones (`Date`, `Description`), sorted ascending by date.
pub fn load_milestones(path: impl AsRef<Path>) -> Result<Vec<Milestone>, LoadError> {
    let path = path.as_ref();
    let milestones = read_milestones(open(path)?)?;
    info!(path = %path.display(), milestones = milestones.len(), "loaded milestones");
    Ok(milestones)
}

pub fn read_milestones<R: Read>(rdr: R) -> Result<Vec<Milestone>, LoadError> {
    let mut rdr = reader(rdr);
    let headers = rdr.headers()?.clone();
    let i_date = column(&headers, "Date")?;
    let i_desc = column(&headers, "Description")?;

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let raw_date = rec.get(i_date).unwrap_or_default();
        let date = parse_date(raw_date)
            .ok_or_else(|| LoadError::InvalidDate { row: row + 1, value: raw_date.to_string() })?;
        let description = rec.get(i_desc).unwrap_or_default().to_string();
        out.push(Milestone::new(date, description));
    }
    out.sort_by_key(|m| m.date);
    Ok(out)
}

/// Load the usage percentages (`Year` plus the named percentage column), in file order.
pub fn load_usage(path: impl AsRef<Path>, percentage_column: &str) -> Result<Vec<UsageRow>, LoadError> {
    let path = path.as_ref();
    let rows = read_usage(open(path)?, percentage_column)?;
    info!(path = %path.display(), rows = rows.len(), "loaded usage percentages");
    Ok(rows)
}

pub fn read_usage<R: Read>(rdr: R, percentage_column: &str) -> Result<Vec<UsageRow>, LoadError> {
    let mut rdr = reader(rdr);
    let headers = rdr.headers()?.clone();
    let i_year = column(&headers, "Year")?;
    let i_pct = column(&headers, percentage_column)?;

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let raw_year = rec.get(i_year).unwrap_or_default();
        let year = raw_year
            .trim()
            .parse::<i32>()
            .map_err(|_| LoadError::InvalidYear { row: row + 1, value: raw_year.to_string() })?;
        let percentage = parse_number(rec.get(i_pct).unwrap_or_default());
        out.push(UsageRow { year, percentage });
    }
    Ok(out)
}
