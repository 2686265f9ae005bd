//! CSV ingest and type inference.
//!
//! This module is responsible for turning a listings CSV into a `Table`.
//!
//! Design goals:
//! - **Lenient schema**: no column is required here; analysis stages check
//!   membership themselves
//! - **Dataframe-like typing**: each column becomes `int64`, `float64` or
//!   `object` depending on what its cells parse as
//! - Cleaning and statistics live elsewhere; this only reads cells

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::domain::{Column, DType, Table};
use crate::error::AppError;

/// Cell values read as absent, besides the empty string.
const NA_TOKENS: [&str; 11] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Ingest output: the loaded table plus a few row-level counters.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub table: Table,
    pub rows_read: usize,
    /// Rows with fewer cells than the header (padded with absent values).
    pub short_rows: usize,
}

/// Load a CSV file from disk.
pub fn load_table(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::InputMissing {
            path: path.to_path_buf(),
        },
        _ => AppError::Io(e),
    })?;

    let data = read_table(file, path)?;
    debug!(
        path = %path.display(),
        rows = data.rows_read,
        short_rows = data.short_rows,
        "csv loaded"
    );
    Ok(data)
}

/// Parse CSV from any reader. `path` is only used in error messages.
pub fn read_table<R: Read>(source: R, path: &Path) -> Result<IngestedData, AppError> {
    let csv_err = |source: csv::Error| AppError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(csv_err)?.clone();
    if headers.is_empty() {
        return Err(AppError::analysis(format!(
            "No columns to parse from '{}'",
            path.display()
        )));
    }
    let names = normalize_headers(&headers);

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    let mut rows_read = 0usize;
    let mut short_rows = 0usize;

    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        rows_read += 1;
        if record.len() < names.len() {
            short_rows += 1;
        }
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(record.get(idx).and_then(parse_cell));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| infer_column(name, values))
        .collect();

    Ok(IngestedData {
        table: Table::new(columns)?,
        rows_read,
        short_rows,
    })
}

fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix
            // on the first header. If we don't strip it, membership checks on
            // that column silently fail.
            let name = raw.trim().trim_start_matches('\u{feff}').trim();
            let name = if name.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name.to_string()
            };

            let count = seen.entry(name.clone()).or_insert(0);
            let unique = if *count == 0 {
                name
            } else {
                format!("{name}.{count}")
            };
            *count += 1;
            unique
        })
        .collect()
}

fn parse_cell(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() || NA_TOKENS.contains(&s) {
        return None;
    }
    Some(s.to_string())
}

/// Pick the narrowest dtype every present cell fits into.
fn infer_column(name: String, values: Vec<Option<String>>) -> Column {
    let present = || values.iter().flatten();

    let all_present = values.iter().all(Option::is_some);
    if all_present && !values.is_empty() && present().all(|s| s.parse::<i64>().is_ok()) {
        let parsed = values
            .iter()
            .map(|v| v.as_deref().and_then(|s| s.parse::<i64>().ok()).map(|n| n as f64))
            .collect();
        return Column::numeric(name, DType::Int64, parsed);
    }

    if present().all(|s| parse_float(s).is_some()) {
        let parsed = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_float))
            .collect();
        return Column::numeric(name, DType::Float64, parsed);
    }

    Column::text(name, values)
}

fn parse_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}
