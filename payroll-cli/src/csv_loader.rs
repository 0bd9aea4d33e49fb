//! CSV loader for batch salary inputs.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive and must match exactly. Whitespace around
//! headers and values is trimmed.
//!
//! | Column             | Required | Type    | Notes                                   |
//! |--------------------|----------|---------|-----------------------------------------|
//! | `year`             | yes      | integer | e.g. `2025`                             |
//! | `basic_salary`     | yes      | decimal | e.g. `3,000.00`; negative becomes 0     |
//! | `food_allowance`   | no       | decimal | Empty or absent is 0                    |
//! | `family_allowance` | no       | flag    | `yes`/`no`, `true`/`false`, `1`/`0`     |
//! | `health_scheme`    | no       | string  | `ESSALUD` (default) or `EPS`            |
//! | `regime`           | no       | string  | `NORMAL` (default) or `RIA`             |
//!
//! ### Minimal example
//!
//! ```csv
//! year,basic_salary
//! 2025,3000.00
//! ```
//!
//! ### Full example
//!
//! ```csv
//! year,basic_salary,food_allowance,family_allowance,health_scheme,regime
//! 2025,3000.00,500.00,yes,ESSALUD,NORMAL
//! 2025,"12,000.00",,no,EPS,RIA
//! ```
use std::path::Path;

use payroll_core::{HealthScheme, PeruRegime, Regime, SalaryInputs};
use serde::Deserialize;

use crate::utils::{ParseDecimalError, ParseFlagError, parse_amount, parse_flag};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    year: i32,
    basic_salary: String,
    food_allowance: Option<String>,
    family_allowance: Option<String>,
    health_scheme: Option<String>,
    regime: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
///
/// `row` is the 1-based data row number (header = row 0).
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("invalid {column} on row {row}: {source}")]
    InvalidAmount {
        column: &'static str,
        row: usize,
        #[source]
        source: ParseDecimalError,
    },

    #[error("invalid family_allowance on row {row}: {source}")]
    InvalidFlag {
        row: usize,
        #[source]
        source: ParseFlagError,
    },

    #[error("unrecognised health scheme '{value}' on row {row}")]
    InvalidHealthScheme { value: String, row: usize },

    #[error("unrecognised regime '{value}' on row {row}")]
    InvalidRegime { value: String, row: usize },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn amount(
    column: &'static str,
    value: Option<&str>,
    row: usize,
) -> Result<rust_decimal::Decimal, CsvLoadError> {
    parse_amount(value.unwrap_or_default())
        .map_err(|source| CsvLoadError::InvalidAmount { column, row, source })
}

/// Convert a single CSV row into [`SalaryInputs`].
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<SalaryInputs, CsvLoadError> {
    let health_scheme = match row.health_scheme {
        Some(value) => HealthScheme::parse(&value).ok_or(CsvLoadError::InvalidHealthScheme {
            value,
            row: row_number,
        })?,
        None => HealthScheme::default(),
    };
    let regime = match row.regime {
        Some(value) => PeruRegime::parse(&value).ok_or(CsvLoadError::InvalidRegime {
            value,
            row: row_number,
        })?,
        None => PeruRegime::Standard,
    };
    let has_family_allowance = parse_flag(row.family_allowance.as_deref().unwrap_or_default())
        .map_err(|source| CsvLoadError::InvalidFlag {
            row: row_number,
            source,
        })?;

    Ok(SalaryInputs {
        basic_salary: amount("basic_salary", Some(&row.basic_salary), row_number)?,
        food_allowance: amount("food_allowance", row.food_allowance.as_deref(), row_number)?,
        has_family_allowance,
        year: row.year,
        health_scheme,
        regime,
    })
}

/// Parse CSV text and return the salary inputs in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or a
///   required column is missing.
/// * The other variants if a cell holds an unrecognised value.
pub fn load_from_str(input: &str) -> Result<Vec<SalaryInputs>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<SalaryInputs>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
