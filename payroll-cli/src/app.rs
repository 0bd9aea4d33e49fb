//! Wiring between configuration, parameter data and the calculator.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use payroll_core::calculations::compute_bonus_gross;
use payroll_core::{
    ConfigurationError, EcuadorParameterTable, EcuadorSalaryInputs, PayrollCalculator,
    PeruParameterTable, SalaryInputs,
};
use payroll_data::{ParameterLoader, builtin_ecuador, builtin_peru};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::ParameterFiles;
use crate::report::{BatchReport, BonusReport, EcuadorReport, PeruReport};

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open parameter file: {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn load_peru(path: Option<&Path>) -> Result<PeruParameterTable> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading Peru parameters");
            ParameterLoader::peru(open(path)?)
                .with_context(|| format!("Invalid Peru parameters in {}", path.display()))
        }
        None => builtin_peru().context("Built-in Peru parameters are invalid"),
    }
}

fn load_ecuador(path: Option<&Path>) -> Result<EcuadorParameterTable> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading Ecuador parameters");
            ParameterLoader::ecuador(open(path)?)
                .with_context(|| format!("Invalid Ecuador parameters in {}", path.display()))
        }
        None => builtin_ecuador().context("Built-in Ecuador parameters are invalid"),
    }
}

/// Builds a calculator from the configured parameter files, falling back to
/// the built-in documents for any jurisdiction without one.
pub fn load_calculator(files: &ParameterFiles) -> Result<PayrollCalculator> {
    let peru = load_peru(files.peru.as_deref())?;
    let ecuador = load_ecuador(files.ecuador.as_deref())?;
    debug!("parameter tables loaded");
    Ok(PayrollCalculator::new(peru, ecuador))
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Runs a Peru calculation and, when `bonus_multiple` is set, the net of a
/// bonus worth that many monthly salaries.
pub fn run_peru(
    calculator: &PayrollCalculator,
    inputs: &SalaryInputs,
    bonus_multiple: Option<Decimal>,
) -> Result<PeruReport, ConfigurationError> {
    let results = calculator.calculate_peru(inputs)?;

    let bonus = bonus_multiple
        .map(|multiple| {
            let gross =
                compute_bonus_gross(results.basic_salary, results.food_allowance, multiple);
            calculator
                .bonus_net(inputs, &results, gross)
                .map(|net| BonusReport {
                    multiple,
                    gross,
                    net,
                })
        })
        .transpose()?;

    Ok(PeruReport { results, bonus })
}

pub fn run_ecuador(
    calculator: &PayrollCalculator,
    inputs: &EcuadorSalaryInputs,
) -> Result<EcuadorReport, ConfigurationError> {
    Ok(EcuadorReport {
        results: calculator.calculate_ecuador(inputs)?,
    })
}

/// Calculates every row; the first configuration error aborts the batch.
pub fn run_batch(
    calculator: &PayrollCalculator,
    inputs: &[SalaryInputs],
) -> Result<BatchReport, ConfigurationError> {
    let rows = inputs
        .iter()
        .map(|row| calculator.calculate_peru(row))
        .collect::<Result<Vec<_>, _>>()?;
    info!(rows = rows.len(), "batch calculated");
    Ok(BatchReport { rows })
}
