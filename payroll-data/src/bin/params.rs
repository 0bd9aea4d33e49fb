use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use payroll_core::{
    EcuadorRegime, Jurisdiction, ParameterObserver, ParameterTable, PeruRegime, Regime,
    TaxParameters,
};
use payroll_data::{ParameterLoader, builtin_ecuador, builtin_peru};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Country {
    Peru,
    Ecuador,
}

/// Validate a payroll parameter document and list its populated years.
///
/// Without `--file` the built-in document for the jurisdiction is checked.
#[derive(Parser, Debug)]
#[command(name = "payroll-params")]
#[command(version, about, long_about = None)]
struct Args {
    /// Jurisdiction whose document is checked
    #[arg(short, long, value_enum)]
    jurisdiction: Country,

    /// Path to a JSON parameter document
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Show which parameter year this year resolves to
    #[arg(short, long)]
    year: Option<i32>,
}

/// Prints year substitutions to stdout.
struct PrintObserver;

impl ParameterObserver for PrintObserver {
    fn year_substituted(
        &self,
        jurisdiction: Jurisdiction,
        regime: &str,
        requested_year: i32,
        effective_year: i32,
    ) {
        println!(
            "  {jurisdiction} {regime}: no data for {requested_year}, \
             falls back to {effective_year}"
        );
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn report<R: Regime, P: TaxParameters>(
    table: &ParameterTable<R, P>,
    year: Option<i32>,
) -> Result<()> {
    if table.is_empty() {
        println!("No populated years.");
        return Ok(());
    }

    for regime in table.regimes() {
        let years: Vec<String> = table.years(regime).iter().map(i32::to_string).collect();
        println!("{regime}: {}", years.join(", "));
    }

    if let Some(year) = year {
        println!("Resolving {year}:");
        for regime in table.regimes() {
            let resolved = table.resolve(regime, year, &PrintObserver)?;
            if !resolved.year.is_substituted() {
                println!("  {} {regime}: {year}", R::JURISDICTION);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let source = args
        .file
        .as_ref()
        .map_or_else(|| "built-in data".to_string(), |p| p.display().to_string());

    println!("Validating {source}...");

    match args.jurisdiction {
        Country::Peru => {
            let table = match &args.file {
                Some(path) => ParameterLoader::peru(open(path)?),
                None => builtin_peru(),
            }
            .with_context(|| format!("Invalid Peru parameters in {source}"))?;
            report::<PeruRegime, _>(&table, args.year)?;
        }
        Country::Ecuador => {
            let table = match &args.file {
                Some(path) => ParameterLoader::ecuador(open(path)?),
                None => builtin_ecuador(),
            }
            .with_context(|| format!("Invalid Ecuador parameters in {source}"))?;
            report::<EcuadorRegime, _>(&table, args.year)?;
        }
    }

    println!("Parameters are valid.");

    Ok(())
}
