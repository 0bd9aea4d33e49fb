use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use payroll_core::{EcuadorSalaryInputs, HealthScheme, PeruRegime, Regime, SalaryInputs};
use rust_decimal::Decimal;
use tracing::debug;

use payroll_cli::app;
use payroll_cli::config::{AppConfig, InputDefaults};
use payroll_cli::csv_loader;
use payroll_cli::logging;
use payroll_cli::report::{OutputFormat, render};
use payroll_cli::utils::parse_amount;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Net salary estimator for Peru and Ecuador.
///
/// Loads the regulatory parameters (built-in, or the files named in the
/// config), runs the requested calculation and prints the itemized result.
#[derive(Debug, Parser)]
#[command(name = "payroll", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log level or EnvFilter directive; overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Append log records to this file; overrides the config file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Net salary under a Peruvian regime.
    Peru(PeruArgs),

    /// Net salary in Ecuador.
    Ecuador(EcuadorArgs),

    /// Peruvian net salaries for every row of a CSV file.
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
struct PeruArgs {
    /// Monthly basic salary.
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    salary: Decimal,

    /// Monthly food allowance (paid as vouchers).
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true, default_value = "0")]
    food: Decimal,

    /// Apply the family allowance.
    #[arg(long)]
    family: bool,

    /// Parameter year; defaults to the config file, then the current year.
    #[arg(long)]
    year: Option<i32>,

    /// NORMAL or RIA.
    #[arg(long, value_parser = parse_regime)]
    regime: Option<PeruRegime>,

    /// ESSALUD or EPS.
    #[arg(long, value_parser = parse_health_scheme)]
    health_scheme: Option<HealthScheme>,

    /// Also compute the net of a bonus worth this many monthly salaries.
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    bonus_multiple: Option<Decimal>,
}

#[derive(Debug, Args)]
struct EcuadorArgs {
    /// Monthly gross salary.
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    salary: Decimal,

    /// Parameter year; defaults to the config file, then the current year.
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// CSV file with one salary per row.
    #[arg(long)]
    file: PathBuf,
}

fn parse_regime(s: &str) -> Result<PeruRegime, String> {
    PeruRegime::parse(s).ok_or_else(|| {
        let known: Vec<&str> = PeruRegime::all().iter().map(|r| r.as_str()).collect();
        format!("unknown regime '{s}', expected one of {}", known.join(", "))
    })
}

fn parse_health_scheme(s: &str) -> Result<HealthScheme, String> {
    HealthScheme::parse(s)
        .ok_or_else(|| format!("unknown health scheme '{s}', expected ESSALUD or EPS"))
}

impl PeruArgs {
    fn to_inputs(
        &self,
        defaults: &InputDefaults,
    ) -> SalaryInputs {
        SalaryInputs {
            basic_salary: self.salary,
            food_allowance: self.food,
            has_family_allowance: self.family,
            year: self
                .year
                .or(defaults.year)
                .unwrap_or_else(app::current_year),
            health_scheme: self
                .health_scheme
                .or(defaults.health_scheme)
                .unwrap_or_default(),
            regime: self
                .regime
                .or(defaults.regime)
                .unwrap_or(PeruRegime::Standard),
        }
    }
}

impl EcuadorArgs {
    fn to_inputs(
        &self,
        defaults: &InputDefaults,
    ) -> EcuadorSalaryInputs {
        EcuadorSalaryInputs {
            gross_monthly_salary: self.salary,
            year: self
                .year
                .or(defaults.year)
                .unwrap_or_else(app::current_year),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(level) = cli.log_level.as_deref().or(config.logging.level.as_deref()) {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_deref().or(config.logging.file.as_deref()) {
        logging::enable_file_logging(path)?;
    }

    let calculator = app::load_calculator(&config.parameters)?;

    let output = match &cli.command {
        Command::Peru(args) => {
            let inputs = args.to_inputs(&config.defaults);
            debug!(?inputs, "peru calculation");
            let report = app::run_peru(&calculator, &inputs, args.bonus_multiple)?;
            render(&report, cli.format)?
        }
        Command::Ecuador(args) => {
            let inputs = args.to_inputs(&config.defaults);
            debug!(?inputs, "ecuador calculation");
            let report = app::run_ecuador(&calculator, &inputs)?;
            render(&report, cli.format)?
        }
        Command::Batch(args) => {
            let inputs = csv_loader::load_from_file(&args.file)
                .with_context(|| format!("Failed to load batch file: {}", args.file.display()))?;
            let report = app::run_batch(&calculator, &inputs)?;
            render(&report, cli.format)?
        }
    };

    println!("{}", output.trim_end());

    Ok(())
}
