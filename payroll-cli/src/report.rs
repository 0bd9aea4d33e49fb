//! Text and JSON rendering of calculation results.
//!
//! Breakdown lines are printed as produced by the engines, in order, with
//! their formula annotation on the following line.

use std::fmt;

use clap::ValueEnum;
use payroll_core::{
    BonusNet, EcuadorSalaryResults, LineItem, ParameterYear, SalaryBreakdown, SalaryResults,
};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Renders `report` as text through its `Display` impl, or as pretty JSON.
pub fn render<T>(
    report: &T,
    format: OutputFormat,
) -> Result<String, serde_json::Error>
where
    T: Serialize + fmt::Display,
{
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(report),
    }
}

/// Gross and net of a bonus paid as a multiple of the monthly salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusReport {
    pub multiple: Decimal,
    pub gross: Decimal,
    #[serde(flatten)]
    pub net: BonusNet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeruReport {
    pub results: SalaryResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<BonusReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EcuadorReport {
    pub results: EcuadorSalaryResults,
}

/// One summary row per batch input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchReport {
    pub rows: Vec<SalaryResults>,
}

// ─── helpers ────────────────────────────────────────────────────────────────

fn write_year(
    f: &mut fmt::Formatter<'_>,
    year: &ParameterYear,
) -> fmt::Result {
    if year.is_substituted() {
        writeln!(
            f,
            "Note: no parameters for {}, using {}",
            year.requested, year.effective
        )?;
    }
    Ok(())
}

fn write_lines(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    lines: &[LineItem],
) -> fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "{title}")?;
    for line in lines {
        writeln!(
            f,
            "  {:<11} {:<52} {:>12.2}",
            line.step, line.description, line.amount
        )?;
        if let Some(formula) = &line.formula {
            writeln!(f, "  {:<11} {formula}", "")?;
        }
    }
    Ok(())
}

fn write_breakdown(
    f: &mut fmt::Formatter<'_>,
    breakdown: &SalaryBreakdown,
) -> fmt::Result {
    write_lines(f, "Monthly", &breakdown.monthly)?;
    write_lines(f, "Annual", &breakdown.annual)?;
    write_lines(f, "Income tax brackets", &breakdown.income_tax_brackets)
}

fn write_amount(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(f, "  {label:<30} {amount:>12.2}")
}

// ─── reports ────────────────────────────────────────────────────────────────

impl fmt::Display for PeruReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = &self.results;
        writeln!(
            f,
            "Peru {} / {} / parameters {}",
            r.regime, r.health_scheme, r.parameter_year.effective
        )?;
        write_year(f, &r.parameter_year)?;
        write_breakdown(f, &r.breakdown)?;

        writeln!(f)?;
        writeln!(f, "Summary")?;
        write_amount(f, "Gross monthly salary", r.gross_monthly_salary)?;
        write_amount(f, "Pension deduction", r.pension_deduction)?;
        write_amount(f, "Monthly income tax", r.monthly_income_tax)?;
        write_amount(f, "Net monthly salary", r.net_monthly_salary)?;
        write_amount(f, "Total annual income", r.total_annual_income)?;
        write_amount(f, "Annual income tax", r.annual_income_tax)?;
        write_amount(f, "Net annual salary", r.net_annual_salary)?;
        write_amount(f, "Net annual income", r.net_annual_income)?;

        if let Some(bonus) = &self.bonus {
            writeln!(f)?;
            writeln!(f, "Bonus (x{})", bonus.multiple)?;
            write_amount(f, "Gross bonus", bonus.gross)?;
            write_amount(f, "Annual tax with bonus", bonus.net.annual_tax_with_bonus)?;
            write_amount(f, "Monthly tax with bonus", bonus.net.monthly_tax_with_bonus)?;
            write_amount(f, "Net bonus", bonus.net.bonus_net)?;
        }
        Ok(())
    }
}

impl fmt::Display for EcuadorReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = &self.results;
        writeln!(f, "Ecuador GENERAL / parameters {}", r.parameter_year.effective)?;
        write_year(f, &r.parameter_year)?;
        write_breakdown(f, &r.breakdown)?;

        writeln!(f)?;
        writeln!(f, "Summary")?;
        write_amount(f, "Gross monthly salary", r.gross_monthly_salary)?;
        write_amount(f, "Social security", r.social_security_withholding)?;
        write_amount(f, "Monthly income tax", r.monthly_income_tax)?;
        write_amount(f, "Net monthly (year 1)", r.net_monthly_salary)?;
        write_amount(f, "Net monthly (year 2+)", r.net_monthly_salary_year2)?;
        write_amount(f, "Annual income tax", r.annual_income_tax)?;
        write_amount(f, "Net annual salary", r.net_annual_salary)?;
        write_amount(f, "Employer annual cost", r.employer_annual_cost)
    }
}

impl fmt::Display for BatchReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:>4} {:>9} {:<6} {:<7} {:>12} {:>12} {:>10} {:>10} {:>12}",
            "row", "year", "regime", "health", "basic", "gross", "pension", "tax", "net"
        )?;
        for (idx, r) in self.rows.iter().enumerate() {
            let year = if r.parameter_year.is_substituted() {
                format!("{}->{}", r.parameter_year.requested, r.parameter_year.effective)
            } else {
                r.parameter_year.effective.to_string()
            };
            writeln!(
                f,
                "{:>4} {:>9} {:<6} {:<7} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>12.2}",
                idx + 1,
                year,
                r.regime,
                r.health_scheme,
                r.basic_salary,
                r.gross_monthly_salary,
                r.pension_deduction,
                r.monthly_income_tax,
                r.net_monthly_salary
            )?;
        }
        Ok(())
    }
}
