//! Integration tests for the built-in parameter documents and file loading.

use payroll_core::{
    ConfigurationError, EcuadorRegime, EcuadorSalaryInputs, HealthScheme, ParameterYear,
    PeruRegime, SalaryInputs,
};
use payroll_data::{
    ParameterLoadError, ParameterLoader, builtin_calculator, builtin_ecuador, builtin_peru,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const PERU_2025_ONLY: &str = include_str!("../test-data/peru_2025_only.json");
const ECUADOR_BOUNDED_TOP: &str = include_str!("../test-data/ecuador_bounded_top_bracket.json");

fn peru_inputs(
    year: i32,
    regime: PeruRegime,
) -> SalaryInputs {
    SalaryInputs {
        basic_salary: dec!(3000),
        food_allowance: dec!(0),
        has_family_allowance: false,
        year,
        health_scheme: HealthScheme::Essalud,
        regime,
    }
}

// =============================================================================
// Built-in documents
// =============================================================================

#[test]
fn builtin_peru_has_both_regimes_for_2023_to_2026() {
    let table = builtin_peru().expect("built-in Peru data should load");

    for regime in PeruRegime::all() {
        assert_eq!(table.years(*regime), vec![2023, 2024, 2025, 2026]);
    }
}

#[test]
fn builtin_peru_unit_values() {
    let table = builtin_peru().expect("built-in Peru data should load");

    let uit = |year| table.get(PeruRegime::Standard, year).map(|p| p.unit_value);

    assert_eq!(uit(2023), Some(dec!(4950)));
    assert_eq!(uit(2024), Some(dec!(5150)));
    assert_eq!(uit(2025), Some(dec!(5350)));
    assert_eq!(uit(2026), Some(dec!(5500)));
}

#[test]
fn builtin_ecuador_has_2024_to_2026() {
    let table = builtin_ecuador().expect("built-in Ecuador data should load");

    assert_eq!(table.years(EcuadorRegime::General), vec![2024, 2025, 2026]);
}

// =============================================================================
// Calculations over built-in data
// =============================================================================

#[test]
fn standard_regime_2025() {
    let calculator = builtin_calculator().expect("built-in data should load");

    let results = calculator
        .calculate_peru(&peru_inputs(2025, PeruRegime::Standard))
        .unwrap();

    assert_eq!(results.pension_deduction, dec!(341.10));
    assert_eq!(results.health_bonus, dec!(540));
    assert_eq!(results.annual_income_tax, dec!(407.20));
    assert_eq!(results.net_monthly_salary, dec!(2624.97));
}

#[test]
fn alternate_regime_2025_builds_from_components() {
    let calculator = builtin_calculator().expect("built-in data should load");

    let results = calculator
        .calculate_peru(&peru_inputs(2025, PeruRegime::Alternate))
        .unwrap();

    assert_eq!(results.gross_monthly_salary, dec!(3836.67));
    assert_eq!(results.net_monthly_salary, dec!(3461.64));
}

#[test]
fn alternate_regime_2024_uses_month_multiplier() {
    let calculator = builtin_calculator().expect("built-in data should load");

    let results = calculator
        .calculate_peru(&peru_inputs(2024, PeruRegime::Alternate))
        .unwrap();

    // 3000 * (12 + 2 + 1.1667) / 12 = 3791.675
    assert_eq!(results.gross_monthly_salary, dec!(3791.68));
    assert_eq!(
        results.accrual_aliquots.map(|a| a.extra_bonus_aliquot),
        Some(dec!(0))
    );
}

#[test]
fn year_without_data_falls_back_to_latest() {
    let calculator = builtin_calculator().expect("built-in data should load");

    let results = calculator
        .calculate_peru(&peru_inputs(2099, PeruRegime::Standard))
        .unwrap();

    assert_eq!(
        results.parameter_year,
        ParameterYear {
            requested: 2099,
            effective: 2026,
        }
    );
}

#[test]
fn empty_year_entry_falls_back_to_latest() {
    let calculator = builtin_calculator().expect("built-in data should load");

    let results = calculator
        .calculate_peru(&peru_inputs(2027, PeruRegime::Alternate))
        .unwrap();

    assert_eq!(results.parameter_year.effective, 2026);
}

#[test]
fn ecuador_2025_below_threshold() {
    let calculator = builtin_calculator().expect("built-in data should load");
    let inputs = EcuadorSalaryInputs {
        gross_monthly_salary: dec!(1000),
        year: 2025,
    };

    let results = calculator.calculate_ecuador(&inputs).unwrap();

    assert_eq!(results.decimo_fourth_monthly, dec!(39.17));
    assert_eq!(results.net_monthly_salary, dec!(1028.00));
    assert_eq!(results.net_monthly_salary_year2, dec!(1111.30));
}

#[test]
fn ecuador_2025_personal_expenses_rebate() {
    let calculator = builtin_calculator().expect("built-in data should load");
    let inputs = EcuadorSalaryInputs {
        gross_monthly_salary: dec!(3000),
        year: 2025,
    };

    let results = calculator.calculate_ecuador(&inputs).unwrap();

    // base 36000 - 3402 = 32598; 1398 + 6176 * 0.15 = 2324.40
    assert_eq!(results.income_tax_before_deduction, dec!(2324.40));
    assert_eq!(results.annual_income_tax, dec!(1318.96));
    assert_eq!(results.monthly_income_tax, dec!(109.91));
}

#[test]
fn bonus_net_over_builtin_data() {
    let calculator = builtin_calculator().expect("built-in data should load");
    let inputs = peru_inputs(2025, PeruRegime::Standard);
    let results = calculator.calculate_peru(&inputs).unwrap();

    let net = calculator.bonus_net(&inputs, &results, dec!(6000)).unwrap();

    assert_eq!(net.monthly_tax_with_bonus, dec!(73.93));
    assert_eq!(net.bonus_net, dec!(5926.07));
}

// =============================================================================
// File documents
// =============================================================================

#[test]
fn load_document_with_empty_years() {
    let table = ParameterLoader::peru(PERU_2025_ONLY.as_bytes()).unwrap();

    assert_eq!(table.years(PeruRegime::Standard), vec![2025]);
    assert!(table.years(PeruRegime::Alternate).is_empty());
}

#[test]
fn regime_with_only_empty_years_is_configuration_error() {
    let table = ParameterLoader::peru(PERU_2025_ONLY.as_bytes()).unwrap();
    let calculator = payroll_core::PayrollCalculator::new(table, builtin_ecuador().unwrap());

    let result = calculator.calculate_peru(&peru_inputs(2025, PeruRegime::Alternate));

    assert!(matches!(
        result,
        Err(ConfigurationError::NoParameters { ref regime, .. }) if regime == "RIA"
    ));
}

#[test]
fn bounded_top_bracket_is_rejected() {
    let err = ParameterLoader::ecuador(ECUADOR_BOUNDED_TOP.as_bytes()).unwrap_err();

    match err {
        ParameterLoadError::Configuration(ConfigurationError::InvalidEntry {
            regime,
            year,
            source,
            ..
        }) => {
            assert_eq!(regime, "GENERAL");
            assert_eq!(year, 2025);
            assert_eq!(*source, ConfigurationError::BoundedLastBracket);
        }
        other => panic!("expected a configuration error, got {other:?}"),
    }
}
