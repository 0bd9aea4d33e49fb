mod breakdown;
mod regime;
mod salary_inputs;
mod salary_results;
mod tax_bracket;
mod tax_parameters;

pub use breakdown::{LineItem, SalaryBreakdown};
pub use regime::{EcuadorRegime, HealthScheme, Jurisdiction, PeruRegime, Regime};
pub use salary_inputs::{EcuadorSalaryInputs, SalaryInputs};
pub use salary_results::{
    AccrualAliquots, BonusNet, EcuadorSalaryResults, ParameterYear, SalaryResults,
};
pub use tax_bracket::{FixedAmountBracket, UnitBracket};
pub use tax_parameters::{
    AccrualBasis, EcuadorTaxParameters, HealthBonusRates, PensionRates, PeruTaxParameters,
};
