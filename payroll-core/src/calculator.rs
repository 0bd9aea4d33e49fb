//! Entry point tying parameter resolution to the salary engines.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::{EcuadorSalaryInputs, PayrollCalculator, ParameterTable};
//!
//! let calculator = PayrollCalculator::new(ParameterTable::new(), ParameterTable::new());
//!
//! let inputs = EcuadorSalaryInputs { gross_monthly_salary: dec!(1000), year: 2025 };
//! assert!(calculator.calculate_ecuador(&inputs).is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::calculations::{BonusCalculator, EcuadorSalaryEngine, PeruSalaryEngine};
use crate::models::{
    BonusNet, EcuadorRegime, EcuadorSalaryInputs, EcuadorSalaryResults, EcuadorTaxParameters,
    PeruRegime, PeruTaxParameters, SalaryInputs, SalaryResults,
};
use crate::params::{ConfigurationError, ParameterObserver, ParameterTable, TracingObserver};

pub type PeruParameterTable = ParameterTable<PeruRegime, PeruTaxParameters>;
pub type EcuadorParameterTable = ParameterTable<EcuadorRegime, EcuadorTaxParameters>;

/// Resolves parameters for each request and runs the matching engine.
///
/// The tables are read-only after construction, so a calculator can be
/// shared across threads behind an [`Arc`].
#[derive(Clone)]
pub struct PayrollCalculator {
    peru: PeruParameterTable,
    ecuador: EcuadorParameterTable,
    observer: Arc<dyn ParameterObserver>,
}

impl fmt::Debug for PayrollCalculator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("PayrollCalculator")
            .field("peru", &self.peru)
            .field("ecuador", &self.ecuador)
            .finish_non_exhaustive()
    }
}

impl PayrollCalculator {
    /// Creates a calculator that reports year substitutions through
    /// [`TracingObserver`].
    pub fn new(
        peru: PeruParameterTable,
        ecuador: EcuadorParameterTable,
    ) -> Self {
        Self {
            peru,
            ecuador,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the observer notified on year substitution.
    pub fn with_observer(
        mut self,
        observer: Arc<dyn ParameterObserver>,
    ) -> Self {
        self.observer = observer;
        self
    }

    /// Calculates a Peruvian salary with the parameters for
    /// `(inputs.regime, inputs.year)`, or the latest year available.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoParameters`] when the regime has no
    /// populated year.
    pub fn calculate_peru(
        &self,
        inputs: &SalaryInputs,
    ) -> Result<SalaryResults, ConfigurationError> {
        let resolved = self
            .peru
            .resolve(inputs.regime, inputs.year, self.observer.as_ref())?;

        let mut results = PeruSalaryEngine::new(resolved.params).calculate(inputs);
        results.parameter_year = resolved.year;
        Ok(results)
    }

    /// Calculates an Ecuadorian salary with the parameters for
    /// `inputs.year`, or the latest year available.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoParameters`] when no year is
    /// populated.
    pub fn calculate_ecuador(
        &self,
        inputs: &EcuadorSalaryInputs,
    ) -> Result<EcuadorSalaryResults, ConfigurationError> {
        let resolved = self.ecuador.resolve(
            EcuadorRegime::General,
            inputs.year,
            self.observer.as_ref(),
        )?;

        let mut results = EcuadorSalaryEngine::new(resolved.params).calculate(inputs);
        results.parameter_year = resolved.year;
        Ok(results)
    }

    /// Nets `bonus_gross` against income tax, using the parameter year that
    /// produced `results`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoParameters`] when the regime has no
    /// populated year.
    pub fn bonus_net(
        &self,
        inputs: &SalaryInputs,
        results: &SalaryResults,
        bonus_gross: Decimal,
    ) -> Result<BonusNet, ConfigurationError> {
        let resolved = self.peru.resolve(
            inputs.regime,
            results.parameter_year.effective,
            self.observer.as_ref(),
        )?;

        Ok(BonusCalculator::new(resolved.params).bonus_net(inputs, results, bonus_gross))
    }
}
