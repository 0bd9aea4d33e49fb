use tracing::{debug, warn};

use super::{ConfigurationError, ParameterTable, TaxParameters};
use crate::models::{Jurisdiction, ParameterYear, Regime};

/// Receives notice when a requested year is replaced by a fallback year.
pub trait ParameterObserver: Send + Sync {
    fn year_substituted(
        &self,
        jurisdiction: Jurisdiction,
        regime: &str,
        requested_year: i32,
        effective_year: i32,
    );
}

/// Reports substitutions as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ParameterObserver for TracingObserver {
    fn year_substituted(
        &self,
        jurisdiction: Jurisdiction,
        regime: &str,
        requested_year: i32,
        effective_year: i32,
    ) {
        warn!(
            %jurisdiction,
            regime,
            requested_year,
            effective_year,
            "no parameters for requested year, using latest available"
        );
    }
}

/// Parameters picked by [`ParameterTable::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a, P> {
    pub params: &'a P,
    pub year: ParameterYear,
}

impl<R: Regime, P: TaxParameters> ParameterTable<R, P> {
    /// Looks up parameters for `(regime, year)`.
    ///
    /// When `year` has no entry, the latest populated year for the regime is
    /// used instead and `observer` is told about the substitution.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoParameters`] when the regime has no
    /// populated year at all.
    pub fn resolve(
        &self,
        regime: R,
        year: i32,
        observer: &dyn ParameterObserver,
    ) -> Result<Resolved<'_, P>, ConfigurationError> {
        if let Some(params) = self.get(regime, year) {
            debug!(jurisdiction = %R::JURISDICTION, %regime, year, "parameters resolved");
            return Ok(Resolved {
                params,
                year: ParameterYear::exact(year),
            });
        }

        let fallback = self
            .latest_year(regime)
            .and_then(|latest| self.get(regime, latest).map(|params| (latest, params)));

        match fallback {
            Some((effective, params)) => {
                observer.year_substituted(R::JURISDICTION, regime.as_str(), year, effective);
                Ok(Resolved {
                    params,
                    year: ParameterYear {
                        requested: year,
                        effective,
                    },
                })
            }
            None => Err(ConfigurationError::NoParameters {
                jurisdiction: R::JURISDICTION,
                regime: regime.to_string(),
            }),
        }
    }
}
