use std::collections::BTreeMap;

use super::ConfigurationError;
use crate::models::Regime;

/// A parameter set that can check its own invariants.
pub trait TaxParameters {
    /// Validates rates, amounts and bracket shape.
    fn validate(&self) -> Result<(), ConfigurationError>;
}

/// Validated regulatory parameters indexed by regime and year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTable<R, P> {
    entries: BTreeMap<R, BTreeMap<i32, P>>,
}

impl<R, P> Default for ParameterTable<R, P> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<R: Regime, P: TaxParameters> ParameterTable<R, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `params` and stores them under `(regime, year)`, replacing
    /// any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidEntry`] wrapping the first
    /// failed check.
    pub fn insert(
        &mut self,
        regime: R,
        year: i32,
        params: P,
    ) -> Result<(), ConfigurationError> {
        params
            .validate()
            .map_err(|source| ConfigurationError::InvalidEntry {
                jurisdiction: R::JURISDICTION,
                regime: regime.to_string(),
                year,
                source: Box::new(source),
            })?;
        self.entries.entry(regime).or_default().insert(year, params);
        Ok(())
    }

    /// Parameters stored for exactly `(regime, year)`.
    pub fn get(
        &self,
        regime: R,
        year: i32,
    ) -> Option<&P> {
        self.entries.get(&regime).and_then(|years| years.get(&year))
    }

    /// Populated years for `regime`, ascending.
    pub fn years(
        &self,
        regime: R,
    ) -> Vec<i32> {
        self.entries
            .get(&regime)
            .map(|years| years.keys().copied().collect())
            .unwrap_or_default()
    }

    /// The most recent populated year for `regime`.
    pub fn latest_year(
        &self,
        regime: R,
    ) -> Option<i32> {
        self.entries
            .get(&regime)
            .and_then(|years| years.keys().next_back().copied())
    }

    /// Regimes that have at least one populated year.
    pub fn regimes(&self) -> impl Iterator<Item = R> + '_ {
        self.entries
            .iter()
            .filter(|(_, years)| !years.is_empty())
            .map(|(regime, _)| *regime)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }
}
