use std::collections::BTreeMap;
use std::io::Read;

use payroll_core::{
    ConfigurationError, EcuadorParameterTable, Jurisdiction, ParameterTable, PeruParameterTable,
    Regime, TaxParameters,
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::ecuador::EcuadorYearRecord;
use crate::peru::PeruYearRecord;

/// Errors that can occur when loading a parameter document.
#[derive(Debug, Error)]
pub enum ParameterLoadError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown {jurisdiction} regime '{name}'")]
    UnknownRegime {
        jurisdiction: Jurisdiction,
        name: String,
    },

    #[error("invalid year key '{0}'")]
    InvalidYear(String),

    #[error("{regime} {year}: missing {field}")]
    MissingField {
        regime: String,
        year: i32,
        field: &'static str,
    },

    #[error("{regime} {year}: unknown health scheme '{name}'")]
    UnknownHealthScheme {
        regime: String,
        year: i32,
        name: String,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// A year entry as it appears in a parameter document.
pub(crate) trait YearRecord: DeserializeOwned {
    type Params: TaxParameters;

    /// Whether the entry carries no data and should be treated as absent.
    fn is_empty(&self) -> bool;

    fn into_params(
        self,
        regime: &str,
        year: i32,
    ) -> Result<Self::Params, ParameterLoadError>;
}

/// Returns `value` or a [`ParameterLoadError::MissingField`] for `field`.
pub(crate) fn required<T>(
    value: Option<T>,
    regime: &str,
    year: i32,
    field: &'static str,
) -> Result<T, ParameterLoadError> {
    value.ok_or_else(|| ParameterLoadError::MissingField {
        regime: regime.to_string(),
        year,
        field,
    })
}

fn parse_year(key: &str) -> Result<i32, ParameterLoadError> {
    key.trim()
        .parse()
        .map_err(|_| ParameterLoadError::InvalidYear(key.to_string()))
}

fn build_table<R, T>(
    document: BTreeMap<String, BTreeMap<String, T>>
) -> Result<ParameterTable<R, T::Params>, ParameterLoadError>
where
    R: Regime,
    T: YearRecord,
{
    let mut table = ParameterTable::new();

    for (regime_key, years) in document {
        let regime = R::parse(&regime_key).ok_or_else(|| ParameterLoadError::UnknownRegime {
            jurisdiction: R::JURISDICTION,
            name: regime_key.clone(),
        })?;

        for (year_key, record) in years {
            let year = parse_year(&year_key)?;
            if record.is_empty() {
                debug!(jurisdiction = %R::JURISDICTION, %regime, year, "skipping empty year");
                continue;
            }
            let params = record.into_params(regime.as_str(), year)?;
            table.insert(regime, year, params)?;
        }
    }

    Ok(table)
}

/// Loader for parameter documents.
///
/// The reader can be any type that implements `Read`, such as a file or a
/// byte slice.
pub struct ParameterLoader;

impl ParameterLoader {
    /// Parses and validates a Peruvian parameter document
    /// (`{"NORMAL": {...}, "RIA": {...}}`).
    pub fn peru<R: Read>(reader: R) -> Result<PeruParameterTable, ParameterLoadError> {
        let document: BTreeMap<String, BTreeMap<String, PeruYearRecord>> =
            serde_json::from_reader(reader)?;
        build_table(document)
    }

    /// Parses and validates an Ecuadorian parameter document
    /// (`{"GENERAL": {...}}`).
    pub fn ecuador<R: Read>(reader: R) -> Result<EcuadorParameterTable, ParameterLoadError> {
        let document: BTreeMap<String, BTreeMap<String, EcuadorYearRecord>> =
            serde_json::from_reader(reader)?;
        build_table(document)
    }

    pub fn peru_from_str(json: &str) -> Result<PeruParameterTable, ParameterLoadError> {
        Self::peru(json.as_bytes())
    }

    pub fn ecuador_from_str(json: &str) -> Result<EcuadorParameterTable, ParameterLoadError> {
        Self::ecuador(json.as_bytes())
    }
}
