//! Regulatory parameter data for the payroll engines.
//!
//! Parameter documents are nested JSON mappings `{regime: {year: {...}}}`.
//! A year whose object is empty counts as absent. Every populated year is
//! converted to the typed parameters of `payroll-core` and validated when
//! it is inserted into its table, so a malformed document is rejected as a
//! whole at load time.

mod builtin;
mod ecuador;
mod loader;
mod peru;

pub use builtin::{
    BUILTIN_ECUADOR_JSON, BUILTIN_PERU_JSON, builtin_calculator, builtin_ecuador, builtin_peru,
};
pub use ecuador::{
    BenefitsRecord, DecimoFourthRecord, EcuadorYearRecord, FixedBracketRecord, IessRecord,
    IncomeTaxRecord, ReserveFundRecord,
};
pub use loader::{ParameterLoadError, ParameterLoader};
pub use peru::{PeruYearRecord, UnitBracketRecord};
