use std::fmt;

use serde::{Deserialize, Serialize};

/// Country whose payroll rules apply to a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "PE")]
    Peru,
    #[serde(rename = "EC")]
    Ecuador,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Peru => "PE",
            Self::Ecuador => "EC",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A regime key under which a jurisdiction's parameters are indexed.
///
/// Each jurisdiction has its own closed set of regimes, so adding a regime
/// is a new enum variant and every `match` over it is checked by the compiler.
pub trait Regime: Copy + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// The jurisdiction these regimes belong to.
    const JURISDICTION: Jurisdiction;

    /// Configuration key of the regime (e.g. `"NORMAL"`).
    fn as_str(&self) -> &'static str;

    /// Parses a configuration key. Surrounding whitespace and letter case
    /// are ignored.
    fn parse(s: &str) -> Option<Self>;
}

/// Peruvian employment regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PeruRegime {
    /// Monthly salary with discrete July and December bonuses.
    #[serde(rename = "NORMAL", alias = "STANDARD")]
    Standard,
    /// Integral remuneration: bonuses and severance are paid as monthly
    /// accrual aliquots instead of lump sums.
    #[serde(rename = "RIA", alias = "ALTERNATE")]
    Alternate,
}

impl PeruRegime {
    pub fn all() -> &'static [PeruRegime] {
        &[PeruRegime::Standard, PeruRegime::Alternate]
    }
}

impl Regime for PeruRegime {
    const JURISDICTION: Jurisdiction = Jurisdiction::Peru;

    fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "NORMAL",
            Self::Alternate => "RIA",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" | "STANDARD" => Some(Self::Standard),
            "RIA" | "ALTERNATE" => Some(Self::Alternate),
            _ => None,
        }
    }
}

impl fmt::Display for PeruRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Ecuador has a single payroll regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EcuadorRegime {
    #[serde(rename = "GENERAL")]
    General,
}

impl Regime for EcuadorRegime {
    const JURISDICTION: Jurisdiction = Jurisdiction::Ecuador;

    fn as_str(&self) -> &'static str {
        "GENERAL"
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GENERAL" => Some(Self::General),
            _ => None,
        }
    }
}

impl fmt::Display for EcuadorRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Peruvian health schemes. The scheme determines the rate of the
/// health bonus paid on top of the semiannual bonuses.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HealthScheme {
    #[default]
    #[serde(rename = "ESSALUD")]
    Essalud,
    #[serde(rename = "EPS")]
    Eps,
}

impl HealthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essalud => "ESSALUD",
            Self::Eps => "EPS",
        }
    }

    /// Parses a scheme name after trimming and upper-casing it.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ESSALUD" => Some(Self::Essalud),
            "EPS" => Some(Self::Eps),
            _ => None,
        }
    }
}

impl fmt::Display for HealthScheme {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.as_str())
    }
}
