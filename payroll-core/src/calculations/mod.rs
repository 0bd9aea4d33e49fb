//! Payroll calculation engines for Peru and Ecuador.
//!
//! The engines are pure functions of their inputs and a resolved
//! parameter set: no I/O, no shared state.

pub mod bonus;
pub mod brackets;
pub mod common;
pub mod ecuador;
pub mod peru;

pub use bonus::{BonusCalculator, compute_bonus_gross};
pub use brackets::{BracketTax, FixedAmountSchedule, ProgressiveSchedule};
pub use ecuador::EcuadorSalaryEngine;
pub use peru::PeruSalaryEngine;
