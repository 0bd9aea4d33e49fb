//! Command-line front end for the payroll engines.

pub mod app;
pub mod config;
pub mod csv_loader;
pub mod logging;
pub mod report;
pub mod utils;
