pub mod audit;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod coverage;
pub mod error;
pub mod logging;
pub mod output;
pub mod path_utils;
pub mod pragma;
pub mod process;
pub mod report;
pub mod scanner;
pub mod syntax;

#[cfg(test)]
mod test_fixtures;

pub use audit::{AuditContext, Auditor, Environment};
pub use error::{Result, StrictGuardError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECK_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
