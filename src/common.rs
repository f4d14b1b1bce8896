//! Defines some common functions used in this library.

/// Numeric constants and default hyperparameters.
pub mod constants;

/// Numerical helpers and per-label seeding.
pub mod utils;

/// Gzip-aware file reading and atomic file writing.
pub mod fileio;

/// Defines some checker functions.
pub(crate) mod checker;
