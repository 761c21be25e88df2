//! The error type returned by fallible operations in this crate.

use std::fmt::{self, Display};
use std::io;

use crate::parameters::MAX_RECOVERY_DELAY;

/// Errors reported to the caller. Invariant violations inside a run are not
/// represented here; they are logic defects and panic.
#[derive(Debug)]
pub enum SimError {
    /// The population is empty or smaller than the initial infected cohort.
    InvalidPopulation {
        population: u64,
        initial_infections: u64,
    },
    /// A rate or recovery-delay parameter is negative, not finite, or out of range.
    InvalidParameter { name: &'static str, value: f64 },
    /// A drawn recovery delay lands further out than the timeline may grow.
    RecoveryDelayTooLong { day: usize, delay: f64 },
    /// A distribution rejected its parameters.
    Distribution(String),
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    LoggingError(String),
}

impl Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidPopulation {
                population,
                initial_infections,
            } => write!(
                f,
                "population must be positive and at least the number of initial infections \
                 (population = {population}, initial infections = {initial_infections})"
            ),
            SimError::InvalidParameter { name, value } => {
                write!(f, "`{name}` must be finite, non-negative and in range, got {value}")
            }
            SimError::RecoveryDelayTooLong { day, delay } => write!(
                f,
                "recovery delay of {delay} days drawn on day {day} exceeds the limit of \
                 {MAX_RECOVERY_DELAY} days"
            ),
            SimError::Distribution(msg) => write!(f, "invalid distribution: {msg}"),
            SimError::IoError(err) => write!(f, "I/O error: {err}"),
            SimError::JsonError(err) => write!(f, "JSON error: {err}"),
            SimError::CsvError(err) => write!(f, "CSV error: {err}"),
            SimError::LoggingError(msg) => write!(f, "logging error: {msg}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::IoError(err) => Some(err),
            SimError::JsonError(err) => Some(err),
            SimError::CsvError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(error: io::Error) -> Self {
        SimError::IoError(error)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(error: serde_json::Error) -> Self {
        SimError::JsonError(error)
    }
}

impl From<csv::Error> for SimError {
    fn from(error: csv::Error) -> Self {
        SimError::CsvError(error)
    }
}

impl From<rand_distr::NormalError> for SimError {
    fn from(error: rand_distr::NormalError) -> Self {
        SimError::Distribution(error.to_string())
    }
}

impl From<rand_distr::PoissonError> for SimError {
    fn from(error: rand_distr::PoissonError) -> Self {
        SimError::Distribution(error.to_string())
    }
}

impl From<rand_distr::ExpError> for SimError {
    fn from(error: rand_distr::ExpError) -> Self {
        SimError::Distribution(error.to_string())
    }
}
