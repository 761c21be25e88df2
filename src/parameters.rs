//! Tunable simulation constants and sweep inputs.
//!
//! Both structs deserialize from JSON with every field optional, e.g.
//!
//! ```json
//! {
//!   "seed": 8675309,
//!   "populations": [100, 1000],
//!   "betas": [0.5, 3.0],
//!   "sirs": true,
//!   "simulation": { "initial_infections": 1, "max_days": 365 }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::new_trait::New;

/// How a day's new-infection count is drawn from `beta * S * I / N`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfectionDistribution {
    /// `Poisson(rate)`.
    #[default]
    Poisson,
    /// The number of arrivals in one day of a Poisson process with the given rate,
    /// counted from exponential inter-arrival gaps. Same law as `Poisson`, but
    /// consumes one exponential draw per arrival.
    PoissonProcess,
    /// A single exponential draw with mean `rate`.
    ///
    /// Kept to reproduce an early version of the model. An exponential is a
    /// waiting time, not an event count, so this is almost certainly a bug in that
    /// version rather than an alternative model. Prefer `Poisson`.
    Exponential,
}

/// The constants of a run that are not part of the `simulate` call itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Infected individuals at day 0.
    pub initial_infections: u64,
    /// Mean recovery delay in days.
    pub infection_duration: f64,
    /// Standard deviation of the recovery delay in days.
    pub infection_duration_std: f64,
    /// Last day a SIRS run may reach. SIR runs always stop on their own.
    pub max_days: usize,
    pub infection_distribution: InfectionDistribution,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            initial_infections: 10,
            infection_duration: 9.0,
            infection_duration_std: 2.0,
            max_days: 500,
            infection_distribution: InfectionDistribution::Poisson,
        }
    }
}

/// Longest recovery delay, in days, a run will schedule. Bounds how far the timeline
/// can grow.
pub const MAX_RECOVERY_DELAY: f64 = 36_500.0;

impl New for SimulationConfig {
    const new: &'static dyn Fn() -> Self = &SimulationConfig::default;
}

impl SimulationConfig {
    /// Checks the recovery-delay parameters and that `population` can hold the
    /// initial cohort. The mean delay may not exceed [`MAX_RECOVERY_DELAY`].
    pub fn validate(&self, population: u64) -> Result<(), SimError> {
        if population == 0 || population < self.initial_infections {
            return Err(SimError::InvalidPopulation {
                population,
                initial_infections: self.initial_infections,
            });
        }
        check_non_negative("infection_duration", self.infection_duration)?;
        check_non_negative("infection_duration_std", self.infection_duration_std)?;
        if self.infection_duration > MAX_RECOVERY_DELAY {
            return Err(SimError::InvalidParameter {
                name: "infection_duration",
                value: self.infection_duration,
            });
        }
        Ok(())
    }
}

pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

/// Input to [`run_sweep`](crate::sweep::run_sweep): one run per
/// `(population, beta)` pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepParameters {
    /// Base seed. Run `k` of the sweep is seeded with `seed + k`.
    pub seed: u64,
    pub populations: Vec<u64>,
    pub betas: Vec<f64>,
    /// Passed through to every run. Does not affect recovery.
    pub gamma: f64,
    pub sirs: bool,
    pub simulation: SimulationConfig,
    /// Where the CSV report goes when none is given on the command line.
    pub output_file: Option<PathBuf>,
}

impl Default for SweepParameters {
    fn default() -> Self {
        SweepParameters {
            seed: 0,
            populations: vec![100, 1000, 10000],
            betas: vec![0.1, 0.5, 1.0, 3.0],
            gamma: 0.1,
            sirs: false,
            simulation: SimulationConfig::default(),
            output_file: None,
        }
    }
}

impl SweepParameters {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let file = File::open(path)?;
        let parameters = serde_json::from_reader(BufReader::new(file))?;
        Ok(parameters)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let parameters = SweepParameters::from_json_str(
            r#"{ "betas": [3.0], "simulation": { "initial_infections": 1 } }"#,
        )
        .unwrap();

        assert_eq!(parameters.betas, vec![3.0]);
        assert_eq!(parameters.populations, vec![100, 1000, 10000]);
        assert_eq!(parameters.simulation.initial_infections, 1);
        assert_eq!(parameters.simulation.infection_duration, 9.0);
        assert_eq!(parameters.simulation.max_days, 500);
        assert!(!parameters.sirs);
    }

    #[test]
    fn distribution_names_are_snake_case() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "infection_distribution": "poisson_process" }"#).unwrap();
        assert_eq!(config.infection_distribution, InfectionDistribution::PoissonProcess);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 99, "sirs": true, "output_file": "out.csv" }}"#).unwrap();

        let parameters = SweepParameters::from_json_file(file.path()).unwrap();
        assert_eq!(parameters.seed, 99);
        assert!(parameters.sirs);
        assert_eq!(parameters.output_file, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result = SweepParameters::from_json_str("{ \"seed\": ");
        assert!(matches!(result, Err(SimError::JsonError(_))));
    }

    #[test]
    fn validate_rejects_small_populations() {
        let config = SimulationConfig::default();
        assert!(matches!(
            config.validate(0),
            Err(SimError::InvalidPopulation { population: 0, .. })
        ));
        assert!(matches!(
            config.validate(9),
            Err(SimError::InvalidPopulation { population: 9, initial_infections: 10 })
        ));
        assert!(config.validate(10).is_ok());
    }

    #[test]
    fn validate_rejects_unbounded_durations() {
        let config = SimulationConfig {
            infection_duration: 1e30,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(1000),
            Err(SimError::InvalidParameter { name: "infection_duration", .. })
        ));

        let config = SimulationConfig {
            infection_duration: MAX_RECOVERY_DELAY,
            ..SimulationConfig::default()
        };
        assert!(config.validate(1000).is_ok());
    }

    #[test]
    fn validate_rejects_negative_delay_parameters() {
        let config = SimulationConfig {
            infection_duration_std: -2.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(1000),
            Err(SimError::InvalidParameter { name: "infection_duration_std", .. })
        ));

        let config = SimulationConfig {
            infection_duration: f64::NAN,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(1000),
            Err(SimError::InvalidParameter { name: "infection_duration", .. })
        ));
    }
}
