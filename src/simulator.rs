//! The discrete-time SIR/SIRS simulation loop.
//!
//! Every newly infected person gets a recovery day the moment they are infected, and
//! that recovery is written straight into the timeline as a `(-1 I, +1 R)` delta on
//! the day it lands. The loop then walks the timeline one day at a time, adding the
//! running counts onto whatever deltas are already sitting on the day. A run ends when
//! the cursor reaches the furthest day any recovery was scheduled on.

use crate::context::Context;
use crate::error::SimError;
use crate::log::{debug, trace};
use crate::parameters::{
    check_non_negative, InfectionDistribution, SimulationConfig, MAX_RECOVERY_DELAY,
};
use crate::random::DiseaseSampler;
use crate::timeline::{Snapshot, Timeline};

/// Runs one simulation and returns its finalized timeline, days `0..=T`.
///
/// `gamma` is accepted for symmetry with the classical SIR parameterization but does
/// not drive recovery; recovery days come from `Normal(infection_duration,
/// infection_duration_std)`.
///
/// When `sirs` is set, everyone recovered at the end of a day becomes susceptible
/// again, and the run stops after `config.max_days` at the latest. A SIRS timeline
/// whose last day still has infected people was stopped by that cap and may be
/// incomplete.
pub fn simulate<S: DiseaseSampler + ?Sized>(
    sampler: &mut S,
    config: &SimulationConfig,
    population: u64,
    beta: f64,
    gamma: f64,
    sirs: bool,
) -> Result<Timeline, SimError> {
    config.validate(population)?;
    check_non_negative("beta", beta)?;

    let invalid_population = || SimError::InvalidPopulation {
        population,
        initial_infections: config.initial_infections,
    };
    let total = i64::try_from(population).map_err(|_| invalid_population())?;
    let initial_infections =
        i64::try_from(config.initial_infections).map_err(|_| invalid_population())?;

    debug!(
        "simulating population={population} beta={beta} gamma={gamma} sirs={sirs} \
         initial_infections={initial_infections}"
    );

    let mut timeline = Timeline::new(population);
    let mut t = 0;

    schedule_recoveries(&mut timeline, sampler, config, t, initial_infections)?;
    let initial = Snapshot::new(total - initial_infections, initial_infections, 0);
    let mut current = fold_day(&mut timeline, t, initial, sirs);

    while t < timeline.last_day() && !(sirs && t >= config.max_days) {
        t += 1;

        let infection_rate =
            beta * current.susceptible as f64 * current.infected as f64 / population as f64;
        if infection_rate > 0.0 {
            let new_infections = draw_new_infections(
                sampler,
                config.infection_distribution,
                infection_rate,
                current.susceptible,
            )?;
            current.susceptible -= new_infections;
            current.infected += new_infections;
            schedule_recoveries(&mut timeline, sampler, config, t, new_infections)?;
        }

        current = fold_day(&mut timeline, t, current, sirs);
        trace!("day {t}: {current:?}");
    }

    // Past the cursor the timeline only holds partial recovery deltas.
    timeline.truncate(t);

    debug!(
        "finished after {t} days: S={} I={} R={}",
        current.susceptible, current.infected, current.recovered
    );
    Ok(timeline)
}

/// Schedules the recoveries of `count` people infected on `day`. Each recovery
/// lands `round(delay)` days later, where a negative delay counts as zero. A delay
/// beyond [`MAX_RECOVERY_DELAY`] is an error.
pub(crate) fn schedule_recoveries<S: DiseaseSampler + ?Sized>(
    timeline: &mut Timeline,
    sampler: &mut S,
    config: &SimulationConfig,
    day: usize,
    count: i64,
) -> Result<(), SimError> {
    for _ in 0..count {
        let delay =
            sampler.recovery_delay(config.infection_duration, config.infection_duration_std)?;
        let rounded = delay.round().max(0.0);
        let recovery_day = if rounded <= MAX_RECOVERY_DELAY {
            day.checked_add(rounded as usize)
        } else {
            None
        };
        let recovery_day = recovery_day.ok_or(SimError::RecoveryDelayTooLong { day, delay })?;
        timeline.day_mut(recovery_day).record_recovery();
    }
    Ok(())
}

/// Adds `counts` onto the deltas already on `day` and returns the finalized snapshot.
fn fold_day(timeline: &mut Timeline, day: usize, counts: Snapshot, sirs: bool) -> Snapshot {
    let snapshot = timeline.day_mut(day);
    *snapshot += counts;
    if sirs {
        snapshot.wane_immunity();
    }
    *snapshot
}

fn draw_new_infections<S: DiseaseSampler + ?Sized>(
    sampler: &mut S,
    distribution: InfectionDistribution,
    infection_rate: f64,
    susceptible: i64,
) -> Result<i64, SimError> {
    let drawn = match distribution {
        InfectionDistribution::Poisson | InfectionDistribution::PoissonProcess
            if saturates(infection_rate, susceptible) =>
        {
            susceptible as f64
        }
        InfectionDistribution::Poisson => sampler.poisson(infection_rate)?,
        InfectionDistribution::PoissonProcess => {
            poisson_process_count(sampler, infection_rate, susceptible)? as f64
        }
        InfectionDistribution::Exponential => sampler.exponential(1.0 / infection_rate)?,
    };

    let new_infections = (drawn.round() as i64).min(susceptible);
    assert!(
        (0..=susceptible).contains(&new_infections),
        "drew {new_infections} new infections with {susceptible} susceptible"
    );
    Ok(new_infections)
}

/// True when a Poisson count with mean `rate` is below `susceptible` with negligible
/// probability: the mean exceeds the pool by at least ten standard deviations. Such
/// rates may also be beyond what `Poisson` accepts.
fn saturates(rate: f64, susceptible: i64) -> bool {
    rate - susceptible as f64 >= 10.0 * rate.sqrt()
}

/// Counts arrivals within one day of a Poisson process with the given rate, stopping
/// once `limit` arrivals have been seen.
fn poisson_process_count<S: DiseaseSampler + ?Sized>(
    sampler: &mut S,
    rate: f64,
    limit: i64,
) -> Result<i64, SimError> {
    let mut arrivals = 0;
    let mut elapsed = 0.0;
    while arrivals < limit {
        elapsed += sampler.exponential(rate)?;
        if elapsed >= 1.0 {
            break;
        }
        arrivals += 1;
    }
    Ok(arrivals)
}

pub trait ContextEpidemicExt {
    /// Replaces the configuration used by `simulate_epidemic`.
    fn set_simulation_config(&mut self, config: SimulationConfig);

    /// The configuration `simulate_epidemic` will use. Defaults apply until one is set.
    fn get_simulation_config(&self) -> SimulationConfig;

    /// Runs [`simulate`] with this context's configuration and random streams.
    fn simulate_epidemic(
        &mut self,
        population: u64,
        beta: f64,
        gamma: f64,
        sirs: bool,
    ) -> Result<Timeline, SimError>;
}

impl ContextEpidemicExt for Context {
    fn set_simulation_config(&mut self, config: SimulationConfig) {
        *self.get_data_container_mut::<SimulationConfig>() = config;
    }

    fn get_simulation_config(&self) -> SimulationConfig {
        self.get_data_container::<SimulationConfig>()
            .cloned()
            .unwrap_or_default()
    }

    fn simulate_epidemic(
        &mut self,
        population: u64,
        beta: f64,
        gamma: f64,
        sirs: bool,
    ) -> Result<Timeline, SimError> {
        let config = self.get_simulation_config();
        simulate(self, &config, population, beta, gamma, sirs)
    }
}
