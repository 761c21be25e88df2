//! Runs the simulator over a grid of populations and transmission rates.

use crate::context::Context;
use crate::error::SimError;
use crate::log::{info, warn};
use crate::parameters::SweepParameters;
use crate::random::ContextRandomExt;
use crate::simulator::ContextEpidemicExt;
use crate::summary::{RunSummary, Termination};
use crate::timeline::Timeline;

#[derive(Clone, Debug)]
pub struct SweepRun {
    pub population: u64,
    pub beta: f64,
    pub seed: u64,
    pub timeline: Timeline,
    pub summary: RunSummary,
}

/// Runs one simulation for every `(population, beta)` pair, populations in the
/// outer loop. Each run gets a fresh `Context` seeded with `seed + run_index`.
pub fn run_sweep(parameters: &SweepParameters) -> Result<Vec<SweepRun>, SimError> {
    let mut runs = Vec::with_capacity(parameters.populations.len() * parameters.betas.len());

    for &population in &parameters.populations {
        for &beta in &parameters.betas {
            let seed = parameters.seed.wrapping_add(runs.len() as u64);

            let mut context = Context::new();
            context.init_random(seed);
            context.set_simulation_config(parameters.simulation.clone());

            let timeline =
                context.simulate_epidemic(population, beta, parameters.gamma, parameters.sirs)?;
            let summary = RunSummary::from_timeline(&timeline);

            info!(
                "N={population} beta={beta}: {} days, peak {} infected on day {}, final S={} R={}",
                summary.days,
                summary.peak_infected,
                summary.peak_day,
                summary.final_snapshot.susceptible,
                summary.final_snapshot.recovered,
            );
            if summary.termination == Termination::DayCap {
                warn!(
                    "N={population} beta={beta}: stopped at the {}-day cap with {} still infected",
                    parameters.simulation.max_days, summary.final_snapshot.infected
                );
            }

            runs.push(SweepRun {
                population,
                beta,
                seed,
                timeline,
                summary,
            });
        }
    }

    Ok(runs)
}
