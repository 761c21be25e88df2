//! A stochastic, discrete-time compartmental epidemic simulator.
//!
//! A run tracks a closed population of `N` people through Susceptible, Infected
//! and Recovered compartments one day at a time. Each day a random number of new
//! infections is drawn, and every newly infected person immediately gets a random
//! recovery delay which is folded into the day it lands on. The result is a
//! [`Timeline`] of per-day [`Snapshot`]s.
//!
//! The SIRS variant returns recovered people to the susceptible pool at the end of
//! every day. It has no natural stopping point, so it is bounded by
//! [`SimulationConfig::max_days`].
//!
//! ```rust
//! use sirs_sim::{Context, ContextEpidemicExt, ContextRandomExt, SimulationConfig};
//!
//! let mut context = Context::new();
//! context.init_random(42);
//! context.set_simulation_config(SimulationConfig::default());
//!
//! let timeline = context.simulate_epidemic(1000, 0.5, 0.1, false).unwrap();
//! let last = timeline.final_snapshot();
//! assert_eq!(last.total(), 1000);
//! assert_eq!(last.infected, 0);
//! ```

mod context;
mod new_trait;
mod trait_map;

pub mod error;
pub mod hashing;
pub mod log;
pub mod parameters;
pub mod random;
pub mod report;
pub mod simulator;
pub mod summary;
pub mod sweep;
pub mod timeline;

// All modules import `crate::TypeId` in case we want to change the underlying type of `TypeId`.
pub(crate) use std::any::TypeId;

pub use context::Context;
pub use error::SimError;
pub use new_trait::New;
pub use parameters::{InfectionDistribution, SimulationConfig, SweepParameters};
pub use random::{ContextRandomExt, DiseaseSampler, RngId};
pub use simulator::{simulate, ContextEpidemicExt};
pub use summary::{RunSummary, Termination};
pub use sweep::{run_sweep, SweepRun};
pub use timeline::{Snapshot, Timeline};

// Re-exported for `define_rng!`.
pub use rand;

// Replace with `typeid::of as type_of` if necessary.
#[inline(always)]
pub fn type_of<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}
