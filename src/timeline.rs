//! Per-day compartment counts.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Compartment counts for one day.
///
/// Counts are signed because a day ahead of the simulation cursor only holds the
/// recovery deltas scheduled onto it so far (e.g. `infected == -3`). Once the cursor
/// has passed a day its counts are non-negative and sum to the population.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub susceptible: i64,
    pub infected: i64,
    pub recovered: i64,
}

impl Snapshot {
    pub fn new(susceptible: i64, infected: i64, recovered: i64) -> Self {
        Snapshot {
            susceptible,
            infected,
            recovered,
        }
    }

    pub fn total(&self) -> i64 {
        self.susceptible + self.infected + self.recovered
    }

    /// Moves one person from Infected to Recovered.
    pub fn record_recovery(&mut self) {
        self.infected -= 1;
        self.recovered += 1;
    }

    /// Moves everyone in Recovered back to Susceptible.
    pub fn wane_immunity(&mut self) {
        self.susceptible += self.recovered;
        self.recovered = 0;
    }

    pub fn as_tuple(&self) -> (i64, i64, i64) {
        (self.susceptible, self.infected, self.recovered)
    }
}

impl AddAssign for Snapshot {
    fn add_assign(&mut self, rhs: Self) {
        self.susceptible += rhs.susceptible;
        self.infected += rhs.infected;
        self.recovered += rhs.recovered;
    }
}

/// The snapshots of one run indexed by day, starting at day 0.
///
/// The timeline grows on demand: writing to a day past the end first pads it with
/// zero snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    population: u64,
    days: Vec<Snapshot>,
}

impl Timeline {
    /// A timeline holding a single zero snapshot for day 0.
    pub fn new(population: u64) -> Self {
        Timeline {
            population,
            days: vec![Snapshot::default()],
        }
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    /// Returns the snapshot for `day`, extending the timeline with zero snapshots if
    /// it does not reach that far yet.
    pub fn day_mut(&mut self, day: usize) -> &mut Snapshot {
        if day >= self.days.len() {
            self.days.resize(day + 1, Snapshot::default());
        }
        &mut self.days[day]
    }

    pub fn get(&self, day: usize) -> Option<&Snapshot> {
        self.days.get(day)
    }

    /// Index of the last populated day.
    pub fn last_day(&self) -> usize {
        self.days.len() - 1
    }

    /// Number of days, including day 0.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn initial_snapshot(&self) -> Snapshot {
        self.days[0]
    }

    pub fn final_snapshot(&self) -> Snapshot {
        self.days[self.last_day()]
    }

    /// Drops every day after `last_day`.
    pub(crate) fn truncate(&mut self, last_day: usize) {
        self.days.truncate(last_day + 1);
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.days
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.days.iter()
    }

    pub fn susceptible(&self) -> impl Iterator<Item = i64> + '_ {
        self.days.iter().map(|snapshot| snapshot.susceptible)
    }

    pub fn infected(&self) -> impl Iterator<Item = i64> + '_ {
        self.days.iter().map(|snapshot| snapshot.infected)
    }

    pub fn recovered(&self) -> impl Iterator<Item = i64> + '_ {
        self.days.iter().map(|snapshot| snapshot.recovered)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
