//! Condensed view of a finished run for drivers and reports.

use serde::Serialize;

use crate::timeline::{Snapshot, Timeline};

/// Why a run's timeline ends where it does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No one is infected on the last day; the outbreak is over.
    Extinct,
    /// The run stopped at the SIRS day cap with infections remaining. The outbreak
    /// may well have continued.
    DayCap,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub population: u64,
    /// Days simulated after day 0.
    pub days: usize,
    pub final_snapshot: Snapshot,
    pub peak_infected: i64,
    /// First day on which `peak_infected` was reached.
    pub peak_day: usize,
    /// Fraction of the population that is not susceptible on the last day. For SIRS
    /// runs this is the prevalence on the last day rather than a cumulative count.
    pub final_attack_fraction: f64,
    pub termination: Termination,
}

impl RunSummary {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let final_snapshot = timeline.final_snapshot();
        let (peak_day, peak_infected) = timeline
            .infected()
            .enumerate()
            .fold((0, i64::MIN), |(best_day, best), (day, infected)| {
                if infected > best {
                    (day, infected)
                } else {
                    (best_day, best)
                }
            });

        let termination = if final_snapshot.infected == 0 {
            Termination::Extinct
        } else {
            Termination::DayCap
        };

        let population = timeline.population();
        RunSummary {
            population,
            days: timeline.last_day(),
            final_snapshot,
            peak_infected,
            peak_day,
            final_attack_fraction: (population as f64 - final_snapshot.susceptible as f64)
                / population as f64,
            termination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline_from(population: u64, days: &[(i64, i64, i64)]) -> Timeline {
        let mut timeline = Timeline::new(population);
        for (day, &(s, i, r)) in days.iter().enumerate() {
            *timeline.day_mut(day) = Snapshot::new(s, i, r);
        }
        timeline
    }

    #[test]
    fn extinct_run() {
        let timeline = timeline_from(
            100,
            &[(90, 10, 0), (80, 20, 0), (75, 20, 5), (75, 10, 15), (75, 0, 25)],
        );
        let summary = RunSummary::from_timeline(&timeline);

        assert_eq!(summary.days, 4);
        assert_eq!(summary.peak_infected, 20);
        assert_eq!(summary.peak_day, 1);
        assert_eq!(summary.termination, Termination::Extinct);
        assert!((summary.final_attack_fraction - 0.25).abs() < 1e-12);
    }

    #[test]
    fn capped_run_is_flagged() {
        let timeline = timeline_from(100, &[(90, 10, 0), (85, 15, 0), (88, 12, 0)]);
        let summary = RunSummary::from_timeline(&timeline);

        assert_eq!(summary.termination, Termination::DayCap);
        assert_eq!(summary.final_snapshot, Snapshot::new(88, 12, 0));
    }
}
