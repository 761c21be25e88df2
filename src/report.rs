//! CSV output for plotting.
//!
//! Rows are long-format, one per run and day:
//!
//! ```text
//! population,beta,day,susceptible,infected,recovered
//! 1000,0.5,0,990,10,0
//! 1000,0.5,1,985,15,0
//! ```

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::SimError;
use crate::log::info;
use crate::sweep::SweepRun;
use crate::timeline::Timeline;

#[derive(Serialize)]
struct TimelineRow {
    population: u64,
    beta: f64,
    day: usize,
    susceptible: i64,
    infected: i64,
    recovered: i64,
}

/// Appends one row per day of `timeline`.
pub fn write_timeline_csv<W: io::Write>(
    writer: &mut csv::Writer<W>,
    beta: f64,
    timeline: &Timeline,
) -> Result<(), SimError> {
    for (day, snapshot) in timeline.iter().enumerate() {
        writer.serialize(TimelineRow {
            population: timeline.population(),
            beta,
            day,
            susceptible: snapshot.susceptible,
            infected: snapshot.infected,
            recovered: snapshot.recovered,
        })?;
    }
    Ok(())
}

/// Writes every run of a sweep, with a header row.
pub fn write_sweep_csv<W: io::Write>(out: W, runs: &[SweepRun]) -> Result<(), SimError> {
    let mut writer = csv::Writer::from_writer(out);
    for run in runs {
        write_timeline_csv(&mut writer, run.beta, &run.timeline)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_sweep_report(path: impl AsRef<Path>, runs: &[SweepRun]) -> Result<(), SimError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_sweep_csv(file, runs)?;
    info!("wrote {} runs to {}", runs.len(), path.display());
    Ok(())
}
