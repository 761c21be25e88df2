//! Sweeps population size and transmission rate and writes every timeline as CSV.
//!
//! ```text
//! sir-sweep [PARAMS.json] [OUT.csv]
//! ```
//!
//! Without a parameter file the built-in grid is used. Without an output path the
//! report goes to `output_file` from the parameters, or to stdout.

use std::env;
use std::io;

use sirs_sim::log::{info, set_log_level, LevelFilter};
use sirs_sim::report::{write_sweep_csv, write_sweep_report};
use sirs_sim::{run_sweep, SimError, SweepParameters};

fn main() -> Result<(), SimError> {
    set_log_level(LevelFilter::Info)?;

    let mut args = env::args().skip(1);
    let parameters = match args.next() {
        Some(path) => {
            info!("loading parameters from {path}");
            SweepParameters::from_json_file(path)?
        }
        None => SweepParameters::default(),
    };
    info!("running sweep with parameters:\n{parameters:#?}");

    let runs = run_sweep(&parameters)?;

    match args.next().map(Into::into).or_else(|| parameters.output_file.clone()) {
        Some(path) => write_sweep_report(path, &runs),
        None => write_sweep_csv(io::stdout().lock(), &runs),
    }
}
