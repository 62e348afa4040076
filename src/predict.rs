// WAKE-PLOTS: Charts and Cost Extrapolation for WAKE Protocol Benchmarks
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
use std::{fs, path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;

use wake_plots::{
    dataset::PROTOCOL_CSV,
    prelude::*,
    util::{self, PathBufExt},
};

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Overwrite the input path for data.
    #[arg(short, long, default_value = "./data/")]
    data_path: String,
    /// Where to write the prediction report.
    #[arg(
        short,
        long,
        default_value = "./protocol_time_predictions/protocol_time_predictions.txt"
    )]
    output: String,
    /// Also write the fitted models as CSV to this path.
    #[arg(short, long)]
    models: Option<String>,
}

fn main() -> Result<()> {
    util::init_logging();

    let args = Args::parse();

    // ensure that the data folder exists
    let data_path = PathBuf::from(args.data_path);
    if !data_path.exists() {
        log::error!("Could not read data in {data_path:?}!");
        process::exit(1)
    }

    let csv_path = data_path.then(PROTOCOL_CSV);
    let times = ProtocolTimes::from_path(&csv_path)
        .with_context(|| format!("Cannot load the protocol times from {csv_path:?}"))?;
    log::info!(
        "Extrapolating {} party amounts to {:?}",
        times.parties.len(),
        PREDICTION_PARTIES
    );

    let report = generate_report(&times.prediction_sections(), &PREDICTION_PARTIES)?;

    let output = PathBuf::from(args.output);
    util::create_parent_dir(&output)?;
    fs::write(&output, report.to_string())
        .with_context(|| format!("Cannot write the report to {output:?}"))?;
    log::info!("Written predictions to: {}", output.to_string_lossy());

    if let Some(models) = args.models.map(PathBuf::from) {
        util::create_parent_dir(&models)?;
        let file = fs::File::create(&models)
            .with_context(|| format!("Cannot create {models:?}"))?;
        report.write_models_csv(file)?;
        log::info!("Written fitted models to: {}", models.to_string_lossy());
    }

    log::info!("Worst normalized RMSE: {}", report.worst.get());

    Ok(())
}
