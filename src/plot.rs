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
use clap::{Parser, ValueEnum};
use serde::Serialize;

use wake_plots::{
    charts,
    dataset::{PROTOCOL_CSV, SIGN_VERIFY_CSV, SIZES_CSV},
    prelude::*,
    util::{self, PathBufExt},
};

#[derive(Parser, Debug, Serialize)]
#[command(about, long_about = None)]
struct Args {
    /// Overwrite the input path for data.
    #[arg(short, long, default_value = "./data/")]
    data_path: String,
    /// Overwrite the output path for plots.
    #[arg(short, long, default_value = "./plots/")]
    output_path: String,
    /// Type of plot to generate.
    #[arg(short, long, value_enum, default_value_t = PlotType::All)]
    plot_type: PlotType,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum PlotType {
    /// Produces all plots.
    #[default]
    All,
    /// Shows the total and per-party protocol times over the party amount.
    Protocol,
    /// Shows the signature sizes of each upper bound.
    Sizes,
    /// Shows the signing and verification times of each upper bound.
    SignAndVerify,
}

impl PlotType {
    fn includes(self, other: PlotType) -> bool {
        self == PlotType::All || self == other
    }
}

fn main() -> Result<()> {
    util::init_logging();

    // parse plot parameters
    let args = Args::parse();
    log::debug!("{}", serde_json::to_string(&args)?);

    let plot_dir = PathBuf::from(&args.output_path);
    fs::create_dir_all(&plot_dir)
        .with_context(|| format!("Cannot create the plot directory {plot_dir:?}"))?;

    // ensure that the data folder exists
    let data_path = PathBuf::from(&args.data_path);
    if !data_path.exists() {
        log::error!("Could not read data in {data_path:?}!");
        process::exit(1)
    }

    let mut written = Vec::new();

    if args.plot_type.includes(PlotType::Protocol) {
        let times = ProtocolTimes::from_path(data_path.clone().then(PROTOCOL_CSV))
            .context("Cannot load the protocol times")?;
        written.extend(charts::plot_protocol_times(&times, &plot_dir)?);
    }

    if args.plot_type.includes(PlotType::Sizes) {
        let sizes = SignatureSizes::from_path(data_path.clone().then(SIZES_CSV))
            .context("Cannot load the signature sizes")?;
        written.extend(charts::plot_sizes(&sizes, &plot_dir)?);
    }

    if args.plot_type.includes(PlotType::SignAndVerify) {
        let times = SignVerifyTimes::from_path(data_path.clone().then(SIGN_VERIFY_CSV))
            .context("Cannot load the signing and verification times")?;
        written.extend(charts::plot_sign_and_verify(&times, &plot_dir)?);
    }

    log::info!("Written {} plots into {plot_dir:?}", written.len());

    Ok(())
}
