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
//! Library for visualizing the WAKE benchmark results and extrapolating protocol times to larger
//! party amounts.

pub mod charts;
pub mod dataset;
pub mod records;
pub mod trend;
pub mod util;

#[cfg(test)]
mod test;

pub mod prelude {
    pub use super::{
        dataset::{ProtocolTimes, SignVerifyTimes, SignatureSizes},
        records::{UpperBound, Variant},
        trend::{
            fit, generate_report, normalized_rmse, predict, Model, PredictionReport,
            ReportSection, Series, PREDICTION_PARTIES,
        },
    };
}
