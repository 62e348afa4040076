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
//! Load the benchmark CSV files into per-variant and per-bound series.
use std::{collections::BTreeMap, fs, io::Read, path::Path};

use itertools::iproduct;
use strum::IntoEnumIterator;

use crate::{
    records::{ProtocolRecord, SignVerifyRecord, SizeRecord, UpperBound, Variant},
    trend::{ReportSection, Series},
};

/// File name of the protocol timings within the data directory.
pub const PROTOCOL_CSV: &str = "optimized_and_compiler_output.csv";
/// File name of the signature sizes within the data directory.
pub const SIZES_CSV: &str = "signature_sizes.csv";
/// File name of the signing and verification timings within the data directory.
pub const SIGN_VERIFY_CSV: &str = "sign_and_verify_outputs.csv";

const NANOS_PER_SEC: f64 = 1e9;
const NANOS_PER_MILLI: f64 = 1e6;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unknown upper bound 2^{bits}-1 in row {row}")]
    UnknownUpperBound { bits: u32, row: usize },
    #[error("Upper bound 2^{bound}-1 has {found} measurements, but {expected} party amounts are known")]
    InconsistentSeries {
        bound: UpperBound,
        expected: usize,
        found: usize,
    },
    #[error("Expected at most {max} rows, found {found}")]
    TooManyRows { max: usize, found: usize },
}

fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(rdr)
}

fn upper_bound(bits: u32, row: usize) -> Result<UpperBound, Error> {
    UpperBound::from_bits(bits).ok_or(Error::UnknownUpperBound { bits, row })
}

/// Whole-protocol timings, in seconds, for every variant and upper bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolTimes {
    /// Party amounts in the order they were measured.
    pub parties: Vec<usize>,
    total: BTreeMap<(Variant, UpperBound), Vec<f64>>,
    per_party: BTreeMap<(Variant, UpperBound), Vec<f64>>,
}

impl ProtocolTimes {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        log::info!("Loading: {:?}", path.as_ref());
        Self::from_reader(fs::File::open(path)?)
    }

    /// Parse the protocol timings. Rows may interleave the upper bounds in any order, but every
    /// upper bound must be measured for the same party amounts as `2^8-1`.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, Error> {
        let mut times = Self::default();
        for (variant, bound) in iproduct!(Variant::iter(), UpperBound::iter()) {
            times.total.insert((variant, bound), Vec::new());
            times.per_party.insert((variant, bound), Vec::new());
        }

        for (row, record) in reader(rdr).deserialize().enumerate() {
            let record: ProtocolRecord = record?;
            log::trace!("Reading from CSV:\n{record:#?}");
            let bound = upper_bound(record.bound, row)?;
            if bound == UpperBound::U8 {
                times.parties.push(record.parties);
            }
            for variant in Variant::iter() {
                let (total, per_party) = record.times(variant);
                if let Some(xs) = times.total.get_mut(&(variant, bound)) {
                    xs.push(total / NANOS_PER_SEC);
                }
                if let Some(xs) = times.per_party.get_mut(&(variant, bound)) {
                    xs.push(per_party / NANOS_PER_SEC);
                }
            }
        }

        for bound in UpperBound::iter() {
            let found = times.total(Variant::CompBprp, bound).len();
            if found != times.parties.len() {
                return Err(Error::InconsistentSeries {
                    bound,
                    expected: times.parties.len(),
                    found,
                });
            }
        }

        Ok(times)
    }

    /// Total time of one protocol run, in seconds, ordered like `parties`.
    pub fn total(&self, variant: Variant, bound: UpperBound) -> &[f64] {
        self.total
            .get(&(variant, bound))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Time of one protocol run divided by the number of parties, in seconds.
    pub fn per_party(&self, variant: Variant, bound: UpperBound) -> &[f64] {
        self.per_party
            .get(&(variant, bound))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Per-party times of a variant as a series over the party amount, labeled by the bound.
    pub fn per_party_series(&self, variant: Variant, bound: UpperBound) -> Series {
        Series::new(
            bound.report_label(),
            self.parties.iter().map(|p| *p as f64).collect(),
            self.per_party(variant, bound).to_vec(),
        )
    }

    /// Sections of the prediction report: one per extrapolated variant, one series per bound.
    pub fn prediction_sections(&self) -> Vec<ReportSection> {
        Variant::iter()
            .filter_map(|variant| {
                variant.report_header().map(|header| ReportSection {
                    header: header.to_string(),
                    series: UpperBound::iter()
                        .map(|bound| self.per_party_series(variant, bound))
                        .collect(),
                })
            })
            .collect()
    }
}

/// Signature sizes, in bytes, for every signed variant and upper bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureSizes {
    sizes: BTreeMap<(Variant, UpperBound), f64>,
}

impl SignatureSizes {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        log::info!("Loading: {:?}", path.as_ref());
        Self::from_reader(fs::File::open(path)?)
    }

    /// Parse the signature sizes, where the n-th row belongs to the n-th upper bound.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, Error> {
        let records = reader(rdr)
            .deserialize()
            .collect::<Result<Vec<SizeRecord>, _>>()?;
        let max = UpperBound::iter().len();
        if records.len() > max {
            return Err(Error::TooManyRows {
                max,
                found: records.len(),
            });
        }

        let sizes = UpperBound::iter()
            .zip(records.iter())
            .flat_map(|(bound, record)| {
                Variant::signed()
                    .filter_map(move |v| record.size(v).map(|size| ((v, bound), size)))
            })
            .collect();
        Ok(Self { sizes })
    }

    pub fn get(&self, variant: Variant, bound: UpperBound) -> Option<f64> {
        self.sizes.get(&(variant, bound)).copied()
    }

    /// Sizes of a variant for all upper bounds present in the data, in bound order.
    pub fn series(&self, variant: Variant) -> (Vec<UpperBound>, Vec<f64>) {
        UpperBound::iter()
            .filter_map(|bound| self.get(variant, bound).map(|size| (bound, size)))
            .unzip()
    }
}

/// Signing and verification times, in milliseconds, for every signed variant and upper bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignVerifyTimes {
    times: BTreeMap<(Variant, UpperBound), (f64, f64)>,
}

impl SignVerifyTimes {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        log::info!("Loading: {:?}", path.as_ref());
        Self::from_reader(fs::File::open(path)?)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, Error> {
        let mut times = BTreeMap::new();
        for (row, record) in reader(rdr).deserialize().enumerate() {
            let record: SignVerifyRecord = record?;
            let bound = upper_bound(record.bound, row)?;
            for variant in Variant::signed() {
                if let Some((sign, verify)) = record.times(variant) {
                    times.insert(
                        (variant, bound),
                        (sign / NANOS_PER_MILLI, verify / NANOS_PER_MILLI),
                    );
                }
            }
        }
        Ok(Self { times })
    }

    /// Signing and verification time of a variant at the given bound.
    pub fn get(&self, variant: Variant, bound: UpperBound) -> Option<(f64, f64)> {
        self.times.get(&(variant, bound)).copied()
    }

    /// All `(bound, sign, verify)` points of a variant, in bound order.
    pub fn points(&self, variant: Variant) -> Vec<(UpperBound, f64, f64)> {
        UpperBound::iter()
            .filter_map(|bound| {
                self.get(variant, bound)
                    .map(|(sign, verify)| (bound, sign, verify))
            })
            .collect()
    }
}
