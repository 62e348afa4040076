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
//! Module defining record data types to deserialize the benchmark CSV files.
//!
//! None of the files written by the benchmark suite carry a header row, so all records are
//! deserialized by column position.
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
/// Upper bound `2^n - 1` on the balances used in a benchmark run, identified by `n`.
pub enum UpperBound {
    #[strum(serialize = "8")]
    U8,
    #[strum(serialize = "16")]
    U16,
    #[strum(serialize = "32")]
    U32,
    #[strum(serialize = "64")]
    U64,
}

impl UpperBound {
    /// Number of bits `n` of the upper bound `2^n - 1`.
    pub fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
            Self::U64 => 64,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::iter().find(|b| b.bits() == bits)
    }

    /// Label used in the prediction report, padded to two characters.
    pub fn report_label(&self) -> String {
        format!("{:<2}", self.bits())
    }

    /// Label used in chart titles and categorical axes.
    pub fn title(&self) -> String {
        format!("2<sup>{}</sup>-1", self.bits())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
/// Key exchange protocol variants measured by the benchmark suite.
pub enum Variant {
    /// Compiler-based WAKE with Bulletproofs range proofs.
    #[strum(serialize = "COMP BPRP")]
    CompBprp,
    /// Optimized WAKE with Bulletproofs range proofs.
    #[strum(serialize = "OPT BPRP")]
    OptBprp,
    /// Compiler-based WAKE with GM17 range proofs.
    #[strum(serialize = "COMP GM17")]
    CompGm17,
    /// Optimized WAKE with GM17 range proofs.
    #[strum(serialize = "OPT GM17")]
    OptGm17,
    /// Burmester-Desmedt baseline without any authentication.
    #[strum(serialize = "BD")]
    Bd,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompBprp => "COMP BPRP",
            Self::OptBprp => "OPT BPRP",
            Self::CompGm17 => "COMP GM17",
            Self::OptGm17 => "OPT GM17",
            Self::Bd => "BD",
        }
    }

    /// Section header of the variant in the prediction report. The baseline is not
    /// extrapolated and has no section.
    pub fn report_header(&self) -> Option<&'static str> {
        match self {
            Self::CompBprp => Some("COMPILER BPRP"),
            Self::OptBprp => Some("OPT BPRP"),
            Self::CompGm17 => Some("COMP GM17"),
            Self::OptGm17 => Some("OPT GM17"),
            Self::Bd => None,
        }
    }

    /// Whether the variant produces signatures, i.e., appears in the size and sign/verify data.
    pub fn is_signed(&self) -> bool {
        !matches!(self, Self::Bd)
    }

    /// Iterate over all variants that produce signatures.
    pub fn signed() -> impl Iterator<Item = Variant> {
        Self::iter().filter(Variant::is_signed)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Row of `optimized_and_compiler_output.csv`. Times are averaged nanoseconds.
pub struct ProtocolRecord {
    pub bound: u32,
    pub parties: usize,
    pub comp_total: f64,
    pub comp_per_party: f64,
    pub opt_total: f64,
    pub opt_per_party: f64,
    pub bd_total: f64,
    pub bd_per_party: f64,
    pub gm17_comp_total: f64,
    pub gm17_comp_per_party: f64,
    pub gm17_opt_total: f64,
    pub gm17_opt_per_party: f64,
}

impl ProtocolRecord {
    /// Total and per-party time in nanoseconds of the given variant.
    pub fn times(&self, variant: Variant) -> (f64, f64) {
        match variant {
            Variant::CompBprp => (self.comp_total, self.comp_per_party),
            Variant::OptBprp => (self.opt_total, self.opt_per_party),
            Variant::CompGm17 => (self.gm17_comp_total, self.gm17_comp_per_party),
            Variant::OptGm17 => (self.gm17_opt_total, self.gm17_opt_per_party),
            Variant::Bd => (self.bd_total, self.bd_per_party),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Row of `signature_sizes.csv`, in bytes. The n-th row belongs to the n-th upper bound.
pub struct SizeRecord {
    pub comp: f64,
    pub opt: f64,
    pub gm17_comp: f64,
    pub gm17_opt: f64,
}

impl SizeRecord {
    pub fn size(&self, variant: Variant) -> Option<f64> {
        match variant {
            Variant::CompBprp => Some(self.comp),
            Variant::OptBprp => Some(self.opt),
            Variant::CompGm17 => Some(self.gm17_comp),
            Variant::OptGm17 => Some(self.gm17_opt),
            Variant::Bd => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Row of `sign_and_verify_outputs.csv`. Times are averaged nanoseconds. For the optimized
/// variants, signing includes the session authentication.
pub struct SignVerifyRecord {
    pub bound: u32,
    pub comp_sign: f64,
    pub comp_verify: f64,
    pub opt_sign: f64,
    pub opt_verify: f64,
    pub gm17_comp_sign: f64,
    pub gm17_comp_verify: f64,
    pub gm17_opt_sign: f64,
    pub gm17_opt_verify: f64,
}

impl SignVerifyRecord {
    /// Signing and verification time in nanoseconds of the given variant.
    pub fn times(&self, variant: Variant) -> Option<(f64, f64)> {
        match variant {
            Variant::CompBprp => Some((self.comp_sign, self.comp_verify)),
            Variant::OptBprp => Some((self.opt_sign, self.opt_verify)),
            Variant::CompGm17 => Some((self.gm17_comp_sign, self.gm17_comp_verify)),
            Variant::OptGm17 => Some((self.gm17_opt_sign, self.gm17_opt_verify)),
            Variant::Bd => None,
        }
    }
}
