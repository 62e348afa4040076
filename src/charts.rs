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
//! Charts of the benchmark data. Every chart is written as a standalone html file.
use std::{
    fs,
    path::{Path, PathBuf},
};

use plotly::{
    common::{Line, Marker, MarkerSymbol, Mode, Title},
    layout::{Axis, BarMode, GridPattern, LayoutGrid},
    Bar, BoxPlot, Layout, Plot, Scatter,
};
use strum::IntoEnumIterator;

use crate::{
    dataset::{ProtocolTimes, SignVerifyTimes, SignatureSizes},
    records::{UpperBound, Variant},
    util::PathBufExt,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which protocol time is shown on the y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Measure {
    Total,
    PerParty,
}

impl Measure {
    fn file_prefix(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::PerParty => "pr_party",
        }
    }

    fn y_label(&self) -> &'static str {
        match self {
            Self::Total => "seconds",
            Self::PerParty => "seconds / party amount",
        }
    }

    fn values<'a>(
        &self,
        times: &'a ProtocolTimes,
        variant: Variant,
        bound: UpperBound,
    ) -> &'a [f64] {
        match self {
            Self::Total => times.total(variant, bound),
            Self::PerParty => times.per_party(variant, bound),
        }
    }
}

/// Which half of a signature's life is shown in a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Signing, including the session authentication for the optimized variants.
    Sign,
    Verify,
}

pub fn color(variant: Variant) -> &'static str {
    match variant {
        Variant::CompBprp => "red",
        Variant::OptBprp => "blue",
        Variant::CompGm17 => "green",
        Variant::OptGm17 => "gold",
        Variant::Bd => "indigo",
    }
}

pub fn symbol(variant: Variant) -> MarkerSymbol {
    match variant {
        Variant::CompBprp => MarkerSymbol::Circle,
        Variant::OptBprp => MarkerSymbol::X,
        Variant::CompGm17 => MarkerSymbol::Diamond,
        Variant::OptGm17 => MarkerSymbol::TriangleUp,
        Variant::Bd => MarkerSymbol::Square,
    }
}

/// Marker of a bound in the sign-versus-verify scatter plots.
fn bound_symbol(bound: UpperBound) -> MarkerSymbol {
    match bound {
        UpperBound::U8 => MarkerSymbol::Circle,
        UpperBound::U16 => MarkerSymbol::X,
        UpperBound::U32 => MarkerSymbol::Diamond,
        UpperBound::U64 => MarkerSymbol::TriangleUp,
    }
}

fn axis(title: &str) -> Axis {
    Axis::new().title(Title::with_text(title)).show_grid(true)
}

/// Axis references of the n-th subplot (counting from 1) in a grid layout.
fn subplot_axes(n: usize) -> (String, String) {
    if n == 1 {
        ("x".to_string(), "y".to_string())
    } else {
        (format!("x{n}"), format!("y{n}"))
    }
}

fn variant_trace<X>(x: Vec<X>, y: Vec<f64>, variant: Variant) -> Box<Scatter<X, f64>>
where
    X: serde::Serialize + Clone + 'static,
{
    Scatter::new(x, y)
        .name(variant.label())
        .mode(Mode::LinesMarkers)
        .line(Line::new().color(color(variant)))
        .marker(
            Marker::new()
                .color(color(variant))
                .symbol(symbol(variant))
                .size(8),
        )
}

/// Line chart of one protocol time over the party amount, one line per variant.
pub fn protocol_plot(times: &ProtocolTimes, bound: UpperBound, measure: Measure) -> Plot {
    let mut plot = Plot::new();
    for variant in Variant::iter() {
        plot.add_trace(variant_trace(
            times.parties.clone(),
            measure.values(times, variant, bound).to_vec(),
            variant,
        ));
    }
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(&format!("Upper-bound {}", bound.title())))
            .x_axis(axis("party amount"))
            .y_axis(axis(measure.y_label())),
    );
    plot
}

/// All four upper bounds of [`protocol_plot`] in a 2x2 grid sharing a single legend.
pub fn protocol_grid_plot(times: &ProtocolTimes, measure: Measure) -> Plot {
    let mut plot = Plot::new();
    for (i, bound) in UpperBound::iter().enumerate() {
        let (x_axis, y_axis) = subplot_axes(i + 1);
        for variant in Variant::iter() {
            let trace = variant_trace(
                times.parties.clone(),
                measure.values(times, variant, bound).to_vec(),
                variant,
            )
            .x_axis(&x_axis)
            .y_axis(&y_axis)
            .legend_group(variant.label())
            .show_legend(i == 0);
            plot.add_trace(trace);
        }
    }

    // subplots are titled through their x-axis; only the left column carries the unit
    let bound_axis = |bound: UpperBound| axis(&format!("party amount, {}", bound.title()));
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(measure.y_label()))
            .grid(
                LayoutGrid::new()
                    .rows(2)
                    .columns(2)
                    .pattern(GridPattern::Independent),
            )
            .height(800)
            .x_axis(bound_axis(UpperBound::U8))
            .y_axis(axis(measure.y_label()))
            .x_axis2(bound_axis(UpperBound::U16))
            .y_axis2(Axis::new().show_grid(true))
            .x_axis3(bound_axis(UpperBound::U32))
            .y_axis3(axis(measure.y_label()))
            .x_axis4(bound_axis(UpperBound::U64))
            .y_axis4(Axis::new().show_grid(true)),
    );
    plot
}

/// Box plot of the per-party times over all party amounts, one box per variant.
pub fn protocol_box_plot(times: &ProtocolTimes, bound: UpperBound) -> Plot {
    let mut plot = Plot::new();
    for variant in Variant::iter() {
        let trace = BoxPlot::<f64, f64>::new(times.per_party(variant, bound).to_vec())
            .name(variant.label())
            .marker(Marker::new().color(color(variant)));
        plot.add_trace(trace);
    }
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(&format!(
                "Per-party time distribution, upper-bound {}",
                bound.title()
            )))
            .y_axis(axis(Measure::PerParty.y_label())),
    );
    plot
}

/// Signature size over the upper bounds, one line per signed variant.
pub fn sizes_plot(sizes: &SignatureSizes) -> Plot {
    let mut plot = Plot::new();
    for variant in Variant::signed() {
        let (bounds, values) = sizes.series(variant);
        let labels = bounds.iter().map(UpperBound::title).collect();
        plot.add_trace(variant_trace(labels, values, variant));
    }
    plot.set_layout(
        Layout::new()
            .x_axis(axis("Upperbounds"))
            .y_axis(axis("size in bytes")),
    );
    plot
}

/// Grouped bar chart of the signing or verification time per upper bound.
pub fn phase_bar_plot(times: &SignVerifyTimes, phase: Phase) -> Plot {
    let mut plot = Plot::new();
    for variant in Variant::signed() {
        let (labels, values): (Vec<String>, Vec<f64>) = times
            .points(variant)
            .into_iter()
            .map(|(bound, sign, verify)| {
                let value = match phase {
                    Phase::Sign => sign,
                    Phase::Verify => verify,
                };
                (bound.title(), value)
            })
            .unzip();
        let trace = Bar::new(labels, values).name(variant.label()).marker(
            Marker::new()
                .color(color(variant))
                .line(Line::new().color("grey")),
        );
        plot.add_trace(trace);
    }
    plot.set_layout(
        Layout::new()
            .bar_mode(BarMode::Group)
            .x_axis(axis("Upperbounds"))
            .y_axis(axis("Time in milliseconds (ms)")),
    );
    plot
}

/// Signing time against verification time. Each variant is drawn as a line through its bounds,
/// and each bound is marked with its own symbol.
pub fn sign_vs_verify_plot(times: &SignVerifyTimes, variants: &[Variant]) -> Plot {
    let mut plot = Plot::new();
    for variant in variants.iter().copied() {
        let points = times.points(variant);
        let line = Scatter::new(
            points.iter().map(|(_, sign, _)| *sign).collect(),
            points.iter().map(|(_, _, verify)| *verify).collect(),
        )
        .name(variant.label())
        .mode(Mode::Lines)
        .line(Line::new().color(color(variant)))
        .legend_group(variant.label());
        plot.add_trace(line);

        for (bound, sign, verify) in points {
            let marker = Scatter::new(vec![sign], vec![verify])
                .name(&format!("{} n={}", variant.label(), bound.bits()))
                .mode(Mode::Markers)
                .marker(
                    Marker::new()
                        .color(color(variant))
                        .symbol(bound_symbol(bound))
                        .size(10),
                )
                .legend_group(variant.label());
            plot.add_trace(marker);
        }
    }
    plot.set_layout(
        Layout::new()
            .x_axis(axis("Signature creation time in milliseconds (ms)"))
            .y_axis(axis("Signature verification time in milliseconds (ms)")),
    );
    plot
}

fn write(plot: &Plot, path: PathBuf) -> PathBuf {
    plot.write_html(&path);
    log::info!("Written plot to: {}", path.to_string_lossy());
    path
}

/// Write all protocol time charts into `<plot_dir>/protocol_times/`.
pub fn plot_protocol_times(
    times: &ProtocolTimes,
    plot_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, Error> {
    let dir = plot_dir.as_ref().then("protocol_times");
    fs::create_dir_all(&dir)?;

    let mut written = Vec::new();
    for measure in Measure::iter() {
        for bound in UpperBound::iter() {
            let path = dir.as_path().then(format!(
                "{}_upper_bound_{}.html",
                measure.file_prefix(),
                bound.bits()
            ));
            written.push(write(&protocol_plot(times, bound, measure), path));
        }
        let path = dir
            .as_path()
            .then(format!("{}_upper_bound_big.html", measure.file_prefix()));
        written.push(write(&protocol_grid_plot(times, measure), path));
    }
    for bound in UpperBound::iter() {
        let path = dir
            .as_path()
            .then(format!("pr_party_distribution_{}.html", bound.bits()));
        written.push(write(&protocol_box_plot(times, bound), path));
    }
    Ok(written)
}

/// Write the signature size chart into `<plot_dir>/sizes/`.
pub fn plot_sizes(
    sizes: &SignatureSizes,
    plot_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, Error> {
    let dir = plot_dir.as_ref().then("sizes");
    fs::create_dir_all(&dir)?;
    Ok(vec![write(&sizes_plot(sizes), dir.then("sizes.html"))])
}

/// Write the signing and verification charts, each into its own directory below `plot_dir`.
pub fn plot_sign_and_verify(
    times: &SignVerifyTimes,
    plot_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, Error> {
    let plot_dir = plot_dir.as_ref();
    let mut written = Vec::new();

    for (phase, dir_name, file_name) in [
        (
            Phase::Sign,
            "sign_and_session_auth_times",
            "sign_and_session_auth.html",
        ),
        (Phase::Verify, "verification_times", "verification_plot.html"),
    ] {
        let dir = plot_dir.then(dir_name);
        fs::create_dir_all(&dir)?;
        written.push(write(&phase_bar_plot(times, phase), dir.then(file_name)));
    }

    let dir = plot_dir.then("sign_vs_verification_times");
    fs::create_dir_all(&dir)?;
    for (family, variants) in [
        ("bprp", [Variant::CompBprp, Variant::OptBprp]),
        ("gm17", [Variant::CompGm17, Variant::OptGm17]),
    ] {
        let path = dir
            .as_path()
            .then(format!("sign_vs_verification_plot_{family}.html"));
        written.push(write(&sign_vs_verify_plot(times, &variants), path));
    }
    Ok(written)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn subplot_axis_names() {
        assert_eq!(subplot_axes(1), ("x".to_string(), "y".to_string()));
        assert_eq!(subplot_axes(3), ("x3".to_string(), "y3".to_string()));
    }

    #[test]
    fn distinct_styles() {
        let colors: std::collections::HashSet<_> = Variant::iter().map(color).collect();
        assert_eq!(colors.len(), Variant::iter().len());
    }

    #[test]
    fn titles() {
        let times = ProtocolTimes::default();
        let json = protocol_plot(&times, UpperBound::U32, Measure::Total).to_json();
        assert!(json.contains("Upper-bound 2<sup>32</sup>-1"));
        assert!(json.contains("party amount"));

        let json = protocol_box_plot(&times, UpperBound::U8).to_json();
        assert!(json.contains("Per-party time distribution, upper-bound 2<sup>8</sup>-1"));
        assert!(json.contains("seconds / party amount"));
    }
}
