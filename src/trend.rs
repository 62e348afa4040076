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
//! Linear trend estimation used to extrapolate measured protocol times to larger party counts.
//!
//! Every series is fitted with ordinary least squares on a single predictor. The quality of each
//! fit is judged by the RMSE normalized with the mean of the observed values, and the worst such
//! value over a whole report is reported at its end.
use std::{fmt, io};

use itertools::{izip, Itertools};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Party counts at which every fitted model is evaluated for the prediction report.
pub const PREDICTION_PARTIES: [f64; 6] = [100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0];

/// Error type thrown while fitting or evaluating a trend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendError {
    /// The fit is undefined without at least two distinct x-values.
    #[error("Cannot fit a line through {points} points with {distinct} distinct x-values")]
    DegenerateInput { points: usize, distinct: usize },
    /// The normalization of the RMSE is undefined for a zero mean.
    #[error("The observed values have a mean of zero")]
    DivisionByZero,
    /// Observed and predicted values must be non-empty and of equal length.
    #[error("Got {actual} observed values but {predicted} predicted values")]
    LengthMismatch { actual: usize, predicted: usize },
}

/// Error type thrown while generating a prediction report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Series `{label}` of `{section}`: {source}")]
    Series {
        section: String,
        label: String,
        source: TrendError,
    },
}

/// A labeled sequence of `(x, y)` observations, kept in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }
}

impl FromIterator<(f64, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let (x, y) = iter.into_iter().multiunzip();
        Self {
            label: String::new(),
            x,
            y,
        }
    }
}

/// Linear model `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Model {
    pub slope: f64,
    pub intercept: f64,
}

impl Model {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit the ordinary least squares line through the observations of `series`.
pub fn fit(series: &Series) -> Result<Model, TrendError> {
    let points = series.x.len();
    if points != series.y.len() {
        return Err(TrendError::LengthMismatch {
            actual: series.y.len(),
            predicted: points,
        });
    }
    // adding +0.0 maps -0.0 onto 0.0, so values are compared rather than bit patterns
    let distinct = series
        .x
        .iter()
        .map(|x| (x + 0.0).to_bits())
        .unique()
        .count();
    if distinct < 2 {
        return Err(TrendError::DegenerateInput { points, distinct });
    }

    // both are sample estimates, so the normalization cancels out
    let slope = series.x.iter().covariance(series.y.iter()) / series.x.iter().variance();
    let intercept = series.y.iter().mean() - slope * series.x.iter().mean();

    Ok(Model { slope, intercept })
}

/// Evaluate `model` at every x-value, keeping the order of `xs`.
pub fn predict(model: &Model, xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|x| model.eval(*x)).collect()
}

/// Root mean squared error of `predicted` against `actual`, divided by the mean of `actual`.
pub fn normalized_rmse(actual: &[f64], predicted: &[f64]) -> Result<f64, TrendError> {
    if actual.is_empty() || actual.len() != predicted.len() {
        return Err(TrendError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    let mean = actual.iter().mean();
    if mean == 0.0 {
        return Err(TrendError::DivisionByZero);
    }
    let mse = izip!(actual, predicted)
        .map(|(a, p)| (a - p).powi(2))
        .mean();
    Ok(mse.sqrt() / mean)
}

/// Running maximum of the normalized RMSE over all series of a report. Starts at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WorstCase(f64);

impl WorstCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new value and return the current maximum.
    pub fn update(&mut self, normalized_rmse: f64) -> f64 {
        if normalized_rmse > self.0 {
            self.0 = normalized_rmse;
        }
        self.0
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

/// Ordered group of series written under a common header.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub header: String,
    pub series: Vec<Series>,
}

/// Outcome of fitting and extrapolating a single series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPrediction {
    pub label: String,
    pub model: Model,
    pub normalized_rmse: f64,
    pub predictions: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionPrediction {
    pub header: String,
    pub lines: Vec<SeriesPrediction>,
}

/// Result of [`generate_report`]. Its `Display` implementation renders the text report.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    pub predict_at: Vec<f64>,
    pub sections: Vec<SectionPrediction>,
    pub worst: WorstCase,
}

/// Fit every series, check its fit on its own observations, and extrapolate it to `predict_at`.
/// The first series that cannot be fitted aborts the report.
pub fn generate_report(
    sections: &[ReportSection],
    predict_at: &[f64],
) -> Result<PredictionReport, ReportError> {
    let mut worst = WorstCase::new();
    let mut result = Vec::with_capacity(sections.len());

    for section in sections {
        let mut lines = Vec::with_capacity(section.series.len());
        for series in section.series.iter() {
            let wrap = |source| ReportError::Series {
                section: section.header.clone(),
                label: series.label.clone(),
                source,
            };
            let model = fit(series).map_err(wrap)?;
            let normalized_rmse =
                normalized_rmse(&series.y, &predict(&model, &series.x)).map_err(wrap)?;
            worst.update(normalized_rmse);
            log::debug!(
                "{} {}: slope = {}, intercept = {}, normalized RMSE = {normalized_rmse}",
                section.header,
                series.label.trim_end(),
                model.slope,
                model.intercept,
            );
            lines.push(SeriesPrediction {
                label: series.label.clone(),
                model,
                normalized_rmse,
                predictions: predict(&model, predict_at),
            });
        }
        result.push(SectionPrediction {
            header: section.header.clone(),
            lines,
        });
    }

    Ok(PredictionReport {
        predict_at: predict_at.to_vec(),
        sections: result,
        worst,
    })
}

#[derive(Serialize)]
struct ModelRecord<'a> {
    section: &'a str,
    label: &'a str,
    slope: f64,
    intercept: f64,
    normalized_rmse: f64,
}

impl PredictionReport {
    /// Write the fitted model of every series as CSV, including a header row.
    pub fn write_models_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv = csv::Writer::from_writer(writer);
        for section in self.sections.iter() {
            for line in section.lines.iter() {
                csv.serialize(ModelRecord {
                    section: &section.header,
                    label: line.label.trim_end(),
                    slope: line.model.slope,
                    intercept: line.model.intercept,
                    normalized_rmse: line.normalized_rmse,
                })?;
            }
        }
        csv.flush()?;
        Ok(())
    }
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", section.header)?;
            for line in section.lines.iter() {
                write!(f, "{}: ", line.label)?;
                for prediction in line.predictions.iter() {
                    write!(f, "{}, ", float_repr(round2(*prediction)))?;
                }
                writeln!(f)?;
            }
        }
        writeln!(f)?;
        // an untouched tracker is still the integer it was initialized with
        if self.worst.get() == 0.0 {
            write!(f, "Worst normalized RMSE: 0")
        } else {
            write!(f, "Worst normalized RMSE: {}", float_repr(self.worst.get()))
        }
    }
}

/// Round to two decimals, resolving ties to the even neighbor.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// Shortest decimal representation that round-trips, always showing a fractional part or an
/// exponent with an explicit sign and at least two digits (`50.0`, `0.12`, `1e-05`).
pub fn float_repr(x: f64) -> String {
    let repr = format!("{x:?}");
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn fit_collinear() {
        let series = Series::new("8 ", vec![2.0, 4.0, 6.0, 8.0], vec![1.0, 2.0, 3.0, 4.0]);
        let model = fit(&series).unwrap();
        assert!((model.slope - 0.5).abs() < 1e-12);
        assert!(model.intercept.abs() < 1e-12);

        assert_close(&predict(&model, &[100.0, 250.0]), &[50.0, 125.0]);
        assert_close(&predict(&model, &series.x), &series.y);
        let error = normalized_rmse(&series.y, &predict(&model, &series.x)).unwrap();
        assert!(error.abs() < 1e-12);
    }

    #[test]
    fn fit_is_order_independent() {
        let a: Series = [(1.0, 2.0), (2.0, 2.5), (3.0, 4.5), (4.0, 5.0)]
            .into_iter()
            .collect();
        let b: Series = [(3.0, 4.5), (1.0, 2.0), (4.0, 5.0), (2.0, 2.5)]
            .into_iter()
            .collect();
        let (ma, mb) = (fit(&a).unwrap(), fit(&b).unwrap());
        assert!((ma.slope - mb.slope).abs() < 1e-12);
        assert!((ma.intercept - mb.intercept).abs() < 1e-12);
        // least squares solution of the points above
        assert!((ma.slope - 1.1).abs() < 1e-12);
        assert!((ma.intercept - 0.75).abs() < 1e-12);
    }

    #[test]
    fn fit_degenerate() {
        let single = Series::new("x", vec![5.0], vec![3.0]);
        assert_eq!(
            fit(&single),
            Err(TrendError::DegenerateInput {
                points: 1,
                distinct: 1
            })
        );
        let vertical = Series::new("x", vec![5.0, 5.0, 5.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            fit(&vertical),
            Err(TrendError::DegenerateInput { points: 3, .. })
        ));
        assert!(matches!(
            fit(&Series::default()),
            Err(TrendError::DegenerateInput { points: 0, .. })
        ));
        // both zeros are the same x-value
        let signed_zeros = Series::new("z", vec![0.0, -0.0], vec![1.0, 2.0]);
        assert_eq!(
            fit(&signed_zeros),
            Err(TrendError::DegenerateInput {
                points: 2,
                distinct: 1
            })
        );
    }

    #[test]
    fn predict_is_linear() {
        let model = Model {
            slope: 1.5,
            intercept: -2.0,
        };
        assert_eq!(predict(&model, &[4.0, 10.0]), vec![4.0, 13.0]);
        assert!(predict(&model, &[]).is_empty());
    }

    #[test]
    fn rmse() {
        let ys = [0.3, 0.7, 1.9];
        assert_eq!(normalized_rmse(&ys, &ys), Ok(0.0));
        // errors of +-1 around a mean of 2
        let error = normalized_rmse(&[1.0, 3.0], &[2.0, 2.0]).unwrap();
        assert!((error - 0.5).abs() < 1e-12);
        assert_eq!(
            normalized_rmse(&[0.0, 0.0, 0.0], &[0.1, 0.0, -0.1]),
            Err(TrendError::DivisionByZero)
        );
        assert!(matches!(
            normalized_rmse(&[1.0], &[]),
            Err(TrendError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn zero_series_fails_in_rmse() {
        let series = Series::new("zero", vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0]);
        let model = fit(&series).unwrap();
        assert_eq!(
            normalized_rmse(&series.y, &predict(&model, &series.x)),
            Err(TrendError::DivisionByZero)
        );
    }

    #[test]
    fn worst_case_is_monotone() {
        let mut worst = WorstCase::new();
        let values = [0.2, 0.1, 0.5, 0.3, 0.0];
        let mut last = 0.0;
        for v in values {
            let current = worst.update(v);
            assert!(current >= last);
            last = current;
        }
        assert_eq!(worst.get(), 0.5);
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-2.0), -2.0);
        assert_eq!(float_repr(50.0), "50.0");
        assert_eq!(float_repr(0.12), "0.12");
        assert_eq!(float_repr(1e-5), "1e-05");
        assert_eq!(float_repr(2.5e16), "2.5e+16");
    }

    fn sections() -> Vec<ReportSection> {
        vec![
            ReportSection {
                header: "FIRST".to_string(),
                series: vec![
                    Series::new("8 ", vec![2.0, 4.0, 6.0, 8.0], vec![1.0, 2.0, 3.0, 4.0]),
                    Series::new("16", vec![1.0, 2.0, 3.0], vec![1.0, 3.0, 2.0]),
                ],
            },
            ReportSection {
                header: "SECOND".to_string(),
                series: vec![Series::new(
                    "32",
                    vec![1.0, 2.0, 3.0, 4.0],
                    vec![2.0, 2.5, 4.5, 5.0],
                )],
            },
        ]
    }

    #[test]
    fn report() {
        let report = generate_report(&sections(), &[100.0, 250.0]).unwrap();
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[0].lines.len(), 2);

        let worst = report
            .sections
            .iter()
            .flat_map(|s| s.lines.iter())
            .map(|l| l.normalized_rmse)
            .fold(0.0, f64::max);
        assert_eq!(report.worst.get(), worst);
        assert!(worst > 0.0);

        let text = report.to_string();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0], "FIRST");
        assert_eq!(lines[1], "8 : 50.0, 125.0, ");
        assert_eq!(lines[2], "16: 51.0, 126.0, ");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "SECOND");
        assert_eq!(lines[5], "32: 110.75, 275.75, ");
        assert_eq!(lines[6], "");
        assert_eq!(
            lines[7],
            format!("Worst normalized RMSE: {}", float_repr(worst))
        );
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn report_without_error() {
        let sections = vec![ReportSection {
            header: "EXACT".to_string(),
            series: vec![Series::new("64", vec![1.0, 3.0], vec![2.0, 4.0])],
        }];
        let report = generate_report(&sections, &PREDICTION_PARTIES).unwrap();
        assert_eq!(
            report.to_string(),
            "EXACT\n64: 101.0, 251.0, 501.0, 1001.0, 2501.0, 5001.0, \n\nWorst normalized RMSE: 0"
        );
    }

    #[test]
    fn report_names_failing_series() {
        let mut sections = sections();
        sections[1]
            .series
            .push(Series::new("64", vec![7.0], vec![1.0]));
        let Err(ReportError::Series {
            section,
            label,
            source,
        }) = generate_report(&sections, &PREDICTION_PARTIES)
        else {
            panic!("report should fail on the singleton series");
        };
        assert_eq!(section, "SECOND");
        assert_eq!(label, "64");
        assert!(matches!(source, TrendError::DegenerateInput { .. }));

        let mut sections = self::sections();
        sections[0]
            .series
            .insert(1, Series::new("32", vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0]));
        let Err(ReportError::Series {
            section,
            label,
            source,
        }) = generate_report(&sections, &PREDICTION_PARTIES)
        else {
            panic!("report should fail on the zero-mean series");
        };
        assert_eq!(section, "FIRST");
        assert_eq!(label, "32");
        assert_eq!(source, TrendError::DivisionByZero);
    }

    #[test]
    fn models_csv() {
        let report = generate_report(&sections(), &PREDICTION_PARTIES).unwrap();
        let mut buffer = Vec::new();
        report.write_models_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("section,label,slope,intercept,normalized_rmse")
        );
        assert!(lines.next().unwrap().starts_with("FIRST,8,0.5,"));
        assert_eq!(lines.count(), 2);
    }
}
