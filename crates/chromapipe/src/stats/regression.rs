//! Single-predictor ordinary least squares.

use log::debug;
use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::table::Table;

/// Fitted line `response = coefficient * predictor + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResult {
    /// Predictor (x) column name.
    pub predictor: String,
    /// Response (y) column name.
    pub response: String,
    /// Slope of the fitted line.
    pub coefficient: f64,
    pub intercept: f64,
    /// In-sample coefficient of determination (R²).
    pub r2_score: f64,
}

impl RegressionResult {
    /// Predicted response for a predictor value.
    pub fn predict(&self, x: f64) -> f64 {
        self.coefficient * x + self.intercept
    }
}

/// Fit `response` on `predictor` by least squares and score the fit in-sample.
pub fn fit_linear_regression(
    table: &Table,
    predictor: &str,
    response: &str,
) -> Result<RegressionResult> {
    let xs = table.numeric_column(predictor)?;
    let ys = table.numeric_column(response)?;

    if xs.len() != ys.len() {
        return Err(PipelineError::LengthMismatch {
            expected: xs.len(),
            found: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(PipelineError::EmptyData(format!(
            "no rows to fit '{}' on '{}'",
            response, predictor
        )));
    }
    ensure_finite(predictor, xs)?;
    ensure_finite(response, ys)?;

    let (coefficient, intercept) = least_squares(xs, ys);
    let r2_score = r2_score(ys, xs.iter().map(|&x| coefficient * x + intercept));

    debug!(
        "Fitted {} ~ {}: coefficient={}, intercept={}, r2={}",
        response, predictor, coefficient, intercept, r2_score
    );

    Ok(RegressionResult {
        predictor: predictor.to_string(),
        response: response.to_string(),
        coefficient,
        intercept,
        r2_score,
    })
}

fn ensure_finite(column: &str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(PipelineError::NonFiniteValue {
            column: column.to_string(),
        })
    }
}

/// Slope and intercept for non-empty, equal-length inputs.
///
/// A constant predictor has no unique solution; the minimum-norm one is a
/// flat line through the response mean.
fn least_squares(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (sxx, sxy) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(sxx, sxy), (&x, &y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

    let coefficient = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    (coefficient, mean_y - coefficient * mean_x)
}

/// `1 - SS_res / SS_tot`.
///
/// Undefined (NaN) for fewer than two samples. When the response is constant,
/// a perfect prediction scores 1 and anything else scores 0.
fn r2_score(actual: &[f64], predicted: impl Iterator<Item = f64>) -> f64 {
    if actual.len() < 2 {
        return f64::NAN;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        if ss_res == 0.0 { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    }
}
