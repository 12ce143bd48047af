//! Least-squares line fitting.

use nalgebra::{DMatrix, DVector, SVD};
use serde::{Deserialize, Serialize};

use crate::error::ensure_paired;
use crate::{PlotError, PlotResult};

/// A fitted line `y = slope * x + intercept` with solver diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept of the fitted line.
    pub intercept: f64,
    /// Sum of squared residuals of the fit.
    pub residual_sum_squares: f64,
    /// Numerical rank of the mean-centred `[x - mean(x), 1]` design matrix (1 or 2).
    pub rank: usize,
    /// Singular values of the mean-centred design matrix, descending.
    pub singular_values: [f64; 2],
}

impl LinearFit {
    /// The `(slope, intercept)` pair.
    pub const fn coefficients(&self) -> (f64, f64) {
        (self.slope, self.intercept)
    }

    /// Evaluate the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Evaluate the line at every element of `x`.
    pub fn predict_all(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&v| self.predict(v)).collect()
    }
}

/// Fit a line through `(x, y)` by least squares.
///
/// When `y` is `None`, `x` is treated as the response and regressed against
/// its positions `0, 1, 2, ...`.
///
/// The system is solved by SVD with `x` centred on its mean, so offsets such as
/// epoch timestamps do not cost precision. Rank-deficient systems (all `x`
/// equal) return the minimum-norm solution of the uncentred `[x, 1]` system.
///
/// # Errors
/// - [`PlotError::EmptyInput`] if there are no samples.
/// - [`PlotError::LengthMismatch`] if `x` and `y` differ in length.
/// - [`PlotError::InvalidParameter`] if any value is not finite.
pub fn regress(x: &[f64], y: Option<&[f64]>) -> PlotResult<LinearFit> {
    match y {
        Some(y) => fit_line(x, y),
        None => {
            let positions: Vec<f64> = (0..x.len()).map(|i| i as f64).collect();
            fit_line(&positions, x)
        }
    }
}

fn fit_line(x: &[f64], y: &[f64]) -> PlotResult<LinearFit> {
    ensure_paired("regress", x.len(), y.len())?;
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(PlotError::invalid_value("x/y", "must be finite"));
    }

    let n = x.len();
    let x_mean = x.iter().sum::<f64>() / n as f64;
    let rhs = DVector::from_column_slice(y);

    // Centring the x column keeps large offsets (timestamps) from swamping the slope.
    let centred = DMatrix::from_fn(n, 2, |r, c| if c == 0 { x[r] - x_mean } else { 1.0 });
    let svd = SVD::new(centred, true, true);

    let mut singular_values = [0.0f64; 2];
    for (slot, &s) in singular_values.iter_mut().zip(svd.singular_values.iter()) {
        *slot = s;
    }
    singular_values.sort_by(|a, b| b.total_cmp(a));
    let rank = svd.rank(cutoff(singular_values[0], n));

    let (slope, intercept) = if rank == 2 {
        let beta = svd
            .solve(&rhs, cutoff(singular_values[0], n))
            .map_err(solve_failed)?;
        (beta[0], beta[1] - beta[0] * x_mean)
    } else {
        // Constant x: minimum-norm solution of the uncentred `[x, 1]` system.
        let design = DMatrix::from_fn(n, 2, |r, c| if c == 0 { x[r] } else { 1.0 });
        let raw = SVD::new(design, true, true);
        let eps = cutoff(raw.singular_values.max(), n);
        let beta = raw.solve(&rhs, eps).map_err(solve_failed)?;
        (beta[0], beta[1])
    };

    let residual_sum_squares = x
        .iter()
        .zip(y)
        .map(|(&a, &b)| {
            let r = b - (slope * a + intercept);
            r * r
        })
        .sum();

    tracing::debug!(slope, intercept, rank, "fitted least-squares line");

    Ok(LinearFit {
        slope,
        intercept,
        residual_sum_squares,
        rank,
        singular_values,
    })
}

/// Singular values at or below this are treated as zero.
fn cutoff(largest: f64, rows: usize) -> f64 {
    largest * f64::EPSILON * rows.max(2) as f64
}

fn solve_failed(reason: &'static str) -> PlotError {
    PlotError::invalid_value("x/y", format!("least-squares solve failed: {reason}"))
}
