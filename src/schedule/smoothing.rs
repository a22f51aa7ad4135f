//! Pluggable sequence smoothers.

use nalgebra::DMatrix;
use serde::Serialize;

use crate::error::{Result, ScheduleError};

/// What a smoother did to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SmoothingOutcome {
    /// The sequence was smoothed.
    Applied,
    /// The sequence was returned unchanged because it is shorter than the
    /// smoothing window. The unsmoothed values are still valid output.
    Skipped { len: usize, window: usize },
    /// No smoothing is configured.
    Disabled,
}

/// A smoothing kernel applied to a finished sequence.
pub trait Smoother: std::fmt::Debug + Send + Sync {
    /// Smooths `values` in place and reports what happened.
    fn smooth(&self, values: &mut [f64]) -> SmoothingOutcome;

    /// Short kernel name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Pass-through smoother.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSmoothing;

impl Smoother for NoSmoothing {
    fn smooth(&self, _values: &mut [f64]) -> SmoothingOutcome {
        SmoothingOutcome::Disabled
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Savitzky-Golay filter: a least-squares polynomial fit over a sliding
/// window, evaluated at each point.
///
/// Interior points use the centred window. The first and last
/// `window / 2` points are evaluated from the polynomial fitted to the first
/// and last full window respectively.
#[derive(Debug, Clone)]
pub struct SavitzkyGolay {
    window: usize,
    poly_order: usize,
    /// `weights[(k, j)]`: weight of window sample `j` when evaluating at
    /// window position `k`.
    weights: DMatrix<f64>,
}

impl SavitzkyGolay {
    /// Builds a filter, precomputing the fit weights for every window position.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSmoothingWindow`] unless `window` is
    /// odd and at least `poly_order + 2`.
    pub fn new(window: usize, poly_order: usize) -> Result<Self> {
        if window % 2 == 0 || window < poly_order + 2 {
            return Err(ScheduleError::InvalidSmoothingWindow { window, poly_order });
        }
        let weights = fit_weights(window, poly_order)
            .ok_or(ScheduleError::InvalidSmoothingWindow { window, poly_order })?;
        Ok(Self {
            window,
            poly_order,
            weights,
        })
    }

    /// Window length in samples.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Degree of the fitted polynomial.
    pub fn poly_order(&self) -> usize {
        self.poly_order
    }
}

impl Smoother for SavitzkyGolay {
    fn smooth(&self, values: &mut [f64]) -> SmoothingOutcome {
        let len = values.len();
        if len < self.window {
            return SmoothingOutcome::Skipped {
                len,
                window: self.window,
            };
        }

        let half = self.window / 2;
        let input = values.to_vec();
        for (i, out) in values.iter_mut().enumerate() {
            // Clamp the window to the sequence so edge points reuse the
            // first/last full window.
            let start = i.saturating_sub(half).min(len - self.window);
            *out = self
                .weights
                .row(i - start)
                .iter()
                .zip(&input[start..start + self.window])
                .map(|(w, y)| w * y)
                .sum();
        }
        SmoothingOutcome::Applied
    }

    fn name(&self) -> &'static str {
        "savgol"
    }
}

/// Savitzky-Golay projection ("hat") matrix for a degree-`order` fit over
/// `window` samples.
///
/// With Vandermonde matrix `A[j][m] = x_j^m` (x centred on the window), the
/// fitted values are `A (A^T A)^-1 A^T y`. Row `k` of that product holds the
/// weights for evaluating the fit at window position `k`. Returns `None` when
/// `A^T A` is singular.
fn fit_weights(window: usize, order: usize) -> Option<DMatrix<f64>> {
    let half = (window / 2) as f64;
    let a = DMatrix::from_fn(window, order + 1, |j, m| (j as f64 - half).powi(m as i32));
    let at = a.transpose();
    let pinv = (&at * &a).lu().solve(&at)?;
    Some(a * pinv)
}
