// Ordinary least-squares line fit
//
// The intercept reads as the fixed cost of an operation and the slope as its
// marginal cost per unit of input size.

use crate::error::{AnalysisError, Result};
use serde::Serialize;
use std::fmt;

/// Straight-line model `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination (1.0 when `y` is constant)
    pub r_squared: f64,
    /// Number of points used in the fit
    pub points: usize,
}

impl LinearFit {
    /// Fit a degree-1 polynomial to `(xs[i], ys[i])`
    ///
    /// Extra elements of the longer slice are ignored.
    ///
    /// # Example
    /// ```
    /// use opcost::estimate::LinearFit;
    ///
    /// let fit = LinearFit::ordinary_least_squares(&[1.0, 2.0, 3.0], &[5.0, 7.0, 9.0]).unwrap();
    /// assert!((fit.slope - 2.0).abs() < 1e-12);
    /// assert!((fit.intercept - 3.0).abs() < 1e-12);
    /// ```
    pub fn ordinary_least_squares(xs: &[f64], ys: &[f64]) -> Result<Self> {
        let n = xs.len().min(ys.len());
        if n < 2 {
            return Err(AnalysisError::InsufficientPoints {
                required: 2,
                actual: n,
            });
        }
        let (xs, ys) = (&xs[..n], &ys[..n]);

        let mean_x = xs.iter().sum::<f64>() / n as f64;
        let mean_y = ys.iter().sum::<f64>() / n as f64;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        if sxx == 0.0 {
            return Err(AnalysisError::ZeroVariance);
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        let r_squared = if syy == 0.0 {
            1.0
        } else {
            (sxy * sxy) / (sxx * syy)
        };

        Ok(Self {
            slope,
            intercept,
            r_squared,
            points: n,
        })
    }

    /// Model value at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for LinearFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:?}x + {:?}", self.slope, self.intercept)
    }
}
