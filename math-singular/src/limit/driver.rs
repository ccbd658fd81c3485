//! Regularized-limit driver
//!
//! Evaluates a caller-supplied regularized integral `I(eps)` on a geometric
//! eps schedule and extrapolates the samples to `eps -> 0`.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SingularError};
use crate::limit::{limit_coeffs, limit_vec, richardson};

/// How the eps samples are extrapolated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitMethod {
    /// Square fit in the mixed `eps^k log(eps)` / `eps^k` basis
    #[default]
    LogPolynomial,
    /// Richardson table with error orders 1, 2, ... (no log terms)
    Richardson,
}

/// Eps schedule and extrapolation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Largest eps sample
    pub eps_start: f64,
    /// Ratio between consecutive eps samples, must be > 1
    pub eps_ratio: f64,
    /// Number of eps samples
    pub n_samples: usize,
    /// Number of `eps^k log(eps)` terms (log-polynomial method only)
    pub log_terms: usize,
    /// Extrapolation method
    pub method: LimitMethod,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            eps_start: 0.1,
            eps_ratio: 2.0,
            n_samples: 4,
            log_terms: 1,
            method: LimitMethod::LogPolynomial,
        }
    }
}

impl LimitConfig {
    /// Check the schedule parameters
    pub fn validate(&self) -> Result<()> {
        if !self.eps_start.is_finite() || self.eps_start <= 0.0 {
            return Err(SingularError::invalid(format!(
                "eps_start = {} (must be finite and > 0)",
                self.eps_start
            )));
        }
        if !self.eps_ratio.is_finite() || self.eps_ratio <= 1.0 {
            return Err(SingularError::invalid(format!(
                "eps_ratio = {} (must be finite and > 1)",
                self.eps_ratio
            )));
        }
        if self.n_samples == 0 {
            return Err(SingularError::invalid("n_samples must be >= 1"));
        }
        Ok(())
    }

    /// Log at debug level when `log_terms` is set but the method ignores it.
    fn note_ignored_log_terms(&self) {
        if self.method == LimitMethod::Richardson && self.log_terms > 0 {
            log::debug!(
                "richardson extrapolation ignores log_terms = {}",
                self.log_terms
            );
        }
    }

    /// The decreasing schedule `eps_start / eps_ratio^k`, `k = 0..n_samples`
    pub fn eps_sequence(&self) -> Result<Vec<f64>> {
        self.validate()?;
        Ok((0..self.n_samples)
            .map(|k| self.eps_start / self.eps_ratio.powi(k as i32))
            .collect())
    }
}

/// Extrapolated scalar limit together with the samples it came from
#[derive(Debug, Clone)]
pub struct LimitEstimate {
    /// Finite part of the integral as eps -> 0
    pub value: f64,
    /// Coefficient of `log(eps)` (zero for Richardson or without log terms)
    pub log_coefficient: f64,
    /// Eps schedule used
    pub eps: Vec<f64>,
    /// Regularized values `I(eps)`
    pub samples: Vec<f64>,
}

/// Extrapolated vector-valued limit
#[derive(Debug, Clone)]
pub struct VecLimitEstimate {
    /// Finite part of each component
    pub value: Array1<f64>,
    /// Coefficient of `log(eps)` for each component
    pub log_coefficient: Array1<f64>,
    /// Eps schedule used
    pub eps: Vec<f64>,
}

/// Sample `integral` on the configured schedule and extrapolate to eps -> 0.
pub fn extrapolate<F>(config: &LimitConfig, mut integral: F) -> Result<LimitEstimate>
where
    F: FnMut(f64) -> f64,
{
    let eps = config.eps_sequence()?;
    let samples: Vec<f64> = eps.iter().map(|&e| integral(e)).collect();
    log::debug!("regularized samples at eps = {:?}: {:?}", eps, samples);

    let (value, log_coefficient) = match config.method {
        LimitMethod::LogPolynomial => {
            let fit = limit_coeffs(&eps, &samples, config.log_terms)?;
            (fit.limit(), fit.log_coefficient())
        }
        LimitMethod::Richardson => {
            config.note_ignored_log_terms();
            (richardson(&eps, &samples)?, 0.0)
        }
    };

    log::debug!(
        "extrapolated limit {:.12e} (log coefficient {:.6e})",
        value,
        log_coefficient
    );
    Ok(LimitEstimate {
        value,
        log_coefficient,
        eps,
        samples,
    })
}

/// Vector-valued [`extrapolate`]; every evaluation must return the same length.
pub fn extrapolate_vec<F>(config: &LimitConfig, mut integral: F) -> Result<VecLimitEstimate>
where
    F: FnMut(f64) -> Array1<f64>,
{
    let eps = config.eps_sequence()?;
    let samples: Vec<Array1<f64>> = eps.iter().map(|&e| integral(e)).collect();
    log::debug!("regularized vector samples at eps = {:?}", eps);

    let width = samples[0].len();
    if let Some(bad) = samples.iter().find(|s| s.len() != width) {
        return Err(SingularError::DimensionMismatch {
            expected: width,
            got: bad.len(),
        });
    }

    let (value, log_coefficient) = match config.method {
        LimitMethod::LogPolynomial => {
            let rows = Array2::from_shape_fn((eps.len(), width), |(i, j)| samples[i][j]);
            limit_vec(&eps, &rows, config.log_terms)?
        }
        LimitMethod::Richardson => {
            config.note_ignored_log_terms();
            (richardson(&eps, &samples)?, Array1::zeros(width))
        }
    };

    log::debug!(
        "extrapolated vector limit {} (log coefficients {})",
        value,
        log_coefficient
    );
    Ok(VecLimitEstimate {
        value,
        log_coefficient,
        eps,
    })
}
