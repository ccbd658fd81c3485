//! Richardson extrapolation to the zero step-size limit
//!
//! Given samples `y(h_1), ..., y(h_n)` with `h_1 > h_2 > ... > h_n`, the
//! triangular table
//!
//! ```text
//! level 0:  y(h_1)      y(h_2)      ...      y(h_n)
//! level m:  R[m][i] = (mult * R[m-1][i+1] - R[m-1][i]) / (mult - 1)
//!           mult    = (h_{i+m-1} / h_{i+m})^m      (0-based h)
//! ```
//!
//! removes one more power of `h` from the error expansion at each level. The
//! single entry of the last level is the extrapolated value.
//!
//! Step ratios within rounding of 1 make `mult - 1` vanish; callers must
//! avoid them.

use ndarray::Array1;

use crate::error::{Result, SingularError};

/// Values that can be combined in a Richardson table.
///
/// Vector values are combined elementwise and must all share one length.
pub trait Extrapolate: Clone {
    /// Return `(mult * high - low) / (mult - 1)`.
    fn refine(low: &Self, high: &Self, mult: f64) -> Self;

    /// Number of components; every sample in one table must match.
    fn width(&self) -> usize;
}

impl Extrapolate for f64 {
    #[inline]
    fn refine(low: &Self, high: &Self, mult: f64) -> Self {
        (mult * high - low) / (mult - 1.0)
    }

    #[inline]
    fn width(&self) -> usize {
        1
    }
}

impl Extrapolate for Array1<f64> {
    fn refine(low: &Self, high: &Self, mult: f64) -> Self {
        (high * mult - low) / (mult - 1.0)
    }

    fn width(&self) -> usize {
        self.len()
    }
}

/// Full Richardson table; level `m` holds `n - m` entries.
#[derive(Debug, Clone)]
pub struct RichardsonTable<T> {
    levels: Vec<Vec<T>>,
}

impl<T: Extrapolate> RichardsonTable<T> {
    /// All levels, level 0 being the raw samples
    pub fn levels(&self) -> &[Vec<T>] {
        &self.levels
    }

    /// Number of levels (equals the number of samples)
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// The extrapolated value
    pub fn limit(&self) -> &T {
        &self.levels[self.levels.len() - 1][0]
    }

    /// Consume the table, keeping only the extrapolated value
    pub fn into_limit(mut self) -> T {
        let mut last = self.levels.pop().unwrap_or_default();
        last.swap_remove(0)
    }
}

fn check_samples<T: Extrapolate>(n_steps: usize, values: &[T]) -> Result<()> {
    let Some(first) = values.first() else {
        return Err(SingularError::InvalidDomain { order: 0 });
    };
    if n_steps != values.len() {
        return Err(SingularError::DimensionMismatch {
            expected: n_steps,
            got: values.len(),
        });
    }
    let width = first.width();
    if let Some(bad) = values.iter().find(|v| v.width() != width) {
        return Err(SingularError::DimensionMismatch {
            expected: width,
            got: bad.width(),
        });
    }
    Ok(())
}

/// Build the table from the consecutive step ratios `h_i / h_{i+1}`.
fn build_table<T: Extrapolate>(ratios: &[f64], values: &[T]) -> RichardsonTable<T> {
    let n = values.len();
    let mut levels = Vec::with_capacity(n);
    levels.push(values.to_vec());

    for m in 1..n {
        let prev = &levels[m - 1];
        let next: Vec<T> = (0..(n - m))
            .map(|i| {
                let mult = ratios[m - 1 + i].powi(m as i32);
                T::refine(&prev[i], &prev[i + 1], mult)
            })
            .collect();
        log::trace!("richardson level {}: {} entries", m, next.len());
        levels.push(next);
    }

    RichardsonTable { levels }
}

/// Build the full Richardson table for samples `y_vals` at steps `h_vals`.
pub fn richardson_table<T: Extrapolate>(
    h_vals: &[f64],
    y_vals: &[T],
) -> Result<RichardsonTable<T>> {
    check_samples(h_vals.len(), y_vals)?;
    let ratios: Vec<f64> = h_vals.windows(2).map(|w| w[0] / w[1]).collect();
    Ok(build_table(&ratios, y_vals))
}

/// Extrapolate `y(h)` to `h -> 0`.
///
/// A single sample is returned unchanged.
pub fn richardson<T: Extrapolate>(h_vals: &[f64], y_vals: &[T]) -> Result<T> {
    Ok(richardson_table(h_vals, y_vals)?.into_limit())
}

/// Extrapolate samples taken with a constant step ratio `h_i / h_{i+1}`.
pub fn richardson_limit<T: Extrapolate>(step_ratio: f64, values: &[T]) -> Result<T> {
    check_samples(values.len(), values)?;
    let ratios = vec![step_ratio; values.len().saturating_sub(1)];
    Ok(build_table(&ratios, values).into_limit())
}

/// Weights `c_j` with `richardson(h_vals, y) == sum_j c_j y_j` for every `y`.
///
/// The table is linear in the samples, so one pass over unit vectors gives
/// the combination. Useful for folding the extrapolation into a single set
/// of quadrature weights.
pub fn richardson_coefficients(h_vals: &[f64]) -> Result<Vec<f64>> {
    let n = h_vals.len();
    let units: Vec<Array1<f64>> = (0..n)
        .map(|j| {
            let mut e = Array1::zeros(n);
            e[j] = 1.0;
            e
        })
        .collect();
    Ok(richardson(h_vals, &units)?.to_vec())
}
