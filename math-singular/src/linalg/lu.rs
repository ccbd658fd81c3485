//! LU decomposition solver
//!
//! Dense LU factorization with partial pivoting for the small square systems
//! that come out of limit fitting. The systems are at most a dozen rows, so a
//! pure-Rust elimination is all that is needed.

use ndarray::{Array1, Array2, Axis};

use crate::error::{Result, SingularError};

/// Pivots smaller than this fraction of the largest matrix entry are treated as zero.
pub const SINGULAR_PIVOT_TOLERANCE: f64 = 1e-13;

/// LU factorization result
///
/// Stores L and U factors along with pivot information
#[derive(Debug, Clone)]
pub struct LuFactorization {
    /// Combined L and U matrices (L is unit lower triangular, stored below diagonal)
    pub lu: Array2<f64>,
    /// Row permutation applied during elimination
    pub pivots: Vec<usize>,
    /// Matrix dimension
    pub n: usize,
}

impl LuFactorization {
    /// Solve Ax = b using the pre-computed LU factorization
    pub fn solve(&self, b: &Array1<f64>) -> Result<Array1<f64>> {
        if b.len() != self.n {
            return Err(SingularError::DimensionMismatch {
                expected: self.n,
                got: b.len(),
            });
        }

        // Forward substitution on the permuted right-hand side: Ly = Pb
        let mut x: Array1<f64> = self.pivots.iter().map(|&p| b[p]).collect();
        for i in 0..self.n {
            for j in 0..i {
                x[i] -= self.lu[[i, j]] * x[j];
            }
        }

        // Backward substitution: Ux = y
        for i in (0..self.n).rev() {
            for j in (i + 1)..self.n {
                x[i] -= self.lu[[i, j]] * x[j];
            }
            x[i] /= self.lu[[i, i]];
        }

        Ok(x)
    }

    /// Ratio of the largest to the smallest pivot magnitude.
    ///
    /// A cheap lower bound on the condition number of the factored matrix.
    pub fn pivot_ratio(&self) -> f64 {
        let (min, max) = (0..self.n)
            .map(|i| self.lu[[i, i]].abs())
            .fold((f64::INFINITY, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        max / min
    }

    /// Solve AX = B column by column, reusing the factorization.
    pub fn solve_columns(&self, b: &Array2<f64>) -> Result<Array2<f64>> {
        if b.nrows() != self.n {
            return Err(SingularError::DimensionMismatch {
                expected: self.n,
                got: b.nrows(),
            });
        }

        let mut x = Array2::zeros(b.raw_dim());
        for (col, mut out) in b.axis_iter(Axis(1)).zip(x.axis_iter_mut(Axis(1))) {
            let solved = self.solve(&col.to_owned())?;
            out.assign(&solved);
        }
        Ok(x)
    }
}

/// Compute LU factorization with partial pivoting
pub fn lu_factorize(a: &Array2<f64>) -> Result<LuFactorization> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(SingularError::DimensionMismatch {
            expected: n,
            got: a.ncols(),
        });
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(SingularError::SingularSystem);
    }

    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return Err(SingularError::SingularSystem);
    }
    let threshold = SINGULAR_PIVOT_TOLERANCE * scale;

    let mut lu = a.clone();
    let mut pivots: Vec<usize> = (0..n).collect();

    for k in 0..n {
        // Find pivot
        let mut max_val = lu[[k, k]].abs();
        let mut max_row = k;
        for i in (k + 1)..n {
            let val = lu[[i, k]].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val <= threshold {
            return Err(SingularError::SingularSystem);
        }

        if max_row != k {
            for j in 0..n {
                lu.swap([k, j], [max_row, j]);
            }
            pivots.swap(k, max_row);
        }

        let pivot = lu[[k, k]];
        for i in (k + 1)..n {
            let mult = lu[[i, k]] / pivot;
            lu[[i, k]] = mult;
            for j in (k + 1)..n {
                let update = mult * lu[[k, j]];
                lu[[i, j]] -= update;
            }
        }
    }

    Ok(LuFactorization { lu, pivots, n })
}

/// Solve Ax = b using LU decomposition
///
/// This is a convenience function that combines factorization and solve.
pub fn lu_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    lu_factorize(a)?.solve(b)
}
