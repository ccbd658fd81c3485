//! Limit recovery from a mixed polynomial / `eps^k log(eps)` expansion
//!
//! A regularized integral `I(eps)` typically behaves like
//!
//! ```text
//! I(eps) = sum_i a_i eps^i log(eps) + sum_j c_j eps^j
//! ```
//!
//! Sampling `I` at `n` values of `eps` and solving the square system for the
//! `n` coefficients gives `c_0`, the finite part as `eps -> 0`, and `a_0`,
//! the strength of a surviving logarithmic divergence.

use ndarray::{Array1, Array2};

use crate::error::{Result, SingularError};
use crate::linalg::{LuFactorization, lu_factorize};

/// Pivot ratio above which a solvable fit is reported as ill-conditioned.
const ILL_CONDITIONED_PIVOT_RATIO: f64 = 1e12;

/// One basis function of the limit expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitTerm {
    /// `eps^k log(eps)`
    Log(u32),
    /// `eps^k`
    Poly(u32),
}

impl LimitTerm {
    /// Evaluate the basis function at `eps`
    #[inline]
    pub fn eval(self, eps: f64) -> f64 {
        match self {
            LimitTerm::Log(k) => eps.powi(k as i32) * eps.ln(),
            LimitTerm::Poly(k) => eps.powi(k as i32),
        }
    }
}

/// Basis of `n_terms` functions: `log_terms` log terms, then polynomials.
pub fn limit_basis(n_terms: usize, log_terms: usize) -> Vec<LimitTerm> {
    let poly_terms = n_terms.saturating_sub(log_terms);
    (0..log_terms as u32)
        .map(LimitTerm::Log)
        .chain((0..poly_terms as u32).map(LimitTerm::Poly))
        .collect()
}

/// Solved coefficients of a limit expansion
#[derive(Debug, Clone)]
pub struct LimitFit {
    /// Basis functions, in coefficient order
    pub basis: Vec<LimitTerm>,
    /// Coefficient of each basis function
    pub coeffs: Array1<f64>,
    /// Number of leading log terms in the basis
    pub log_terms: usize,
}

impl LimitFit {
    /// Finite part: the coefficient of `eps^0`
    pub fn limit(&self) -> f64 {
        self.coeffs[self.log_terms]
    }

    /// Coefficient of `log(eps)`, zero when no log terms were fitted
    pub fn log_coefficient(&self) -> f64 {
        if self.log_terms > 0 { self.coeffs[0] } else { 0.0 }
    }

    /// Evaluate the fitted expansion at `eps`
    pub fn eval(&self, eps: f64) -> f64 {
        self.basis
            .iter()
            .zip(self.coeffs.iter())
            .map(|(term, c)| c * term.eval(eps))
            .sum()
    }
}

fn basis_matrix(eps_vals: &[f64], log_terms: usize) -> Result<(Vec<LimitTerm>, Array2<f64>)> {
    let n = eps_vals.len();
    if log_terms >= n {
        return Err(SingularError::SingularSystem);
    }
    if let Some(bad) = eps_vals
        .iter()
        .find(|e| !e.is_finite() || (log_terms > 0 && **e <= 0.0))
    {
        return Err(SingularError::invalid(format!(
            "eps sample {} (must be finite, and > 0 with log terms)",
            bad
        )));
    }

    let basis = limit_basis(n, log_terms);
    let mat = Array2::from_shape_fn((n, n), |(i, j)| basis[j].eval(eps_vals[i]));
    Ok((basis, mat))
}

/// Divide each column by its max-abs entry; returns the scaled matrix and the scales.
///
/// `eps^k` columns shrink geometrically with `k`, so the pivot test is only
/// meaningful on the equilibrated matrix. Solved coefficients are divided by
/// the same scales.
fn equilibrate_columns(mat: &Array2<f64>) -> (Array2<f64>, Array1<f64>) {
    let scales: Array1<f64> = mat
        .columns()
        .into_iter()
        .map(|col| {
            let max = col.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            if max > 0.0 { max } else { 1.0 }
        })
        .collect();
    let mut scaled = mat.clone();
    for (mut col, &s) in scaled.columns_mut().into_iter().zip(scales.iter()) {
        col /= s;
    }
    (scaled, scales)
}

fn factor_scaled(mat: &Array2<f64>, eps_vals: &[f64]) -> Result<(LuFactorization, Array1<f64>)> {
    let (scaled, scales) = equilibrate_columns(mat);
    let lu = lu_factorize(&scaled)?;
    if lu.pivot_ratio() > ILL_CONDITIONED_PIVOT_RATIO {
        log::warn!(
            "limit fit is ill-conditioned (pivot ratio {:.3e}) for eps = {:?}",
            lu.pivot_ratio(),
            eps_vals
        );
    }
    Ok((lu, scales))
}

/// Fit the full coefficient vector of the limit expansion.
pub fn limit_coeffs(eps_vals: &[f64], f_vals: &[f64], log_terms: usize) -> Result<LimitFit> {
    if f_vals.len() != eps_vals.len() {
        return Err(SingularError::DimensionMismatch {
            expected: eps_vals.len(),
            got: f_vals.len(),
        });
    }

    let (basis, mat) = basis_matrix(eps_vals, log_terms)?;
    let (lu, scales) = factor_scaled(&mat, eps_vals)?;
    let coeffs = lu.solve(&Array1::from(f_vals.to_vec()))? / &scales;

    log::debug!(
        "limit fit with {} samples, {} log terms: coeffs = {}",
        eps_vals.len(),
        log_terms,
        coeffs
    );
    Ok(LimitFit {
        basis,
        coeffs,
        log_terms,
    })
}

/// Return `(limit, log_coefficient)` of samples `f_vals` taken at `eps_vals`.
///
/// `log_coefficient` is zero when `log_terms == 0`.
pub fn limit(eps_vals: &[f64], f_vals: &[f64], log_terms: usize) -> Result<(f64, f64)> {
    let fit = limit_coeffs(eps_vals, f_vals, log_terms)?;
    Ok((fit.limit(), fit.log_coefficient()))
}

/// Vector-valued [`limit`]: `f_vals` holds one row per eps sample.
///
/// The basis matrix is factored once and reused for every component.
pub fn limit_vec(
    eps_vals: &[f64],
    f_vals: &Array2<f64>,
    log_terms: usize,
) -> Result<(Array1<f64>, Array1<f64>)> {
    if f_vals.nrows() != eps_vals.len() {
        return Err(SingularError::DimensionMismatch {
            expected: eps_vals.len(),
            got: f_vals.nrows(),
        });
    }

    let (_, mat) = basis_matrix(eps_vals, log_terms)?;
    let (lu, scales) = factor_scaled(&mat, eps_vals)?;
    let mut coeffs = lu.solve_columns(f_vals)?;
    for (mut row, &s) in coeffs.rows_mut().into_iter().zip(scales.iter()) {
        row /= s;
    }

    let limit = coeffs.row(log_terms).to_owned();
    let log_coefficient = if log_terms > 0 {
        coeffs.row(0).to_owned()
    } else {
        Array1::zeros(f_vals.ncols())
    };
    Ok((limit, log_coefficient))
}
