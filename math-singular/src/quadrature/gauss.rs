//! Gauss-Legendre quadrature rules
//!
//! Nodes and weights on [-1, 1] from the Golub-Welsch construction: the nodes
//! are the eigenvalues of the Legendre Jacobi matrix and each weight is twice
//! the squared first component of the matching normalized eigenvector.

use crate::error::{Result, SingularError};
use crate::linalg::symmetric_tridiagonal_eigen;
use crate::quadrature::QuadRule;

/// Gauss-Legendre rule with `n` points on [-1, 1]
///
/// The rule integrates polynomials of degree `2n - 1` exactly. Nodes are
/// returned in ascending order.
pub fn gauss_legendre(n: usize) -> Result<QuadRule> {
    if n < 1 {
        return Err(SingularError::InvalidDomain { order: n });
    }

    // Legendre recurrence: zero diagonal, beta_k = k / sqrt(4k^2 - 1)
    let diag = vec![0.0; n];
    let off: Vec<f64> = (1..n)
        .map(|k| {
            let k = k as f64;
            k / (4.0 * k * k - 1.0).sqrt()
        })
        .collect();

    let eig = symmetric_tridiagonal_eigen(&diag, &off);
    let weights = eig.first_components.iter().map(|v| 2.0 * v * v).collect();

    Ok(QuadRule::new(eig.values, weights))
}

/// Gauss-Legendre rule with `n` points on `[lo, hi]`
pub fn gauss_legendre_on(n: usize, lo: f64, hi: f64) -> Result<QuadRule> {
    crate::quadrature::map_to(&gauss_legendre(n)?, lo, hi)
}
