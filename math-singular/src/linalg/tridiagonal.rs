//! Symmetric tridiagonal eigenvalues by the implicit QL algorithm.
//!
//! Only the first row of the eigenvector matrix is accumulated: Golub-Welsch
//! weights need nothing else, and each Givens rotation updates the rows of
//! the eigenvector matrix independently.

/// Maximum number of QL sweeps spent on a single eigenvalue.
const MAX_SWEEPS: usize = 30;

/// Eigenvalues and first eigenvector components of a symmetric tridiagonal matrix.
#[derive(Debug, Clone)]
pub struct TridiagonalEigen {
    /// Eigenvalues in ascending order
    pub values: Vec<f64>,
    /// First component of the normalized eigenvector for each eigenvalue
    pub first_components: Vec<f64>,
}

/// Decompose the symmetric tridiagonal matrix with diagonal `diag` and
/// off-diagonal `off` (`off[i]` couples rows `i` and `i + 1`).
///
/// `off` must have length `diag.len() - 1`, or be empty for a 1x1 matrix.
pub fn symmetric_tridiagonal_eigen(diag: &[f64], off: &[f64]) -> TridiagonalEigen {
    let n = diag.len();
    debug_assert!(off.len() + 1 == n || (n == 0 && off.is_empty()));

    let mut d = diag.to_vec();
    let mut e = vec![0.0; n];
    e[..off.len()].copy_from_slice(off);

    let mut z = vec![0.0; n];
    if n > 0 {
        z[0] = 1.0;
    }

    for l in 0..n {
        let mut sweeps = 0;
        loop {
            // Look for a negligible off-diagonal element to split the matrix
            let mut m = l;
            while m + 1 < n {
                let dd = d[m].abs() + d[m + 1].abs();
                if e[m].abs() <= f64::EPSILON * dd {
                    break;
                }
                m += 1;
            }
            if m == l {
                break;
            }

            sweeps += 1;
            if sweeps > MAX_SWEEPS {
                log::warn!(
                    "tridiagonal QL did not converge for eigenvalue {} after {} sweeps",
                    l,
                    MAX_SWEEPS
                );
                break;
            }

            // Wilkinson-style shift from the leading 2x2 block
            let mut g = (d[l + 1] - d[l]) / (2.0 * e[l]);
            let mut r = g.hypot(1.0);
            g = d[m] - d[l] + e[l] / (g + r.copysign(g));

            let mut s = 1.0;
            let mut c = 1.0;
            let mut p = 0.0;
            let mut deflated = false;

            for i in (l..m).rev() {
                let f = s * e[i];
                let b = c * e[i];
                r = f.hypot(g);
                e[i + 1] = r;
                if r == 0.0 {
                    // Recover from underflow
                    d[i + 1] -= p;
                    e[m] = 0.0;
                    deflated = true;
                    break;
                }
                s = f / r;
                c = g / r;
                g = d[i + 1] - p;
                r = (d[i] - g) * s + 2.0 * c * b;
                p = s * r;
                d[i + 1] = g + p;
                g = c * r - b;

                let zf = z[i + 1];
                z[i + 1] = s * z[i] + c * zf;
                z[i] = c * z[i] - s * zf;
            }

            if deflated {
                continue;
            }
            d[l] -= p;
            e[l] = g;
            e[m] = 0.0;
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| d[i].total_cmp(&d[j]));

    TridiagonalEigen {
        values: order.iter().map(|&i| d[i]).collect(),
        first_components: order.iter().map(|&i| z[i]).collect(),
    }
}
