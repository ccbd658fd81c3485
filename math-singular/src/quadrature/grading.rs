//! Aimi-Diligenti polynomial grading towards both interval endpoints
//!
//! A base rule on [-1, 1] is pulled back through
//!
//! ```text
//! t    = (s + 1) / 2
//! x(t) = 2 F int_0^t u^(p-1) (1 - u)^(q-1) du - 1
//! F    = (p + q - 1)! / ((p - 1)! (q - 1)!)
//! ```
//!
//! so that `1 + x ~ t^p` near `t = 0` and `1 - x ~ (1 - t)^q` near `t = 1`.
//! An endpoint singularity of order `-1/p` (or `-1/q`) becomes integrable by
//! a smooth rule.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SingularError};
use crate::quadrature::{QuadRule, gauss_legendre, map_to};

/// Largest accepted grading exponent; the inner rule has `floor((p + q) / 2)^2` points.
pub const MAX_GRADING_EXPONENT: u32 = 32;

/// Grading exponents of an Aimi-Diligenti transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingParams {
    /// Grading order at the left endpoint, in `1..=MAX_GRADING_EXPONENT`
    pub p: u32,
    /// Grading order at the right endpoint, in `1..=MAX_GRADING_EXPONENT`
    pub q: u32,
}

impl GradingParams {
    /// Create grading parameters
    pub fn new(p: u32, q: u32) -> Self {
        Self { p, q }
    }

    /// Apply the grading to a rule on [-1, 1]
    pub fn apply(&self, rule: &QuadRule) -> Result<QuadRule> {
        aimi_diligenti(rule, self.p, self.q)
    }
}

/// Normalisation `F = 1 / B(p, q)`, computed as `(p + q - 1) * C(p + q - 2, p - 1)`.
fn beta_normalisation(p: u32, q: u32) -> f64 {
    let n = (p + q - 2) as f64;
    let k = (p - 1).min(q - 1);
    let binomial = (1..=k).fold(1.0, |acc, i| acc * (n - k as f64 + i as f64) / i as f64);
    (p + q - 1) as f64 * binomial
}

/// Grade a rule on [-1, 1] towards both endpoints with exponents `p` and `q`.
///
/// `p = q = 1` is the identity. The inner incomplete-beta integral is
/// evaluated with a Gauss rule of `floor((p + q) / 2)^2` points on `[0, t]`,
/// which is exact for the polynomial integrand.
pub fn aimi_diligenti(rule: &QuadRule, p: u32, q: u32) -> Result<QuadRule> {
    let valid = 1..=MAX_GRADING_EXPONENT;
    let n_inner = (valid.contains(&p) && valid.contains(&q))
        .then(|| p.checked_add(q))
        .flatten()
        .and_then(|sum| (sum / 2).checked_pow(2))
        .ok_or_else(|| {
            SingularError::invalid(format!(
                "grading exponents p = {}, q = {} (must be in 1..={})",
                p, q, MAX_GRADING_EXPONENT
            ))
        })? as usize;

    let big_f = beta_normalisation(p, q);
    let inner = gauss_legendre(n_inner)?;
    let kernel = |u: f64| u.powi(p as i32 - 1) * (1.0 - u).powi(q as i32 - 1);

    let mut nodes = Vec::with_capacity(rule.len());
    let mut weights = Vec::with_capacity(rule.len());
    for (s, w) in rule.iter() {
        let t = (s + 1.0) / 2.0;
        let partial = if t > 0.0 {
            map_to(&inner, 0.0, t)?.integrate(kernel)
        } else {
            0.0
        };
        nodes.push(2.0 * big_f * partial - 1.0);
        weights.push(w * big_f * kernel(t));
    }

    log::debug!(
        "Aimi-Diligenti grading: p = {}, q = {}, F = {}, {} points",
        p,
        q,
        big_f,
        rule.len()
    );
    Ok(QuadRule::new(nodes, weights))
}
