//! Affine remapping of rules from [-1, 1] to a target interval

use crate::error::{Result, SingularError};
use crate::quadrature::QuadRule;

/// Map a rule on [-1, 1] onto `[lo, hi]`.
///
/// Nodes go through `x -> lo + (hi - lo) (x + 1) / 2` and weights are scaled
/// by the Jacobian `(hi - lo) / 2`. A reversed interval (`lo > hi`) yields an
/// oriented rule with negative weights.
pub fn map_to(rule: &QuadRule, lo: f64, hi: f64) -> Result<QuadRule> {
    if lo == hi || !lo.is_finite() || !hi.is_finite() {
        return Err(SingularError::DegenerateInterval { lo, hi });
    }

    let length = hi - lo;
    let jacobian = length / 2.0;
    let (nodes, weights): (Vec<f64>, Vec<f64>) = rule
        .iter()
        .map(|(x, w)| (lo + length * (x + 1.0) / 2.0, w * jacobian))
        .unzip();

    Ok(QuadRule::new(nodes, weights))
}
