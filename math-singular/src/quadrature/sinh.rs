//! Sinh transformation for nearly singular integrands
//!
//! For an integrand on [-1, 1] with a near-singularity at distance `b` from
//! the point `a`, the change of variables
//!
//! ```text
//! x = a + b sinh(mu_0 s - eta_0)
//! mu_0  = (asinh((1 + a) / b) + asinh((1 - a) / b)) / 2
//! eta_0 = (asinh((1 + a) / b) - asinh((1 - a) / b)) / 2
//! ```
//!
//! maps [-1, 1] onto itself and turns a peak of width `b` into a smooth
//! function of `s`. The transformed integrand still has complex poles at
//! distance `pi / (2 mu_0)` from the real axis, around `s = eta_0 / mu_0`.
//! The iterated mode applies a second sinh map centred on that pole before
//! the outer one.
//!
//! Precision: all hyperbolic functions are evaluated directly in f64. For
//! very small `b` the Jacobian `b mu_0 cosh(..)` spans many orders of
//! magnitude; this is a precision caveat for the caller, not an error.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{Result, SingularError};
use crate::quadrature::QuadRule;

/// Parameters of a sinh transformation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinhParams {
    /// Location of the (near-)singularity on [-1, 1]
    pub a: f64,
    /// Distance scale of the singularity, must be > 0
    pub b: f64,
    /// Apply the pole-centred inner transform first
    #[serde(default)]
    pub iterated: bool,
}

impl SinhParams {
    /// Create sinh parameters for a singular point `a` at distance `b`
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            a,
            b,
            iterated: false,
        }
    }

    /// Switch on the iterated (double) transform
    pub fn iterated(mut self) -> Self {
        self.iterated = true;
        self
    }

    /// Apply the transform to a rule on [-1, 1]
    pub fn apply(&self, rule: &QuadRule) -> Result<QuadRule> {
        sinh_transform(rule, self.a, self.b, self.iterated)
    }
}

/// Scale and shift `(mu, eta)` of the sinh map centred at `a` with width `b`.
fn sinh_scales(a: f64, b: f64) -> (f64, f64) {
    let upper = ((1.0 + a) / b).asinh();
    let lower = ((1.0 - a) / b).asinh();
    (0.5 * (upper + lower), 0.5 * (upper - lower))
}

fn apply_sinh_map(rule: &QuadRule, a: f64, b: f64, mu: f64, eta: f64) -> QuadRule {
    let (nodes, weights): (Vec<f64>, Vec<f64>) = rule
        .iter()
        .map(|(s, w)| {
            let arg = mu * s - eta;
            (a + b * arg.sinh(), w * b * mu * arg.cosh())
        })
        .unzip();
    QuadRule::new(nodes, weights)
}

/// Sinh-transform a rule on [-1, 1] towards a singularity at `a` with scale `b`.
///
/// The returned rule still integrates over [-1, 1]. With `iterated`, an inner
/// transform with `a_1 = eta_0 / mu_0` and `b_1 = pi / (2 mu_0)` is applied
/// to the base nodes first.
pub fn sinh_transform(rule: &QuadRule, a: f64, b: f64, iterated: bool) -> Result<QuadRule> {
    if !b.is_finite() || b <= 0.0 {
        return Err(SingularError::invalid(format!(
            "sinh transform scale b = {} (must be finite and > 0)",
            b
        )));
    }
    if !a.is_finite() {
        return Err(SingularError::invalid(format!(
            "sinh transform centre a = {} (must be finite)",
            a
        )));
    }

    let (mu_0, eta_0) = sinh_scales(a, b);

    let start = if iterated {
        let a_1 = eta_0 / mu_0;
        let b_1 = PI / (2.0 * mu_0);
        let (mu_1, eta_1) = sinh_scales(a_1, b_1);
        log::debug!(
            "iterated sinh transform: a_1 = {:.6e}, b_1 = {:.6e}, mu_1 = {:.6e}, eta_1 = {:.6e}",
            a_1,
            b_1,
            mu_1,
            eta_1
        );
        apply_sinh_map(rule, a_1, b_1, mu_1, eta_1)
    } else {
        rule.clone()
    };

    log::debug!(
        "sinh transform: a = {:.6e}, b = {:.6e}, mu_0 = {:.6e}, eta_0 = {:.6e}, {} points",
        a,
        b,
        mu_0,
        eta_0,
        rule.len()
    );
    Ok(apply_sinh_map(&start, a, b, mu_0, eta_0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::gauss_legendre;
    use approx::assert_relative_eq;

    fn lorentzian_exact(a: f64, b: f64) -> f64 {
        (((1.0 - a) / b).atan() + ((1.0 + a) / b).atan()) / b
    }

    #[test]
    fn test_endpoints_preserved() {
        let (mu, eta) = sinh_scales(0.3, 0.01);
        assert_relative_eq!(0.3 + 0.01 * (mu - eta).sinh(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(0.3 + 0.01 * (-mu - eta).sinh(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weight_sum_is_interval_length() {
        let base = gauss_legendre(20).unwrap();
        for &(a, b) in &[(0.0, 1.0), (0.3, 1e-2), (-0.9, 1e-4), (0.5, 1e-6)] {
            let rule = sinh_transform(&base, a, b, false).unwrap();
            assert!(
                (rule.weight_sum() - 2.0).abs() < 1e-10,
                "a = {}, b = {}: sum = {}",
                a,
                b,
                rule.weight_sum()
            );
            let iterated = sinh_transform(&base, a, b, true).unwrap();
            assert!(rule.nodes().iter().all(|&x| (-1.0..=1.0).contains(&x)));
            assert!(iterated.nodes().iter().all(|&x| (-1.0..=1.0).contains(&x)));
        }

        // The iterated Jacobian steepens at the endpoints, so only moderate b here
        for &(a, b) in &[(0.0, 1.0), (0.3, 1e-2)] {
            let rule = sinh_transform(&base, a, b, true).unwrap();
            assert_relative_eq!(rule.weight_sum(), 2.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_clusters_points_near_singularity() {
        let base = gauss_legendre(20).unwrap();
        let rule = sinh_transform(&base, 0.3, 1e-3, false).unwrap();
        let near = rule
            .nodes()
            .iter()
            .filter(|&&x| (x - 0.3).abs() < 0.01)
            .count();
        let near_plain = base
            .nodes()
            .iter()
            .filter(|&&x| (x - 0.3).abs() < 0.01)
            .count();
        assert!(near >= near_plain + 3, "{} vs {}", near, near_plain);
    }

    #[test]
    fn test_nearly_singular_lorentzian() {
        let (a, b) = (0.3, 1e-3);
        let exact = lorentzian_exact(a, b);
        let f = |x: f64| 1.0 / ((x - a).powi(2) + b * b);

        let plain = gauss_legendre(50).unwrap().integrate(f);
        let sinh = sinh_transform(&gauss_legendre(50).unwrap(), a, b, false)
            .unwrap()
            .integrate(f);

        assert!(((sinh - exact) / exact).abs() < 1e-7);
        assert!(((plain - exact) / exact).abs() > 1e-2);
    }

    #[test]
    fn test_iterated_beats_single_transform() {
        let (a, b) = (0.3, 1e-3);
        let exact = lorentzian_exact(a, b);
        let f = |x: f64| 1.0 / ((x - a).powi(2) + b * b);
        let base = gauss_legendre(20).unwrap();

        let single = sinh_transform(&base, a, b, false).unwrap().integrate(f);
        let double = SinhParams::new(a, b).iterated().apply(&base).unwrap().integrate(f);

        let err_single = ((single - exact) / exact).abs();
        let err_double = ((double - exact) / exact).abs();
        assert!(err_double < 1e-8, "iterated error {}", err_double);
        assert!(err_double < err_single);
    }

    #[test]
    fn test_invalid_scale() {
        let base = gauss_legendre(4).unwrap();
        for b in [0.0, -1.0, f64::NAN] {
            let err = sinh_transform(&base, 0.0, b, false).unwrap_err();
            assert!(err.is_parameter_error());
        }
        assert!(sinh_transform(&base, f64::NAN, 0.1, false).is_err());
    }
}
