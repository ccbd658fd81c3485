//! Regularized integrals extrapolated to eps -> 0
//!
//! The integrals here are evaluated numerically with sinh-adapted rules, then
//! the limit driver recovers the finite part and the log(eps) strength.

use approx::assert_relative_eq;
use math_singular::limit::{LimitConfig, LimitMethod, extrapolate, extrapolate_vec, richardson};
use math_singular::quadrature::{QuadRule, gauss_legendre, map_to, sinh_transform};
use math_singular::{SingularError, SingularQuadConfig};
use ndarray::array;
use std::f64::consts::LN_2;

/// `int_0^1 dx / sqrt(x^2 + eps^2) = asinh(1 / eps) = -ln(eps) + ln 2 + O(eps^2)`
fn regularized_log_integral(eps: f64) -> f64 {
    // Reference variable s in [-1, 1], x = (s + 1) / 2, singular point at s = -1
    let b = 2.0 * eps;
    let rule = sinh_transform(&gauss_legendre(20).unwrap(), -1.0, b, false).unwrap();
    rule.integrate(|s| 1.0 / ((s + 1.0).powi(2) + b * b).sqrt())
}

fn log_config() -> LimitConfig {
    LimitConfig {
        eps_start: 0.01,
        eps_ratio: 2.0,
        n_samples: 4,
        log_terms: 1,
        method: LimitMethod::LogPolynomial,
    }
}

#[test]
fn test_log_divergent_limit() {
    let _ = env_logger::builder().is_test(true).try_init();
    let estimate = extrapolate(&log_config(), regularized_log_integral).unwrap();

    assert!((estimate.value - LN_2).abs() < 1e-6, "limit = {}", estimate.value);
    assert!(
        (estimate.log_coefficient + 1.0).abs() < 1e-6,
        "log coefficient = {}",
        estimate.log_coefficient
    );
    assert_eq!(estimate.eps.len(), 4);
    assert_relative_eq!(estimate.samples[0], (100.0_f64).asinh(), epsilon = 1e-10);
}

#[test]
fn test_smooth_limit_with_richardson() {
    // int_0^1 dx / (1 + x + eps) = ln((2 + eps) / (1 + eps)), analytic in eps
    let rule = map_to(&gauss_legendre(12).unwrap(), 0.0, 1.0).unwrap();
    let config = LimitConfig {
        eps_start: 0.01,
        method: LimitMethod::Richardson,
        ..log_config()
    };
    let estimate = extrapolate(&config, |eps| rule.integrate(|x| 1.0 / (1.0 + x + eps))).unwrap();
    assert!((estimate.value - LN_2).abs() < 1e-8, "limit = {}", estimate.value);
    assert_eq!(estimate.log_coefficient, 0.0);
}

#[test]
fn test_vector_kernel_limit() {
    // Two components sharing one eps schedule: a log-divergent one and a smooth one
    let config = log_config();
    let estimate = extrapolate_vec(&config, |eps| {
        array![regularized_log_integral(eps), 3.0 + eps * eps]
    })
    .unwrap();

    assert!((estimate.value[0] - LN_2).abs() < 1e-6);
    assert!((estimate.value[1] - 3.0).abs() < 1e-9);
    assert!((estimate.log_coefficient[0] + 1.0).abs() < 1e-6);
    assert!(estimate.log_coefficient[1].abs() < 1e-9);
}

#[test]
fn test_richardson_on_quadrature_refinement() {
    // Composite midpoint values of int_0^1 e^x dx have an error expansion in h^2
    let exact = 1.0_f64.exp() - 1.0;
    let midpoint = |n: usize| {
        let h = 1.0 / n as f64;
        (0..n).map(|i| ((i as f64 + 0.5) * h).exp() * h).sum::<f64>()
    };
    let h_sq = [1.0 / 16.0, 1.0 / 64.0, 1.0 / 256.0];
    let values = [midpoint(4), midpoint(8), midpoint(16)];
    let extrapolated = richardson(&h_sq, &values).unwrap();

    assert!((values[2] - exact).abs() > 1e-4);
    assert!((extrapolated - exact).abs() < 1e-8, "extrapolated = {}", extrapolated);
}

#[test]
fn test_config_driven_pipeline() {
    let json = r#"{
        "gauss_order": 40,
        "sinh": { "a": 0.0, "b": 0.02 },
        "limit": { "eps_start": 0.01, "n_samples": 4, "log_terms": 1 }
    }"#;
    let config = SingularQuadConfig::from_json_str(json).unwrap();
    let rule: QuadRule = map_to(&config.build_rule().unwrap(), 0.0, 1.0).unwrap();

    let width: f64 = 1e-2;
    let exact = 2.0 * (0.5 / width).atan() / width;
    let value = rule.integrate(|x| 1.0 / ((x - 0.5).powi(2) + width * width));
    assert!(((value - exact) / exact).abs() < 1e-8);

    let estimate = extrapolate(&config.limit, regularized_log_integral).unwrap();
    assert!((estimate.value - LN_2).abs() < 1e-6);
}

#[test]
fn test_config_file_round_trip() {
    let config = SingularQuadConfig {
        gauss_order: 24,
        limit: LimitConfig {
            method: LimitMethod::Richardson,
            ..Default::default()
        },
        ..Default::default()
    };

    let path = std::env::temp_dir().join(format!("math_singular_config_{}.json", std::process::id()));
    std::fs::write(&path, config.to_json().unwrap()).unwrap();
    let loaded = SingularQuadConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.build_rule().unwrap().len(), 24);
}

#[test]
fn test_invalid_schedule_is_rejected() {
    let config = LimitConfig {
        eps_ratio: 1.0,
        ..log_config()
    };
    let result = extrapolate(&config, regularized_log_integral);
    assert!(matches!(result, Err(SingularError::InvalidParameters { .. })));

    let too_many_logs = LimitConfig {
        n_samples: 2,
        log_terms: 2,
        ..log_config()
    };
    let result = extrapolate(&too_many_logs, regularized_log_integral);
    assert!(matches!(result, Err(SingularError::SingularSystem)));
}
