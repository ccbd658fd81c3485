//! # Singular Quadrature and Limit Extrapolation
//!
//! Numerical building blocks for the singular and nearly singular integrals
//! that appear in boundary integral equations.
//!
//! ## Features
//!
//! - Gauss-Legendre rules of arbitrary order (Golub-Welsch)
//! - Sinh transforms for nearly singular points, single and iterated
//! - Aimi-Diligenti grading for endpoint singularities
//! - Richardson and log-polynomial extrapolation of `I(eps)` to `eps -> 0`
//! - JSON configuration of a complete rule and eps schedule
//!
//! ## Example
//!
//! ```
//! use math_singular::quadrature::{gauss_legendre, sinh_transform};
//!
//! // Integrand with a sharp peak of width 1e-3 at x = 0.3
//! let (a, b) = (0.3, 1e-3);
//! let rule = sinh_transform(&gauss_legendre(50).unwrap(), a, b, false).unwrap();
//! let value = rule.integrate(|x| 1.0 / ((x - a).powi(2) + b * b));
//! let exact = (((1.0 - a) / b).atan() + ((1.0 + a) / b).atan()) / b;
//! assert!(((value - exact) / exact).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod limit;
pub mod linalg;
pub mod quadrature;

// Re-exports
pub use config::SingularQuadConfig;
pub use error::{Result, SingularError};
pub use limit::{LimitConfig, LimitEstimate, LimitMethod, extrapolate, extrapolate_vec};
pub use quadrature::{GradingParams, QuadRule, SinhParams, TensorRule};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
