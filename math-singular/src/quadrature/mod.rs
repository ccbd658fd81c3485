//! Quadrature rules for singular and nearly singular integrals
//!
//! ## Module Organization
//!
//! - [`rule`] - The `QuadRule` (nodes, weights) container
//! - [`gauss`] - Gauss-Legendre rules on [-1, 1] via Golub-Welsch
//! - [`mapping`] - Affine remapping onto arbitrary intervals
//! - [`sinh`] - Sinh transform for near-singular points (single and iterated)
//! - [`grading`] - Aimi-Diligenti endpoint grading
//! - [`tensor`] - Tensor-product rules for multi-dimensional kernels

pub mod gauss;
pub mod grading;
pub mod mapping;
pub mod rule;
pub mod sinh;
pub mod tensor;

pub use gauss::{gauss_legendre, gauss_legendre_on};
pub use grading::{GradingParams, MAX_GRADING_EXPONENT, aimi_diligenti};
pub use mapping::map_to;
pub use rule::QuadRule;
pub use sinh::{SinhParams, sinh_transform};
pub use tensor::{TensorRule, tensor_product};
