//! Extrapolation of regularized integrals to their eps -> 0 limit
//!
//! - [`richardson`] - Richardson tables over a decreasing step sequence
//! - [`log_poly`] - Square fits in a mixed polynomial / `eps^k log(eps)` basis
//! - [`driver`] - Eps schedules and one-call sampling plus extrapolation

pub mod driver;
pub mod log_poly;
pub mod richardson;

pub use driver::{
    LimitConfig, LimitEstimate, LimitMethod, VecLimitEstimate, extrapolate, extrapolate_vec,
};
pub use log_poly::{LimitFit, LimitTerm, limit, limit_basis, limit_coeffs, limit_vec};
pub use richardson::{
    Extrapolate, RichardsonTable, richardson, richardson_coefficients, richardson_limit,
    richardson_table,
};
