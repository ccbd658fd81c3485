//! Small dense linear algebra kernels
//!
//! - [`lu`] - LU factorization with partial pivoting (limit fitting)
//! - [`tridiagonal`] - Implicit QL eigenvalues (Gauss rule generation)

pub mod lu;
pub mod tridiagonal;

pub use lu::{LuFactorization, lu_factorize, lu_solve};
pub use tridiagonal::{TridiagonalEigen, symmetric_tridiagonal_eigen};
