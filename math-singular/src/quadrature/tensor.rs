//! Tensor-product rules over boxes
//!
//! Kernels over pairs of triangles are integrated over products of 1D
//! coordinates (for example obs `(x, y)` and src `(x, y)` give a 4D box). The
//! points are stored row-wise so a kernel receives one coordinate tuple per
//! evaluation.

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{Result, SingularError};
use crate::quadrature::QuadRule;

/// A multi-dimensional quadrature rule
#[derive(Debug, Clone)]
pub struct TensorRule {
    /// Quadrature points, one row per point (num_points × dim)
    pub points: Array2<f64>,
    /// Quadrature weights
    pub weights: Array1<f64>,
}

impl TensorRule {
    /// Number of quadrature points
    pub fn num_points(&self) -> usize {
        self.weights.len()
    }

    /// Dimension of the integration domain
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    /// Integrate a scalar function of the coordinate tuple
    pub fn integrate<F>(&self, f: F) -> f64
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        self.points
            .rows()
            .into_iter()
            .zip(self.weights.iter())
            .map(|(pt, &w)| f(pt) * w)
            .sum()
    }
}

/// Cartesian product of 1D rules; the last factor varies fastest.
pub fn tensor_product(factors: &[QuadRule]) -> Result<TensorRule> {
    if factors.is_empty() {
        return Err(SingularError::InvalidDomain { order: 0 });
    }
    if let Some(empty) = factors.iter().find(|r| r.is_empty()) {
        return Err(SingularError::InvalidDomain { order: empty.len() });
    }

    let dim = factors.len();
    let num_points: usize = factors.iter().map(QuadRule::len).product();
    let mut points = Array2::zeros((num_points, dim));
    let mut weights = Array1::ones(num_points);

    // Mixed-radix counter over the factor indices
    let mut index = vec![0usize; dim];
    for row in 0..num_points {
        for (d, rule) in factors.iter().enumerate() {
            points[[row, d]] = rule.nodes()[index[d]];
            weights[row] *= rule.weights()[index[d]];
        }
        for d in (0..dim).rev() {
            index[d] += 1;
            if index[d] < factors[d].len() {
                break;
            }
            index[d] = 0;
        }
    }

    Ok(TensorRule { points, weights })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrature::{gauss_legendre, map_to};
    use approx::assert_relative_eq;

    #[test]
    fn test_square_weights_sum() {
        let rule = gauss_legendre(4).unwrap();
        let square = tensor_product(&[rule.clone(), rule]).unwrap();
        assert_eq!(square.num_points(), 16);
        assert_eq!(square.dim(), 2);
        assert_relative_eq!(square.weights.sum(), 4.0, epsilon = 1e-13);
    }

    #[test]
    fn test_ordering_last_fastest() {
        let a = QuadRule::new(vec![1.0, 2.0], vec![1.0, 1.0]);
        let b = QuadRule::new(vec![10.0, 20.0, 30.0], vec![1.0, 2.0, 3.0]);
        let rule = tensor_product(&[a, b]).unwrap();
        assert_eq!(rule.points.row(0).to_vec(), vec![1.0, 10.0]);
        assert_eq!(rule.points.row(1).to_vec(), vec![1.0, 20.0]);
        assert_eq!(rule.points.row(3).to_vec(), vec![2.0, 10.0]);
        assert_eq!(rule.weights[2], 3.0);
    }

    #[test]
    fn test_integrates_separable_polynomial() {
        // int_0^1 int_0^2 x^2 y^3 dy dx = (1/3) * 4
        let x = map_to(&gauss_legendre(3).unwrap(), 0.0, 1.0).unwrap();
        let y = map_to(&gauss_legendre(3).unwrap(), 0.0, 2.0).unwrap();
        let rule = tensor_product(&[x, y]).unwrap();
        let value = rule.integrate(|p| p[0].powi(2) * p[1].powi(3));
        assert_relative_eq!(value, 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_factors_rejected() {
        assert!(tensor_product(&[]).is_err());
        let empty = QuadRule::new(vec![], vec![]);
        assert!(tensor_product(&[empty]).is_err());
    }
}
