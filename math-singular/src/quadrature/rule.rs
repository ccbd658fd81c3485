//! One-dimensional quadrature rule container

use ndarray::Array1;

use crate::error::{Result, SingularError};

/// A one-dimensional quadrature rule: ordered nodes with matching weights.
///
/// Rules are immutable after construction; every transform returns a new rule.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadRule {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl QuadRule {
    /// Create a rule from caller-supplied nodes and weights.
    pub fn try_new(nodes: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        if nodes.len() != weights.len() {
            return Err(SingularError::DimensionMismatch {
                expected: nodes.len(),
                got: weights.len(),
            });
        }
        Ok(Self { nodes, weights })
    }

    /// Rules built inside the crate always pair one weight with each node.
    pub(crate) fn new(nodes: Vec<f64>, weights: Vec<f64>) -> Self {
        assert_eq!(
            nodes.len(),
            weights.len(),
            "nodes and weights must have the same length"
        );
        Self { nodes, weights }
    }

    /// Number of quadrature points
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the rule has no points
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Quadrature nodes
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Quadrature weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Iterator over `(node, weight)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.nodes.iter().copied().zip(self.weights.iter().copied())
    }

    /// Sum of the weights, i.e. the measure of the integration domain
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Integrate a scalar function with this rule.
    pub fn integrate<F>(&self, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.iter().map(|(x, w)| f(x) * w).sum()
    }

    /// Integrate a vector-valued function componentwise.
    ///
    /// Every evaluation must return an array of the same length.
    pub fn integrate_vec<F>(&self, f: F) -> Array1<f64>
    where
        F: Fn(f64) -> Array1<f64>,
    {
        let mut points = self.iter();
        let Some((x0, w0)) = points.next() else {
            return Array1::zeros(0);
        };
        let mut acc = f(x0) * w0;
        for (x, w) in points {
            acc.scaled_add(w, &f(x));
        }
        acc
    }

    /// Decompose into `(nodes, weights)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.nodes, self.weights)
    }
}
