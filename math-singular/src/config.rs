//! JSON configuration for singular quadrature and limit extrapolation

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::limit::LimitConfig;
use crate::quadrature::{GradingParams, QuadRule, SinhParams, gauss_legendre};

/// Complete configuration for one family of singular integrals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingularQuadConfig {
    /// Number of Gauss-Legendre points of the base rule
    #[serde(default = "default_gauss_order")]
    pub gauss_order: usize,
    /// Optional endpoint grading, applied before the sinh transform
    #[serde(default)]
    pub grading: Option<GradingParams>,
    /// Optional sinh transform towards a near-singular point
    #[serde(default)]
    pub sinh: Option<SinhParams>,
    /// Eps schedule and extrapolation method
    #[serde(default)]
    pub limit: LimitConfig,
}

fn default_gauss_order() -> usize {
    20
}

impl Default for SingularQuadConfig {
    fn default() -> Self {
        Self {
            gauss_order: default_gauss_order(),
            grading: None,
            sinh: None,
            limit: LimitConfig::default(),
        }
    }
}

impl SingularQuadConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.limit.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the rule on [-1, 1]: Gauss-Legendre, then grading, then sinh.
    pub fn build_rule(&self) -> Result<QuadRule> {
        let mut rule = gauss_legendre(self.gauss_order)?;
        if let Some(grading) = &self.grading {
            rule = grading.apply(&rule)?;
        }
        if let Some(sinh) = &self.sinh {
            rule = sinh.apply(&rule)?;
        }
        Ok(rule)
    }
}
