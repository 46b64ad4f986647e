//! Control chart factors for X-bar and R charts.
//!
//! # Control Chart Factors
//!
//! Tabulated A2, D3 and D4 factors for subgroup sizes n = 2..=10. The
//! table is indexed by `n - 2`.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Appendix VI.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest subgroup size with tabulated factors.
pub const MIN_SUBGROUP_SIZE: usize = 2;

/// Largest subgroup size with tabulated factors.
pub const MAX_SUBGROUP_SIZE: usize = 10;

/// Subgroup size whose factors [`ChartConstants::default`] returns.
pub const DEFAULT_SUBGROUP_SIZE: usize = 5;

/// A2 factors. UCL = X-double-bar + A2 * R-bar, LCL = X-double-bar - A2 * R-bar.
const A2: [f64; 9] = [1.880, 1.023, 0.729, 0.577, 0.483, 0.419, 0.373, 0.337, 0.308];

/// D3 factors. LCL_R = D3 * R-bar.
const D3: [f64; 9] = [0.0, 0.0, 0.0, 0.0, 0.0, 0.076, 0.136, 0.184, 0.223];

/// D4 factors. UCL_R = D4 * R-bar.
const D4: [f64; 9] = [3.267, 2.575, 2.282, 2.115, 2.004, 1.924, 1.864, 1.816, 1.777];

/// The A2/D3/D4 factors used by X-bar and R charts.
///
/// C and P charts ignore these.
///
/// # Invariants
///
/// - all factors are non-negative
/// - `d4 > d3`
///
/// The limit engine does not enforce these; [`ChartConstants::validate`]
/// does, and the configuration layer calls it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConstants {
    /// Width of the X-bar limits in units of R-bar.
    pub a2: f64,
    /// Lower R-chart limit factor.
    pub d3: f64,
    /// Upper R-chart limit factor.
    pub d4: f64,
}

impl ChartConstants {
    /// Standard factors for subgroup size `n`, or `None` outside 2..=10.
    ///
    /// # Examples
    ///
    /// ```
    /// use spc_limits::spc::ChartConstants;
    ///
    /// let c = ChartConstants::for_subgroup_size(4).unwrap();
    /// assert_eq!(c.a2, 0.729);
    /// assert!(ChartConstants::for_subgroup_size(11).is_none());
    /// ```
    pub fn for_subgroup_size(n: usize) -> Option<Self> {
        if !(MIN_SUBGROUP_SIZE..=MAX_SUBGROUP_SIZE).contains(&n) {
            return None;
        }
        let idx = n - MIN_SUBGROUP_SIZE;
        Some(Self {
            a2: A2[idx],
            d3: D3[idx],
            d4: D4[idx],
        })
    }

    /// Check the non-negativity and ordering invariants.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ValidationFailed`] naming the offending factor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("a2", self.a2), ("d3", self.d3), ("d4", self.d4)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("constants.{field}"),
                    message: format!("must be a finite non-negative number, got {value}"),
                });
            }
        }
        if self.d4 <= self.d3 {
            return Err(ConfigError::ValidationFailed {
                field: "constants.d4".to_string(),
                message: format!("must be greater than d3 ({})", self.d3),
            });
        }
        Ok(())
    }
}

impl Default for ChartConstants {
    /// Factors for subgroup size 5: A2 = 0.577, D3 = 0, D4 = 2.115.
    fn default() -> Self {
        let idx = DEFAULT_SUBGROUP_SIZE - MIN_SUBGROUP_SIZE;
        Self {
            a2: A2[idx],
            d3: D3[idx],
            d4: D4[idx],
        }
    }
}
