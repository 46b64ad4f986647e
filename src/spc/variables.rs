//! Variables control charts: X-bar and R.
//!
//! These charts monitor continuous measurements taken in subgroups. The
//! X-bar chart tracks subgroup means; the R chart tracks within-subgroup
//! variation through subgroup ranges. Both read every value of every
//! subgroup.
//!
//! Neither lower limit is floored at zero: with a large enough average
//! range the X-bar LCL can go negative.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 6: Control Charts for Variables.
//! - Shewhart, W.A. (1931). *Economic Control of Quality of Manufactured Product*.

use super::chart::ControlLimits;
use super::subgroup::Subgroup;
use crate::stats;

/// Grand mean (X-double-bar) over all subgroups.
fn grand_mean(subgroups: &[Subgroup]) -> f64 {
    let means: Vec<f64> = subgroups.iter().map(Subgroup::mean).collect();
    stats::mean(&means)
}

/// Average range (R-bar) over all subgroups.
fn r_bar(subgroups: &[Subgroup]) -> f64 {
    let ranges: Vec<f64> = subgroups.iter().map(Subgroup::range).collect();
    stats::mean(&ranges)
}

/// X-bar chart limits.
///
/// # Algorithm
///
/// 1. For each subgroup, compute the mean (X-bar) and range (R).
/// 2. Compute the grand mean (X-double-bar) and average range (R-bar).
/// 3. CL = X-double-bar, UCL/LCL = CL +/- A2 * R-bar.
///
/// Returns `None` when `subgroups` is empty.
///
/// # Examples
///
/// ```
/// use spc_limits::spc::{xbar_limits, Subgroup};
///
/// let data = vec![
///     Subgroup::new("1", vec![25.0, 26.0, 24.5, 25.5, 25.0]),
///     Subgroup::new("2", vec![25.2, 24.8, 25.1, 24.9, 25.3]),
/// ];
/// let limits = xbar_limits(&data, 0.577).expect("two subgroups");
/// assert!(limits.ucl > limits.cl && limits.cl > limits.lcl);
/// ```
pub fn xbar_limits(subgroups: &[Subgroup], a2: f64) -> Option<ControlLimits> {
    if subgroups.is_empty() {
        return None;
    }
    let grand_mean = grand_mean(subgroups);
    let r_bar = r_bar(subgroups);
    Some(ControlLimits {
        ucl: grand_mean + a2 * r_bar,
        cl: grand_mean,
        lcl: grand_mean - a2 * r_bar,
    })
}

/// R chart limits: CL = R-bar, UCL = D4 * R-bar, LCL = D3 * R-bar.
///
/// Returns `None` when `subgroups` is empty.
pub fn r_limits(subgroups: &[Subgroup], d3: f64, d4: f64) -> Option<ControlLimits> {
    if subgroups.is_empty() {
        return None;
    }
    let r_bar = r_bar(subgroups);
    Some(ControlLimits {
        ucl: d4 * r_bar,
        cl: r_bar,
        lcl: d3 * r_bar,
    })
}
