//! Attributes control charts: C and P.
//!
//! These charts monitor discrete data. Each subgroup contributes a single
//! observation, its first value: a defect count for the C chart, a
//! defective proportion for the P chart.
//!
//! Counts and proportions cannot be negative, so both lower limits are
//! floored at zero, and the P upper limit is capped at one. The variables
//! charts deliberately do not share this floor.
//!
//! # Chart Selection Guide
//!
//! | Chart | Data Type | Sample Size |
//! |-------|-----------|-------------|
//! | C     | Count of defects | Constant area |
//! | P     | Proportion defective | Constant, supplied by caller |
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 7: Control Charts for Attributes.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use super::chart::ControlLimits;
use super::subgroup::Subgroup;
use crate::stats;

/// The sample size the P chart historically assumed when none was given.
///
/// Only correct when every subgroup really inspected 100 units. Pass the
/// true sample size instead whenever it is known.
pub const DEFAULT_P_SAMPLE_SIZE: u64 = 100;

/// Mean of the first value of each subgroup.
fn mean_first_values(subgroups: &[Subgroup]) -> f64 {
    let firsts: Vec<f64> = subgroups.iter().map(Subgroup::first_value).collect();
    stats::mean(&firsts)
}

/// `max(0, x)` that lets NaN through.
fn floor_at_zero(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else {
        x
    }
}

/// `min(1, x)` that lets NaN through.
fn cap_at_one(x: f64) -> f64 {
    if x > 1.0 {
        1.0
    } else {
        x
    }
}

/// Count of defects per unit (C) chart limits.
///
/// # Formulas
///
/// - CL = c-bar (mean of the first value of each subgroup)
/// - UCL = c-bar + 3 * sqrt(c-bar)
/// - LCL = max(0, c-bar - 3 * sqrt(c-bar))
///
/// Returns `None` when `subgroups` is empty.
///
/// # Examples
///
/// ```
/// use spc_limits::spc::{c_limits, Subgroup};
///
/// let data = vec![Subgroup::new("1", vec![4.0]), Subgroup::new("2", vec![6.0])];
/// let limits = c_limits(&data).unwrap();
/// assert_eq!(limits.cl, 5.0);
/// assert_eq!(limits.lcl, 0.0);
/// ```
pub fn c_limits(subgroups: &[Subgroup]) -> Option<ControlLimits> {
    if subgroups.is_empty() {
        return None;
    }
    let c_bar = mean_first_values(subgroups);
    let sigma = c_bar.sqrt();
    Some(ControlLimits {
        ucl: c_bar + 3.0 * sigma,
        cl: c_bar,
        lcl: floor_at_zero(c_bar - 3.0 * sigma),
    })
}

/// Proportion nonconforming (P) chart limits for a constant sample size.
///
/// # Formulas
///
/// - CL = p-bar (mean of the first value of each subgroup)
/// - UCL = min(1, p-bar + 3 * sqrt(p-bar * (1 - p-bar) / n))
/// - LCL = max(0, p-bar - 3 * sqrt(p-bar * (1 - p-bar) / n))
///
/// `sample_size` is `n`, the number of units inspected per subgroup. It is
/// not inferred from the subgroups. A zero sample size widens the limits
/// to the full `[0, 1]` interval.
///
/// Returns `None` when `subgroups` is empty.
pub fn p_limits(subgroups: &[Subgroup], sample_size: u64) -> Option<ControlLimits> {
    if subgroups.is_empty() {
        return None;
    }
    let p_bar = mean_first_values(subgroups);
    let n = sample_size as f64;
    let std_err = (p_bar * (1.0 - p_bar) / n).sqrt();
    Some(ControlLimits {
        ucl: cap_at_one(p_bar + 3.0 * std_err),
        cl: p_bar,
        lcl: floor_at_zero(p_bar - 3.0 * std_err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singles(values: &[f64]) -> Vec<Subgroup> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Subgroup::new((i + 1).to_string(), vec![v]))
            .collect()
    }

    // --- C Chart ---

    #[test]
    fn test_c_chart_three_counts() {
        let limits = c_limits(&singles(&[4.0, 6.0, 5.0])).expect("limits");
        assert!((limits.cl - 5.0).abs() < 1e-12);
        let expected_ucl = 5.0 + 3.0 * 5.0_f64.sqrt();
        assert!((limits.ucl - expected_ucl).abs() < 1e-12);
        assert!((limits.ucl - 11.708).abs() < 1e-3);
        assert_eq!(limits.lcl, 0.0);
    }

    #[test]
    fn test_c_chart_lcl_positive_for_large_counts() {
        // c-bar = 25 -> LCL = 25 - 15 = 10
        let limits = c_limits(&singles(&[20.0, 30.0, 25.0])).expect("limits");
        assert!((limits.lcl - 10.0).abs() < 1e-12);
        assert!((limits.ucl - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_c_chart_uses_only_first_value() {
        let data = vec![
            Subgroup::new("1", vec![4.0, 100.0]),
            Subgroup::new("2", vec![6.0, -50.0]),
        ];
        let limits = c_limits(&data).expect("limits");
        assert!((limits.cl - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_c_chart_all_zero_counts() {
        let limits = c_limits(&singles(&[0.0, 0.0, 0.0])).expect("limits");
        assert_eq!((limits.ucl, limits.cl, limits.lcl), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_c_chart_empty_is_none() {
        assert!(c_limits(&[]).is_none());
    }

    #[test]
    fn test_c_chart_nan_propagates_through_floor() {
        let limits = c_limits(&singles(&[f64::NAN, 3.0])).expect("limits");
        assert!(limits.cl.is_nan());
        assert!(limits.lcl.is_nan());
    }

    #[test]
    fn test_c_chart_empty_subgroup_values_is_nan() {
        let data = vec![Subgroup::new("1", Vec::new()), Subgroup::new("2", vec![3.0])];
        let limits = c_limits(&data).expect("limits");
        assert!(limits.cl.is_nan());
    }

    // --- P Chart ---

    #[test]
    fn test_p_chart_three_proportions() {
        let limits = p_limits(&singles(&[0.02, 0.04, 0.03]), 100).expect("limits");
        assert!((limits.cl - 0.03).abs() < 1e-12);
        let std_err = (0.03_f64 * 0.97 / 100.0).sqrt();
        assert!((std_err - 0.01706).abs() < 1e-5);
        assert!((limits.ucl - (0.03 + 3.0 * std_err)).abs() < 1e-9);
        assert!((limits.ucl - 0.0812).abs() < 1e-4);
        assert_eq!(limits.lcl, 0.0);
    }

    #[test]
    fn test_p_chart_textbook_limits() {
        // p-bar = 0.10, n = 100 -> sigma = 0.03, UCL = 0.19, LCL = 0.01
        let limits = p_limits(&singles(&[0.10]), 100).expect("limits");
        assert!((limits.cl - 0.1).abs() < 1e-12);
        assert!((limits.ucl - 0.19).abs() < 1e-9);
        assert!((limits.lcl - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_p_chart_larger_sample_tightens_limits() {
        let data = singles(&[0.05, 0.06, 0.04]);
        let narrow = p_limits(&data, 1000).expect("limits");
        let wide = p_limits(&data, 50).expect("limits");
        assert!(narrow.ucl - narrow.cl < wide.ucl - wide.cl);
    }

    #[test]
    fn test_p_chart_ucl_capped_at_one() {
        let limits = p_limits(&singles(&[0.9, 0.95]), 2).expect("limits");
        assert_eq!(limits.ucl, 1.0);
        assert!(limits.lcl >= 0.0);
    }

    #[test]
    fn test_p_chart_zero_sample_size_spans_unit_interval() {
        let limits = p_limits(&singles(&[0.2, 0.4]), 0).expect("limits");
        assert_eq!(limits.ucl, 1.0);
        assert_eq!(limits.lcl, 0.0);
    }

    #[test]
    fn test_p_chart_empty_is_none() {
        assert!(p_limits(&[], DEFAULT_P_SAMPLE_SIZE).is_none());
    }

    #[test]
    fn test_clamps_pass_nan() {
        assert!(floor_at_zero(f64::NAN).is_nan());
        assert!(cap_at_one(f64::NAN).is_nan());
        assert_eq!(floor_at_zero(-0.5), 0.0);
        assert_eq!(cap_at_one(1.5), 1.0);
    }
}
