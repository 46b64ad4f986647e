//! Control limit dispatch by chart type.
//!
//! The engine is a set of pure functions: limits are recomputed from the
//! full subgroup snapshot on every call, nothing is cached, and no point is
//! excluded because an earlier computation flagged it.

use tracing::debug;

use super::attributes::{c_limits, p_limits};
use super::chart::{ChartType, ControlLimits};
use super::constants::ChartConstants;
use super::subgroup::Subgroup;
use super::variables::{r_limits, xbar_limits};

/// Compute control limits for `chart_type` over all `subgroups`.
///
/// `constants` feeds the X-bar (A2) and R (D3, D4) charts. `sample_size`
/// is the number of units inspected per subgroup and is read only by the
/// P chart; it is never inferred from the data.
///
/// Returns `None` when `subgroups` is empty. Malformed measurements
/// (NaN, infinities) are not rejected and propagate into the result.
///
/// # Examples
///
/// ```
/// use spc_limits::spc::{compute_limits, ChartConstants, ChartType, Subgroup};
///
/// let data = vec![
///     Subgroup::new("1", vec![10.0, 12.0, 11.0]),
///     Subgroup::new("2", vec![9.0, 11.0, 10.0]),
///     Subgroup::new("3", vec![13.0, 14.0, 12.0]),
/// ];
/// let constants = ChartConstants { a2: 0.577, d3: 0.0, d4: 2.115 };
///
/// let r = compute_limits(&data, ChartType::R, &constants, 100).unwrap();
/// assert!((r.ucl - 4.23).abs() < 1e-12);
/// assert!(compute_limits(&[], ChartType::R, &constants, 100).is_none());
/// ```
pub fn compute_limits(
    subgroups: &[Subgroup],
    chart_type: ChartType,
    constants: &ChartConstants,
    sample_size: u64,
) -> Option<ControlLimits> {
    if subgroups.is_empty() {
        debug!(chart = %chart_type, "no subgroups, no limits");
        return None;
    }
    debug!(chart = %chart_type, subgroups = subgroups.len(), "computing control limits");
    match chart_type {
        ChartType::XBar => xbar_limits(subgroups, constants.a2),
        ChartType::R => r_limits(subgroups, constants.d3, constants.d4),
        ChartType::C => c_limits(subgroups),
        ChartType::P => p_limits(subgroups, sample_size),
    }
}

/// Like [`compute_limits`], with the chart named by a textual selector.
///
/// An unrecognised selector is not an error: it yields `None`, the same
/// outcome as an empty subgroup list.
pub fn compute_limits_by_name(
    subgroups: &[Subgroup],
    selector: &str,
    constants: &ChartConstants,
    sample_size: u64,
) -> Option<ControlLimits> {
    match selector.parse::<ChartType>() {
        Ok(chart_type) => compute_limits(subgroups, chart_type, constants, sample_size),
        Err(e) => {
            debug!(error = %e, "unsupported chart selector");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spc::DEFAULT_P_SAMPLE_SIZE;

    fn rows(rows: &[&[f64]]) -> Vec<Subgroup> {
        rows.iter()
            .enumerate()
            .map(|(i, r)| Subgroup::new((i + 1).to_string(), r.to_vec()))
            .collect()
    }

    fn measurements() -> Vec<Subgroup> {
        rows(&[&[10.0, 12.0, 11.0], &[9.0, 11.0, 10.0], &[13.0, 14.0, 12.0]])
    }

    #[test]
    fn test_dispatch_xbar() {
        let constants = ChartConstants::default();
        let limits = compute_limits(&measurements(), ChartType::XBar, &constants, 0).unwrap();
        assert!((limits.cl - 11.333).abs() < 1e-3);
        assert!((limits.ucl - 12.487).abs() < 1e-3);
        assert!((limits.lcl - 10.180).abs() < 1e-3);
    }

    #[test]
    fn test_dispatch_r() {
        let constants = ChartConstants::default();
        let limits = compute_limits(&measurements(), ChartType::R, &constants, 0).unwrap();
        assert!((limits.cl - 2.0).abs() < 1e-12);
        assert!((limits.ucl - 4.23).abs() < 1e-12);
        assert_eq!(limits.lcl, 0.0);
    }

    #[test]
    fn test_dispatch_c_ignores_constants() {
        let data = rows(&[&[4.0], &[6.0], &[5.0]]);
        let a = compute_limits(&data, ChartType::C, &ChartConstants::default(), 0);
        let b = compute_limits(
            &data,
            ChartType::C,
            &ChartConstants {
                a2: 9.0,
                d3: 1.0,
                d4: 9.0,
            },
            12345,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_dispatch_p_reads_sample_size() {
        let data = rows(&[&[0.02], &[0.04], &[0.03]]);
        let constants = ChartConstants::default();
        let n100 = compute_limits(&data, ChartType::P, &constants, DEFAULT_P_SAMPLE_SIZE).unwrap();
        let n400 = compute_limits(&data, ChartType::P, &constants, 400).unwrap();
        assert!((n100.ucl - 0.0812).abs() < 1e-4);
        assert!(n400.ucl < n100.ucl);
    }

    #[test]
    fn test_empty_is_none_for_every_chart() {
        let constants = ChartConstants::default();
        for ct in ChartType::ALL {
            assert!(compute_limits(&[], ct, &constants, 100).is_none(), "{ct}");
        }
    }

    #[test]
    fn test_by_name_unknown_selector_is_none() {
        let constants = ChartConstants::default();
        assert!(compute_limits_by_name(&measurements(), "ewma", &constants, 100).is_none());
        assert!(compute_limits_by_name(&measurements(), "", &constants, 100).is_none());
    }

    #[test]
    fn test_by_name_matches_typed_call() {
        let constants = ChartConstants::default();
        let data = measurements();
        for ct in ChartType::ALL {
            assert_eq!(
                compute_limits_by_name(&data, ct.as_str(), &constants, 100),
                compute_limits(&data, ct, &constants, 100)
            );
        }
    }

    #[test]
    fn test_inputs_not_mutated() {
        let data = measurements();
        let before = data.clone();
        let _ = compute_limits(&data, ChartType::XBar, &ChartConstants::default(), 100);
        assert_eq!(data, before);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn subgroup_strategy() -> impl Strategy<Value = Vec<Subgroup>> {
        proptest::collection::vec(proptest::collection::vec(0.0_f64..1e3, 1..=8), 1..=30)
            .prop_map(|rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, v)| Subgroup::new(i.to_string(), v))
                    .collect()
            })
    }

    fn proportion_strategy() -> impl Strategy<Value = Vec<Subgroup>> {
        proptest::collection::vec(0.0_f64..=1.0, 1..=30).prop_map(|ps| {
            ps.into_iter()
                .enumerate()
                .map(|(i, p)| Subgroup::new(i.to_string(), vec![p]))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn limits_are_ordered(
            data in subgroup_strategy(),
            n in 2_usize..=10,
        ) {
            let constants = ChartConstants::for_subgroup_size(n).expect("table row");
            for ct in [ChartType::XBar, ChartType::R, ChartType::C] {
                let l = compute_limits(&data, ct, &constants, 100).expect("non-empty");
                prop_assert!(l.lcl <= l.cl && l.cl <= l.ucl, "{ct}: {l:?}");
            }
        }

        #[test]
        fn p_limits_stay_in_unit_interval(
            data in proportion_strategy(),
            n in 1_u64..=10_000,
        ) {
            let l = compute_limits(&data, ChartType::P, &ChartConstants::default(), n)
                .expect("non-empty");
            prop_assert!(l.lcl >= 0.0 && l.ucl <= 1.0, "{l:?}");
            prop_assert!(l.lcl <= l.cl && l.cl <= l.ucl, "{l:?}");
        }

        #[test]
        fn computation_is_idempotent(data in subgroup_strategy()) {
            let constants = ChartConstants::default();
            for ct in ChartType::ALL {
                let a = compute_limits(&data, ct, &constants, 100).expect("non-empty");
                let b = compute_limits(&data, ct, &constants, 100).expect("non-empty");
                prop_assert_eq!(a.ucl.to_bits(), b.ucl.to_bits());
                prop_assert_eq!(a.cl.to_bits(), b.cl.to_bits());
                prop_assert_eq!(a.lcl.to_bits(), b.lcl.to_bits());
            }
        }
    }
}
