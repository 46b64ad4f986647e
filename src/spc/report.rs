//! Chart series with out-of-control annotations.
//!
//! A [`ChartReport`] pairs the limits of one chart with the statistic each
//! subgroup plots on it, classified against those limits.

use serde::{Deserialize, Serialize};

use super::chart::{ChartPoint, ChartType, ControlLimits};
use super::constants::ChartConstants;
use super::engine::compute_limits;
use super::subgroup::{plotted_value, Subgroup};

/// Limits and classified points for one chart.
///
/// # Examples
///
/// ```
/// use spc_limits::spc::{ChartConstants, ChartReport, ChartType, Subgroup};
///
/// let mut data: Vec<Subgroup> = (0..20)
///     .map(|i| Subgroup::new(i.to_string(), vec![5.0]))
///     .collect();
/// data.push(Subgroup::new("20", vec![50.0]));
///
/// let report = ChartReport::build(&data, ChartType::C, &ChartConstants::default(), 0)
///     .expect("non-empty");
/// assert!(!report.is_in_control());
/// assert_eq!(report.out_of_control_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartReport {
    /// Chart the limits were computed for.
    pub chart_type: ChartType,
    /// Limits every point is classified against.
    pub limits: ControlLimits,
    /// One point per subgroup, in input order.
    pub points: Vec<ChartPoint>,
}

impl ChartReport {
    /// Compute limits and classify every subgroup.
    ///
    /// Arguments are those of [`compute_limits`]. Returns `None` when it does.
    pub fn build(
        subgroups: &[Subgroup],
        chart_type: ChartType,
        constants: &ChartConstants,
        sample_size: u64,
    ) -> Option<Self> {
        let limits = compute_limits(subgroups, chart_type, constants, sample_size)?;
        Some(Self::with_limits(subgroups, chart_type, limits))
    }

    /// Classify `subgroups` against limits computed elsewhere.
    ///
    /// Useful when limits were established on a baseline period and new
    /// subgroups are checked against them.
    pub fn with_limits(subgroups: &[Subgroup], chart_type: ChartType, limits: ControlLimits) -> Self {
        let points = subgroups
            .iter()
            .enumerate()
            .map(|(i, sg)| {
                let value = plotted_value(sg, chart_type);
                ChartPoint {
                    index: i,
                    subgroup_id: sg.subgroup_id.clone(),
                    value,
                    out_of_control: !limits.contains(value),
                }
            })
            .collect();
        Self {
            chart_type,
            limits,
            points,
        }
    }

    /// Get all chart points.
    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    /// Points beyond the limits, in order.
    pub fn out_of_control_points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter().filter(|p| p.out_of_control)
    }

    /// Number of points beyond the limits.
    pub fn out_of_control_count(&self) -> usize {
        self.out_of_control_points().count()
    }

    /// Check if the process is in statistical control.
    pub fn is_in_control(&self) -> bool {
        self.points.iter().all(|p| !p.out_of_control)
    }
}
