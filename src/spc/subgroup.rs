//! Subgroup records handed to the limit engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::chart::ChartType;
use crate::stats;

/// One batch of measurements collected at a point in time.
///
/// Only `values` takes part in limit computation. The date drives
/// [`filter_by_date`]; the identifier and tags are carried through for
/// display.
///
/// Callers must keep `values` non-empty and finite; the engine does not
/// check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subgroup {
    /// Identifier shown on the chart axis.
    pub subgroup_id: String,
    /// Measurements, or a single count/proportion for C and P charts.
    pub values: Vec<f64>,
    /// Collection date; undated subgroups pass every date window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Production lot or order the subgroup was drawn from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_number: Option<String>,
    /// What is being produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    /// Which characteristic is measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl Subgroup {
    /// Create an untagged subgroup.
    pub fn new(subgroup_id: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            subgroup_id: subgroup_id.into(),
            values,
            date: None,
            production_number: None,
            variable: None,
            parameter: None,
        }
    }

    /// Set the collection date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the variable and parameter tags.
    pub fn with_tags(mut self, variable: Option<String>, parameter: Option<String>) -> Self {
        self.variable = variable;
        self.parameter = parameter;
        self
    }

    /// Mean of the subgroup's measurements.
    pub fn mean(&self) -> f64 {
        stats::mean(&self.values)
    }

    /// Range of the subgroup's measurements.
    pub fn range(&self) -> f64 {
        stats::range(&self.values)
    }

    /// The single observation read by C and P charts.
    ///
    /// NaN when `values` is empty.
    pub fn first_value(&self) -> f64 {
        self.values.first().copied().unwrap_or(f64::NAN)
    }
}

/// The statistic a chart plots for one subgroup.
///
/// X-bar plots the mean, R the range, C and P the first value.
pub fn plotted_value(subgroup: &Subgroup, chart_type: ChartType) -> f64 {
    if !chart_type.uses_full_subgroup() {
        return subgroup.first_value();
    }
    match chart_type {
        ChartType::R => subgroup.range(),
        _ => subgroup.mean(),
    }
}

/// Subgroups collected within `start..=end`.
///
/// Both bounds are inclusive and either may be open. Undated subgroups are
/// always kept. Input order is preserved.
///
/// Limits should still come from the full data set; classify the filtered
/// subgroups against them with [`ChartReport::with_limits`](super::ChartReport::with_limits).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use spc_limits::spc::{filter_by_date, Subgroup};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let data = vec![
///     Subgroup::new("1", vec![1.0]).with_date(day(1)),
///     Subgroup::new("2", vec![2.0]).with_date(day(2)),
///     Subgroup::new("3", vec![3.0]),
/// ];
/// let kept = filter_by_date(&data, Some(day(2)), None);
/// let ids: Vec<&str> = kept.iter().map(|s| s.subgroup_id.as_str()).collect();
/// assert_eq!(ids, ["2", "3"]);
/// ```
pub fn filter_by_date(
    subgroups: &[Subgroup],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Subgroup> {
    subgroups
        .iter()
        .filter(|sg| match sg.date {
            None => true,
            Some(d) => start.map_or(true, |s| d >= s) && end.map_or(true, |e| d <= e),
        })
        .cloned()
        .collect()
}
