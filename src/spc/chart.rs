//! Core control chart types.
//!
//! Defines the control limit triple, the chart selector, the annotated
//! chart point, and the beyond-limits classification shared by all four
//! charts.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownChartType;

/// Control limits for a chart.
///
/// Represents the upper control limit (UCL), center line (CL), and lower
/// control limit (LCL) computed from the process data.
///
/// # Invariants
///
/// - `lcl <= cl <= ucl` for finite, non-negative chart constants
/// - X-bar and R lower limits are never floored; C and P lower limits are
///   floored at zero and the P upper limit is capped at one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLimits {
    /// Upper control limit.
    pub ucl: f64,
    /// Center line (grand mean, average range, mean count or mean proportion).
    pub cl: f64,
    /// Lower control limit.
    pub lcl: f64,
}

impl ControlLimits {
    /// Whether `value` lies within these limits, boundaries included.
    ///
    /// The negation of [`is_out_of_control`].
    pub fn contains(&self, value: f64) -> bool {
        !is_out_of_control(value, self)
    }
}

/// Returns `true` iff `value > ucl` or `value < lcl`.
///
/// The comparison is strict: a value exactly on a limit is in control.
/// A NaN value compares false both ways and is therefore in control.
///
/// # Examples
///
/// ```
/// use spc_limits::spc::{is_out_of_control, ControlLimits};
///
/// let limits = ControlLimits { ucl: 12.0, cl: 10.0, lcl: 8.0 };
/// assert!(!is_out_of_control(12.0, &limits));
/// assert!(is_out_of_control(12.5, &limits));
/// assert!(is_out_of_control(7.9, &limits));
/// ```
pub fn is_out_of_control(value: f64, limits: &ControlLimits) -> bool {
    value > limits.ucl || value < limits.lcl
}

/// The four supported chart families.
///
/// X-bar and R charts use every measurement of a subgroup. C and P charts
/// treat each subgroup as a single observation and read only its first
/// value.
///
/// Serializes as the short selector name. Deserialization goes through
/// [`FromStr`], so config files accept the same spellings as the command
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ChartType {
    /// Subgroup means.
    #[default]
    XBar,
    /// Subgroup ranges.
    R,
    /// Defect counts per unit.
    C,
    /// Defect proportions per unit.
    P,
}

impl ChartType {
    /// All chart types, in display order.
    pub const ALL: [ChartType; 4] = [ChartType::XBar, ChartType::R, ChartType::C, ChartType::P];

    /// Short selector name (`xbar`, `r`, `c`, `p`).
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::XBar => "xbar",
            ChartType::R => "r",
            ChartType::C => "c",
            ChartType::P => "p",
        }
    }

    /// Human-readable chart title.
    pub fn title(self) -> &'static str {
        match self {
            ChartType::XBar => "X-bar Chart (Mean)",
            ChartType::R => "R Chart (Range)",
            ChartType::C => "C Chart (Count)",
            ChartType::P => "P Chart (Proportion)",
        }
    }

    /// Whether the chart reads the whole subgroup (`true`) or only its first value.
    pub fn uses_full_subgroup(self) -> bool {
        matches!(self, ChartType::XBar | ChartType::R)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = UnknownChartType;

    /// Parses a selector, case-insensitively. `x-bar` and `x_bar` are
    /// accepted as spellings of `xbar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xbar" | "x-bar" | "x_bar" => Ok(ChartType::XBar),
            "r" => Ok(ChartType::R),
            "c" => Ok(ChartType::C),
            "p" => Ok(ChartType::P),
            _ => Err(UnknownChartType(s.to_string())),
        }
    }
}

impl TryFrom<String> for ChartType {
    type Error = UnknownChartType;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A single point on a control chart.
///
/// Each point carries the statistic plotted for one subgroup (its mean,
/// range, count or proportion depending on the chart) and whether it lies
/// beyond the chart's limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// The zero-based index of this point in the sequence.
    pub index: usize,
    /// Identifier of the subgroup the point was computed from.
    pub subgroup_id: String,
    /// The plotted statistic.
    pub value: f64,
    /// Whether the value is beyond UCL or below LCL.
    pub out_of_control: bool,
}
