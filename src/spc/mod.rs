//! Statistical Process Control (SPC) charts.
//!
//! Computes control limits for subgroup data and classifies points that
//! fall beyond them.
//!
//! # Variables Charts
//!
//! - [`xbar_limits`] — X-bar chart of subgroup means (A2 factor)
//! - [`r_limits`] — R chart of subgroup ranges (D3, D4 factors)
//!
//! # Attributes Charts
//!
//! - [`c_limits`] — C chart of defect counts, LCL floored at zero
//! - [`p_limits`] — P chart of defect proportions, limits clamped to `[0, 1]`
//!
//! # Entry Points
//!
//! - [`compute_limits`] — dispatch on [`ChartType`]
//! - [`is_out_of_control`] — strict beyond-limits test
//! - [`ChartReport`] — limits plus classified points
//! - [`filter_by_date`] — date window for trend views
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

mod attributes;
mod chart;
mod constants;
mod engine;
mod report;
mod subgroup;
mod variables;

pub use attributes::{c_limits, p_limits, DEFAULT_P_SAMPLE_SIZE};
pub use chart::{is_out_of_control, ChartPoint, ChartType, ControlLimits};
pub use constants::{ChartConstants, DEFAULT_SUBGROUP_SIZE, MAX_SUBGROUP_SIZE, MIN_SUBGROUP_SIZE};
pub use engine::{compute_limits, compute_limits_by_name};
pub use report::ChartReport;
pub use subgroup::{filter_by_date, plotted_value, Subgroup};
pub use variables::{r_limits, xbar_limits};
