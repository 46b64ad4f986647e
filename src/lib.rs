//! # spc-limits
//!
//! Statistical process control (SPC) limits for production-line subgroup
//! measurements.
//!
//! Given a batch of subgroups, the crate computes the upper control limit,
//! center line and lower control limit of an X-bar, R, C or P chart, and
//! flags the points that fall beyond them.
//!
//! ## Modules
//!
//! - [`spc`] — Limit formulas, chart types, point classification, reports
//! - [`stats`] — Unchecked mean and range helpers
//! - [`ingest`] — Subgroups from CSV
//! - [`config`] — Layered chart configuration (`spc.toml`, `SPC_*`, CLI)
//! - [`error`] — Error types for parsing, configuration and ingestion
//!
//! ## Design Philosophy
//!
//! - **Pure core**: limit computation takes an immutable snapshot of
//!   subgroups and constants, reads no global state and never fails;
//!   "no data" and unknown chart selectors yield `None`
//! - **Unchecked numerics**: malformed measurements propagate as NaN;
//!   validation belongs to whoever collects the data
//!
//! ## Example
//!
//! ```
//! use spc_limits::spc::{compute_limits, is_out_of_control, ChartConstants, ChartType, Subgroup};
//!
//! let data = vec![Subgroup::new("1", vec![4.0]), Subgroup::new("2", vec![6.0]), Subgroup::new("3", vec![5.0])];
//! let limits = compute_limits(&data, ChartType::C, &ChartConstants::default(), 0).unwrap();
//! assert_eq!(limits.cl, 5.0);
//! assert!(is_out_of_control(12.0, &limits));
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod spc;
pub mod stats;
