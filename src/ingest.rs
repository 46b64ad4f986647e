//! Subgroup ingestion from CSV.
//!
//! Expected layout: one header row, then one subgroup per row with the
//! subgroup id in the first column and its measurements in the remaining
//! columns. Rows may have different lengths.
//!
//! ```text
//! subgroup,m1,m2,m3
//! 1,10,12,11
//! 2,9,11,10
//! ```
//!
//! A column headed `date` (any case, not the first column) holds ISO
//! `YYYY-MM-DD` collection dates instead of measurements:
//!
//! ```text
//! subgroup,date,m1,m2
//! 1,2024-03-01,10,12
//! ```
//!
//! Ingestion is lenient: cells that do not parse as finite numbers are
//! dropped, and rows left with no measurements are skipped with a warning.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::spc::Subgroup;

/// Tags stamped onto every ingested subgroup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionTags {
    /// What is being produced (e.g. a part or line name).
    pub variable: Option<String>,
    /// Which characteristic is measured.
    pub parameter: Option<String>,
}

/// Parse subgroups from CSV text.
///
/// Each subgroup's `production_number` is its id and `variable` and
/// `parameter` come from `tags`. A row's date is read from the `date`
/// column when the header has one and the cell parses; otherwise `date`
/// is used.
///
/// # Errors
///
/// [`IngestError::MissingHeader`] if `text` has no non-blank first line.
///
/// # Examples
///
/// ```
/// use spc_limits::ingest::{parse_subgroups_csv, ProductionTags};
///
/// let csv = "id,a,b\n1,4,5\n2,x,7\n3,,\n";
/// let subgroups = parse_subgroups_csv(csv, &ProductionTags::default(), None).unwrap();
/// assert_eq!(subgroups.len(), 2);
/// assert_eq!(subgroups[1].values, vec![7.0]);
/// ```
pub fn parse_subgroups_csv(
    text: &str,
    tags: &ProductionTags,
    date: Option<NaiveDate>,
) -> Result<Vec<Subgroup>, IngestError> {
    let mut lines = text.lines();
    let date_column = match lines.next() {
        Some(header) if !header.trim().is_empty() => header
            .split(',')
            .skip(1)
            .position(|cell| cell.trim().eq_ignore_ascii_case("date"))
            .map(|i| i + 1),
        _ => return Err(IngestError::MissingHeader),
    };

    let mut subgroups = Vec::new();
    for (line_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut cells = line.split(',');
        let subgroup_id = cells.next().unwrap_or_default().trim().to_string();
        let mut row_date = date;
        let mut values = Vec::new();
        for (i, cell) in cells.enumerate() {
            if Some(i + 1) == date_column {
                match cell.trim().parse::<NaiveDate>() {
                    Ok(d) => row_date = Some(d),
                    Err(_) if cell.trim().is_empty() => {}
                    Err(_) => {
                        warn!(line = line_no + 2, value = cell.trim(), "unparseable date, ignored");
                    }
                }
                continue;
            }
            if let Ok(v) = cell.trim().parse::<f64>() {
                if v.is_finite() {
                    values.push(v);
                }
            }
        }

        if values.is_empty() {
            // +2: one for the header, one for 1-based numbering
            warn!(line = line_no + 2, subgroup = %subgroup_id, "row has no numeric values, skipped");
            continue;
        }

        subgroups.push(Subgroup {
            production_number: Some(subgroup_id.clone()),
            subgroup_id,
            values,
            date: row_date,
            variable: tags.variable.clone(),
            parameter: tags.parameter.clone(),
        });
    }

    debug!(subgroups = subgroups.len(), "parsed CSV subgroups");
    Ok(subgroups)
}

/// Read and parse a CSV file of subgroups.
///
/// # Errors
///
/// [`IngestError::Io`] if the file cannot be read, otherwise as
/// [`parse_subgroups_csv`].
pub fn read_subgroups_csv(
    path: &Path,
    tags: &ProductionTags,
    date: Option<NaiveDate>,
) -> Result<Vec<Subgroup>, IngestError> {
    let text = std::fs::read_to_string(path)?;
    parse_subgroups_csv(&text, tags, date)
}
