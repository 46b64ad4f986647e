//! Descriptive helpers shared by every chart formula.
//!
//! Both helpers are unchecked: they do not validate their input and let
//! NaN flow through to the result. An empty slice yields NaN. Callers that
//! need validated statistics must check `values` themselves.

/// Arithmetic mean of `values`.
///
/// Returns NaN for an empty slice (`0 / 0`) and propagates NaN or infinite
/// entries.
///
/// # Examples
///
/// ```
/// use spc_limits::stats::mean;
///
/// assert!((mean(&[10.0, 12.0, 11.0]) - 11.0).abs() < 1e-12);
/// assert!(mean(&[]).is_nan());
/// ```
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Range (`max - min`) of `values`.
///
/// Returns NaN for an empty slice or when any entry is NaN.
///
/// # Examples
///
/// ```
/// use spc_limits::stats::range;
///
/// assert!((range(&[1.0, 5.0, 3.0]) - 4.0).abs() < f64::EPSILON);
/// assert_eq!(range(&[7.5]), 0.0);
/// ```
pub fn range(values: &[f64]) -> f64 {
    let Some((&first, rest)) = values.split_first() else {
        return f64::NAN;
    };
    let (mut lo, mut hi) = (first, first);
    for &v in rest {
        if v.is_nan() {
            return f64::NAN;
        }
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    hi - lo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < 1e-15);
        assert!((mean(&[11.0, 10.0, 13.0]) - 34.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_mean_propagates_nan() {
        assert!(mean(&[1.0, f64::NAN, 3.0]).is_nan());
    }

    #[test]
    fn test_range_basic() {
        assert!((range(&[10.0, 12.0, 11.0]) - 2.0).abs() < f64::EPSILON);
        assert!((range(&[-3.0, 4.0]) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_range_single_value_is_zero() {
        assert_eq!(range(&[42.0]), 0.0);
    }

    #[test]
    fn test_range_empty_is_nan() {
        assert!(range(&[]).is_nan());
    }

    #[test]
    fn test_range_propagates_nan() {
        assert!(range(&[1.0, f64::NAN, 3.0]).is_nan());
        assert!(range(&[f64::NAN, 1.0]).is_nan());
    }
}
