//! Descriptive Statistics over One Channel

use crate::error::RangeQueryError;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over the finite values of one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    /// Number of finite samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Upper median: element n/2 of the sorted samples, not averaged
    pub median: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Population standard deviation (divide by n)
    pub std_dev: f64,
    /// Nearest-rank 10th percentile
    pub p10: f64,
    /// Nearest-rank 90th percentile
    pub p90: f64,
}

/// Compute statistics over the finite values of a channel
///
/// Returns `None` when no finite values exist. The upper-median tie-break
/// and nearest-rank percentiles are kept as-is for parity with existing
/// log reports.
pub fn basic_stats(values: &[f64]) -> Option<BasicStats> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    finite.sort_by(f64::total_cmp);
    let n = finite.len();
    let mean = finite.iter().sum::<f64>() / n as f64;
    let variance = finite.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;

    let rank = |fraction: f64| -> f64 {
        let idx = ((n as f64 * fraction) as usize).min(n - 1);
        finite[idx]
    };

    Some(BasicStats {
        count: n,
        mean,
        median: finite[n / 2],
        min: finite[0],
        max: finite[n - 1],
        std_dev: variance.sqrt(),
        p10: rank(0.1),
        p90: rank(0.9),
    })
}

/// Result of an inclusive range query over a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCount {
    /// Samples inside `[min, max]`
    pub count: usize,
    /// Share of all samples, 0-100
    pub percent: f64,
}

/// Count samples inside an inclusive `[min, max]` range
///
/// Runs over all samples; non-finite values never satisfy the bounds.
/// Percent is relative to the full sample count.
pub fn count_in_range(values: &[f64], min: f64, max: f64) -> Result<RangeCount, RangeQueryError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(RangeQueryError::NonFiniteBound);
    }
    if min >= max {
        return Err(RangeQueryError::EmptyRange { min, max });
    }

    let count = values.iter().filter(|&&v| v >= min && v <= max).count();
    let percent = if values.is_empty() {
        0.0
    } else {
        count as f64 * 100.0 / values.len() as f64
    };

    Ok(RangeCount { count, percent })
}
