//! Series Alignment and Diff over a Common Time Grid

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Two series resampled onto a shared time grid
///
/// `None` marks grid points where interpolation could not produce a value
/// (non-finite samples on both sides of the bracket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    /// Common time grid
    pub time: Vec<f64>,
    /// First series on the grid
    pub series_a: Vec<Option<f64>>,
    /// Second series on the grid
    pub series_b: Vec<Option<f64>>,
}

/// Pointwise difference of an aligned pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// `a - b` per grid point
    pub diff: Vec<Option<f64>>,
    /// `(a - b) / b * 100` per grid point, `None` when b is zero
    pub percent_diff: Vec<Option<f64>>,
    /// Largest diff, `None` when every point is `None`
    pub max_diff: Option<f64>,
    /// Smallest diff
    pub min_diff: Option<f64>,
    /// Mean diff
    pub avg_diff: Option<f64>,
}

/// Resample two series onto a common grid by linear interpolation
///
/// Returns `None` when either input is empty, lengths are inconsistent, or
/// the time ranges do not overlap. The grid runs from the later start to
/// the earlier end, stepped at half the smaller mean sample interval so
/// the coarser series is not under-sampled.
pub fn align(
    series_a: &[f64],
    time_a: &[f64],
    series_b: &[f64],
    time_b: &[f64],
) -> Option<AlignedSeries> {
    if series_a.is_empty() || series_b.is_empty() {
        return None;
    }
    if series_a.len() != time_a.len() || series_b.len() != time_b.len() {
        return None;
    }

    let start = time_a[0].max(time_b[0]);
    let end = time_a[time_a.len() - 1].min(time_b[time_b.len() - 1]);
    if !(start < end) {
        return None;
    }

    // Mean interval intentionally divides by count, not count - 1
    let interval_a = (time_a[time_a.len() - 1] - time_a[0]) / time_a.len() as f64;
    let interval_b = (time_b[time_b.len() - 1] - time_b[0]) / time_b.len() as f64;
    let step = interval_a.min(interval_b) / 2.0;
    if !step.is_finite() || step <= 0.0 {
        return None;
    }

    let expected = ((end - start) / step) as usize + 1;
    debug!("aligning onto {} grid points, step {}", expected, step);

    let mut time = Vec::with_capacity(expected);
    let mut out_a = Vec::with_capacity(expected);
    let mut out_b = Vec::with_capacity(expected);

    let mut t = start;
    while t <= end {
        time.push(t);
        out_a.push(sample_at(time_a, series_a, t));
        out_b.push(sample_at(time_b, series_b, t));
        t += step;
    }

    Some(AlignedSeries {
        time,
        series_a: out_a,
        series_b: out_b,
    })
}

/// Interpolate one series at time `t`
///
/// Finds the bracketing sample pair by linear scan: the first pair with
/// `time[i] <= t <= time[i+1]`, or the first pair with `time[i] > t` as a
/// fallback for out-of-order samples. Beyond the last sample the last
/// value is held. A non-finite bracket endpoint falls back to the other
/// endpoint when that one is finite.
fn sample_at(times: &[f64], values: &[f64], t: f64) -> Option<f64> {
    let n = times.len();
    if n == 0 {
        return None;
    }
    if t >= times[n - 1] {
        let last = values[n - 1];
        return last.is_finite().then_some(last);
    }

    for i in 0..n - 1 {
        let (t0, t1) = (times[i], times[i + 1]);
        if (t0 <= t && t <= t1) || t0 > t {
            let (v0, v1) = (values[i], values[i + 1]);
            return match (v0.is_finite(), v1.is_finite()) {
                (true, true) => {
                    let span = t1 - t0;
                    if span <= 0.0 {
                        // Duplicate timestamps: hold the earlier sample
                        Some(v0)
                    } else {
                        Some(v0 + (v1 - v0) * (t - t0) / span)
                    }
                }
                (true, false) => Some(v0),
                (false, true) => Some(v1),
                (false, false) => None,
            };
        }
    }
    None
}

/// Compute pointwise and summary differences of an aligned pair
///
/// Summary statistics run over the non-`None` diffs only; when every grid
/// point is `None` the summaries are `None` and callers must render a
/// "not available" state.
pub fn diff(aligned: &AlignedSeries) -> DiffResult {
    let len = aligned.time.len();
    let mut diff = Vec::with_capacity(len);
    let mut percent_diff = Vec::with_capacity(len);

    for (a, b) in aligned.series_a.iter().zip(&aligned.series_b) {
        match (a, b) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => {
                let d = a - b;
                diff.push(Some(d));
                percent_diff.push(if *b == 0.0 { None } else { Some(d / b * 100.0) });
            }
            _ => {
                diff.push(None);
                percent_diff.push(None);
            }
        }
    }

    let mut max_diff = None;
    let mut min_diff = None;
    let mut sum = 0.0;
    let mut count = 0usize;
    for d in diff.iter().flatten() {
        max_diff = Some(max_diff.map_or(*d, |m: f64| m.max(*d)));
        min_diff = Some(min_diff.map_or(*d, |m: f64| m.min(*d)));
        sum += d;
        count += 1;
    }
    let avg_diff = (count > 0).then(|| sum / count as f64);

    DiffResult {
        diff,
        percent_diff,
        max_diff,
        min_diff,
        avg_diff,
    }
}
