//! Largest-Triangle-Three-Buckets Downsampling
//!
//! Reduces a large (x, y) series to a visually equivalent smaller one for
//! plotting. Within each bucket the point forming the largest triangle
//! with the previously kept point and the next bucket's average is kept,
//! which preserves extrema and inflections that naive striding loses.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A series reduced for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownsampledSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl DownsampledSeries {
    fn from_points(points: &[(f64, f64)]) -> Self {
        Self {
            x: points.iter().map(|p| p.0).collect(),
            y: points.iter().map(|p| p.1).collect(),
        }
    }
}

/// Downsample an (x, y) series to at most `threshold` points
///
/// Pass-through when the lengths mismatch, the input already fits the
/// threshold, or the threshold is too small to bucket (≤ 2). Points with a
/// non-finite x or y are discarded before bucketing, so bucket boundaries
/// are computed over the cleaned, re-indexed series. The first and last
/// cleaned points are always kept exactly.
pub fn downsample(xs: &[f64], ys: &[f64], threshold: usize) -> DownsampledSeries {
    if xs.len() != ys.len() || threshold <= 2 || xs.len() <= threshold {
        return DownsampledSeries {
            x: xs.to_vec(),
            y: ys.to_vec(),
        };
    }

    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    let n = points.len();
    if n <= threshold {
        return DownsampledSeries::from_points(&points);
    }

    debug!("downsampling {} points to {}", n, threshold);

    // Fractional bucket size over the interior points; boundaries are
    // floored independently per bucket
    let every = (n - 2) as f64 / (threshold - 2) as f64;

    let mut kept = Vec::with_capacity(threshold);
    kept.push(points[0]);
    let mut anchor = 0usize;

    for bucket in 0..threshold - 2 {
        let range_start = (bucket as f64 * every) as usize + 1;
        let range_end = (((bucket + 1) as f64) * every) as usize + 1;
        let range_end = range_end.min(n - 1);
        if range_start >= range_end {
            continue;
        }

        // Look-ahead average over the next bucket
        let avg_start = range_end;
        let avg_end = ((((bucket + 2) as f64) * every) as usize + 1).min(n);
        let (avg_x, avg_y) = if avg_start < avg_end {
            let span = &points[avg_start..avg_end];
            let inv = 1.0 / span.len() as f64;
            (
                span.iter().map(|p| p.0).sum::<f64>() * inv,
                span.iter().map(|p| p.1).sum::<f64>() * inv,
            )
        } else {
            points[n - 1]
        };

        let (ax, ay) = points[anchor];
        let mut best = range_start;
        let mut best_area = -1.0;
        for (offset, &(px, py)) in points[range_start..range_end].iter().enumerate() {
            // Shoelace cross-product magnitude
            let area = ((ax - avg_x) * (py - ay) - (ax - px) * (avg_y - ay)).abs() * 0.5;
            if area > best_area {
                best_area = area;
                best = range_start + offset;
            }
        }

        kept.push(points[best]);
        anchor = best;
    }

    kept.push(points[n - 1]);
    DownsampledSeries::from_points(&kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| (x * 0.1).sin() * 100.0).collect();
        (xs, ys)
    }

    #[test]
    fn test_small_input_passes_through() {
        let (xs, ys) = ramp(10);
        let out = downsample(&xs, &ys, 10);
        assert_eq!(out.x, xs);
        assert_eq!(out.y, ys);
    }

    #[test]
    fn test_tiny_threshold_passes_through() {
        let (xs, ys) = ramp(100);
        let out = downsample(&xs, &ys, 2);
        assert_eq!(out.x.len(), 100);
    }

    #[test]
    fn test_mismatched_lengths_pass_through() {
        let out = downsample(&[1.0, 2.0], &[1.0], 5);
        assert_eq!(out.x, vec![1.0, 2.0]);
        assert_eq!(out.y, vec![1.0]);
    }

    #[test]
    fn test_output_respects_threshold_and_endpoints() {
        let (xs, ys) = ramp(5000);
        let out = downsample(&xs, &ys, 200);
        assert!(out.x.len() <= 200);
        assert_eq!(out.x[0], xs[0]);
        assert_eq!(out.y[0], ys[0]);
        assert_eq!(*out.x.last().unwrap(), *xs.last().unwrap());
        assert_eq!(*out.y.last().unwrap(), *ys.last().unwrap());
    }

    #[test]
    fn test_non_finite_points_are_discarded() {
        let mut xs: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let mut ys: Vec<f64> = xs.iter().map(|x| x * 2.0).collect();
        xs[0] = f64::NAN;
        ys[999] = f64::INFINITY;
        ys[500] = f64::NAN;

        let out = downsample(&xs, &ys, 100);
        assert!(out.x.iter().all(|v| v.is_finite()));
        assert!(out.y.iter().all(|v| v.is_finite()));
        // First and last cleaned points, not the original corrupt ones
        assert_eq!(out.x[0], 1.0);
        assert_eq!(*out.x.last().unwrap(), 998.0);
    }

    #[test]
    fn test_peaks_survive_downsampling() {
        // A flat series with one tall spike: LTTB must keep the spike
        let xs: Vec<f64> = (0..2000).map(|i| i as f64).collect();
        let mut ys = vec![1.0; 2000];
        ys[777] = 500.0;

        let out = downsample(&xs, &ys, 50);
        assert!(out.y.iter().any(|&y| y == 500.0));
    }

    #[test]
    fn test_output_x_remains_sorted_for_sorted_input() {
        let (xs, ys) = ramp(3000);
        let out = downsample(&xs, &ys, 120);
        assert!(out.x.windows(2).all(|w| w[0] < w[1]));
    }

    proptest! {
        #[test]
        fn prop_length_bounded_by_threshold(
            n in 10usize..600,
            threshold in 3usize..300,
        ) {
            let (xs, ys) = ramp(n);
            let out = downsample(&xs, &ys, threshold);
            if n <= threshold {
                prop_assert_eq!(out.x.len(), n);
            } else {
                prop_assert!(out.x.len() <= threshold);
                prop_assert_eq!(out.x[0], xs[0]);
                prop_assert_eq!(*out.x.last().unwrap(), *xs.last().unwrap());
            }
        }
    }
}
