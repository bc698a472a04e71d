//! Launch Performance: Time-to-Speed and Peak Acceleration

use crate::units::{SpeedUnit, EPSILON_DT, G_MPS2};
use serde::{Deserialize, Serialize};

/// Launch metrics over one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchMetrics {
    /// Seconds from the start speed to the end speed
    pub time_to_speed_s: Option<f64>,
    /// Highest positive acceleration in g
    pub peak_g: Option<f64>,
    /// Unit the speed channel was read in
    pub unit: SpeedUnit,
}

/// Compute both launch metrics for a speed channel
///
/// Thresholds are in the channel's own unit; callers scale them using
/// [`SpeedUnit`] detected from the header.
pub fn launch_metrics(
    speed: &[f64],
    time: &[f64],
    unit: SpeedUnit,
    v_start: f64,
    v_end: f64,
) -> LaunchMetrics {
    LaunchMetrics {
        time_to_speed_s: time_to_speed(speed, time, v_start, v_end),
        peak_g: peak_acceleration(speed, time, unit),
        unit,
    }
}

/// Seconds between the interpolated crossings of two speed thresholds
///
/// Scans forward for the first sample at or above `v_start`, interpolating
/// the crossing time against the previous sample where possible, then
/// repeats for `v_end` from that point on. `None` when either threshold is
/// never reached.
pub fn time_to_speed(speed: &[f64], time: &[f64], v_start: f64, v_end: f64) -> Option<f64> {
    if speed.len() != time.len() {
        return None;
    }
    let (t_start, start_index) = crossing_time(speed, time, v_start, 0)?;
    let (t_end, _) = crossing_time(speed, time, v_end, start_index)?;
    Some(t_end - t_start)
}

/// Interpolated time of the first crossing of `target` at or after `from`
fn crossing_time(speed: &[f64], time: &[f64], target: f64, from: usize) -> Option<(f64, usize)> {
    for i in from..speed.len() {
        let v = speed[i];
        if !v.is_finite() || !time[i].is_finite() {
            continue;
        }
        if v >= target {
            let (prev_v, prev_t) = if i > 0 { (speed[i - 1], time[i - 1]) } else { (f64::NAN, f64::NAN) };
            let t = if prev_v.is_finite() && prev_t.is_finite() && prev_v < target && v > prev_v {
                let fraction = (target - prev_v) / (v - prev_v);
                prev_t + (time[i] - prev_t) * fraction
            } else {
                time[i]
            };
            return Some((t, i));
        }
    }
    None
}

/// Highest positive acceleration over consecutive samples, in g
///
/// Deceleration is ignored: only the maximum positive value survives, so a
/// braking-only trace reports 0 g rather than a negative peak. `None` when
/// no consecutive finite pair exists.
pub fn peak_acceleration(speed: &[f64], time: &[f64], unit: SpeedUnit) -> Option<f64> {
    if speed.len() != time.len() {
        return None;
    }
    let factor = unit.to_mps();
    let mut peak: Option<f64> = None;

    for i in 1..speed.len() {
        let (v0, v1) = (speed[i - 1], speed[i]);
        let (t0, t1) = (time[i - 1], time[i]);
        if !(v0.is_finite() && v1.is_finite() && t0.is_finite() && t1.is_finite()) {
            continue;
        }
        let accel = (v1 - v0) * factor / (t1 - t0).max(EPSILON_DT);
        let g = accel / G_MPS2;
        let best = peak.get_or_insert(0.0);
        if g > *best {
            *best = g;
        }
    }
    peak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::KMH_TO_MPS;

    /// Constant ramp 0..80 over 10 s, one sample per second
    fn ramp() -> (Vec<f64>, Vec<f64>) {
        let time: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        let speed: Vec<f64> = time.iter().map(|t| t * 8.0).collect();
        (speed, time)
    }

    #[test]
    fn test_time_to_sixty_on_constant_ramp() {
        let (speed, time) = ramp();
        let result = time_to_speed(&speed, &time, 0.0, 60.0).unwrap();
        // 0 to 60 on a linear 0..80/10s ramp crosses at 7.5 s
        assert!((result - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_start_interpolates_both_ends() {
        let (speed, time) = ramp();
        // 20 crossed at 2.5 s, 60 at 7.5 s
        let result = time_to_speed(&speed, &time, 20.0, 60.0).unwrap();
        assert!((result - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_unreached_threshold_is_absent() {
        let (speed, time) = ramp();
        assert!(time_to_speed(&speed, &time, 0.0, 100.0).is_none());
        assert!(time_to_speed(&speed, &time, 90.0, 100.0).is_none());
    }

    #[test]
    fn test_peak_acceleration_constant_ramp_kmh() {
        let (speed, time) = ramp();
        // 8 km/h per second = 2.222 m/s² = 0.2265 g
        let g = peak_acceleration(&speed, &time, SpeedUnit::Kmh).unwrap();
        assert!((g - 8.0 * KMH_TO_MPS / G_MPS2).abs() < 1e-9);
    }

    #[test]
    fn test_deceleration_is_ignored() {
        let time: Vec<f64> = (0..5).map(|i| i as f64).collect();
        let speed = vec![100.0, 80.0, 60.0, 40.0, 20.0];
        let g = peak_acceleration(&speed, &time, SpeedUnit::Kmh).unwrap();
        assert_eq!(g, 0.0);
    }

    #[test]
    fn test_nan_pairs_are_skipped() {
        let time = vec![0.0, 1.0, 2.0, 3.0];
        let speed = vec![0.0, f64::NAN, 50.0, 55.0];
        // Only the (50, 55) pair is usable
        let g = peak_acceleration(&speed, &time, SpeedUnit::Kmh).unwrap();
        assert!((g - 5.0 * KMH_TO_MPS / G_MPS2).abs() < 1e-9);
    }

    #[test]
    fn test_too_short_trace_is_absent() {
        assert!(peak_acceleration(&[50.0], &[0.0], SpeedUnit::Kmh).is_none());
        assert!(peak_acceleration(&[], &[], SpeedUnit::Mph).is_none());
    }

    #[test]
    fn test_launch_metrics_bundle() {
        let (speed, time) = ramp();
        let metrics = launch_metrics(&speed, &time, SpeedUnit::Mph, 0.0, 60.0);
        assert!((metrics.time_to_speed_s.unwrap() - 7.5).abs() < 1e-9);
        assert!(metrics.peak_g.unwrap() > 0.0);
        assert_eq!(metrics.unit, SpeedUnit::Mph);
    }

    proptest::proptest! {
        #[test]
        fn prop_peak_acceleration_never_negative(
            speed in proptest::collection::vec(0.0f64..300.0, 2..60),
        ) {
            let time: Vec<f64> = (0..speed.len()).map(|i| i as f64 * 0.1).collect();
            let g = peak_acceleration(&speed, &time, SpeedUnit::Kmh).unwrap();
            proptest::prop_assert!(g >= 0.0);
        }

        #[test]
        fn prop_time_to_speed_never_negative(
            speed in proptest::collection::vec(0.0f64..300.0, 2..60),
            v_start in 0.0f64..150.0,
            v_end in 150.0f64..300.0,
        ) {
            let time: Vec<f64> = (0..speed.len()).map(|i| i as f64 * 0.1).collect();
            if let Some(seconds) = time_to_speed(&speed, &time, v_start, v_end) {
                proptest::prop_assert!(seconds >= 0.0);
            }
        }
    }
}
