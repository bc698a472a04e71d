//! Traction Control and Wheel Speed Summaries

use serde::{Deserialize, Serialize};

/// Thresholds for the traction summaries
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Wheel slip at or above this counts as a slip event
    pub slip_threshold: f64,
    /// Torque reduction above this counts as an intervention sample
    pub torque_active_threshold: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            slip_threshold: 5.0,
            torque_active_threshold: 0.0,
        }
    }
}

/// Counts of traction/stability intervention activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionSummary {
    /// Samples with an active torque reduction
    pub torque_events: usize,
    /// Samples at or above the slip threshold
    pub slip_events: usize,
    /// Largest slip value seen
    pub max_slip: Option<f64>,
    /// Samples scanned across the available channels
    pub samples: usize,
}

impl ProtectionSummary {
    /// One-line report for display
    pub fn describe(&self) -> String {
        match self.max_slip {
            Some(max_slip) => format!(
                "{} torque intervention samples, {} slip events (max slip {:.1})",
                self.torque_events, self.slip_events, max_slip
            ),
            None => format!(
                "{} torque intervention samples, no slip data",
                self.torque_events
            ),
        }
    }
}

/// Largest front/rear wheel-speed split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSpeedSummary {
    /// Largest absolute front/rear delta
    pub max_delta: f64,
    /// Sample index of the largest delta
    pub max_delta_index: usize,
    /// Mean absolute delta over comparable samples
    pub mean_abs_delta: f64,
    /// Number of samples where both wheels were finite
    pub samples: usize,
}

impl WheelSpeedSummary {
    /// One-line report for display
    pub fn describe(&self) -> String {
        format!(
            "max front/rear wheel speed delta {:.1} at sample {} (mean {:.2})",
            self.max_delta, self.max_delta_index, self.mean_abs_delta
        )
    }
}

/// Scan torque-intervention and wheel-slip channels for protection events
///
/// Either channel may be absent from a log; the counts for a missing
/// channel stay zero.
pub fn protection_summary(
    torque_intervention: Option<&[f64]>,
    wheel_slip: Option<&[f64]>,
    config: &MetricsConfig,
) -> ProtectionSummary {
    let mut torque_events = 0usize;
    let mut slip_events = 0usize;
    let mut max_slip: Option<f64> = None;
    let mut samples = 0usize;

    if let Some(torque) = torque_intervention {
        samples = samples.max(torque.len());
        torque_events = torque
            .iter()
            .filter(|&&v| v.is_finite() && v > config.torque_active_threshold)
            .count();
    }

    if let Some(slip) = wheel_slip {
        samples = samples.max(slip.len());
        for &v in slip.iter().filter(|v| v.is_finite()) {
            if v >= config.slip_threshold {
                slip_events += 1;
            }
            max_slip = Some(max_slip.map_or(v, |m: f64| m.max(v)));
        }
    }

    ProtectionSummary {
        torque_events,
        slip_events,
        max_slip,
        samples,
    }
}

/// Largest front/rear wheel-speed delta over pairwise-finite samples
///
/// `None` when the channels never overlap with finite values.
pub fn wheel_speed_summary(front: &[f64], rear: &[f64]) -> Option<WheelSpeedSummary> {
    let mut max_delta = 0.0;
    let mut max_delta_index = 0usize;
    let mut sum = 0.0;
    let mut samples = 0usize;

    for (i, (&f, &r)) in front.iter().zip(rear).enumerate() {
        if !f.is_finite() || !r.is_finite() {
            continue;
        }
        let delta = (f - r).abs();
        if delta > max_delta {
            max_delta = delta;
            max_delta_index = i;
        }
        sum += delta;
        samples += 1;
    }

    (samples > 0).then(|| WheelSpeedSummary {
        max_delta,
        max_delta_index,
        mean_abs_delta: sum / samples as f64,
        samples,
    })
}
