//! Gearshift Detection

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One detected upshift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftEvent {
    /// Sample index of the first sample in the new gear
    pub index: usize,
    /// Gear before the shift
    pub from_gear: i32,
    /// Gear after the shift
    pub to_gear: i32,
    /// Last finite RPM at or before the transition
    pub rpm_before: Option<f64>,
    /// First finite RPM at or after the transition
    pub rpm_after: Option<f64>,
    /// RPM drop across the shift, when both sides are known
    pub rpm_drop: Option<f64>,
}

/// Detect upshifts in a gear channel and report the RPM drop at each
///
/// A shift is a sample whose rounded gear value is above the previous
/// sample's. Downshifts are not reported. Gear channels log as floats with
/// sensor jitter, hence the rounding.
pub fn shift_summary(gear: &[f64], rpm: &[f64]) -> Vec<ShiftEvent> {
    let mut events = Vec::new();

    for i in 1..gear.len() {
        let (g0, g1) = (gear[i - 1], gear[i]);
        if !g0.is_finite() || !g1.is_finite() {
            continue;
        }
        let (from_gear, to_gear) = (g0.round() as i32, g1.round() as i32);
        if to_gear <= from_gear {
            continue;
        }

        let rpm_before = last_finite_at_or_before(rpm, i - 1);
        let rpm_after = first_finite_at_or_after(rpm, i);
        let rpm_drop = match (rpm_before, rpm_after) {
            (Some(before), Some(after)) => Some(before - after),
            _ => None,
        };
        debug!(
            "shift {} -> {} at sample {}, rpm drop {:?}",
            from_gear, to_gear, i, rpm_drop
        );
        events.push(ShiftEvent {
            index: i,
            from_gear,
            to_gear,
            rpm_before,
            rpm_after,
            rpm_drop,
        });
    }
    events
}

fn last_finite_at_or_before(values: &[f64], index: usize) -> Option<f64> {
    values
        .iter()
        .take(index + 1)
        .rev()
        .find(|v| v.is_finite())
        .copied()
}

fn first_finite_at_or_after(values: &[f64], index: usize) -> Option<f64> {
    values.iter().skip(index).find(|v| v.is_finite()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_upshift_with_rpm_drop() {
        let gear = [1.0, 1.0, 1.0, 2.0, 2.0];
        let rpm = [3000.0, 4500.0, 6200.0, 3900.0, 4100.0];
        let events = shift_summary(&gear, &rpm);
        assert_eq!(events.len(), 1);
        let shift = &events[0];
        assert_eq!(shift.index, 3);
        assert_eq!(shift.from_gear, 1);
        assert_eq!(shift.to_gear, 2);
        assert_eq!(shift.rpm_before, Some(6200.0));
        assert_eq!(shift.rpm_after, Some(3900.0));
        assert_eq!(shift.rpm_drop, Some(2300.0));
    }

    #[test]
    fn test_downshifts_are_not_reported() {
        let gear = [3.0, 3.0, 2.0, 2.0];
        let rpm = [3000.0, 3000.0, 4500.0, 4500.0];
        assert!(shift_summary(&gear, &rpm).is_empty());
    }

    #[test]
    fn test_gear_jitter_is_rounded_away() {
        // 1.4 and 1.6 both round toward the gears they represent
        let gear = [1.0, 1.4, 1.6, 2.0, 2.1];
        let rpm = [3000.0, 5000.0, 3500.0, 3600.0, 3700.0];
        let events = shift_summary(&gear, &rpm);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].index, 2);
        assert_eq!(events[0].from_gear, 1);
        assert_eq!(events[0].to_gear, 2);
    }

    #[test]
    fn test_nan_rpm_is_skipped_when_reporting() {
        let gear = [1.0, 1.0, 2.0, 2.0];
        let rpm = [5800.0, f64::NAN, f64::NAN, 3600.0];
        let events = shift_summary(&gear, &rpm);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].rpm_before, Some(5800.0));
        assert_eq!(events[0].rpm_after, Some(3600.0));
        assert_eq!(events[0].rpm_drop, Some(2200.0));
    }

    #[test]
    fn test_nan_gear_samples_break_no_transitions() {
        let gear = [1.0, f64::NAN, 2.0, 2.0];
        let rpm = [3000.0; 4];
        // The NaN gap hides the 1 -> 2 transition entirely
        assert!(shift_summary(&gear, &rpm).is_empty());
    }

    #[test]
    fn test_multi_gear_pull() {
        let gear = [1.0, 2.0, 3.0, 4.0];
        let rpm = [6500.0, 4000.0, 6400.0, 4200.0];
        let events = shift_summary(&gear, &rpm);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].rpm_drop, Some(2500.0));
    }

    #[test]
    fn test_rpm_shorter_than_gear_is_tolerated() {
        let gear = [1.0, 1.0, 2.0];
        let rpm = [3000.0];
        let events = shift_summary(&gear, &rpm);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].rpm_before, Some(3000.0));
        assert_eq!(events[0].rpm_after, None);
        assert_eq!(events[0].rpm_drop, None);
    }
}
