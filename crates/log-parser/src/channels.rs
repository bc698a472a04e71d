//! Channel Classification from Header Text
//!
//! Datalogger exports name channels inconsistently across ECU vendors and
//! logger firmware, so channels are recognized with a prioritized table of
//! case-insensitive patterns per role. Adding a role is a table edit, not
//! new scan code.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Semantic role a log column can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelRole {
    /// Canonical time axis
    Time,
    /// Engine speed
    Rpm,
    /// Vehicle speed
    VehicleSpeed,
    /// Currently engaged gear
    GearActual,
    /// Gear requested by the transmission controller
    GearDesired,
    /// Engine speed target
    TargetRpm,
    /// Torque reduction requested by traction/stability control
    TorqueIntervention,
    /// Wheel slip metric
    WheelSlip,
    /// Front wheel speed
    WheelSpeedFront,
    /// Rear wheel speed
    WheelSpeedRear,
    /// Malfunction indicator / DTC flag
    MalfunctionFlag,
}

/// All roles, in the order `ChannelMap::resolve` fills them
const ALL_ROLES: [ChannelRole; 11] = [
    ChannelRole::Time,
    ChannelRole::Rpm,
    ChannelRole::VehicleSpeed,
    ChannelRole::GearActual,
    ChannelRole::GearDesired,
    ChannelRole::TargetRpm,
    ChannelRole::TorqueIntervention,
    ChannelRole::WheelSlip,
    ChannelRole::WheelSpeedFront,
    ChannelRole::WheelSpeedRear,
    ChannelRole::MalfunctionFlag,
];

/// Patterns per role, most specific first
fn role_patterns(role: ChannelRole) -> &'static [&'static str] {
    match role {
        ChannelRole::Time => &[
            r"(?i)^time\s*\(?\s*(s|sec|seconds|ms)?\s*\)?$",
            r"(?i)^time\b",
            r"(?i)timestamp",
            r"(?i)^zeit",
        ],
        ChannelRole::Rpm => &[
            r"(?i)engine\s*speed",
            r"(?i)\brpm\b",
            r"(?i)motordrehzahl",
        ],
        ChannelRole::VehicleSpeed => &[
            r"(?i)vehicle\s*speed.*mph",
            r"(?i)vehicle\s*speed",
            r"(?i)\bspeed\b.*(km/h|kph|mph)",
            r"(?i)geschwindigkeit",
            r"(?i)\bspeed\b",
        ],
        ChannelRole::GearActual => &[
            r"(?i)gear\s*(actual|engaged)",
            r"(?i)(actual|engaged|current)\s*gear",
            r"(?i)^gear$",
            r"(?i)\bgear\b",
        ],
        ChannelRole::GearDesired => &[
            r"(?i)gear\s*(desired|target|requested)",
            r"(?i)(desired|target|requested)\s*gear",
        ],
        ChannelRole::TargetRpm => &[
            r"(?i)(target|desired)\s*(engine\s*speed|rpm)",
            r"(?i)rpm\s*(target|desired)",
        ],
        ChannelRole::TorqueIntervention => &[
            r"(?i)torque\s*(intervention|reduction|request)",
            r"(?i)(asr|tcs|esp)\s*torque",
            r"(?i)torque\s*limit",
        ],
        ChannelRole::WheelSlip => &[
            r"(?i)wheel\s*slip",
            r"(?i)\bslip\b",
        ],
        ChannelRole::WheelSpeedFront => &[
            r"(?i)front\s*(left|right)?\s*wheel\s*speed",
            r"(?i)wheel\s*speed.*front",
            r"(?i)\b(fl|fr)\s*wheel\b",
        ],
        ChannelRole::WheelSpeedRear => &[
            r"(?i)rear\s*(left|right)?\s*wheel\s*speed",
            r"(?i)wheel\s*speed.*rear",
            r"(?i)\b(rl|rr)\s*wheel\b",
        ],
        ChannelRole::MalfunctionFlag => &[
            r"(?i)malfunction",
            r"(?i)\bmil\b",
            r"(?i)\bdtc\b",
            r"(?i)check\s*engine",
            r"(?i)\bfault\b",
        ],
    }
}

static COMPILED: LazyLock<Vec<(ChannelRole, Vec<Regex>)>> = LazyLock::new(|| {
    ALL_ROLES
        .iter()
        .map(|&role| {
            let patterns = role_patterns(role)
                .iter()
                .map(|p| Regex::new(p).expect("static channel pattern"))
                .collect();
            (role, patterns)
        })
        .collect()
});

/// Find the best-matching column for a role
///
/// Patterns are tried in priority order; the first pattern with any match
/// wins, and within it the first matching header by column order.
pub fn find_channel(headers: &[String], role: ChannelRole) -> Option<usize> {
    let patterns = COMPILED
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, p)| p)?;

    for pattern in patterns {
        if let Some(index) = headers.iter().position(|h| pattern.is_match(h)) {
            return Some(index);
        }
    }
    None
}

/// Resolved channel indices for one table
///
/// Each role maps to at most one column. The classifier never assigns one
/// column to several roles on its own; callers may reuse an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap {
    pub time: Option<usize>,
    pub rpm: Option<usize>,
    pub vehicle_speed: Option<usize>,
    pub gear_actual: Option<usize>,
    pub gear_desired: Option<usize>,
    pub target_rpm: Option<usize>,
    pub torque_intervention: Option<usize>,
    pub wheel_slip: Option<usize>,
    pub wheel_speed_front: Option<usize>,
    pub wheel_speed_rear: Option<usize>,
    pub malfunction_flag: Option<usize>,
}

impl ChannelMap {
    /// Classify every role against a header row
    pub fn resolve(headers: &[String]) -> Self {
        Self {
            time: find_channel(headers, ChannelRole::Time),
            rpm: find_channel(headers, ChannelRole::Rpm),
            vehicle_speed: find_channel(headers, ChannelRole::VehicleSpeed),
            gear_actual: find_channel(headers, ChannelRole::GearActual),
            gear_desired: find_channel(headers, ChannelRole::GearDesired),
            target_rpm: find_channel(headers, ChannelRole::TargetRpm),
            torque_intervention: find_channel(headers, ChannelRole::TorqueIntervention),
            wheel_slip: find_channel(headers, ChannelRole::WheelSlip),
            wheel_speed_front: find_channel(headers, ChannelRole::WheelSpeedFront),
            wheel_speed_rear: find_channel(headers, ChannelRole::WheelSpeedRear),
            malfunction_flag: find_channel(headers, ChannelRole::MalfunctionFlag),
        }
    }

    /// Index resolved for a role
    pub fn index(&self, role: ChannelRole) -> Option<usize> {
        match role {
            ChannelRole::Time => self.time,
            ChannelRole::Rpm => self.rpm,
            ChannelRole::VehicleSpeed => self.vehicle_speed,
            ChannelRole::GearActual => self.gear_actual,
            ChannelRole::GearDesired => self.gear_desired,
            ChannelRole::TargetRpm => self.target_rpm,
            ChannelRole::TorqueIntervention => self.torque_intervention,
            ChannelRole::WheelSlip => self.wheel_slip,
            ChannelRole::WheelSpeedFront => self.wheel_speed_front,
            ChannelRole::WheelSpeedRear => self.wheel_speed_rear,
            ChannelRole::MalfunctionFlag => self.malfunction_flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_time_channel_priority() {
        let h = headers(&["Timestamp", "Time (s)", "RPM"]);
        // Exact "Time (s)" pattern outranks the generic timestamp pattern
        assert_eq!(find_channel(&h, ChannelRole::Time), Some(1));
    }

    #[test]
    fn test_specific_speed_beats_generic() {
        let h = headers(&["Wheel speed FL", "Vehicle Speed (mph)", "Speed"]);
        assert_eq!(find_channel(&h, ChannelRole::VehicleSpeed), Some(1));
    }

    #[test]
    fn test_first_column_wins_within_pattern() {
        let h = headers(&["Engine Speed", "Engine Speed (target)"]);
        assert_eq!(find_channel(&h, ChannelRole::Rpm), Some(0));
    }

    #[test]
    fn test_unmatched_role_is_none() {
        let h = headers(&["Time", "RPM"]);
        assert_eq!(find_channel(&h, ChannelRole::WheelSlip), None);
    }

    #[test]
    fn test_resolve_full_map() {
        let h = headers(&[
            "Time (s)",
            "Engine Speed",
            "Vehicle Speed (km/h)",
            "Gear Actual",
            "Gear Desired",
            "Torque Reduction",
            "Wheel Slip",
        ]);
        let map = ChannelMap::resolve(&h);
        assert_eq!(map.time, Some(0));
        assert_eq!(map.rpm, Some(1));
        assert_eq!(map.vehicle_speed, Some(2));
        assert_eq!(map.gear_actual, Some(3));
        assert_eq!(map.gear_desired, Some(4));
        assert_eq!(map.torque_intervention, Some(5));
        assert_eq!(map.wheel_slip, Some(6));
        assert_eq!(map.malfunction_flag, None);
    }

    #[test]
    fn test_case_insensitive() {
        let h = headers(&["TIME", "engine SPEED"]);
        assert_eq!(find_channel(&h, ChannelRole::Time), Some(0));
        assert_eq!(find_channel(&h, ChannelRole::Rpm), Some(1));
    }
}
