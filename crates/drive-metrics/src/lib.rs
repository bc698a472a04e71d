//! Derived Drive Metrics
//!
//! Domain calculations over parsed datalog channels: time-to-speed and
//! peak acceleration, gearshift detection with RPM drop, and
//! traction/wheel-speed summaries. Every function here is pure and
//! stateless; results are recomputed per invocation and "not available"
//! outcomes are `None`.

mod launch;
mod shifts;
mod traction;
mod units;

pub use launch::{launch_metrics, peak_acceleration, time_to_speed, LaunchMetrics};
pub use shifts::{shift_summary, ShiftEvent};
pub use traction::{
    protection_summary, wheel_speed_summary, MetricsConfig, ProtectionSummary, WheelSpeedSummary,
};
pub use units::{SpeedUnit, EPSILON_DT, G_MPS2, KMH_TO_MPS, MPH_TO_MPS};
