//! Speed Units and Physical Constants

use serde::{Deserialize, Serialize};

/// km/h to m/s
pub const KMH_TO_MPS: f64 = 1.0 / 3.6;

/// mph to m/s
pub const MPH_TO_MPS: f64 = 0.44704;

/// Standard gravity in m/s²
pub const G_MPS2: f64 = 9.81;

/// Floor for sample spacing when differentiating, guards duplicate timestamps
pub const EPSILON_DT: f64 = 1e-6;

/// Unit of a vehicle-speed channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    Kmh,
    Mph,
}

impl SpeedUnit {
    /// Detect the unit from header text; km/h when no hint is present
    pub fn from_header(header: &str) -> Self {
        if header.to_lowercase().contains("mph") {
            SpeedUnit::Mph
        } else {
            SpeedUnit::Kmh
        }
    }

    /// Conversion factor to m/s
    pub fn to_mps(self) -> f64 {
        match self {
            SpeedUnit::Kmh => KMH_TO_MPS,
            SpeedUnit::Mph => MPH_TO_MPS,
        }
    }
}
