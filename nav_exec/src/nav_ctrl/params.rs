//! Parameters structure for NavCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::GeoPoint;
use serde::Deserialize;

use super::NavCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Navigation control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    // ---- TARGET ----

    /// Latitude of the target waypoint.
    ///
    /// Units: degrees
    pub target_lat_deg: f64,

    /// Longitude of the target waypoint.
    ///
    /// Units: degrees
    pub target_lon_deg: f64,

    // ---- ARRIVAL ----

    /// Range to the target at or below which the robot is considered to have
    /// arrived. The bearing is meaningless at zero range so the motors are
    /// disabled inside this radius.
    ///
    /// Units: meters
    #[serde(default)]
    pub arrival_radius_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// The target waypoint.
    pub fn target(&self) -> GeoPoint {
        GeoPoint::new(self.target_lat_deg, self.target_lon_deg)
    }

    /// Determines if the parameters are valid.
    pub fn validate(&self) -> Result<(), NavCtrlError> {
        if !self.target().is_valid() {
            return Err(NavCtrlError::InvalidParams(format!(
                "target ({}, {}) is not a valid position",
                self.target_lat_deg, self.target_lon_deg
            )));
        }

        if !(self.arrival_radius_m >= 0.0) {
            return Err(NavCtrlError::InvalidParams(format!(
                "arrival radius must be positive, found {}",
                self.arrival_radius_m
            )));
        }

        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            target_lat_deg: 0.0,
            target_lon_deg: 0.0,
            arrival_radius_m: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        let mut params = Params {
            target_lat_deg: 50.364351,
            target_lon_deg: -4.141873,
            arrival_radius_m: 2.0,
        };
        assert!(params.validate().is_ok());

        params.arrival_radius_m = -1.0;
        assert!(params.validate().is_err());

        params.arrival_radius_m = 0.0;
        params.target_lat_deg = 95.0;
        assert!(params.validate().is_err());
    }
}
