//! # GPS Equipment Interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A point on the globe.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude, positive north.
    ///
    /// Units: degrees
    pub lat_deg: f64,

    /// Longitude, positive east.
    ///
    /// Units: degrees
    pub lon_deg: f64,
}

/// One reading of the robot's position and heading from the GPS receiver.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Current position of the robot
    pub position: GeoPoint,

    /// Compass heading of the robot, clockwise from north.
    ///
    /// Units: degrees, in the range [0, 360)
    pub heading_deg: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Position fix state as reported by the receiver.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixState {
    /// No valid fix, position data should not be trusted
    NoFix,

    /// Valid position fix
    Fix,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat_deg.to_radians()
    }

    /// Longitude in radians.
    pub fn lon_rad(&self) -> f64 {
        self.lon_deg.to_radians()
    }

    /// True if both coordinates are finite and within their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat_deg.is_finite()
            && self.lon_deg.is_finite()
            && self.lat_deg.abs() <= 90.0
            && self.lon_deg.abs() <= 180.0
    }
}

impl PositionSample {
    pub fn new(lat_deg: f64, lon_deg: f64, heading_deg: f64) -> Self {
        Self {
            position: GeoPoint::new(lat_deg, lon_deg),
            heading_deg,
        }
    }
}

impl Default for FixState {
    fn default() -> Self {
        FixState::NoFix
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_geo_point_validity() {
        assert!(GeoPoint::new(50.364351, -4.141873).is_valid());
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.1).is_valid());
        assert!(!GeoPoint::new(std::f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_geo_point_radians() {
        let p = GeoPoint::new(180.0, -90.0);
        assert!((p.lat_rad() - std::f64::consts::PI).abs() < 1e-12);
        assert!((p.lon_rad() + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
