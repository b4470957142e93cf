//! Bearing and range calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::GeoPoint;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Mean radius of the Earth.
///
/// Units: meters
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the bearing from `current` to `target`.
///
/// Uses the two point initial bearing formula, with the result shifted by
/// +180 degrees into the range (0, 360].
///
/// When both points are the same the bearing is undefined. A finite value is
/// still returned, callers must check the range to the target before relying
/// on it.
///
/// Units: degrees
pub fn calc_bearing(current: &GeoPoint, target: &GeoPoint) -> f64 {
    let lat = current.lat_rad();
    let t_lat = target.lat_rad();
    let d_lon = target.lon_rad() - current.lon_rad();

    let x = t_lat.cos() * d_lon.sin();
    let y = lat.cos() * t_lat.sin() - lat.sin() * t_lat.cos() * d_lon.cos();

    x.atan2(y).to_degrees() + 180.0
}

/// Calculate the great circle distance between `current` and `target` using
/// the haversine formula.
///
/// Units: meters
pub fn calc_range_m(current: &GeoPoint, target: &GeoPoint) -> f64 {
    let lat = current.lat_rad();
    let t_lat = target.lat_rad();
    let d_lat = t_lat - lat;
    let d_lon = target.lon_rad() - current.lon_rad();

    let a = (d_lat / 2.0).sin().powi(2) + lat.cos() * t_lat.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_MEAN_RADIUS_M * a.sqrt().min(1.0).asin()
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const TARGET: GeoPoint = GeoPoint {
        lat_deg: 50.364351,
        lon_deg: -4.141873,
    };

    #[test]
    fn test_bearing_cardinal() {
        // Target due north gives an atan2 of 0, shifted to 180
        let south = GeoPoint::new(TARGET.lat_deg - 0.001, TARGET.lon_deg);
        assert!((calc_bearing(&south, &TARGET) - 180.0).abs() < 1e-6);

        // Target due south gives an atan2 of 180, shifted to 360
        let north = GeoPoint::new(TARGET.lat_deg + 0.001, TARGET.lon_deg);
        assert!((calc_bearing(&north, &TARGET) - 360.0).abs() < 1e-6);

        // Target (roughly) due east gives 90, shifted to 270
        let west = GeoPoint::new(TARGET.lat_deg, TARGET.lon_deg - 0.001);
        assert!((calc_bearing(&west, &TARGET) - 270.0).abs() < 0.01);

        // Target (roughly) due west gives -90, shifted to 90
        let east = GeoPoint::new(TARGET.lat_deg, TARGET.lon_deg + 0.001);
        assert!((calc_bearing(&east, &TARGET) - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_bearing_at_target_is_finite() {
        let b = calc_bearing(&TARGET, &TARGET);
        assert!(b.is_finite());
        assert!(b > 0.0 && b <= 360.0);

        let origin = GeoPoint::new(0.0, 0.0);
        assert!(calc_bearing(&origin, &origin).is_finite());
    }

    #[test]
    fn test_range() {
        assert_eq!(calc_range_m(&TARGET, &TARGET), 0.0);

        // One thousandth of a degree of latitude is about 111 m
        let south = GeoPoint::new(TARGET.lat_deg - 0.001, TARGET.lon_deg);
        let r = calc_range_m(&south, &TARGET);
        assert!((r - 111.19).abs() < 0.1, "range was {}", r);

        // Symmetric
        assert!((calc_range_m(&TARGET, &south) - r).abs() < 1e-9);
    }
}
