//! Heading error calculation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::wrap_angle_deg;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the angular error between the robot's heading and the bearing to
/// the target, `bearing - heading`, wrapped into the range [0, 360).
///
/// Non-finite inputs give a NaN error, which classifies as `Disabled`.
///
/// Units: degrees
pub fn calc_heading_error(heading_deg: f64, bearing_deg: f64) -> f64 {
    wrap_angle_deg(bearing_deg - heading_deg)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading_error() {
        assert_eq!(calc_heading_error(0.0, 0.0), 0.0);
        assert_eq!(calc_heading_error(90.0, 45.0), 315.0);
        assert_eq!(calc_heading_error(10.0, 360.0), 350.0);
        assert_eq!(calc_heading_error(0.0, 360.0), 0.0);
        assert_eq!(calc_heading_error(359.0, 1.0), 2.0);
    }

    #[test]
    fn test_negative_difference_is_wrapped() {
        // Raw subtraction gives -340
        let err = calc_heading_error(350.0, 10.0);
        assert_eq!(err, 20.0);
        assert!(err >= 0.0 && err < 360.0);
    }

    #[test]
    fn test_non_finite() {
        assert!(calc_heading_error(std::f64::NAN, 10.0).is_nan());
        assert!(calc_heading_error(0.0, std::f64::INFINITY).is_nan());
    }
}
