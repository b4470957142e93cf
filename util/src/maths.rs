//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Limit a value to the range `[min, max]`.
///
/// NaN values are passed through unchanged.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`. Use [`wrap_angle_deg`] when the upper bound
/// must be excluded.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

/// Wrap an angle in degrees into the half-open range `[0, 360)`.
///
/// Non-finite values produce NaN.
pub fn wrap_angle_deg<T>(angle_deg: T) -> T
where
    T: Float,
{
    let full_turn = T::from(360.0).unwrap_or_else(T::nan);

    let wrapped = rem_euclid(angle_deg, full_turn);

    // Round-off in rem_euclid can land exactly on the excluded upper bound
    if wrapped >= full_turn {
        T::zero()
    } else {
        wrapped
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 100f64), (0f64, 1f64), 80f64), 0.8);
        assert_eq!(lin_map((0f64, 100f64), (1f64, -1f64), 50f64), 0.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(120f64, 0f64, 100f64), 100f64);
        assert_eq!(clamp(-3f64, 0f64, 100f64), 0f64);
        assert_eq!(clamp(42f64, 0f64, 100f64), 42f64);
        assert!(clamp(std::f64::NAN, 0f64, 100f64).is_nan());
    }

    #[test]
    fn test_wrap_angle_deg() {
        assert_eq!(wrap_angle_deg(0f64), 0f64);
        assert_eq!(wrap_angle_deg(360f64), 0f64);
        assert_eq!(wrap_angle_deg(-340f64), 20f64);
        assert_eq!(wrap_angle_deg(725f64), 5f64);
        assert_eq!(wrap_angle_deg(-1e-20f64), 0f64);
        assert!(wrap_angle_deg(std::f64::NAN).is_nan());
        assert!(wrap_angle_deg(std::f64::INFINITY).is_nan());
    }
}
