//! Steering classification
//!
//! Maps the heading error onto a steering command:
//!
//! | error (degrees)        | command     |
//! |------------------------|-------------|
//! | [0, 10) and [350, 360) | Forward     |
//! | [10, 90)               | SmoothLeft  |
//! | [90, 180)              | HardLeft    |
//! | [180, 270)             | HardRight   |
//! | [270, 350)             | SmoothRight |
//! | anything else          | Disabled    |
//!
//! Boundaries belong to the bucket above them.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::SteeringCommand;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Half width of the straight ahead deadband.
///
/// Units: degrees
pub const DEADBAND_DEG: f64 = 10.0;

/// Upper limits of each bucket, in ascending order. The final `Forward`
/// bucket closes the deadband from the top.
///
/// Units: degrees
const BUCKETS: [(f64, SteeringCommand); 6] = [
    (DEADBAND_DEG, SteeringCommand::Forward),
    (90.0, SteeringCommand::SmoothLeft),
    (180.0, SteeringCommand::HardLeft),
    (270.0, SteeringCommand::HardRight),
    (360.0 - DEADBAND_DEG, SteeringCommand::SmoothRight),
    (360.0, SteeringCommand::Forward),
];

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Classify a heading error into a steering command.
///
/// Total over all `f64` values: NaN and anything outside [0, 360) gives
/// `Disabled`.
pub fn classify(error_deg: f64) -> SteeringCommand {
    // Also rejects NaN, which fails every comparison
    if !(error_deg >= 0.0) {
        return SteeringCommand::Disabled;
    }

    BUCKETS
        .iter()
        .find(|(upper, _)| error_deg < *upper)
        .map(|(_, cmd)| *cmd)
        .unwrap_or(SteeringCommand::Disabled)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
