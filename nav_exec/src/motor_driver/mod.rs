//! # Motor Driver
//!
//! Executes [`MotorDems`] on the drive motors. The real driver toggles the
//! H-bridge lines of a Raspberry Pi, the simulated one only logs and records
//! what it was asked to do. Which one is used is picked by the `[motors]`
//! section of the executable parameters.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

#[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))]
mod gpio;
mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{MotorDems, SideDems};
use log::info;
use serde::Deserialize;

#[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))]
pub use gpio::GpioMotorDriver;
pub use sim::SimMotorDriver;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Something which can drive the two drive motors.
pub trait MotorDriver {
    /// Apply the demands to both motors.
    fn drive(&mut self, dems: &MotorDems) -> Result<(), MotorError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// BCM pin numbers of one side of the H-bridge.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HBridgePins {
    pub dir1: u8,
    pub dir2: u8,

    /// Enable line, driven with software PWM
    pub enable: u8,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MotorError {
    #[error("Could not dispatch the motor demands: {0}")]
    DispatchFailed(String),

    #[error("Could not initialise the motor driver: {0}")]
    InitFailed(String),
}

/// One side of the drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MotorSide {
    Left,
    Right,
}

/// Parameters selecting and configuring the motor driver.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotorParams {
    Gpio {
        #[serde(default = "default_left_pins")]
        left: HBridgePins,

        #[serde(default = "default_right_pins")]
        right: HBridgePins,

        /// Units: Hz
        #[serde(default = "default_pwm_frequency_hz")]
        pwm_frequency_hz: f64,
    },

    Sim,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open the motor driver described by the parameters.
pub fn open(params: &MotorParams) -> Result<Box<dyn MotorDriver>, MotorError> {
    match params {
        #[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))]
        MotorParams::Gpio {
            left,
            right,
            pwm_frequency_hz,
        } => {
            info!(
                "Opening GPIO motor driver, left {:?}, right {:?}, PWM at {} Hz",
                left, right, pwm_frequency_hz
            );
            Ok(Box::new(GpioMotorDriver::new(*left, *right, *pwm_frequency_hz)?))
        }
        #[cfg(not(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64"))))]
        MotorParams::Gpio { .. } => Err(MotorError::InitFailed(
            "GPIO motors are only available on a Raspberry Pi".into(),
        )),
        MotorParams::Sim => {
            info!("Using simulated motors");
            Ok(Box::new(SimMotorDriver::new()))
        }
    }
}

/// Apply the demands to the left side and then the right.
///
/// The right side is applied even if the left one fails, so a failed disable
/// never leaves one motor running. The first error is returned.
#[cfg_attr(
    not(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64"))),
    allow(dead_code)
)]
pub(crate) fn drive_sides<F>(dems: &MotorDems, mut apply: F) -> Result<(), MotorError>
where
    F: FnMut(MotorSide, &SideDems) -> Result<(), MotorError>,
{
    let left = apply(MotorSide::Left, &dems.left);
    let right = apply(MotorSide::Right, &dems.right);

    left.and(right)
}

fn default_left_pins() -> HBridgePins {
    HBridgePins {
        dir1: 17,
        dir2: 27,
        enable: 22,
    }
}

fn default_right_pins() -> HBridgePins {
    HBridgePins {
        dir1: 2,
        dir2: 3,
        enable: 4,
    }
}

fn default_pwm_frequency_hz() -> f64 {
    100.0
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
