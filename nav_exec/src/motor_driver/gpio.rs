//! Raspberry Pi GPIO motor driver
//!
//! Each motor sits behind one side of an H-bridge with two direction lines
//! and an enable line. Speed is set by software PWM on the enable line.
//!
//! | Direction | Dir1 | Dir2 | Enable    |
//! |-----------|------|------|-----------|
//! | Forward   | Low  | High | PWM       |
//! | Reverse   | High | Low  | PWM       |
//! | Off       | Low  | Low  | PWM clear |

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{MotorDems, MotorDirection, SideDems};
use log::trace;
use rppal::gpio::{Gpio, OutputPin};
use util::maths::{clamp, lin_map};

use super::{drive_sides, HBridgePins, MotorDriver, MotorError, MotorSide};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct GpioMotorDriver {
    left: Side,
    right: Side,
    pwm_frequency_hz: f64,
}

struct Side {
    dir1: OutputPin,
    dir2: OutputPin,
    enable: OutputPin,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl GpioMotorDriver {
    pub fn new(
        left: HBridgePins,
        right: HBridgePins,
        pwm_frequency_hz: f64,
    ) -> Result<Self, MotorError> {
        let gpio = Gpio::new().map_err(|e| MotorError::InitFailed(e.to_string()))?;

        let mut driver = Self {
            left: Side::new(&gpio, left)?,
            right: Side::new(&gpio, right)?,
            pwm_frequency_hz,
        };

        // Start with both motors off
        driver.drive(&MotorDems {
            left: SideDems::off(0.0),
            right: SideDems::off(0.0),
        })?;

        Ok(driver)
    }
}

impl MotorDriver for GpioMotorDriver {
    fn drive(&mut self, dems: &MotorDems) -> Result<(), MotorError> {
        trace!("GPIO motors: {:?}", dems);

        let pwm_frequency_hz = self.pwm_frequency_hz;
        let (left, right) = (&mut self.left, &mut self.right);

        drive_sides(dems, |side, d| match side {
            MotorSide::Left => left.apply(d, pwm_frequency_hz),
            MotorSide::Right => right.apply(d, pwm_frequency_hz),
        })
    }
}

impl Side {
    fn new(gpio: &Gpio, pins: HBridgePins) -> Result<Self, MotorError> {
        let get = |pin: u8| {
            gpio.get(pin)
                .map(|p| p.into_output_low())
                .map_err(|e| MotorError::InitFailed(format!("pin {}: {}", pin, e)))
        };

        Ok(Self {
            dir1: get(pins.dir1)?,
            dir2: get(pins.dir2)?,
            enable: get(pins.enable)?,
        })
    }

    fn apply(&mut self, dems: &SideDems, pwm_frequency_hz: f64) -> Result<(), MotorError> {
        match dems.direction {
            MotorDirection::Forward => {
                self.dir1.set_low();
                self.dir2.set_high();
            }
            MotorDirection::Reverse => {
                self.dir1.set_high();
                self.dir2.set_low();
            }
            MotorDirection::Off => {
                self.dir1.set_low();
                self.dir2.set_low();
                self.enable
                    .clear_pwm()
                    .map_err(|e| MotorError::DispatchFailed(e.to_string()))?;
                self.enable.set_low();
                return Ok(());
            }
        }

        let duty = clamp(lin_map((0.0, 100.0), (0.0, 1.0), dems.duty_pct), 0.0, 1.0);

        self.enable
            .set_pwm_frequency(pwm_frequency_hz, duty)
            .map_err(|e| MotorError::DispatchFailed(e.to_string()))
    }
}
