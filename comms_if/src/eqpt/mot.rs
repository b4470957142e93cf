//! # Drive Motor Equipment Interface
//!
//! The robot is a two motor differential drive. Each side is driven through an H-bridge with two
//! direction lines and a PWM enable line, so a demand for one side is a direction plus a duty
//! cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Duty cycles used for each drive state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DriveIntensities {
    /// Duty cycle of a motor driving at full speed.
    ///
    /// Units: percent
    pub full_speed_pct: f64,

    /// Duty cycle of the inside motor during a smooth turn.
    ///
    /// Units: percent
    pub turn_speed_pct: f64,

    /// Duty cycle of a stopped motor.
    ///
    /// Units: percent
    pub stop_speed_pct: f64,
}

/// Demand for a single motor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SideDems {
    pub direction: MotorDirection,

    /// Units: percent, between 0 and 100
    pub duty_pct: f64,
}

/// Demands for both drive motors.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MotorDems {
    pub left: SideDems,
    pub right: SideDems,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Discrete steering command produced by navigation control each cycle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SteeringCommand {
    /// Both motors forward at full speed
    Forward,

    /// Left motor at full speed, right motor at turn speed
    SmoothLeft,

    /// Left motor forward, right motor reverse, both at full speed
    HardLeft,

    /// Left motor reverse, right motor forward, both at full speed
    HardRight,

    /// Left motor at turn speed, right motor at full speed
    SmoothRight,

    /// Both motors off
    Disabled,
}

/// Rotation direction of a motor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorDirection {
    /// Clockwise, driving the robot forwards
    Forward,

    /// Anticlockwise, driving the robot backwards
    Reverse,

    /// Bridge off, motor coasting
    Off,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SteeringCommand {
    /// How far this command deviates from driving straight ahead.
    ///
    /// `Forward` is 0, smooth turns 1, hard turns 2 and `Disabled` 3.
    pub fn severity(&self) -> u8 {
        match self {
            SteeringCommand::Forward => 0,
            SteeringCommand::SmoothLeft | SteeringCommand::SmoothRight => 1,
            SteeringCommand::HardLeft | SteeringCommand::HardRight => 2,
            SteeringCommand::Disabled => 3,
        }
    }

    /// Human readable name, as printed in the console log.
    pub fn name(&self) -> &'static str {
        match self {
            SteeringCommand::Forward => "Forwards",
            SteeringCommand::SmoothLeft => "Smooth Left",
            SteeringCommand::HardLeft => "Hard Left",
            SteeringCommand::HardRight => "Hard Right",
            SteeringCommand::SmoothRight => "Smooth Right",
            SteeringCommand::Disabled => "Disabled",
        }
    }
}

impl Default for SteeringCommand {
    fn default() -> Self {
        SteeringCommand::Disabled
    }
}

impl Default for DriveIntensities {
    fn default() -> Self {
        Self {
            full_speed_pct: 100.0,
            turn_speed_pct: 80.0,
            stop_speed_pct: 0.0,
        }
    }
}

impl SideDems {
    pub fn forward(duty_pct: f64) -> Self {
        Self {
            direction: MotorDirection::Forward,
            duty_pct,
        }
    }

    pub fn reverse(duty_pct: f64) -> Self {
        Self {
            direction: MotorDirection::Reverse,
            duty_pct,
        }
    }

    pub fn off(duty_pct: f64) -> Self {
        Self {
            direction: MotorDirection::Off,
            duty_pct,
        }
    }
}

impl MotorDems {
    /// Build the motor demands that execute the given steering command.
    pub fn from_cmd(cmd: SteeringCommand, intensities: &DriveIntensities) -> Self {
        let full = intensities.full_speed_pct;
        let turn = intensities.turn_speed_pct;
        let stop = intensities.stop_speed_pct;

        let (left, right) = match cmd {
            SteeringCommand::Forward => (SideDems::forward(full), SideDems::forward(full)),
            SteeringCommand::SmoothLeft => (SideDems::forward(full), SideDems::forward(turn)),
            SteeringCommand::HardLeft => (SideDems::forward(full), SideDems::reverse(full)),
            SteeringCommand::HardRight => (SideDems::reverse(full), SideDems::forward(full)),
            SteeringCommand::SmoothRight => (SideDems::forward(turn), SideDems::forward(full)),
            SteeringCommand::Disabled => (SideDems::off(stop), SideDems::off(stop)),
        };

        Self { left, right }
    }

    /// Demands which stop both motors.
    pub fn disabled(intensities: &DriveIntensities) -> Self {
        Self::from_cmd(SteeringCommand::Disabled, intensities)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
