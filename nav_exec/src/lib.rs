//! # Navigation library.
//!
//! This library allows the executable, tests and benchmarks to access items defined inside the
//! navigation crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Control loop - runs navigation at a fixed rate until stopped
pub mod ctrl_loop;

/// GPS client - provides position samples from a receiver or a recorded trace
pub mod gps_client;

/// Motor driver - executes steering commands on the drive motors
pub mod motor_driver;

/// Navigation control module - converts the robot's position into a steering command
pub mod nav_ctrl;

/// Executable parameters
pub mod params;

/// Position log - CSV record of every position navigated from
pub mod pos_log;
