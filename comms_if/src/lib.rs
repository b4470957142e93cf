//! # Communications interface crate.
//!
//! Provides all common equipment interfaces for the navigation software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data and demand definitions for equipment (GPS receiver and drive motors)
pub mod eqpt;
