//! # Equipment Interface
//!
//! This module defines the interface structures which are passed between the navigation executable
//! and the equipment clients/drivers.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod gps;
pub mod mot;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use gps::*;
pub use mot::*;
