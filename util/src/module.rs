//! Processing module interface
//!
//! A processing module is initialised once from a parameter file and then
//! called every control cycle with that cycle's inputs. Navigation control is
//! one, and new cyclic algorithms should follow the same shape so the
//! executable's main loop treats them uniformly.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::session::Session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// The state held by a processing module between cycles.
pub trait State {
    /// What `init` needs, usually the parameter file path
    type InitData;
    type InitError;

    /// Inputs for one cycle
    type InputData;

    /// Result of one cycle, consumed by the next stage of the loop
    type OutputData;

    /// Diagnostic values from one cycle, for logging and tests
    type StatusReport;

    type ProcError;

    /// Set the module up, replacing any previous state.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Run one cycle.
    ///
    /// A cycle which returns an error produces no output, the caller decides
    /// what to drive instead.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
