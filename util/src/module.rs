//! Cyclic module interface
//!
//! Every cyclic module in `cdpr_exec` implements `State`. A module is built
//! empty (usually through `Default`), made usable by `init`, and then driven
//! once per cycle through `proc`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// The module's internal state.
pub trait State {
    /// Data required during initialisation, usually a parameter file path.
    type InitData;
    type InitError;

    type InputData;
    type OutputData;

    /// Advisory flags raised during processing which do not stop the output
    /// being produced.
    type StatusReport;
    type ProcError;

    /// Initialise the module, setting up any archives inside the session.
    ///
    /// A module whose `init` fails must report `false` from `is_valid` until
    /// it is successfully initialised again.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Process one cycle, returning the output and the status report.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;

    /// Returns true if the module can be processed.
    fn is_valid(&self) -> bool;
}
