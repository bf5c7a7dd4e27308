//! Simulation boundary tests.


/// Runtime hand-off and exit event tests.
pub mod simulator;
