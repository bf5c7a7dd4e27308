//! Workload lookup and the simulation runtime boundary.
//!
//! Provides utilities for locating the executable a run will execute and for handing a
//! finished assembly to a simulation runtime.

/// Workload executable lookup.
pub mod loader;
/// Runtime trait, exit events, and the run wrapper.
pub mod simulator;

pub use loader::Workload;
pub use simulator::{DryRunRuntime, ExitEvent, SimulationRuntime, Simulator};
