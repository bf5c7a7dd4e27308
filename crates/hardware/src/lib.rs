//! Memory-system assembly library.
//!
//! This crate assembles the component graph of a cycle-level memory-system simulation:
//! 1. **Parameters:** Typed per-kind defaults (sizes, cycle counts, counts) with checked overrides.
//! 2. **Overrides:** An explicit schema of command-line options, parsed into typed values.
//! 3. **Components:** Descriptors for CPU, L1I/L1D/L2 caches, buses, and the memory controller.
//! 4. **Topology:** Declared connection plans, applied port by port and validated for completeness.
//! 5. **Simulation:** Workload lookup and the boundary to the external simulation runtime.

/// Common types (errors, byte sizes and units).
pub mod common;
/// System-level configuration (clock, memory mode, CPU model, DRAM interface, topology).
pub mod config;
/// Workload lookup and the simulation runtime boundary.
pub mod sim;
/// Component kinds, parameters, overrides, descriptors, topology, and the assembly driver.
pub mod soc;

/// Crate-wide error type and result alias.
pub use crate::common::{AssemblyError, Result};
/// Root configuration type; use `SystemConfig::default()` or load it from JSON.
pub use crate::config::SystemConfig;
/// Top-level entry point; turns command-line overrides into a connected `SystemGraph`.
pub use crate::soc::{Assembly, AssemblyDriver};
