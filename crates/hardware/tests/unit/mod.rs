//! # Unit Components
//!
//! Organizes unit tests by library module: common types, configuration, component
//! assembly, and the simulation boundary.



/// Unit tests for the simulation boundary.
///
/// Covers workload lookup, exit event formatting, and the dry-run runtime.
pub mod sim;

/// Unit tests for component assembly.
///
/// This module organizes tests for kinds, parameter sets, override resolution,
/// descriptors, topology construction, and the assembly driver.
pub mod soc;
