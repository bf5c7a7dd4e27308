//! Component assembly tests.
//!
//! Tests follow the dependency order of the assembly layers, leaf-first.

/// Assembly driver tests (end-to-end assembly from overrides).
pub mod builder;

/// Descriptor creation and symmetric connection tests.
pub mod descriptor;
