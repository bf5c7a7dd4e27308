//! Common utilities and types shared by the assembly layers.
//!
//! 1. **Error Handling:** The single error type raised during assembly and hand-off.
//! 2. **Sizes:** Byte counts with binary unit suffixes (`KiB`, `MiB`, `GiB`).

/// Error types raised during parameter resolution, wiring, and hand-off.
pub mod error;

/// Byte sizes and their unit table.
pub mod size;

pub use error::{AssemblyError, Result};
pub use size::{ByteSize, SizeParseError, SizeUnit};
