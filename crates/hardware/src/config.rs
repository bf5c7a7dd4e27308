//! System-level configuration.
//!
//! This module defines the settings that sit above individual components. It provides:
//! 1. **Defaults:** Baseline clock, memory mode, CPU model, and DRAM interface.
//! 2. **Enums:** CPU model, memory access mode, and DRAM interface types.
//! 3. **Loading:** JSON deserialization with per-field defaults, or `SystemConfig::default()`.
//!
//! Per-component parameters (cache sizes, latencies) live in [`crate::soc::params`] and are
//! overridden from the command line, not from this file.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{AssemblyError, Result};
use crate::soc::topology::ConnectionPlan;

/// Default configuration constants.
mod defaults {
    /// System clock frequency (1 GHz).
    pub const CLOCK_HZ: u64 = 1_000_000_000;

    /// Simulator ticks per second (1 tick = 1 ps).
    pub const TICKS_PER_SECOND: u64 = 1_000_000_000_000;
}

/// CPU timing models offered by the simulation runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CpuModel {
    /// In-order pipelined core.
    #[default]
    Minor,
    /// Single-cycle core with timing memory accesses.
    TimingSimple,
    /// Out-of-order core.
    O3,
}

impl CpuModel {
    /// Runtime class name for this model.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Minor => "RiscvMinorCPU",
            Self::TimingSimple => "RiscvTimingSimpleCPU",
            Self::O3 => "RiscvO3CPU",
        }
    }
}

impl fmt::Display for CpuModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for CpuModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "minor" => Ok(Self::Minor),
            "timing-simple" | "timingsimple" | "timing" => Ok(Self::TimingSimple),
            "o3" => Ok(Self::O3),
            _ => Err(format!(
                "unknown CPU model `{s}` (expected minor, timing-simple or o3)"
            )),
        }
    }
}

/// How the memory system is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemMode {
    /// Detailed timing accesses.
    #[default]
    Timing,
    /// Atomic accesses with approximate latency.
    Atomic,
}

/// DRAM device timing presets for the memory controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DramInterface {
    /// DDR3-1600, x8 devices, 8 per rank.
    #[default]
    #[serde(rename = "DDR3_1600_8x8")]
    Ddr3_1600_8x8,
    /// DDR4-2400, x8 devices, 8 per rank.
    #[serde(rename = "DDR4_2400_8x8")]
    Ddr4_2400_8x8,
}

impl fmt::Display for DramInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ddr3_1600_8x8 => "DDR3_1600_8x8",
            Self::Ddr4_2400_8x8 => "DDR4_2400_8x8",
        })
    }
}

/// Root configuration for one simulation run.
///
/// # Examples
///
/// ```
/// use memsys_core::config::{CpuModel, DramInterface, SystemConfig};
///
/// let config = SystemConfig::default();
/// assert_eq!(config.clock_hz, 1_000_000_000);
/// assert_eq!(config.cpu_model, CpuModel::Minor);
///
/// let config = SystemConfig::from_json_str(r#"{ "cpu_model": "O3", "two_level": true }"#).unwrap();
/// assert_eq!(config.cpu_model, CpuModel::O3);
/// assert_eq!(config.dram, DramInterface::Ddr3_1600_8x8);
/// assert!(config.two_level);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// System clock frequency in Hz
    #[serde(default = "SystemConfig::default_clock_hz")]
    pub clock_hz: u64,

    /// Memory access mode
    #[serde(default)]
    pub mem_mode: MemMode,

    /// CPU timing model
    #[serde(default)]
    pub cpu_model: CpuModel,

    /// DRAM interface behind the memory controller
    #[serde(default)]
    pub dram: DramInterface,

    /// Insert an L2 cache and a second bus between the L1 caches and memory
    #[serde(default)]
    pub two_level: bool,
}

impl SystemConfig {
    /// Returns the default clock frequency.
    const fn default_clock_hz() -> u64 {
        defaults::CLOCK_HZ
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// `Config` if the JSON is malformed, has unknown fields, or has a zero clock.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AssemblyError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// `Config` if the file cannot be read or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| AssemblyError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Rejects settings no runtime can honor.
    ///
    /// # Errors
    ///
    /// `Config` if the clock frequency is zero.
    pub fn validate(&self) -> Result<()> {
        if self.clock_hz == 0 {
            return Err(AssemblyError::Config("clock_hz must be non-zero".into()));
        }
        Ok(())
    }

    /// Clock period in simulator ticks, or zero for an unset clock.
    pub fn clock_period_ticks(&self) -> u64 {
        defaults::TICKS_PER_SECOND
            .checked_div(self.clock_hz)
            .unwrap_or(0)
    }

    /// Connection plan matching the configured hierarchy.
    pub fn plan(&self) -> ConnectionPlan {
        if self.two_level {
            ConnectionPlan::two_level()
        } else {
            ConnectionPlan::classic()
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            clock_hz: defaults::CLOCK_HZ,
            mem_mode: MemMode::Timing,
            cpu_model: CpuModel::Minor,
            dram: DramInterface::Ddr3_1600_8x8,
            two_level: false,
        }
    }
}
