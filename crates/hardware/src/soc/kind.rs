//! Component kinds and port tables.
//!
//! The hardware components that can be assembled form a closed set. Instead of a class
//! hierarchy, each kind carries a fixed port table; connection behavior is a lookup keyed
//! by kind and port name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named connection point on a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PortSpec {
    /// Port name (e.g., `"cpu_side"`).
    pub name: &'static str,
    /// Whether topology validation requires this port to be connected.
    pub required: bool,
}

impl PortSpec {
    const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

const CPU_PORTS: &[PortSpec] = &[
    PortSpec::required("icache_port"),
    PortSpec::required("dcache_port"),
];

const CACHE_PORTS: &[PortSpec] = &[
    PortSpec::required("cpu_side"),
    PortSpec::required("mem_side"),
];

const MEM_CTRL_PORTS: &[PortSpec] = &[PortSpec::required("port")];

// The second CPU-side slot stays optional so a bus behind an L2 needs only one upstream.
const BUS_PORTS: &[PortSpec] = &[
    PortSpec::required("cpu_side_0"),
    PortSpec::optional("cpu_side_1"),
    PortSpec::required("mem_side"),
];

/// Hardware component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Processor core exposing instruction and data cache ports.
    Cpu,
    /// First-level instruction cache.
    L1InstructionCache,
    /// First-level data cache.
    L1DataCache,
    /// Unified second-level cache.
    L2Cache,
    /// DRAM memory controller.
    MemoryController,
    /// Crossbar between caches and memory.
    Bus,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Cpu,
        Self::L1InstructionCache,
        Self::L1DataCache,
        Self::L2Cache,
        Self::MemoryController,
        Self::Bus,
    ];

    /// Stable display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cpu => "Cpu",
            Self::L1InstructionCache => "L1InstructionCache",
            Self::L1DataCache => "L1DataCache",
            Self::L2Cache => "L2Cache",
            Self::MemoryController => "MemoryController",
            Self::Bus => "Bus",
        }
    }

    /// Port table for this kind, in declaration order.
    pub const fn ports(self) -> &'static [PortSpec] {
        match self {
            Self::Cpu => CPU_PORTS,
            Self::L1InstructionCache | Self::L1DataCache | Self::L2Cache => CACHE_PORTS,
            Self::MemoryController => MEM_CTRL_PORTS,
            Self::Bus => BUS_PORTS,
        }
    }

    /// Looks up a port by name.
    pub fn port(self, name: &str) -> Option<&'static PortSpec> {
        self.ports().iter().find(|p| p.name == name)
    }

    /// Names of the ports that must be connected.
    pub fn required_ports(self) -> impl Iterator<Item = &'static str> {
        self.ports().iter().filter(|p| p.required).map(|p| p.name)
    }

    /// Returns `true` for the three cache kinds.
    pub const fn is_cache(self) -> bool {
        matches!(
            self,
            Self::L1InstructionCache | Self::L1DataCache | Self::L2Cache
        )
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
