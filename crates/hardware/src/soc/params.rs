//! Typed parameter sets.
//!
//! Each component kind declares a fixed table of parameters, each with a semantic type and
//! a default. A `ParameterSet` starts from that table and only accepts replacements that
//! name a declared parameter and match its type.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::common::{AssemblyError, ByteSize, Result};
use crate::soc::kind::ComponentKind;

/// Default parameter values for each component kind.
mod defaults {
    use crate::common::ByteSize;

    /// L1 instruction cache capacity.
    pub const L1I_SIZE: ByteSize = ByteSize::kib(16);

    /// L1 data cache capacity.
    pub const L1D_SIZE: ByteSize = ByteSize::kib(64);

    /// L1 associativity (direct-mapped).
    pub const L1_ASSOC: u64 = 1;

    /// L1 tag lookup latency in cycles.
    pub const L1_TAG_LATENCY: u64 = 3;

    /// L1 data array latency in cycles.
    pub const L1_DATA_LATENCY: u64 = 3;

    /// L1 response latency in cycles.
    pub const L1_RESPONSE_LATENCY: u64 = 2;

    /// Outstanding misses an L1 can track.
    pub const L1_MSHRS: u64 = 4;

    /// Requests that can coalesce onto one L1 MSHR.
    pub const L1_TGTS_PER_MSHR: u64 = 20;

    /// L2 capacity.
    pub const L2_SIZE: ByteSize = ByteSize::kib(256);

    /// L2 associativity.
    pub const L2_ASSOC: u64 = 8;

    /// L2 tag, data, and response latency in cycles.
    pub const L2_LATENCY: u64 = 20;

    /// Outstanding misses the L2 can track.
    pub const L2_MSHRS: u64 = 20;

    /// Requests that can coalesce onto one L2 MSHR.
    pub const L2_TGTS_PER_MSHR: u64 = 12;

    /// Address range served by the memory controller.
    pub const MEM_RANGE: ByteSize = ByteSize::mib(512);

    /// Crossbar data path width in bytes.
    pub const BUS_WIDTH: u64 = 16;

    /// Crossbar frontend latency in cycles.
    pub const BUS_FRONTEND_LATENCY: u64 = 3;

    /// Crossbar forward latency in cycles.
    pub const BUS_FORWARD_LATENCY: u64 = 4;

    /// Crossbar response latency in cycles.
    pub const BUS_RESPONSE_LATENCY: u64 = 2;
}

/// Semantic type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// A byte count, written with a unit suffix.
    Size,
    /// A latency in clock cycles.
    Cycles,
    /// A plain count (associativity, MSHRs, widths).
    Count,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Size => "size",
            Self::Cycles => "cycles",
            Self::Count => "count",
        })
    }
}

/// A parameter value tagged with its semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamValue {
    /// Byte count.
    Size(ByteSize),
    /// Cycle count.
    Cycles(u64),
    /// Plain count.
    Count(u64),
}

impl ParamValue {
    /// Semantic type of this value.
    pub const fn param_type(self) -> ParamType {
        match self {
            Self::Size(_) => ParamType::Size,
            Self::Cycles(_) => ParamType::Cycles,
            Self::Count(_) => ParamType::Count,
        }
    }

    /// The byte count, if this is a size.
    pub const fn as_size(self) -> Option<ByteSize> {
        match self {
            Self::Size(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is a cycle count or a plain count.
    pub const fn as_integer(self) -> Option<u64> {
        match self {
            Self::Cycles(n) | Self::Count(n) => Some(n),
            Self::Size(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(s) => write!(f, "{s}"),
            Self::Cycles(n) => write!(f, "{n} cycles"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

/// One declared parameter and its default.
#[derive(Debug, Clone, Copy)]
struct ParamDecl {
    name: &'static str,
    default: ParamValue,
}

const fn size(name: &'static str, v: ByteSize) -> ParamDecl {
    ParamDecl {
        name,
        default: ParamValue::Size(v),
    }
}

const fn cycles(name: &'static str, v: u64) -> ParamDecl {
    ParamDecl {
        name,
        default: ParamValue::Cycles(v),
    }
}

const fn count(name: &'static str, v: u64) -> ParamDecl {
    ParamDecl {
        name,
        default: ParamValue::Count(v),
    }
}

const L1I_PARAMS: &[ParamDecl] = &[
    size("size", defaults::L1I_SIZE),
    count("assoc", defaults::L1_ASSOC),
    cycles("tag_latency", defaults::L1_TAG_LATENCY),
    cycles("data_latency", defaults::L1_DATA_LATENCY),
    cycles("response_latency", defaults::L1_RESPONSE_LATENCY),
    count("mshrs", defaults::L1_MSHRS),
    count("tgts_per_mshr", defaults::L1_TGTS_PER_MSHR),
];

const L1D_PARAMS: &[ParamDecl] = &[
    size("size", defaults::L1D_SIZE),
    count("assoc", defaults::L1_ASSOC),
    cycles("tag_latency", defaults::L1_TAG_LATENCY),
    cycles("data_latency", defaults::L1_DATA_LATENCY),
    cycles("response_latency", defaults::L1_RESPONSE_LATENCY),
    count("mshrs", defaults::L1_MSHRS),
    count("tgts_per_mshr", defaults::L1_TGTS_PER_MSHR),
];

const L2_PARAMS: &[ParamDecl] = &[
    size("size", defaults::L2_SIZE),
    count("assoc", defaults::L2_ASSOC),
    cycles("tag_latency", defaults::L2_LATENCY),
    cycles("data_latency", defaults::L2_LATENCY),
    cycles("response_latency", defaults::L2_LATENCY),
    count("mshrs", defaults::L2_MSHRS),
    count("tgts_per_mshr", defaults::L2_TGTS_PER_MSHR),
];

const MEM_CTRL_PARAMS: &[ParamDecl] = &[size("range_size", defaults::MEM_RANGE)];

const BUS_PARAMS: &[ParamDecl] = &[
    count("width", defaults::BUS_WIDTH),
    cycles("frontend_latency", defaults::BUS_FRONTEND_LATENCY),
    cycles("forward_latency", defaults::BUS_FORWARD_LATENCY),
    cycles("response_latency", defaults::BUS_RESPONSE_LATENCY),
];

const fn declarations(kind: ComponentKind) -> &'static [ParamDecl] {
    match kind {
        ComponentKind::Cpu => &[],
        ComponentKind::L1InstructionCache => L1I_PARAMS,
        ComponentKind::L1DataCache => L1D_PARAMS,
        ComponentKind::L2Cache => L2_PARAMS,
        ComponentKind::MemoryController => MEM_CTRL_PARAMS,
        ComponentKind::Bus => BUS_PARAMS,
    }
}

/// Typed parameter values for one component kind.
///
/// Values are kept in declaration order. Every declared parameter always has a value.
///
/// # Examples
///
/// ```
/// use memsys_core::common::ByteSize;
/// use memsys_core::soc::{ComponentKind, ParamValue, ParameterSet};
///
/// let mut l1d = ParameterSet::with_defaults(ComponentKind::L1DataCache);
/// assert_eq!(l1d.size("size"), Some(ByteSize::kib(64)));
///
/// l1d.set("assoc", ParamValue::Count(4)).unwrap();
/// assert_eq!(l1d.integer("assoc"), Some(4));
///
/// // Latencies are cycle counts, not plain counts.
/// assert!(l1d.set("tag_latency", ParamValue::Count(2)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    kind: ComponentKind,
    values: Vec<(&'static str, ParamValue)>,
}

impl ParameterSet {
    /// Creates a set holding the kind's declared defaults.
    pub fn with_defaults(kind: ComponentKind) -> Self {
        Self {
            kind,
            values: declarations(kind)
                .iter()
                .map(|d| (d.name, d.default))
                .collect(),
        }
    }

    /// Kind these parameters belong to.
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// Current value of `name` if it is a size.
    pub fn size(&self, name: &str) -> Option<ByteSize> {
        self.get(name).and_then(ParamValue::as_size)
    }

    /// Current value of `name` if it is a cycle count or count.
    pub fn integer(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(ParamValue::as_integer)
    }

    /// Declared type of `name`, or `None` if the kind does not declare it.
    pub fn declared_type(&self, name: &str) -> Option<ParamType> {
        declarations(self.kind)
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.default.param_type())
    }

    /// Replaces the value of a declared parameter.
    ///
    /// # Errors
    ///
    /// `UnknownParameter` if the kind does not declare `name`; `TypeMismatch` if
    /// `value` has a different semantic type than the declaration.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let kind = self.kind;
        let slot = self
            .values
            .iter_mut()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| AssemblyError::UnknownParameter {
                kind,
                name: name.to_string(),
            })?;
        let expected = slot.1.param_type();
        if value.param_type() != expected {
            return Err(AssemblyError::TypeMismatch {
                kind,
                name: name.to_string(),
                expected,
                found: value.param_type(),
            });
        }
        slot.1 = value;
        Ok(())
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, ParamValue)> + '_ {
        self.values.iter().copied()
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the kind declares no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.values.iter().map(|(n, v)| (*n, v)))
    }
}
