//! System component assembly.
//!
//! This module organizes the layers that turn defaults and command-line overrides into a
//! fully connected component graph, leaf-first:
//! 1. **Kinds:** The closed set of component kinds and their port tables.
//! 2. **Parameters:** Typed per-kind parameter sets with declared defaults.
//! 3. **Overrides:** The option schema and the resolver that applies raw override strings.
//! 4. **Descriptors:** One component instance with its resolved parameters and port states.
//! 5. **Topology:** Connection plans and the builder that applies and validates them.
//! 6. **Builder:** The assembly driver tying the layers together.

/// Assembly driver producing a connected system graph from configuration.
pub mod builder;

/// Component descriptors and port connection state.
pub mod descriptor;

/// Component kinds and their port tables.
pub mod kind;

/// Command-line option schema and override resolution.
pub mod overrides;

/// Typed parameter sets with per-kind defaults.
pub mod params;

/// Connection plans, the topology builder, and the finished system graph.
pub mod topology;

pub use builder::{Assembly, AssemblyDriver};
pub use descriptor::{ComponentDescriptor, PortRef, PortState};
pub use kind::{ComponentKind, PortSpec};
pub use overrides::{OptionSpec, OverrideResolver, Overrides};
pub use params::{ParamType, ParamValue, ParameterSet};
pub use topology::{ConnectionPlan, SystemGraph, TopologyBuilder};
