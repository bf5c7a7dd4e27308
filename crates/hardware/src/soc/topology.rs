//! Connection plans and topology construction.
//!
//! A `ConnectionPlan` declares which component instances exist and how their ports are
//! paired. `TopologyBuilder` applies the pairs in order and then checks that every required
//! port ended up connected. The result, `SystemGraph`, is read-only.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::common::{AssemblyError, Result};
use crate::soc::descriptor::{ComponentDescriptor, PortRef, PortState};
use crate::soc::kind::ComponentKind;

/// A component instance a plan expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instance {
    /// Instance name (e.g., `"dcache"`).
    pub name: &'static str,
    /// Kind of the instance.
    pub kind: ComponentKind,
}

/// One end of a planned connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Instance name.
    pub component: &'static str,
    /// Port name on that instance.
    pub port: &'static str,
}

/// A planned port-to-port connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connection {
    /// Side the connection is applied from.
    pub source: Endpoint,
    /// Side receiving the connection.
    pub target: Endpoint,
}

/// Declared instances and an ordered list of connections between them.
///
/// # Examples
///
/// ```
/// use memsys_core::soc::{ComponentKind, ConnectionPlan};
///
/// let plan = ConnectionPlan::new()
///     .instance("cpu", ComponentKind::Cpu)
///     .instance("icache", ComponentKind::L1InstructionCache)
///     .connect(("icache", "cpu_side"), ("cpu", "icache_port"));
/// assert_eq!(plan.instances().len(), 2);
/// assert_eq!(plan.connections().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionPlan {
    instances: Vec<Instance>,
    connections: Vec<Connection>,
}

impl ConnectionPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance.
    #[must_use]
    pub fn instance(mut self, name: &'static str, kind: ComponentKind) -> Self {
        self.instances.push(Instance { name, kind });
        self
    }

    /// Appends a connection between `(component, port)` pairs.
    #[must_use]
    pub fn connect(
        mut self,
        source: (&'static str, &'static str),
        target: (&'static str, &'static str),
    ) -> Self {
        self.connections.push(Connection {
            source: Endpoint {
                component: source.0,
                port: source.1,
            },
            target: Endpoint {
                component: target.0,
                port: target.1,
            },
        });
        self
    }

    /// Declared instances, in order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Declared connections, in application order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Single-level hierarchy: both L1 caches share the memory bus.
    ///
    /// CPU ↔ L1I ↔ membus, CPU ↔ L1D ↔ membus, membus ↔ memory controller.
    pub fn classic() -> Self {
        Self::new()
            .instance("cpu", ComponentKind::Cpu)
            .instance("icache", ComponentKind::L1InstructionCache)
            .instance("dcache", ComponentKind::L1DataCache)
            .instance("membus", ComponentKind::Bus)
            .instance("mem_ctrl", ComponentKind::MemoryController)
            .connect(("icache", "cpu_side"), ("cpu", "icache_port"))
            .connect(("dcache", "cpu_side"), ("cpu", "dcache_port"))
            .connect(("icache", "mem_side"), ("membus", "cpu_side_0"))
            .connect(("dcache", "mem_side"), ("membus", "cpu_side_1"))
            .connect(("mem_ctrl", "port"), ("membus", "mem_side"))
    }

    /// Two-level hierarchy: L1 caches share an L2 bus in front of a unified L2.
    ///
    /// CPU ↔ L1I/L1D ↔ l2bus ↔ L2 ↔ membus ↔ memory controller.
    pub fn two_level() -> Self {
        Self::new()
            .instance("cpu", ComponentKind::Cpu)
            .instance("icache", ComponentKind::L1InstructionCache)
            .instance("dcache", ComponentKind::L1DataCache)
            .instance("l2bus", ComponentKind::Bus)
            .instance("l2cache", ComponentKind::L2Cache)
            .instance("membus", ComponentKind::Bus)
            .instance("mem_ctrl", ComponentKind::MemoryController)
            .connect(("icache", "cpu_side"), ("cpu", "icache_port"))
            .connect(("dcache", "cpu_side"), ("cpu", "dcache_port"))
            .connect(("icache", "mem_side"), ("l2bus", "cpu_side_0"))
            .connect(("dcache", "mem_side"), ("l2bus", "cpu_side_1"))
            .connect(("l2cache", "cpu_side"), ("l2bus", "mem_side"))
            .connect(("l2cache", "mem_side"), ("membus", "cpu_side_0"))
            .connect(("mem_ctrl", "port"), ("membus", "mem_side"))
    }
}

/// A fully connected set of component descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SystemGraph {
    descriptors: Vec<ComponentDescriptor>,
}

impl SystemGraph {
    /// Looks up a component by instance name.
    pub fn get(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.descriptors.iter().find(|d| d.name() == name)
    }

    /// Iterates components in plan order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.descriptors.iter()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if the graph has no components.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Number of port-to-port links (each counted once).
    pub fn link_count(&self) -> usize {
        let ends: usize = self
            .descriptors
            .iter()
            .map(|d| {
                d.ports()
                    .filter(|(_, s)| matches!(s, PortState::Connected(_)))
                    .count()
            })
            .sum();
        ends / 2
    }

    /// Required ports that are unconnected. Empty for any graph produced by the builder.
    pub fn unconnected_required_ports(&self) -> Vec<PortRef> {
        unconnected(&self.descriptors)
    }
}

fn unconnected(descriptors: &[ComponentDescriptor]) -> Vec<PortRef> {
    descriptors
        .iter()
        .flat_map(|d| {
            d.unconnected_required_ports()
                .into_iter()
                .map(move |port| PortRef {
                    component: d.name().to_string(),
                    port,
                })
        })
        .collect()
}

/// Applies connection plans and validates the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologyBuilder;

impl TopologyBuilder {
    /// Applies `plan` to `descriptors` in order and validates the result.
    ///
    /// # Errors
    ///
    /// `DuplicateComponent` if two descriptors share a name; `UnknownComponent` if the plan
    /// names a missing instance; `SelfConnection` if a connection joins an instance to
    /// itself; any error from [`ComponentDescriptor::connect`]; `IncompleteTopology` for
    /// the first required port left unconnected.
    pub fn build(
        mut descriptors: Vec<ComponentDescriptor>,
        plan: &ConnectionPlan,
    ) -> Result<SystemGraph> {
        ensure_unique_names(&descriptors)?;

        for conn in plan.connections() {
            let src = index_of(&descriptors, conn.source.component)?;
            let dst = index_of(&descriptors, conn.target.component)?;
            if src == dst {
                return Err(AssemblyError::SelfConnection {
                    component: conn.source.component.to_string(),
                    from: conn.source.port.to_string(),
                    to: conn.target.port.to_string(),
                });
            }
            let (a, b) = pair_mut(&mut descriptors, src, dst);
            a.connect(conn.source.port, b, conn.target.port)?;
        }

        Self::validate(&descriptors)?;
        let graph = SystemGraph { descriptors };
        info!(
            components = graph.len(),
            links = graph.link_count(),
            "topology built"
        );
        Ok(graph)
    }

    /// Checks that every required port of every descriptor is connected.
    ///
    /// # Errors
    ///
    /// `IncompleteTopology` naming the first unconnected required port, in descriptor and
    /// port declaration order.
    pub fn validate(descriptors: &[ComponentDescriptor]) -> Result<()> {
        let missing = unconnected(descriptors);
        for port in &missing {
            debug!(%port, "required port unconnected");
        }
        match missing.into_iter().next() {
            None => Ok(()),
            Some(PortRef { component, port }) => Err(AssemblyError::IncompleteTopology {
                component,
                port: port.to_string(),
            }),
        }
    }
}

fn ensure_unique_names(descriptors: &[ComponentDescriptor]) -> Result<()> {
    let mut seen = HashSet::with_capacity(descriptors.len());
    for d in descriptors {
        if !seen.insert(d.name()) {
            return Err(AssemblyError::DuplicateComponent(d.name().to_string()));
        }
    }
    Ok(())
}

fn index_of(descriptors: &[ComponentDescriptor], name: &str) -> Result<usize> {
    descriptors
        .iter()
        .position(|d| d.name() == name)
        .ok_or_else(|| AssemblyError::UnknownComponent(name.to_string()))
}

/// Borrows two distinct elements mutably. `a` and `b` must differ.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
