//! Component descriptors and port state.
//!
//! A descriptor is one component instance: a name, its resolved parameters, and the state of
//! every port its kind declares. Connections are symmetric and single: connecting `A.p` to
//! `B.q` records the peer on both sides, and a connected port never accepts a second peer.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::common::{AssemblyError, Result};
use crate::soc::kind::ComponentKind;
use crate::soc::params::ParameterSet;

/// A reference to one port of one named component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PortRef {
    /// Instance name of the component.
    pub component: String,
    /// Port name on that component.
    pub port: &'static str,
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.port)
    }
}

/// Connection state of a single port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortState {
    /// Nothing attached yet.
    Unconnected,
    /// Attached to the given peer port.
    Connected(PortRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct PortSlot {
    name: &'static str,
    required: bool,
    state: PortState,
}

/// One hardware component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    name: String,
    kind: ComponentKind,
    params: ParameterSet,
    ports: Vec<PortSlot>,
}

impl ComponentDescriptor {
    /// Creates a descriptor with every port of the parameters' kind unconnected.
    ///
    /// The kind is taken from `params`, so the two can never disagree.
    pub fn create(name: impl Into<String>, params: ParameterSet) -> Self {
        let kind = params.kind();
        Self {
            name: name.into(),
            kind,
            params,
            ports: kind
                .ports()
                .iter()
                .map(|p| PortSlot {
                    name: p.name,
                    required: p.required,
                    state: PortState::Unconnected,
                })
                .collect(),
        }
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Component kind.
    pub const fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Resolved parameters.
    pub const fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// State of `port`, or `None` if the kind does not declare it.
    pub fn port_state(&self, port: &str) -> Option<&PortState> {
        self.ports.iter().find(|s| s.name == port).map(|s| &s.state)
    }

    /// Peer of `port` if it is connected.
    pub fn peer(&self, port: &str) -> Option<&PortRef> {
        match self.port_state(port)? {
            PortState::Connected(peer) => Some(peer),
            PortState::Unconnected => None,
        }
    }

    /// Iterates `(port name, state)` in declaration order.
    pub fn ports(&self) -> impl Iterator<Item = (&'static str, &PortState)> + '_ {
        self.ports.iter().map(|s| (s.name, &s.state))
    }

    /// Required ports that are still unconnected, in declaration order.
    pub fn unconnected_required_ports(&self) -> Vec<&'static str> {
        self.ports
            .iter()
            .filter(|s| s.required && s.state == PortState::Unconnected)
            .map(|s| s.name)
            .collect()
    }

    /// Connects `local_port` on this descriptor to `remote_port` on `remote`.
    ///
    /// Both sides are checked before either is modified, so a failed call leaves both
    /// descriptors untouched.
    ///
    /// # Errors
    ///
    /// `UnknownPort` if either port is not declared for its kind; `PortAlreadyConnected`
    /// if either port already has a peer.
    pub fn connect(
        &mut self,
        local_port: &str,
        remote: &mut Self,
        remote_port: &str,
    ) -> Result<()> {
        let local = self.slot_index(local_port)?;
        let far = remote.slot_index(remote_port)?;
        self.ensure_unconnected(local)?;
        remote.ensure_unconnected(far)?;

        let local_name = self.ports[local].name;
        let far_name = remote.ports[far].name;
        self.ports[local].state = PortState::Connected(PortRef {
            component: remote.name.clone(),
            port: far_name,
        });
        remote.ports[far].state = PortState::Connected(PortRef {
            component: self.name.clone(),
            port: local_name,
        });
        debug!(
            from = %format_args!("{}.{}", self.name, local_name),
            to = %format_args!("{}.{}", remote.name, far_name),
            "connected"
        );
        Ok(())
    }

    fn slot_index(&self, port: &str) -> Result<usize> {
        self.ports
            .iter()
            .position(|s| s.name == port)
            .ok_or_else(|| AssemblyError::UnknownPort {
                component: self.name.clone(),
                kind: self.kind,
                port: port.to_string(),
            })
    }

    fn ensure_unconnected(&self, idx: usize) -> Result<()> {
        let slot = &self.ports[idx];
        match &slot.state {
            PortState::Unconnected => Ok(()),
            PortState::Connected(peer) => Err(AssemblyError::PortAlreadyConnected {
                component: self.name.clone(),
                port: slot.name.to_string(),
                peer: peer.clone(),
            }),
        }
    }
}
