//! Assembly error definitions.
//!
//! Every failure during assembly is detected synchronously and returned to the caller
//! unchanged. This module provides:
//! 1. **Parameter errors:** Unknown names, type mismatches, and malformed override values.
//! 2. **Wiring errors:** Unknown ports or components, double connections, and incomplete topologies.
//! 3. **Hand-off errors:** Missing workloads, invalid configuration files, and runtime failures.
//!
//! Messages always name the offending option/value or component/port so the command line
//! can be corrected.

use std::path::PathBuf;

use thiserror::Error;

use crate::soc::descriptor::PortRef;
use crate::soc::kind::ComponentKind;
use crate::soc::params::ParamType;

/// Errors raised while resolving parameters, wiring components, or handing a graph off.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// A parameter name is not declared for the component kind.
    #[error("unknown parameter `{name}` for {kind}")]
    UnknownParameter {
        /// Kind whose parameter table was searched.
        kind: ComponentKind,
        /// Requested parameter name.
        name: String,
    },

    /// A value's type disagrees with the parameter's declared type.
    #[error("parameter `{name}` of {kind} expects a {expected} value, got {found}")]
    TypeMismatch {
        /// Kind owning the parameter.
        kind: ComponentKind,
        /// Parameter name.
        name: String,
        /// Declared type.
        expected: ParamType,
        /// Type of the rejected value.
        found: ParamType,
    },

    /// An override value could not be parsed into the parameter's type.
    #[error("invalid value `{value}` for option `{option}`: {reason}")]
    ParseError {
        /// Option name as written on the command line (without dashes).
        option: String,
        /// Raw value supplied.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A port name is not declared for the component's kind.
    #[error("{component} ({kind}) has no port `{port}`")]
    UnknownPort {
        /// Instance name.
        component: String,
        /// Instance kind.
        kind: ComponentKind,
        /// Requested port name.
        port: String,
    },

    /// A port was connected a second time.
    #[error("port {component}.{port} is already connected to {peer}")]
    PortAlreadyConnected {
        /// Instance name.
        component: String,
        /// Port name.
        port: String,
        /// Existing peer of the port.
        peer: PortRef,
    },

    /// A required port was left unconnected after the plan was applied.
    #[error("required port {component}.{port} is not connected")]
    IncompleteTopology {
        /// Instance name.
        component: String,
        /// Port name.
        port: String,
    },

    /// A connection plan names an instance that was never created.
    #[error("connection plan references unknown component `{0}`")]
    UnknownComponent(String),

    /// Two descriptors share the same instance name.
    #[error("component name `{0}` is used more than once")]
    DuplicateComponent(String),

    /// A connection joins a component to itself.
    #[error("cannot connect {component}.{from} to its own port {to}")]
    SelfConnection {
        /// Instance name.
        component: String,
        /// Source port.
        from: String,
        /// Target port.
        to: String,
    },

    /// The workload executable does not exist or is not a regular file.
    #[error("workload not found: {}", path.display())]
    WorkloadNotFound {
        /// Path as given.
        path: PathBuf,
    },

    /// The system configuration could not be read or decoded.
    #[error("invalid system configuration: {0}")]
    Config(String),

    /// The simulation runtime failed after accepting the graph.
    #[error("simulation runtime failed: {0}")]
    Runtime(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AssemblyError>;
