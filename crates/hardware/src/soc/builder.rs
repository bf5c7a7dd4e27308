//! System assembly from configuration and overrides.
//!
//! This module builds the complete component graph for one run. It performs:
//! 1. **Override partitioning:** Splits command-line overrides by component kind.
//! 2. **Parameter resolution:** Resolves every kind's parameters from defaults and overrides.
//! 3. **Descriptor creation:** Instantiates one descriptor per instance in the configured plan.
//! 4. **Topology:** Applies and validates the plan, yielding a fully connected graph.
//!
//! Assembly is atomic: any error aborts it and no graph is returned.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::common::Result;
use crate::config::SystemConfig;
use crate::soc::descriptor::ComponentDescriptor;
use crate::soc::kind::ComponentKind;
use crate::soc::overrides::{OverrideResolver, Overrides};
use crate::soc::params::ParameterSet;
use crate::soc::topology::{ConnectionPlan, SystemGraph, TopologyBuilder};

/// A finished assembly: the configuration it was built from and the connected graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assembly {
    /// System-level settings used for this run.
    pub config: SystemConfig,
    /// Fully connected component graph.
    pub graph: SystemGraph,
}

/// Top-level orchestrator turning configuration and overrides into a `SystemGraph`.
///
/// # Examples
///
/// ```
/// use memsys_core::{AssemblyDriver, SystemConfig};
/// use memsys_core::soc::Overrides;
///
/// let overrides = Overrides::from([("l1i_size".to_string(), "32KiB".to_string())]);
/// let assembly = AssemblyDriver::new(SystemConfig::default())
///     .assemble(&overrides)
///     .unwrap();
///
/// let icache = assembly.graph.get("icache").unwrap();
/// assert_eq!(icache.params().size("size").unwrap().bytes(), 32 * 1024);
/// assert!(assembly.graph.unconnected_required_ports().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AssemblyDriver {
    config: SystemConfig,
    resolver: OverrideResolver,
    plan: ConnectionPlan,
}

impl AssemblyDriver {
    /// Creates a driver using the plan selected by `config` and the built-in option schema.
    pub fn new(config: SystemConfig) -> Self {
        let plan = config.plan();
        Self {
            config,
            resolver: OverrideResolver::new(),
            plan,
        }
    }

    /// Replaces the override resolver.
    #[must_use]
    pub const fn with_resolver(mut self, resolver: OverrideResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the connection plan.
    #[must_use]
    pub fn with_plan(mut self, plan: ConnectionPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Configuration the driver assembles from.
    pub const fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Connection plan the driver applies.
    pub const fn plan(&self) -> &ConnectionPlan {
        &self.plan
    }

    /// Resolves parameters for every component kind.
    ///
    /// All kinds are resolved, including ones the plan does not instantiate, so a malformed
    /// value is reported even when its component is absent.
    ///
    /// # Errors
    ///
    /// Any error from [`OverrideResolver::resolve`].
    pub fn resolve_parameters(
        &self,
        overrides: &Overrides,
    ) -> Result<BTreeMap<ComponentKind, ParameterSet>> {
        let per_kind = self.resolver.partition(overrides);
        let empty = Overrides::new();
        let mut resolved = BTreeMap::new();
        for kind in ComponentKind::ALL {
            let kind_overrides = per_kind.get(&kind).unwrap_or(&empty);
            if !kind_overrides.is_empty()
                && !self.plan.instances().iter().any(|i| i.kind == kind)
            {
                warn!(
                    %kind,
                    options = ?kind_overrides.keys().collect::<Vec<_>>(),
                    "overrides target a component absent from the topology"
                );
            }
            let params = self
                .resolver
                .resolve(&ParameterSet::with_defaults(kind), kind_overrides)?;
            let _ = resolved.insert(kind, params);
        }
        Ok(resolved)
    }

    /// Builds the fully connected graph for `overrides`.
    ///
    /// # Errors
    ///
    /// Propagates any parameter, parse, port, or topology error unchanged.
    pub fn assemble(&self, overrides: &Overrides) -> Result<Assembly> {
        self.config.validate()?;
        let resolved = self.resolve_parameters(overrides)?;

        let descriptors = self
            .plan
            .instances()
            .iter()
            .map(|inst| {
                let params = resolved
                    .get(&inst.kind)
                    .cloned()
                    .unwrap_or_else(|| ParameterSet::with_defaults(inst.kind));
                ComponentDescriptor::create(inst.name, params)
            })
            .collect();

        let graph = TopologyBuilder::build(descriptors, &self.plan)?;
        info!(
            cpu = %self.config.cpu_model,
            components = graph.len(),
            two_level = self.config.two_level,
            "assembly complete"
        );
        Ok(Assembly {
            config: self.config.clone(),
            graph,
        })
    }
}
