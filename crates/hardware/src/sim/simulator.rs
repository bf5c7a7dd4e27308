//! Simulator: hands a finished assembly and a workload to a runtime.
//!
//! The cycle-level runtime is external. It only has to accept a connected graph and a
//! workload and report why and when the run stopped.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::common::Result;
use crate::sim::loader::Workload;
use crate::soc::builder::Assembly;

/// Why and when a simulation run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitEvent {
    /// Termination cause reported by the runtime.
    pub cause: String,
    /// Logical tick at which the run stopped.
    pub tick: u64,
}

impl fmt::Display for ExitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exiting @ tick {} because {}", self.tick, self.cause)
    }
}

/// A simulation runtime that executes an assembled system.
pub trait SimulationRuntime {
    /// Runs `workload` on `assembly` to completion.
    ///
    /// # Errors
    ///
    /// `Runtime` if the runtime cannot execute the system.
    fn simulate(&mut self, assembly: &Assembly, workload: &Workload) -> Result<ExitEvent>;
}

/// Runtime that validates the hand-off without simulating anything.
///
/// It logs every component with its parameters and reports an exit at tick 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRuntime;

impl DryRunRuntime {
    /// Cause reported by every dry run.
    pub const CAUSE: &'static str = "dry run: assembly validated";
}

impl SimulationRuntime for DryRunRuntime {
    fn simulate(&mut self, assembly: &Assembly, workload: &Workload) -> Result<ExitEvent> {
        for component in assembly.graph.iter() {
            let params: Vec<String> = component
                .params()
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect();
            info!(
                component = component.name(),
                kind = %component.kind(),
                params = %params.join(", "),
                "instantiated"
            );
        }
        info!(cmd = ?workload.cmd(), "workload bound to cpu");
        Ok(ExitEvent {
            cause: Self::CAUSE.to_string(),
            tick: 0,
        })
    }
}

/// Top-level run: an assembly plus the workload it executes.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Connected system.
    pub assembly: Assembly,
    /// Executable the CPU runs.
    pub workload: Workload,
}

impl Simulator {
    /// Pairs an assembly with its workload.
    pub const fn new(assembly: Assembly, workload: Workload) -> Self {
        Self { assembly, workload }
    }

    /// Hands the system to `runtime` and returns its exit event.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports.
    pub fn run<R: SimulationRuntime + ?Sized>(&self, runtime: &mut R) -> Result<ExitEvent> {
        info!(
            workload = %self.workload.path().display(),
            components = self.assembly.graph.len(),
            "beginning simulation"
        );
        let event = runtime.simulate(&self.assembly, &self.workload)?;
        info!(tick = event.tick, cause = %event.cause, "simulation exited");
        Ok(event)
    }
}
