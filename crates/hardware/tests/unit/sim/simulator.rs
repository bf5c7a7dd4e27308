//! # Runtime Hand-off Tests
//!
//! Verifies the exit event format and that `Simulator::run` delegates to its runtime.

use std::fs::File;

use memsys_core::sim::{DryRunRuntime, ExitEvent, SimulationRuntime, Simulator, Workload};
use memsys_core::soc::Overrides;
use memsys_core::{Assembly, AssemblyDriver, AssemblyError, Result, SystemConfig};
use tempfile::TempDir;

fn fixture() -> (TempDir, Simulator) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hello");
    let _file = File::create(&path).unwrap();
    let assembly = AssemblyDriver::new(SystemConfig::default())
        .assemble(&Overrides::new())
        .unwrap();
    let workload = Workload::locate(&path).unwrap();
    (dir, Simulator::new(assembly, workload))
}

/// Runtime that records what it was handed and stops at a fixed tick.
struct RecordingRuntime {
    seen_components: usize,
    seen_cmd: Vec<String>,
}

impl SimulationRuntime for RecordingRuntime {
    fn simulate(&mut self, assembly: &Assembly, workload: &Workload) -> Result<ExitEvent> {
        self.seen_components = assembly.graph.len();
        self.seen_cmd = workload.cmd();
        Ok(ExitEvent {
            cause: "exiting with last active thread context".to_string(),
            tick: 5_000_000,
        })
    }
}

struct FailingRuntime;

impl SimulationRuntime for FailingRuntime {
    fn simulate(&mut self, _: &Assembly, _: &Workload) -> Result<ExitEvent> {
        Err(AssemblyError::Runtime("no runtime attached".to_string()))
    }
}

#[test]
fn exit_event_display() {
    let event = ExitEvent {
        cause: "exiting with last active thread context".to_string(),
        tick: 1234,
    };
    assert_eq!(
        event.to_string(),
        "Exiting @ tick 1234 because exiting with last active thread context"
    );
}

#[test]
fn dry_run_exits_at_tick_zero() {
    let (_dir, sim) = fixture();
    let event = sim.run(&mut DryRunRuntime).unwrap();
    assert_eq!(event.tick, 0);
    assert_eq!(event.cause, DryRunRuntime::CAUSE);
}

#[test]
fn runtime_receives_assembly_and_workload() {
    let (_dir, sim) = fixture();
    let mut runtime = RecordingRuntime {
        seen_components: 0,
        seen_cmd: Vec::new(),
    };

    let event = sim.run(&mut runtime).unwrap();
    assert_eq!(event.tick, 5_000_000);
    assert_eq!(runtime.seen_components, 5);
    assert_eq!(runtime.seen_cmd, sim.workload.cmd());
}

#[test]
fn runtime_errors_propagate() {
    let (_dir, sim) = fixture();
    let err = sim.run(&mut FailingRuntime).unwrap_err();
    assert_eq!(err, AssemblyError::Runtime("no runtime attached".to_string()));
}

#[test]
fn runs_through_trait_object() {
    let (_dir, sim) = fixture();
    let mut runtime: Box<dyn SimulationRuntime> = Box::new(DryRunRuntime);
    let event = sim.run(runtime.as_mut()).unwrap();
    assert_eq!(event.tick, 0);
}
