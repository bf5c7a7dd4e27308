//! # Assembly Driver Tests
//!
//! End-to-end assembly from configuration and overrides.

use memsys_core::common::ByteSize;
use memsys_core::config::CpuModel;
use memsys_core::soc::{ComponentKind, ConnectionPlan, OptionSpec, OverrideResolver, Overrides};
use memsys_core::{AssemblyDriver, AssemblyError, SystemConfig};
use pretty_assertions::assert_eq;

fn overrides(pairs: &[(&str, &str)]) -> Overrides {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn two_level() -> SystemConfig {
    SystemConfig {
        two_level: true,
        ..SystemConfig::default()
    }
}

#[test]
fn default_assembly() {
    let assembly = AssemblyDriver::new(SystemConfig::default())
        .assemble(&Overrides::new())
        .unwrap();

    assert_eq!(assembly.config, SystemConfig::default());
    assert_eq!(assembly.graph.len(), 5);
    assert!(assembly.graph.unconnected_required_ports().is_empty());

    let icache = assembly.graph.get("icache").unwrap();
    assert_eq!(icache.kind(), ComponentKind::L1InstructionCache);
    assert_eq!(icache.params().size("size"), Some(ByteSize::kib(16)));
    let dcache = assembly.graph.get("dcache").unwrap();
    assert_eq!(dcache.params().size("size"), Some(ByteSize::kib(64)));
}

#[test]
fn overrides_reach_descriptors() {
    let assembly = AssemblyDriver::new(SystemConfig::default())
        .assemble(&overrides(&[
            ("l1d_size", "128KiB"),
            ("l1d_assoc", "2"),
            ("l1d_tagl", "5"),
        ]))
        .unwrap();

    let dcache = assembly.graph.get("dcache").unwrap().params();
    assert_eq!(dcache.size("size"), Some(ByteSize(131_072)));
    assert_eq!(dcache.integer("assoc"), Some(2));
    assert_eq!(dcache.integer("tag_latency"), Some(5));
    assert_eq!(dcache.integer("data_latency"), Some(3));

    // The instruction cache keeps its own defaults.
    let icache = assembly.graph.get("icache").unwrap().params();
    assert_eq!(icache.integer("assoc"), Some(1));
}

#[test]
fn malformed_override_aborts_assembly() {
    let err = AssemblyDriver::new(SystemConfig::default())
        .assemble(&overrides(&[("l1i_size", "16XiB")]))
        .unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::ParseError { ref option, ref value, .. }
            if option == "l1i_size" && value == "16XiB"
    ));
}

#[test]
fn l2_size_applies_in_two_level() {
    let assembly = AssemblyDriver::new(two_level())
        .assemble(&overrides(&[("l2_size", "1MiB")]))
        .unwrap();

    assert_eq!(assembly.graph.len(), 7);
    let l2 = assembly.graph.get("l2cache").unwrap();
    assert_eq!(l2.params().size("size"), Some(ByteSize::mib(1)));
    assert_eq!(l2.params().integer("assoc"), Some(8));
}

#[test]
fn malformed_l2_size_fails_without_l2() {
    let err = AssemblyDriver::new(SystemConfig::default())
        .assemble(&overrides(&[("l2_size", "lots")]))
        .unwrap_err();
    assert!(matches!(err, AssemblyError::ParseError { .. }));
}

#[test]
fn unknown_overrides_are_ignored() {
    let with = AssemblyDriver::new(SystemConfig::default())
        .assemble(&overrides(&[("l3_size", "8MiB")]))
        .unwrap();
    let without = AssemblyDriver::new(SystemConfig::default())
        .assemble(&Overrides::new())
        .unwrap();
    assert_eq!(with, without);
}

#[test]
fn resolves_every_kind() {
    let driver = AssemblyDriver::new(SystemConfig::default());
    let resolved = driver.resolve_parameters(&Overrides::new()).unwrap();
    assert_eq!(resolved.len(), ComponentKind::ALL.len());
}

#[test]
fn zero_clock_is_rejected() {
    let config = SystemConfig {
        clock_hz: 0,
        ..SystemConfig::default()
    };
    let err = AssemblyDriver::new(config)
        .assemble(&Overrides::new())
        .unwrap_err();
    assert!(matches!(err, AssemblyError::Config(_)));
}

#[test]
fn custom_plan_is_validated() {
    let plan = ConnectionPlan::new().instance("cpu", ComponentKind::Cpu);
    let err = AssemblyDriver::new(SystemConfig::default())
        .with_plan(plan)
        .assemble(&Overrides::new())
        .unwrap_err();
    assert!(matches!(err, AssemblyError::IncompleteTopology { .. }));
}

#[test]
fn plan_follows_config() {
    assert_eq!(
        AssemblyDriver::new(two_level()).plan(),
        &ConnectionPlan::two_level()
    );
}

#[test]
fn assembly_serializes_to_json() {
    let config = SystemConfig {
        cpu_model: CpuModel::O3,
        ..SystemConfig::default()
    };
    let assembly = AssemblyDriver::new(config)
        .assemble(&Overrides::new())
        .unwrap();
    let json = serde_json::to_value(&assembly).unwrap();

    assert_eq!(json["config"]["cpu_model"], "O3");
    let components = json["graph"].as_array().unwrap();
    assert_eq!(components.len(), 5);
    assert_eq!(components[0]["name"], "cpu");
    assert_eq!(components[0]["kind"], "Cpu");
    assert_eq!(
        components[1]["params"]["size"]["size"],
        serde_json::json!(16384)
    );
}

const L2_ASSOC_SCHEMA: &[OptionSpec] = &[OptionSpec {
    option: "l2_assoc",
    kind: ComponentKind::L2Cache,
    param: "assoc",
    help: "L2 cache associativity",
}];

#[test]
fn custom_resolver_drives_assembly() {
    let assembly = AssemblyDriver::new(two_level())
        .with_resolver(OverrideResolver::with_schema(L2_ASSOC_SCHEMA))
        .assemble(&overrides(&[("l2_assoc", "16"), ("l1d_size", "1MiB")]))
        .unwrap();

    let l2 = assembly.graph.get("l2cache").unwrap().params();
    assert_eq!(l2.integer("assoc"), Some(16));
    // Options outside the custom schema are ignored.
    let dcache = assembly.graph.get("dcache").unwrap().params();
    assert_eq!(dcache.size("size"), Some(ByteSize::kib(64)));
}
