//! # Component Descriptor Tests
//!
//! Verifies port state tracking and symmetric single connections.

use memsys_core::AssemblyError;
use memsys_core::soc::{ComponentDescriptor, ComponentKind, ParameterSet, PortRef, PortState};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn descriptor(name: &str, kind: ComponentKind) -> ComponentDescriptor {
    ComponentDescriptor::create(name, ParameterSet::with_defaults(kind))
}

#[rstest]
#[case(ComponentKind::Cpu)]
#[case(ComponentKind::L1InstructionCache)]
#[case(ComponentKind::L1DataCache)]
#[case(ComponentKind::L2Cache)]
#[case(ComponentKind::MemoryController)]
#[case(ComponentKind::Bus)]
fn new_descriptor_has_every_port_unconnected(#[case] kind: ComponentKind) {
    let d = descriptor("x", kind);
    assert_eq!(d.kind(), kind);
    assert_eq!(d.ports().count(), kind.ports().len());
    assert!(d.ports().all(|(_, s)| *s == PortState::Unconnected));
    assert_eq!(
        d.unconnected_required_ports(),
        kind.required_ports().collect::<Vec<_>>()
    );
}

#[test]
fn connect_records_peer_on_both_sides() {
    let mut cache = descriptor("icache", ComponentKind::L1InstructionCache);
    let mut cpu = descriptor("cpu", ComponentKind::Cpu);

    cache.connect("cpu_side", &mut cpu, "icache_port").unwrap();

    assert_eq!(
        cache.peer("cpu_side"),
        Some(&PortRef {
            component: "cpu".into(),
            port: "icache_port",
        })
    );
    assert_eq!(
        cpu.peer("icache_port"),
        Some(&PortRef {
            component: "icache".into(),
            port: "cpu_side",
        })
    );
    assert_eq!(cpu.unconnected_required_ports(), ["dcache_port"]);
}

#[test]
fn second_connection_on_a_port_fails() {
    let mut icache = descriptor("icache", ComponentKind::L1InstructionCache);
    let mut dcache = descriptor("dcache", ComponentKind::L1DataCache);
    let mut cpu = descriptor("cpu", ComponentKind::Cpu);

    icache.connect("cpu_side", &mut cpu, "icache_port").unwrap();
    let err = dcache.connect("cpu_side", &mut cpu, "icache_port").unwrap_err();

    assert_eq!(
        err,
        AssemblyError::PortAlreadyConnected {
            component: "cpu".into(),
            port: "icache_port".into(),
            peer: PortRef {
                component: "icache".into(),
                port: "cpu_side",
            },
        }
    );
    assert_eq!(dcache.port_state("cpu_side"), Some(&PortState::Unconnected));
}

#[test]
fn failed_connect_leaves_both_sides_untouched() {
    let mut cpu = descriptor("cpu", ComponentKind::Cpu);
    let mut bus = descriptor("membus", ComponentKind::Bus);
    let mut ctrl = descriptor("mem_ctrl", ComponentKind::MemoryController);
    ctrl.connect("port", &mut bus, "mem_side").unwrap();

    let cpu_before = cpu.clone();
    let bus_before = bus.clone();
    // Local side is free, remote side is taken.
    let err = cpu.connect("dcache_port", &mut bus, "mem_side").unwrap_err();

    assert!(matches!(err, AssemblyError::PortAlreadyConnected { .. }));
    assert_eq!(cpu, cpu_before);
    assert_eq!(bus, bus_before);
}

#[test]
fn unknown_port_is_rejected() {
    let mut cpu = descriptor("cpu", ComponentKind::Cpu);
    let mut ctrl = descriptor("mem_ctrl", ComponentKind::MemoryController);

    let err = cpu.connect("mem_side", &mut ctrl, "port").unwrap_err();
    assert_eq!(
        err,
        AssemblyError::UnknownPort {
            component: "cpu".into(),
            kind: ComponentKind::Cpu,
            port: "mem_side".into(),
        }
    );

    let err = cpu.connect("icache_port", &mut ctrl, "cpu_side").unwrap_err();
    assert!(matches!(err, AssemblyError::UnknownPort { port, .. } if port == "cpu_side"));
    assert_eq!(cpu.port_state("icache_port"), Some(&PortState::Unconnected));
}

#[test]
fn optional_port_is_not_reported() {
    let bus = descriptor("l2bus", ComponentKind::Bus);
    assert_eq!(bus.unconnected_required_ports(), ["cpu_side_0", "mem_side"]);
    assert_eq!(bus.port_state("cpu_side_1"), Some(&PortState::Unconnected));
}

#[test]
fn port_state_for_undeclared_port() {
    let d = descriptor("cpu", ComponentKind::Cpu);
    assert_eq!(d.port_state("port"), None);
    assert_eq!(d.peer("icache_port"), None);
}
