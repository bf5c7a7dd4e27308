//! # Error Message Tests
//!
//! Every assembly error must name what the user has to correct.

use memsys_core::AssemblyError;
use memsys_core::soc::{ComponentKind, ParamType, PortRef};
use std::path::PathBuf;

#[test]
fn parse_error_names_option_and_value() {
    let err = AssemblyError::ParseError {
        option: "l1i_size".into(),
        value: "16XiB".into(),
        reason: "unknown unit suffix `XiB`".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("l1i_size"));
    assert!(msg.contains("16XiB"));
}

#[test]
fn unknown_parameter_names_kind_and_parameter() {
    let err = AssemblyError::UnknownParameter {
        kind: ComponentKind::L2Cache,
        name: "ways".into(),
    };
    assert_eq!(err.to_string(), "unknown parameter `ways` for L2Cache");
}

#[test]
fn type_mismatch_names_both_types() {
    let err = AssemblyError::TypeMismatch {
        kind: ComponentKind::L1DataCache,
        name: "size".into(),
        expected: ParamType::Size,
        found: ParamType::Count,
    };
    let msg = err.to_string();
    assert!(msg.contains("size"));
    assert!(msg.contains("count"));
    assert!(msg.contains("L1DataCache"));
}

#[test]
fn port_errors_name_component_and_port() {
    let err = AssemblyError::PortAlreadyConnected {
        component: "dcache".into(),
        port: "cpu_side".into(),
        peer: PortRef {
            component: "cpu".into(),
            port: "dcache_port",
        },
    };
    assert_eq!(
        err.to_string(),
        "port dcache.cpu_side is already connected to cpu.dcache_port"
    );

    let err = AssemblyError::IncompleteTopology {
        component: "membus".into(),
        port: "mem_side".into(),
    };
    assert_eq!(err.to_string(), "required port membus.mem_side is not connected");

    let err = AssemblyError::UnknownPort {
        component: "cpu".into(),
        kind: ComponentKind::Cpu,
        port: "mem_side".into(),
    };
    assert_eq!(err.to_string(), "cpu (Cpu) has no port `mem_side`");
}

#[test]
fn workload_not_found_names_path() {
    let err = AssemblyError::WorkloadNotFound {
        path: PathBuf::from("bin/missing"),
    };
    assert!(err.to_string().contains("bin/missing"));
}
