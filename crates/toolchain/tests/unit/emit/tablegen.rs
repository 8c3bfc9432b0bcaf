//! # Backend Definition Tests
//!
//! TableGen records in both destination register modes.

use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvext_core::common::{DescriptorError, Error};
use rvext_core::config::TableGenConfig;
use rvext_core::emit::tablegen::{self, OperandClass, RdMode};
use rvext_core::isa::{Format, Operand};

use crate::common::Workspace;
use crate::common::descriptor;

#[test]
fn test_implicit_definition() {
    let text = tablegen::definition(
        &descriptor("ss_cfg I rs1,imm 1 2 3"),
        RdMode::Implicit,
        &TableGenConfig::default(),
    )
    .unwrap();
    assert_eq!(
        text,
        "let rd = 0, hasSideEffects = 1, mayLoad = 1, mayStore = 1 in\n\
         def SS_CFG : RVInstI<3, OPC_CUSTOM_1,\n                    \
         (outs),\n                    \
         (ins GPR:$rs1, simm12:$imm12),\n                    \
         \"ss_cfg\", \"$rs1, $imm12\",\n                    \
         Sched<[SSRead, SSWrite]>;\n\n"
    );
}

#[test]
fn test_printed_definition() {
    let text = tablegen::definition(
        &descriptor("ss_ld I rd,rs1,imm 0 2 1"),
        RdMode::Printed,
        &TableGenConfig::default(),
    )
    .unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "let hasSideEffects = 1, mayLoad = 1, mayStore = 1 in",
            "def SS_LD : RVInstI<1, OPC_CUSTOM_0,",
            "                    (outs GPR:$rd),",
            "                    (ins GPR:$rs1, simm12:$imm12),",
            "                    \"ss_ld\", \"$rd, $rs1, $imm12\",",
            "                    Sched<[SSRead, SSWrite]>;",
            "",
        ]
    );
}

#[test]
fn test_s_format_and_custom_sched() {
    let config = TableGenConfig {
        sched_read: "XRead".to_string(),
        sched_write: "XWrite".to_string(),
    };
    let text = tablegen::definition(
        &descriptor("ss_st S rs1,rs2,imm 3 6 2"),
        RdMode::Implicit,
        &config,
    )
    .unwrap();
    assert!(text.contains("def SS_ST : RVInstS<2, OPC_CUSTOM_3,\n"));
    assert!(text.contains("(ins GPR:$rs1, GPR:$rs2, simm12:$imm12),"));
    assert!(text.contains("Sched<[XRead, XWrite]>;"));
}

#[test]
fn test_implicit_mode_rejects_rd() {
    let err = tablegen::definition(
        &descriptor("ss_ld I rd,rs1,imm 0 2 1"),
        RdMode::Implicit,
        &TableGenConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, DescriptorError::ImplicitDestination);
}

#[rstest]
#[case(RdMode::Implicit)]
#[case(RdMode::Printed)]
fn test_u_immediate_unsupported(#[case] mode: RdMode) {
    let err = tablegen::definition(
        &descriptor("ss_lui U imm 3 6 0"),
        mode,
        &TableGenConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, DescriptorError::UnsupportedImmediate(Format::U));
}

#[test]
fn test_operand_classes() {
    assert_eq!(tablegen::operand_class(Format::S, Operand::Rs2), Ok(OperandClass::Gpr));
    assert_eq!(tablegen::operand_class(Format::I, Operand::Imm), Ok(OperandClass::Simm12));
    assert_eq!(OperandClass::Simm12.name(), "simm12");
}

#[test]
fn test_unencodable_operand_rejected() {
    let err = tablegen::definition(
        &descriptor("ss_x I rs2 0 2 0"),
        RdMode::Printed,
        &TableGenConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        DescriptorError::OperandNotEncodable {
            format: Format::I,
            operand: Operand::Rs2
        }
    );
}

#[test]
fn test_one_block_per_line() {
    let text = "ss_a I rs1 0 2 0\n# skip\nss_b I rs1,imm 1 2 1\n";
    let out = tablegen::emit_definitions(
        text,
        Path::new("ext.txt"),
        RdMode::Implicit,
        &TableGenConfig::default(),
    )
    .unwrap();
    assert_eq!(out.matches("def ").count(), 2);
    assert_eq!(out.matches("let rd = 0").count(), 2);
    assert!(out.find("def SS_A").unwrap() < out.find("def SS_B").unwrap());
}

#[test]
fn test_batch_error_names_line() {
    let ws = Workspace::new();
    let ext = ws.write("ext.txt", "ss_a I rs1 0 2 0\nss_b U rd,imm 0 2 0\n");
    let err =
        tablegen::emit_definitions_file(&ext, RdMode::Printed, &TableGenConfig::default())
            .unwrap_err();
    assert!(matches!(
        err,
        Error::Line {
            line: 2,
            source: DescriptorError::UnsupportedImmediate(Format::U),
            ..
        }
    ));
}

#[test]
fn test_rd_mode_display() {
    assert_eq!(RdMode::Implicit.to_string(), "implicit");
    assert_eq!(RdMode::Printed.to_string(), "printed");
}
