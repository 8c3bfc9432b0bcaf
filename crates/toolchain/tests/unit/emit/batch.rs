//! # Batch Emitter Tests
//!
//! Whole-extension table generation, error attribution, and file output.

use std::path::Path;

use pretty_assertions::assert_eq;

use rvext_core::common::{DescriptorError, Error};
use rvext_core::config::EmitConfig;
use rvext_core::emit::batch;

use crate::common::Workspace;
use crate::common::fixtures::{EXTENSION, EXTENSION_ENCODING};

#[test]
fn test_encoding_table_matches_fixture() {
    let tables = batch::emit_tables(EXTENSION, Path::new("ext.txt"), &EmitConfig::default())
        .unwrap();
    assert_eq!(tables.encoding, EXTENSION_ENCODING);
}

#[test]
fn test_one_output_line_per_descriptor() {
    let tables = batch::emit_tables(EXTENSION, Path::new("ext.txt"), &EmitConfig::default())
        .unwrap();
    assert_eq!(tables.encoding.lines().count(), 5);
    assert_eq!(tables.asm.lines().count(), 5);
    assert!(tables.asm.lines().all(|l| l.starts_with('{') && l.ends_with("},")));
}

#[test]
fn test_entries_keep_source_lines() {
    let entries = batch::parse_extension(EXTENSION, Path::new("ext.txt")).unwrap();
    let lines: Vec<usize> = entries.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![2, 4, 5, 6, 8]);
    assert_eq!(entries[0].descriptor.mnemonic, "ss_cfg");
}

#[test]
fn test_comment_line_is_skipped() {
    let text = "# header\ncsrw I rs1,imm 1 2 3   # trailing\n";
    let tables = batch::emit_tables(text, Path::new("ext.txt"), &EmitConfig::default()).unwrap();
    assert_eq!(
        tables.encoding,
        "csrw 11..7=0 rs1 imm12 14..12=3 6..5=1 4..2=2 1..0=3\n"
    );
    assert_eq!(tables.asm.lines().count(), 1);
}

#[test]
fn test_empty_description_yields_empty_tables() {
    let tables = batch::emit_tables("\n# nothing\n", Path::new("ext.txt"), &EmitConfig::default())
        .unwrap();
    assert_eq!(tables.encoding, "");
    assert_eq!(tables.asm, "");
}

#[test]
fn test_parse_error_names_file_and_line() {
    let text = "csrw I rs1,imm 1 2 3\n\nbad I rs1 1 6 3\n";
    let err = batch::emit_tables(text, Path::new("ext.txt"), &EmitConfig::default()).unwrap_err();
    match &err {
        Error::Line { path, line, source } => {
            assert_eq!(path, Path::new("ext.txt"));
            assert_eq!(*line, 3);
            assert_eq!(*source, DescriptorError::UnknownOpcode { hi: 1, lo: 6 });
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("ext.txt:3: "));
}

#[test]
fn test_compile_error_names_line() {
    let text = "ok I rs1 1 2 0\nbad I rs2 1 2 0\n";
    let err = batch::emit_tables(text, Path::new("ext.txt"), &EmitConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Line {
            line: 2,
            source: DescriptorError::OperandNotEncodable { .. },
            ..
        }
    ));
}

#[test]
fn test_generation_is_deterministic() {
    let config = EmitConfig::default();
    let first = batch::emit_tables(EXTENSION, Path::new("ext.txt"), &config).unwrap();
    let second = batch::emit_tables(EXTENSION, Path::new("ext.txt"), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_write_tables_creates_both_files() {
    let ws = Workspace::new();
    let ext = ws.write("ext.txt", EXTENSION);
    let tables = batch::write_tables(
        &ext,
        &ws.path("opcodes-ss"),
        &ws.path("riscv-opc-ss.c"),
        &EmitConfig::default(),
    )
    .unwrap();
    assert_eq!(ws.read("opcodes-ss"), EXTENSION_ENCODING);
    assert_eq!(ws.read("riscv-opc-ss.c"), tables.asm);
}

#[test]
fn test_write_tables_overwrites_existing_output() {
    let ws = Workspace::new();
    let ext = ws.write("ext.txt", EXTENSION);
    let _stale = ws.write("opcodes-ss", "stale contents\n");
    let _tables = batch::write_tables(
        &ext,
        &ws.path("opcodes-ss"),
        &ws.path("riscv-opc-ss.c"),
        &EmitConfig::default(),
    )
    .unwrap();
    assert_eq!(ws.read("opcodes-ss"), EXTENSION_ENCODING);
}

#[test]
fn test_bad_description_writes_nothing() {
    let ws = Workspace::new();
    let ext = ws.write("ext.txt", "csrw I rs1,imm 1 2 3\nbroken\n");
    let err = batch::write_tables(
        &ext,
        &ws.path("opcodes-ss"),
        &ws.path("riscv-opc-ss.c"),
        &EmitConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Line { line: 2, .. }));
    assert!(!ws.exists("opcodes-ss"));
    assert!(!ws.exists("riscv-opc-ss.c"));
}

#[test]
fn test_missing_description_is_io_error() {
    let ws = Workspace::new();
    let err = batch::emit(&ws.path("absent.txt"), &EmitConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("absent.txt"));
}
