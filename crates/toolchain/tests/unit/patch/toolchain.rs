//! # Toolchain Patch Tests
//!
//! End-to-end: generate the header and table for an extension, then patch them into
//! copies of `riscv-opc.h` and `riscv-opc.c`.

use pretty_assertions::assert_eq;

use rvext_core::common::{AnchorError, Error};
use rvext_core::config::Config;
use rvext_core::emit::{batch, header};
use rvext_core::patch::{self, ToolchainPatch};

use crate::common::Workspace;
use crate::common::fixtures::{
    EXTENSION, EXTENSION_HEADER, PATCHED_TARGET_HEADER, TARGET_HEADER, TARGET_SOURCE,
};

fn stage(ws: &Workspace) -> ToolchainPatch {
    let config = Config::default();
    let ext = ws.write("ext.txt", EXTENSION);
    let _tables = batch::write_tables(
        &ext,
        &ws.path("opcodes-ss"),
        &ws.path("riscv-opc-ss.c"),
        &config.emit,
    )
    .unwrap();
    let _header = header::write_header(&ext, &ws.path("riscv-opc-ss.h"), &config.emit).unwrap();
    let _h = ws.write("riscv-opc.h", TARGET_HEADER);
    let _c = ws.write("riscv-opc.c", TARGET_SOURCE);

    ToolchainPatch::new(
        ws.path("riscv-opc-ss.h"),
        ws.path("riscv-opc.h"),
        ws.path("riscv-opc-ss.c"),
        ws.path("riscv-opc.c"),
    )
}

#[test]
fn test_patch_rewrites_both_targets() {
    let ws = Workspace::new();
    let files = stage(&ws);
    patch::patch_toolchain(&files, &Config::default().patch).unwrap();

    assert_eq!(ws.read("riscv-opc-ss.h"), EXTENSION_HEADER);
    assert_eq!(ws.read("riscv-opc.h"), PATCHED_TARGET_HEADER);

    let source = ws.read("riscv-opc.c");
    let table = ws.read("riscv-opc-ss.c");
    assert!(source.contains(&format!("{{\n{table}/* name, xlen")));
    assert_eq!(
        source.lines().count(),
        TARGET_SOURCE.lines().count() + table.lines().count()
    );
}

#[test]
fn test_patch_is_reproducible() {
    let first = Workspace::new();
    let second = Workspace::new();
    for ws in [&first, &second] {
        let files = stage(ws);
        patch::patch_toolchain(&files, &Config::default().patch).unwrap();
    }
    assert_eq!(first.read("riscv-opc.h"), second.read("riscv-opc.h"));
    assert_eq!(first.read("riscv-opc.c"), second.read("riscv-opc.c"));
}

#[test]
fn test_second_patch_finds_no_placeholders() {
    let ws = Workspace::new();
    let files = stage(&ws);
    let config = Config::default();
    patch::patch_toolchain(&files, &config.patch).unwrap();

    let err = patch::patch_toolchain(&files, &config.patch).unwrap_err();
    assert!(matches!(
        err,
        Error::Anchor {
            source: AnchorError::Empty { .. },
            ..
        }
    ));
    assert_eq!(ws.read("riscv-opc.h"), PATCHED_TARGET_HEADER);
}

#[test]
fn test_source_failure_leaves_header_untouched() {
    let ws = Workspace::new();
    let files = stage(&ws);
    let _c = ws.write("riscv-opc.c", "/* no opcode table here */\n");

    let err = patch::patch_toolchain(&files, &Config::default().patch).unwrap_err();
    match &err {
        Error::Anchor {
            target, source, ..
        } => {
            assert_eq!(target, &ws.path("riscv-opc.c"));
            assert!(matches!(source, AnchorError::MarkerNotFound { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ws.read("riscv-opc.h"), TARGET_HEADER);
}

#[test]
fn test_mnemonic_without_tag_fails_without_writing() {
    let ws = Workspace::new();
    let config = Config::default();
    let ext = ws.write("ext.txt", "csrw I rs1,imm 1 2 3\nss_a I rs1 0 2 0\n");
    let _tables = batch::write_tables(
        &ext,
        &ws.path("opcodes-ss"),
        &ws.path("riscv-opc-ss.c"),
        &config.emit,
    )
    .unwrap();
    let _header = header::write_header(&ext, &ws.path("riscv-opc-ss.h"), &config.emit).unwrap();
    let _h = ws.write("riscv-opc.h", TARGET_HEADER);
    let _c = ws.write("riscv-opc.c", TARGET_SOURCE);
    let files = ToolchainPatch::new(
        ws.path("riscv-opc-ss.h"),
        ws.path("riscv-opc.h"),
        ws.path("riscv-opc-ss.c"),
        ws.path("riscv-opc.c"),
    );

    let err = patch::patch_toolchain(&files, &config.patch).unwrap_err();
    assert!(matches!(
        err,
        Error::Anchor {
            source: AnchorError::Unanchored { line: 0, .. },
            ..
        }
    ));
    assert!(err.to_string().contains("line 1 starts with `#define`"));
    assert_eq!(ws.read("riscv-opc.h"), TARGET_HEADER);
    assert_eq!(ws.read("riscv-opc.c"), TARGET_SOURCE);
}

#[test]
fn test_missing_target_is_io_error() {
    let ws = Workspace::new();
    let files = ToolchainPatch::new(
        ws.path("a.h"),
        ws.path("b.h"),
        ws.path("a.c"),
        ws.path("b.c"),
    );
    let err = patch::patch_toolchain(&files, &Config::default().patch).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[cfg(unix)]
#[test]
fn test_patch_preserves_permissions() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    let files = stage(&ws);
    fs::set_permissions(ws.path("riscv-opc.h"), fs::Permissions::from_mode(0o640)).unwrap();

    patch::patch_toolchain(&files, &Config::default().patch).unwrap();
    let mode = fs::metadata(ws.path("riscv-opc.h")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}
