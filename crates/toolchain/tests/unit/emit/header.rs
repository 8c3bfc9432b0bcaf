//! # Encoding Header Tests
//!
//! The generated header must be a valid splice source: every constant and every
//! declaration carries the patched tag, and each group is contiguous.

use std::path::Path;

use pretty_assertions::assert_eq;

use rvext_core::config::{Config, EmitConfig};
use rvext_core::emit::header;
use rvext_core::patch::anchor;

use crate::common::Workspace;
use crate::common::fixtures::{EXTENSION, EXTENSION_HEADER};

#[test]
fn test_header_matches_fixture() {
    let text = header::emit_header(EXTENSION, Path::new("ext.txt"), &EmitConfig::default())
        .unwrap();
    assert_eq!(text, EXTENSION_HEADER);
}

#[test]
fn test_header_regions_are_locatable() {
    let config = Config::default();
    let text = header::emit_header(EXTENSION, Path::new("ext.txt"), &config.emit).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    let constants = anchor::locate(&lines, &config.patch.constants_anchor().patched).unwrap();
    assert_eq!((constants.first, constants.last), (0, 9));

    let declarations =
        anchor::locate(&lines, &config.patch.declarations_anchor().patched).unwrap();
    assert_eq!(declarations.line_count(), 5);
}

#[test]
fn test_empty_extension_header() {
    let text = header::emit_header("", Path::new("ext.txt"), &EmitConfig::default()).unwrap();
    assert_eq!(text, "\n#ifdef DECLARE_INSN\n#endif\n");
}

#[test]
fn test_write_header() {
    let ws = Workspace::new();
    let ext = ws.write("ext.txt", EXTENSION);
    let written =
        header::write_header(&ext, &ws.path("riscv-opc-ss.h"), &EmitConfig::default()).unwrap();
    assert_eq!(ws.read("riscv-opc-ss.h"), written);
}
