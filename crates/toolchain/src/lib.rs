//! RISC-V custom instruction toolchain generator.
//!
//! This crate turns a plain-text description of custom instructions into the source
//! fragments a GNU binutils and LLVM toolchain need, and patches them into place:
//! 1. **ISA:** Descriptor parsing, format layout rules, and custom opcode slots.
//! 2. **Emitters:** Encoding tables, assembler opcode tables, match/mask headers, and
//!    TableGen definitions.
//! 3. **Patching:** Anchor-delimited splicing of generated text into toolchain sources.
//!
//! ```
//! use rvext_core::emit::compile;
//! use rvext_core::isa::Descriptor;
//!
//! let descriptor: Descriptor = "csrw I rs1,imm 1 2 3".parse().unwrap();
//! let compiled = compile(&descriptor).unwrap();
//! assert_eq!(
//!     compiled.encoding.to_string(),
//!     "csrw 11..7=0 rs1 imm12 14..12=3 6..5=1 4..2=2 1..0=3"
//! );
//! assert_eq!(compiled.asm.operand_letters(), "sj");
//! ```

/// Common types and constants (errors, file helpers, bit positions).
pub mod common;
/// Output formatting and anchor marker configuration.
pub mod config;
/// Generators for toolchain source text.
pub mod emit;
/// Instruction descriptors, formats, and opcode slots.
pub mod isa;
/// Anchor splicing into existing toolchain sources.
pub mod patch;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate error type and result alias.
pub use crate::common::{Error, Result};
