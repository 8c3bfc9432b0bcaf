//! Text Emitters.
//!
//! Everything that turns descriptors into toolchain source text lives here.
//!
//! # Modules
//!
//! * `compile`: Instruction Compiler producing encoding and assembler records.
//! * `batch`: Extension-wide table generation and file output.
//! * `header`: Match/mask header consumed by the splicer.
//! * `tablegen`: Compiler backend instruction definitions.

/// Extension-wide encoding and assembler tables.
pub mod batch;

/// Descriptor to record compilation.
pub mod compile;

/// Match/mask C header generation.
pub mod header;

/// TableGen instruction definitions.
pub mod tablegen;

pub use batch::{Entry, Tables};
pub use compile::{AsmRecord, Compiled, EncodingRecord, compile};
pub use tablegen::RdMode;
