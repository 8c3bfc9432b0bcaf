//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the data the emitters are driven by, organized by concern.
//!
//! # Modules
//!
//! * `format`: Operand-to-field rules for the I, S and U encodings.
//! * `opcodes`: The four custom opcode slots and their two-part selectors.
//! * `descriptor`: Parsed instruction lines of an extension description.

/// Instruction descriptors and the extension description line syntax.
pub mod descriptor;

/// Field layout rules for every (format, operand) pair.
pub mod format;

/// Custom opcode slot definitions.
pub mod opcodes;

pub use descriptor::Descriptor;
pub use format::{BitRange, Field, FieldSpec, Format, Operand, OperandSet};
pub use opcodes::CustomOpcode;
