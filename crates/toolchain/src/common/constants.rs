//! Global Encoding Constants.
//!
//! This module defines encoding constants shared by the field tables and emitters. It includes:
//! 1. **Instruction Constants:** Width of a standard instruction and the mask covering it.
//! 2. **Opcode Constants:** Bit ranges of the two-part custom opcode selector.
//! 3. **Field Constants:** Maximum values accepted for selector fields.

/// Width of a standard (uncompressed) RISC-V instruction in bits.
pub const INSTRUCTION_WIDTH: u32 = 32;

/// Mask with one bit set for every bit of a standard instruction.
pub const INSTRUCTION_MASK: u32 = u32::MAX >> (u32::BITS - INSTRUCTION_WIDTH);

/// Value of bits 1..0 marking a 32-bit (non-compressed) instruction.
pub const STANDARD_LENGTH_MARKER: u32 = 0b11;

/// Highest bit of the funct3 field.
pub const FUNCT3_HI: u32 = 14;

/// Lowest bit of the funct3 field.
pub const FUNCT3_LO: u32 = 12;

/// Largest value representable in funct3.
pub const FUNCT3_MAX: u8 = 0b111;

/// Highest bit of the upper opcode selector (opcode bits 6..5).
pub const OPCODE_HI_HI: u32 = 6;

/// Lowest bit of the upper opcode selector.
pub const OPCODE_HI_LO: u32 = 5;

/// Highest bit of the lower opcode selector (opcode bits 4..2).
pub const OPCODE_LO_HI: u32 = 4;

/// Lowest bit of the lower opcode selector.
pub const OPCODE_LO_LO: u32 = 2;

/// Highest bit of the instruction length marker.
pub const LENGTH_MARKER_HI: u32 = 1;

/// Lowest bit of the instruction length marker.
pub const LENGTH_MARKER_LO: u32 = 0;

/// Character introducing a comment in extension description files.
pub const COMMENT_MARKER: char = '#';

/// Number of whitespace separated tokens in an instruction descriptor line.
pub const DESCRIPTOR_TOKENS: usize = 6;

/// Operand list token denoting an instruction without operands.
pub const NO_OPERANDS: &str = "-";
