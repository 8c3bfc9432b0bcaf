//! Instruction Descriptors.
//!
//! A descriptor is one line of an extension description:
//!
//! ```text
//! mnemonic format operands opcode_hi opcode_lo funct3
//! ss_cfg_param I rs1,rs2,imm 1 2 3   # comment
//! ```
//!
//! `operands` is a comma separated subset of `rd,rs1,rs2,imm`, or `-` for none.
//! Everything from `#` to the end of a line is a comment.

use std::fmt;
use std::str::FromStr;

use crate::common::constants::{COMMENT_MARKER, DESCRIPTOR_TOKENS, FUNCT3_MAX, NO_OPERANDS};
use crate::common::error::DescriptorError;
use crate::isa::format::{Format, Operand, OperandSet};
use crate::isa::opcodes::CustomOpcode;

/// A custom instruction as declared in an extension description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Assembler mnemonic.
    pub mnemonic: String,
    /// Encoding format.
    pub format: Format,
    /// Declared operands.
    pub operands: OperandSet,
    /// Custom opcode slot.
    pub opcode: CustomOpcode,
    /// funct3 selector, at most 3 bits.
    pub funct3: u8,
}

impl Descriptor {
    /// Builds a descriptor, checking the funct3 range.
    ///
    /// # Errors
    ///
    /// [`DescriptorError::Funct3OutOfRange`] if `funct3` does not fit in 3 bits.
    pub fn new(
        mnemonic: impl Into<String>,
        format: Format,
        operands: OperandSet,
        opcode: CustomOpcode,
        funct3: u8,
    ) -> Result<Self, DescriptorError> {
        if funct3 > FUNCT3_MAX {
            return Err(DescriptorError::Funct3OutOfRange(funct3));
        }
        Ok(Self {
            mnemonic: mnemonic.into(),
            format,
            operands,
            opcode,
            funct3,
        })
    }

    /// Upper opcode selector.
    pub const fn opcode_hi(&self) -> u8 {
        self.opcode.hi()
    }

    /// Lower opcode selector.
    pub const fn opcode_lo(&self) -> u8 {
        self.opcode.lo()
    }

    /// Mnemonic as a C/TableGen identifier: upper case with `.` replaced by `_`.
    pub fn symbol(&self) -> String {
        self.mnemonic.to_ascii_uppercase().replace('.', "_")
    }
}

impl FromStr for Descriptor {
    type Err = DescriptorError;

    /// Parses a comment-free, non-blank descriptor line.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [mnemonic, format, operands, hi, lo, funct3] = tokens[..] else {
            return Err(DescriptorError::TokenCount {
                expected: DESCRIPTOR_TOKENS,
                found: tokens.len(),
            });
        };

        let format = format.parse::<Format>()?;
        let operands = parse_operands(operands)?;
        let opcode = CustomOpcode::from_pair(
            parse_number("opcode_hi", hi)?,
            parse_number("opcode_lo", lo)?,
        )?;
        let funct3 = parse_number("funct3", funct3)?;

        Self::new(mnemonic, format, operands, opcode, funct3)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.mnemonic,
            self.format,
            self.operands,
            self.opcode_hi(),
            self.opcode_lo(),
            self.funct3
        )
    }
}

/// Removes a trailing comment and surrounding whitespace from `line`.
pub fn strip_comment(line: &str) -> &str {
    line.split_once(COMMENT_MARKER)
        .map_or(line, |(code, _)| code)
        .trim()
}

/// Parses a comma separated operand list.
///
/// # Errors
///
/// [`DescriptorError::UnknownOperand`] for a name outside `rd,rs1,rs2,imm`, and
/// [`DescriptorError::DuplicateOperand`] when a name repeats.
pub fn parse_operands(list: &str) -> Result<OperandSet, DescriptorError> {
    if list == NO_OPERANDS {
        return Ok(OperandSet::EMPTY);
    }

    let mut set = OperandSet::EMPTY;
    for name in list.split(',') {
        let operand = name.parse::<Operand>()?;
        if !set.insert(operand) {
            return Err(DescriptorError::DuplicateOperand(operand));
        }
    }
    Ok(set)
}

fn parse_number(field: &'static str, token: &str) -> Result<u8, DescriptorError> {
    token.parse().map_err(|_| DescriptorError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}
