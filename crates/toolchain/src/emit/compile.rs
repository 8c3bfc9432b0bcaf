//! Instruction Compiler.
//!
//! Turns one [`Descriptor`] into the two records the binutils sources need:
//! 1. **Encoding record:** ordered `field` / `hi..lo=value` constraints consumed by the
//!    opcode table generator.
//! 2. **Assembler record:** mnemonic, operand letters, and match/mask words for the
//!    `riscv_opcodes[]` table.
//!
//! Field order is fixed: rd, rs1, rs2, imm, funct3, opcode bits 6..5, opcode bits 4..2,
//! then the `1..0=3` length marker. The table generator reads constraints positionally,
//! so reordering them produces a different encoding table.

use std::fmt;

use crate::common::constants::{
    INSTRUCTION_MASK, LENGTH_MARKER_HI, LENGTH_MARKER_LO, OPCODE_HI_HI, OPCODE_HI_LO,
    OPCODE_LO_HI, OPCODE_LO_LO, STANDARD_LENGTH_MARKER,
};
use crate::common::error::DescriptorError;
use crate::config::EmitConfig;
use crate::isa::descriptor::Descriptor;
use crate::isa::format::{self, BitRange, Field, FieldSpec, Operand};

/// Bits of the upper opcode selector.
const OPCODE_HI: BitRange = BitRange::new(OPCODE_HI_HI, OPCODE_HI_LO);

/// Bits of the lower opcode selector.
const OPCODE_LO: BitRange = BitRange::new(OPCODE_LO_HI, OPCODE_LO_LO);

/// Bits of the instruction length marker.
const LENGTH_MARKER: BitRange = BitRange::new(LENGTH_MARKER_HI, LENGTH_MARKER_LO);

/// What a field of the encoding record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// Bits supplied by the named operand at assembly time.
    Operand(&'static str),
    /// Bits fixed to a literal value.
    Literal(u32),
}

/// One constraint of an encoding record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAssignment {
    /// Bits constrained.
    pub range: BitRange,
    /// Operand or literal occupying them.
    pub value: FieldValue,
}

impl FieldAssignment {
    /// Binds the bits of `field` to its operand.
    pub const fn operand(field: &Field) -> Self {
        Self {
            range: field.range,
            value: FieldValue::Operand(field.name),
        }
    }

    /// Fixes `range` to `value`.
    pub const fn literal(range: BitRange, value: u32) -> Self {
        Self {
            range,
            value: FieldValue::Literal(value),
        }
    }

    /// Whether the constraint is a literal.
    pub const fn is_literal(&self) -> bool {
        matches!(self.value, FieldValue::Literal(_))
    }
}

impl fmt::Display for FieldAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            FieldValue::Operand(name) => f.write_str(name),
            FieldValue::Literal(value) => write!(f, "{}={}", self.range, value),
        }
    }
}

/// How the fields of a record cover the instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    /// Bits covered by at least one field.
    pub covered: u32,
    /// Bits covered by more than one field.
    pub overlapping: u32,
}

impl Coverage {
    /// Whether every bit is covered exactly once.
    pub const fn is_exact(self) -> bool {
        self.covered == INSTRUCTION_MASK && self.overlapping == 0
    }
}

/// Ordered encoding constraints of one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingRecord {
    /// Assembler mnemonic.
    pub mnemonic: String,
    /// Constraints in emission order.
    pub fields: Vec<FieldAssignment>,
}

impl EncodingRecord {
    /// Mask of every literal bit.
    pub fn mask(&self) -> u32 {
        self.fields
            .iter()
            .filter(|field| field.is_literal())
            .fold(0, |mask, field| mask | field.range.mask())
    }

    /// Literal bits placed at their positions; operand bits are zero.
    pub fn match_value(&self) -> u32 {
        self.fields
            .iter()
            .fold(0, |word, field| match field.value {
                FieldValue::Literal(value) => word | (value << field.range.lo),
                FieldValue::Operand(_) => word,
            })
    }

    /// Computes how the fields cover the 32 instruction bits.
    pub fn coverage(&self) -> Coverage {
        self.fields.iter().fold(
            Coverage {
                covered: 0,
                overlapping: 0,
            },
            |acc, field| {
                let bits = field.range.mask();
                Coverage {
                    covered: acc.covered | bits,
                    overlapping: acc.overlapping | (acc.covered & bits),
                }
            },
        )
    }

    /// Operand fields of the record, in emission order.
    pub fn operand_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter_map(|field| match field.value {
            FieldValue::Operand(name) => Some(name),
            FieldValue::Literal(_) => None,
        })
    }
}

impl fmt::Display for EncodingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic)?;
        for field in &self.fields {
            write!(f, " {field}")?;
        }
        Ok(())
    }
}

/// Entry of the assembler opcode table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmRecord {
    /// Assembler mnemonic.
    pub mnemonic: String,
    /// Identifier form of the mnemonic used in symbol names.
    pub symbol: String,
    /// Operand letters in canonical order (`d`, `s`, `t`, immediate letter).
    pub letters: Vec<char>,
    /// Literal bits of the encoding.
    pub match_value: u32,
    /// Mask of the literal bits.
    pub mask: u32,
}

impl AsmRecord {
    /// Operand letters as one string, e.g. `"sj"`.
    pub fn operand_letters(&self) -> String {
        self.letters.iter().collect()
    }

    /// Operand string as the assembler's operand parser reads it, e.g. `"s,j"`.
    pub fn operand_string(&self) -> String {
        let letters: Vec<String> = self.letters.iter().map(char::to_string).collect();
        letters.join(",")
    }

    /// Name of the match constant, e.g. `MATCH_SS_CFG`.
    pub fn match_symbol(&self, config: &EmitConfig) -> String {
        format!("{}{}", config.match_prefix, self.symbol)
    }

    /// Name of the mask constant, e.g. `MASK_SS_CFG`.
    pub fn mask_symbol(&self, config: &EmitConfig) -> String {
        format!("{}{}", config.mask_prefix, self.symbol)
    }

    /// Renders the `riscv_opcodes[]` initializer line.
    ///
    /// The match symbol fills both the match and the mask column, and every padded
    /// column keeps the widths of the existing generated tables.
    pub fn render(&self, config: &EmitConfig) -> String {
        let symbol = pad(&self.match_symbol(config), config.symbol_width);

        let mut columns = vec![pad(&format!("\"{}\"", self.mnemonic), config.mnemonic_width)];
        if !config.insn_class.is_empty() {
            columns.push(config.insn_class.clone());
        }
        columns.push(pad(
            &format!("\"{}\"", self.operand_string()),
            config.operands_width,
        ));
        columns.push(symbol.clone());
        columns.push(symbol);
        columns.push(config.match_func.clone());
        columns.push("0".to_string());

        format!("{{{}}},", columns.join(", "))
    }
}

/// Both records of one compiled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    /// Encoding constraints.
    pub encoding: EncodingRecord,
    /// Assembler table entry.
    pub asm: AsmRecord,
}

/// Compiles one descriptor into its encoding and assembler records.
///
/// # Arguments
///
/// * `descriptor` - Instruction to compile.
///
/// # Errors
///
/// * [`DescriptorError::OperandNotEncodable`] if an operand has no field in the format.
/// * [`DescriptorError::Funct3Shadowed`] if the immediate owns the funct3 bits and
///   funct3 is not zero.
pub fn compile(descriptor: &Descriptor) -> Result<Compiled, DescriptorError> {
    let format = descriptor.format;
    let mut fields = Vec::with_capacity(Operand::CANONICAL.len() + 5);

    for operand in Operand::CANONICAL {
        match format::field_for(format, operand, descriptor.operands.contains(operand))? {
            FieldSpec::Variable(vars) => fields.extend(vars.iter().map(FieldAssignment::operand)),
            FieldSpec::Fixed(zeros) => fields.extend(
                zeros
                    .iter()
                    .map(|range| FieldAssignment::literal(*range, 0)),
            ),
            FieldSpec::Omitted => {}
        }
    }

    match format.funct3_range(descriptor.operands) {
        Some(range) => fields.push(FieldAssignment::literal(
            range,
            u32::from(descriptor.funct3),
        )),
        None if descriptor.funct3 != 0 => {
            return Err(DescriptorError::Funct3Shadowed {
                format,
                funct3: descriptor.funct3,
            });
        }
        None => {}
    }

    fields.push(FieldAssignment::literal(
        OPCODE_HI,
        u32::from(descriptor.opcode_hi()),
    ));
    fields.push(FieldAssignment::literal(
        OPCODE_LO,
        u32::from(descriptor.opcode_lo()),
    ));
    fields.push(FieldAssignment::literal(
        LENGTH_MARKER,
        STANDARD_LENGTH_MARKER,
    ));

    let encoding = EncodingRecord {
        mnemonic: descriptor.mnemonic.clone(),
        fields,
    };
    let asm = AsmRecord {
        mnemonic: descriptor.mnemonic.clone(),
        symbol: descriptor.symbol(),
        letters: descriptor
            .operands
            .iter()
            .map(|operand| operand.letter(format))
            .collect(),
        match_value: encoding.match_value(),
        mask: encoding.mask(),
    };

    tracing::debug!(
        mnemonic = %descriptor.mnemonic,
        %format,
        slot = %descriptor.opcode,
        match_value = format_args!("{:#010x}", asm.match_value),
        mask = format_args!("{:#010x}", asm.mask),
        "compiled instruction"
    );

    Ok(Compiled { encoding, asm })
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}
