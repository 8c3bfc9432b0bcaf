//! Instruction Format Rules.
//!
//! Maps every (format, operand) pair of the supported encodings to the bit fields the
//! operand occupies. The table is a closed `match` without a wildcard arm, so adding a
//! format or an operand fails to compile until every rule for it is written.
//!
//! Layouts produced by these rules (bit 31 on the left):
//!
//! ```text
//! I: imm12[31:20]              | rs1[19:15] | funct3[14:12] | rd[11:7]      | opcode
//! S: imm12hi[31:25] | rs2[24:20] | rs1[19:15] | funct3[14:12] | imm12lo[11:7] | opcode
//! U: imm20[31:12]                                            | rd[11:7]      | opcode
//! ```
//!
//! A U-format instruction without an immediate keeps funct3 and fixes bits 31..15 to zero.

use std::fmt;
use std::str::FromStr;

use crate::common::constants::{FUNCT3_HI, FUNCT3_LO, INSTRUCTION_WIDTH};
use crate::common::error::DescriptorError;

/// Inclusive range of instruction bits, written `hi..lo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRange {
    /// Most significant bit.
    pub hi: u32,
    /// Least significant bit.
    pub lo: u32,
}

impl BitRange {
    /// Creates the range `hi..lo`.
    pub const fn new(hi: u32, lo: u32) -> Self {
        Self { hi, lo }
    }

    /// Number of bits covered.
    pub const fn width(self) -> u32 {
        self.hi - self.lo + 1
    }

    /// Mask with every bit of the range set.
    pub const fn mask(self) -> u32 {
        let ones = if self.width() >= INSTRUCTION_WIDTH {
            u32::MAX
        } else {
            (1 << self.width()) - 1
        };
        ones << self.lo
    }

    /// Whether `value` fits in the range.
    pub const fn fits(self, value: u32) -> bool {
        self.width() >= INSTRUCTION_WIDTH || value >> self.width() == 0
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hi == self.lo {
            write!(f, "{}", self.hi)
        } else {
            write!(f, "{}..{}", self.hi, self.lo)
        }
    }
}

/// A named operand field as understood by the encoding table generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// Field name (`rd`, `imm12hi`, ...).
    pub name: &'static str,
    /// Bits the field occupies.
    pub range: BitRange,
}

/// Destination register.
pub const RD: Field = Field {
    name: "rd",
    range: BitRange::new(11, 7),
};
/// First source register.
pub const RS1: Field = Field {
    name: "rs1",
    range: BitRange::new(19, 15),
};
/// Second source register.
pub const RS2: Field = Field {
    name: "rs2",
    range: BitRange::new(24, 20),
};
/// I-type 12-bit immediate.
pub const IMM12: Field = Field {
    name: "imm12",
    range: BitRange::new(31, 20),
};
/// S-type immediate, bits 11:5.
pub const IMM12_HI: Field = Field {
    name: "imm12hi",
    range: BitRange::new(31, 25),
};
/// S-type immediate, bits 4:0.
pub const IMM12_LO: Field = Field {
    name: "imm12lo",
    range: BitRange::new(11, 7),
};
/// U-type 20-bit immediate.
pub const IMM20: Field = Field {
    name: "imm20",
    range: BitRange::new(31, 12),
};

/// Bits of the funct3 selector.
pub const FUNCT3: BitRange = BitRange::new(FUNCT3_HI, FUNCT3_LO);

/// Bits left zero by a U-format instruction that has no immediate.
const U_IMM_ZERO: BitRange = BitRange::new(31, 15);

/// Base instruction encodings supported by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-immediate format.
    I,
    /// Store format, immediate split around the register fields.
    S,
    /// Upper-immediate format.
    U,
}

impl Format {
    /// Every supported format.
    pub const ALL: [Self; 3] = [Self::I, Self::S, Self::U];

    /// Single-letter tag used in descriptor files and backend class names.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::S => "S",
            Self::U => "U",
        }
    }

    /// Assembler operand letter for this format's immediate.
    pub const fn immediate_letter(self) -> char {
        match self {
            Self::U => 'u',
            Self::I => 'j',
            Self::S => 'q',
        }
    }

    /// Bits of funct3 for an instruction of this format with `operands`.
    ///
    /// Returns `None` when the immediate already owns bits 14..12.
    pub fn funct3_range(self, operands: OperandSet) -> Option<BitRange> {
        match self {
            Self::U if operands.contains(Operand::Imm) => None,
            Self::I | Self::S | Self::U => Some(FUNCT3),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Format {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Self::I),
            "S" => Ok(Self::S),
            "U" => Ok(Self::U),
            other => Err(DescriptorError::UnknownFormat(other.to_string())),
        }
    }
}

/// Operands an instruction may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operand {
    /// Destination register.
    Rd,
    /// First source register.
    Rs1,
    /// Second source register.
    Rs2,
    /// Immediate.
    Imm,
}

impl Operand {
    /// Canonical operand order; field lists and operand strings always follow it.
    pub const CANONICAL: [Self; 4] = [Self::Rd, Self::Rs1, Self::Rs2, Self::Imm];

    /// Name used in descriptor files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rd => "rd",
            Self::Rs1 => "rs1",
            Self::Rs2 => "rs2",
            Self::Imm => "imm",
        }
    }

    /// Assembler operand letter (`d`, `s`, `t`, or the format's immediate letter).
    pub const fn letter(self, format: Format) -> char {
        match self {
            Self::Rd => 'd',
            Self::Rs1 => 's',
            Self::Rs2 => 't',
            Self::Imm => format.immediate_letter(),
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operand {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CANONICAL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| DescriptorError::UnknownOperand(s.to_string()))
    }
}

/// Set of operands, iterated in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperandSet(u8);

impl OperandSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns the set with `operand` added.
    #[must_use]
    pub const fn with(self, operand: Operand) -> Self {
        Self(self.0 | operand.bit())
    }

    /// Adds `operand`, returning `false` if it was already present.
    pub const fn insert(&mut self, operand: Operand) -> bool {
        let fresh = !self.contains(operand);
        self.0 |= operand.bit();
        fresh
    }

    /// Whether `operand` is in the set.
    pub const fn contains(self, operand: Operand) -> bool {
        self.0 & operand.bit() != 0
    }

    /// Number of operands in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Operands of the set in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Operand> {
        Operand::CANONICAL
            .into_iter()
            .filter(move |op| self.contains(*op))
    }

    /// Every subset of {rd, rs1, rs2, imm}, including the empty set.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..16u8).map(Self)
    }
}

impl FromIterator<Operand> for OperandSet {
    fn from_iter<T: IntoIterator<Item = Operand>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for OperandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(crate::common::constants::NO_OPERANDS);
        }
        let names: Vec<&str> = self.iter().map(Operand::name).collect();
        f.write_str(&names.join(","))
    }
}

/// How one operand is laid out in one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRule {
    /// The operand has fields in this format; when unused, `zero` is fixed to zero.
    Encoded {
        /// Fields bound to the operand when present.
        fields: &'static [Field],
        /// Bits fixed to zero when the operand is absent.
        zero: &'static [BitRange],
    },
    /// The format has no room for this operand.
    NotEncoded,
}

/// Field layout selected for one operand of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    /// The operand is present and bound to these fields.
    Variable(&'static [Field]),
    /// The operand is absent and these bits are fixed to zero.
    Fixed(&'static [BitRange]),
    /// The operand is absent and the format has no bits for it.
    Omitted,
}

/// Returns the layout rule of `operand` in `format`.
pub const fn rule(format: Format, operand: Operand) -> OperandRule {
    use Format::{I, S, U};
    use Operand::{Imm, Rd, Rs1, Rs2};

    match (format, operand) {
        (I, Rd) => OperandRule::Encoded {
            fields: &[RD],
            zero: &[RD.range],
        },
        (I, Rs1) => OperandRule::Encoded {
            fields: &[RS1],
            zero: &[RS1.range],
        },
        (I, Rs2) => OperandRule::NotEncoded,
        (I, Imm) => OperandRule::Encoded {
            fields: &[IMM12],
            zero: &[IMM12.range],
        },

        (S, Rd) => OperandRule::NotEncoded,
        (S, Rs1) => OperandRule::Encoded {
            fields: &[RS1],
            zero: &[RS1.range],
        },
        (S, Rs2) => OperandRule::Encoded {
            fields: &[RS2],
            zero: &[RS2.range],
        },
        (S, Imm) => OperandRule::Encoded {
            fields: &[IMM12_HI, IMM12_LO],
            zero: &[IMM12_HI.range, IMM12_LO.range],
        },

        (U, Rd) => OperandRule::Encoded {
            fields: &[RD],
            zero: &[RD.range],
        },
        (U, Rs1 | Rs2) => OperandRule::NotEncoded,
        (U, Imm) => OperandRule::Encoded {
            fields: &[IMM20],
            zero: &[U_IMM_ZERO],
        },
    }
}

/// Selects the field layout for `operand` in `format`.
///
/// # Arguments
///
/// * `format` - Instruction format.
/// * `operand` - Operand being laid out.
/// * `present` - Whether the instruction declares the operand.
///
/// # Returns
///
/// The variable fields for a present operand, the zero-filled bits for an absent one,
/// or [`DescriptorError::OperandNotEncodable`] when a present operand has no field.
pub fn field_for(
    format: Format,
    operand: Operand,
    present: bool,
) -> Result<FieldSpec, DescriptorError> {
    match (rule(format, operand), present) {
        (OperandRule::Encoded { fields, .. }, true) => Ok(FieldSpec::Variable(fields)),
        (OperandRule::Encoded { zero, .. }, false) => Ok(FieldSpec::Fixed(zero)),
        (OperandRule::NotEncoded, true) => {
            Err(DescriptorError::OperandNotEncodable { format, operand })
        }
        (OperandRule::NotEncoded, false) => Ok(FieldSpec::Omitted),
    }
}

/// Whether every operand of `operands` has a field in `format`.
pub fn is_encodable(format: Format, operands: OperandSet) -> bool {
    operands
        .iter()
        .all(|op| rule(format, op) != OperandRule::NotEncoded)
}
