//! Custom Opcode Slots.
//!
//! RISC-V reserves four major opcodes for vendor extensions. Descriptors name a slot by
//! its two-part selector: the upper selector is opcode bits 6..5 and the lower selector
//! is opcode bits 4..2. Bits 1..0 are always `11`.

use std::fmt;

use crate::common::constants::STANDARD_LENGTH_MARKER;
use crate::common::error::DescriptorError;

/// custom-0 major opcode.
pub const OP_CUSTOM_0: u32 = 0b0001011;

/// custom-1 major opcode.
pub const OP_CUSTOM_1: u32 = 0b0101011;

/// custom-2 major opcode (reserved for RV128 in the base ISA).
pub const OP_CUSTOM_2: u32 = 0b1011011;

/// custom-3 major opcode (reserved for RV128 in the base ISA).
pub const OP_CUSTOM_3: u32 = 0b1111011;

/// One of the four custom opcode slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomOpcode {
    /// Selector (0, 2).
    Custom0,
    /// Selector (1, 2).
    Custom1,
    /// Selector (2, 6).
    Custom2,
    /// Selector (3, 6).
    Custom3,
}

impl CustomOpcode {
    /// Every slot, ordered by slot index.
    pub const ALL: [Self; 4] = [Self::Custom0, Self::Custom1, Self::Custom2, Self::Custom3];

    /// Looks up the slot selected by `(hi, lo)`.
    ///
    /// # Errors
    ///
    /// [`DescriptorError::UnknownOpcode`] if the pair names no custom slot.
    pub fn from_pair(hi: u8, lo: u8) -> Result<Self, DescriptorError> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.pair() == (hi, lo))
            .ok_or(DescriptorError::UnknownOpcode { hi, lo })
    }

    /// The `(hi, lo)` selector of the slot.
    pub const fn pair(self) -> (u8, u8) {
        match self {
            Self::Custom0 => (0, 2),
            Self::Custom1 => (1, 2),
            Self::Custom2 => (2, 6),
            Self::Custom3 => (3, 6),
        }
    }

    /// Upper selector (opcode bits 6..5).
    pub const fn hi(self) -> u8 {
        self.pair().0
    }

    /// Lower selector (opcode bits 4..2).
    pub const fn lo(self) -> u8 {
        self.pair().1
    }

    /// Slot index, as used in `OPC_CUSTOM_<n>`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The full 7-bit major opcode.
    pub const fn major(self) -> u32 {
        ((self.hi() as u32) << 5) | ((self.lo() as u32) << 2) | STANDARD_LENGTH_MARKER
    }
}

impl fmt::Display for CustomOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "custom-{}", self.index())
    }
}
