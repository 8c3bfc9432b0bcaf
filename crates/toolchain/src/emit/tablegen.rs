//! Backend-Definition Emitter.
//!
//! Produces one TableGen instruction definition per descriptor for the compiler
//! backend. Present operands become typed placeholders in canonical order: register
//! operands use the `GPR` class and the I/S-format immediate uses `simm12`.
//!
//! The destination register is handled in one of two explicit modes:
//! 1. **Implicit:** `rd` is pinned to zero by a `let` binding and never printed. Used for
//!    side-effecting instructions that produce no value.
//! 2. **Printed:** `rd` is an output operand and leads the printed operand string.

use std::fmt;
use std::path::Path;

use crate::common::error::{self, DescriptorError, Error};
use crate::common::files;
use crate::config::TableGenConfig;
use crate::emit::batch;
use crate::isa::descriptor::Descriptor;
use crate::isa::format::{self, Format, Operand, OperandRule};

/// Indentation of the continuation lines of a definition.
const CONTINUATION: &str = "                    ";

/// Attributes shared by every definition.
const SIDE_EFFECTS: &str = "hasSideEffects = 1, mayLoad = 1, mayStore = 1";

/// How the destination register appears in a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdMode {
    /// `rd` is bound to zero and not printed.
    Implicit,
    /// `rd` is an output operand printed first.
    Printed,
}

impl fmt::Display for RdMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implicit => f.write_str("implicit"),
            Self::Printed => f.write_str("printed"),
        }
    }
}

/// Operand class of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandClass {
    /// General purpose register.
    Gpr,
    /// Signed 12-bit immediate.
    Simm12,
}

impl OperandClass {
    /// Class name in the target description.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gpr => "GPR",
            Self::Simm12 => "simm12",
        }
    }
}

/// Class of `operand` in `format`.
///
/// # Errors
///
/// [`DescriptorError::UnsupportedImmediate`] for a U-format immediate.
pub const fn operand_class(format: Format, operand: Operand) -> Result<OperandClass, DescriptorError> {
    match (operand, format) {
        (Operand::Rd | Operand::Rs1 | Operand::Rs2, _) => Ok(OperandClass::Gpr),
        (Operand::Imm, Format::I | Format::S) => Ok(OperandClass::Simm12),
        (Operand::Imm, Format::U) => Err(DescriptorError::UnsupportedImmediate(format)),
    }
}

const fn placeholder(operand: Operand) -> &'static str {
    match operand {
        Operand::Rd => "$rd",
        Operand::Rs1 => "$rs1",
        Operand::Rs2 => "$rs2",
        Operand::Imm => "$imm12",
    }
}

fn dag(kind: &str, operands: &[(OperandClass, Operand)]) -> String {
    let typed: Vec<String> = operands
        .iter()
        .map(|(class, operand)| format!("{}:{}", class.name(), placeholder(*operand)))
        .collect();
    if typed.is_empty() {
        format!("({kind})")
    } else {
        format!("({kind} {})", typed.join(", "))
    }
}

/// Renders the definition of one descriptor, including the trailing blank line.
///
/// # Arguments
///
/// * `descriptor` - Instruction to define.
/// * `mode` - Destination register handling.
/// * `config` - Scheduling resources.
///
/// # Errors
///
/// * [`DescriptorError::ImplicitDestination`] if `mode` is implicit and `rd` is listed.
/// * [`DescriptorError::UnsupportedImmediate`] for a U-format immediate.
/// * [`DescriptorError::OperandNotEncodable`] if an operand has no field in the format.
pub fn definition(
    descriptor: &Descriptor,
    mode: RdMode,
    config: &TableGenConfig,
) -> Result<String, DescriptorError> {
    let format = descriptor.format;
    if let Some(operand) = descriptor
        .operands
        .iter()
        .find(|op| format::rule(format, *op) == OperandRule::NotEncoded)
    {
        return Err(DescriptorError::OperandNotEncodable { format, operand });
    }
    if mode == RdMode::Implicit && descriptor.operands.contains(Operand::Rd) {
        return Err(DescriptorError::ImplicitDestination);
    }

    let mut outs = Vec::new();
    let mut ins = Vec::new();
    for operand in descriptor.operands.iter() {
        let class = operand_class(format, operand)?;
        if operand == Operand::Rd {
            outs.push((class, operand));
        } else {
            ins.push((class, operand));
        }
    }

    let printed: Vec<&str> = outs
        .iter()
        .chain(&ins)
        .map(|(_, operand)| placeholder(*operand))
        .collect();

    let binding = match mode {
        RdMode::Implicit => format!("let rd = 0, {SIDE_EFFECTS} in"),
        RdMode::Printed => format!("let {SIDE_EFFECTS} in"),
    };

    Ok(format!(
        "{binding}\n\
         def {name} : RVInst{format}<{funct3}, OPC_CUSTOM_{slot},\n\
         {CONTINUATION}{outs},\n\
         {CONTINUATION}{ins},\n\
         {CONTINUATION}\"{mnemonic}\", \"{operands}\",\n\
         {CONTINUATION}Sched<[{read}, {write}]>;\n\n",
        name = descriptor.symbol(),
        funct3 = descriptor.funct3,
        slot = descriptor.opcode.index(),
        outs = dag("outs", &outs),
        ins = dag("ins", &ins),
        mnemonic = descriptor.mnemonic,
        operands = printed.join(", "),
        read = config.sched_read,
        write = config.sched_write,
    ))
}

/// Renders the definitions of every descriptor in an extension description.
///
/// # Errors
///
/// [`Error::Line`] for the first line that fails to parse or cannot be defined.
pub fn emit_definitions(
    text: &str,
    origin: &Path,
    mode: RdMode,
    config: &TableGenConfig,
) -> error::Result<String> {
    let entries = batch::parse_extension(text, origin)?;
    let mut out = String::new();
    for entry in &entries {
        let block = definition(&entry.descriptor, mode, config).map_err(|source| Error::Line {
            path: origin.to_path_buf(),
            line: entry.line,
            source,
        })?;
        out.push_str(&block);
    }
    tracing::debug!(
        origin = %origin.display(),
        %mode,
        definitions = entries.len(),
        "rendered backend definitions"
    );
    Ok(out)
}

/// Renders the definitions of an extension description file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read, or [`Error::Line`] for a bad line.
pub fn emit_definitions_file(path: &Path, mode: RdMode, config: &TableGenConfig) -> error::Result<String> {
    let text = files::read_text(path)?;
    emit_definitions(&text, path, mode, config)
}
