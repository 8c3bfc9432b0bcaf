//! Error definitions.
//!
//! This module defines the failure taxonomy of the generator. It provides:
//! 1. **Descriptor Errors:** Malformed instruction lines and unknown opcode selectors.
//! 2. **Anchor Errors:** Ambiguous or missing anchor regions in toolchain sources.
//! 3. **Crate Error:** File-attributed wrapper used by every file-level operation.
//!
//! None of these are recoverable: generated toolchain source is either correct or not
//! written at all, so callers propagate them with `?` up to the process boundary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::isa::format::{Format, Operand};

/// A single instruction descriptor line could not be turned into an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The line does not split into the expected number of whitespace separated tokens.
    #[error("expected {expected} whitespace separated tokens, found {found}")]
    TokenCount {
        /// Required token count.
        expected: usize,
        /// Token count actually present.
        found: usize,
    },

    /// The format token is not one of the supported encodings.
    #[error("unknown instruction format `{0}` (expected I, S or U)")]
    UnknownFormat(String),

    /// The operand list names something other than `rd`, `rs1`, `rs2` or `imm`.
    #[error("unknown operand `{0}` (expected rd, rs1, rs2 or imm)")]
    UnknownOperand(String),

    /// The operand list names the same operand twice.
    #[error("operand `{0}` listed more than once")]
    DuplicateOperand(Operand),

    /// A numeric selector token is not a decimal integer in range.
    #[error("invalid {field} `{value}`")]
    InvalidNumber {
        /// Name of the selector being parsed.
        field: &'static str,
        /// Offending token.
        value: String,
    },

    /// The funct3 selector does not fit in three bits.
    #[error("funct3 value {0} does not fit in 3 bits")]
    Funct3OutOfRange(u8),

    /// The operand has no field in the requested format.
    #[error("operand `{operand}` has no field in {format}-format")]
    OperandNotEncodable {
        /// Declared instruction format.
        format: Format,
        /// Operand without a home in that format.
        operand: Operand,
    },

    /// The immediate of the format occupies the funct3 bits, so funct3 must be zero.
    #[error("{format}-format immediate occupies funct3, which must be 0 (found {funct3})")]
    Funct3Shadowed {
        /// Declared instruction format.
        format: Format,
        /// Non-zero funct3 that cannot be encoded.
        funct3: u8,
    },

    /// The opcode pair is not one of the custom opcode slots.
    #[error("opcode selector ({hi}, {lo}) is not a custom opcode slot")]
    UnknownOpcode {
        /// Upper selector (opcode bits 6..5).
        hi: u8,
        /// Lower selector (opcode bits 4..2).
        lo: u8,
    },

    /// The backend emitter has no operand class for this format's immediate.
    #[error("{0}-format immediates are not supported by the backend definition emitter")]
    UnsupportedImmediate(Format),

    /// The backend emitter was asked for an implicit destination on an instruction listing `rd`.
    #[error("`rd` is listed but the destination register mode is implicit")]
    ImplicitDestination,
}

/// An anchor region could not be identified unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    /// No line satisfies the anchor predicate.
    #[error("no line matches anchor {anchor}")]
    Empty {
        /// Description of the predicate.
        anchor: String,
    },

    /// Lines satisfying the predicate are separated by non-matching lines.
    #[error(
        "anchor {anchor} matches {count} lines spread over lines {}..={}; matches must be contiguous",
        .first + 1,
        .last + 1
    )]
    NonContiguous {
        /// Description of the predicate.
        anchor: String,
        /// Zero-based index of the first match.
        first: usize,
        /// Zero-based index of the last match.
        last: usize,
        /// Number of matching lines.
        count: usize,
    },

    /// A patched line starts with the anchor keyword but lies outside the anchor region,
    /// so splicing would drop it.
    #[error("line {} starts with `{keyword}` but is outside anchor {anchor}", .line + 1)]
    Unanchored {
        /// Description of the predicate.
        anchor: String,
        /// Keyword the stray line starts with.
        keyword: String,
        /// Zero-based index of the stray line.
        line: usize,
    },

    /// No line contains the structural marker.
    #[error("marker `{marker}` not found")]
    MarkerNotFound {
        /// The marker token searched for.
        marker: String,
    },

    /// The line following the marker is not the expected opening brace.
    #[error("line {} after marker `{marker}` is not an opening brace", .line + 1)]
    MissingBrace {
        /// The marker token that was found.
        marker: String,
        /// Zero-based index of the line that should hold the brace.
        line: usize,
    },
}

/// Errors returned by file-level operations of this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A descriptor line of an extension description failed to parse or compile.
    #[error("{}:{line}: {source}", .path.display())]
    Line {
        /// Extension description file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Underlying failure.
        #[source]
        source: DescriptorError,
    },

    /// Anchor splicing failed while patching `target` from `patched`.
    #[error("patching {} from {}: {source}", .target.display(), .patched.display())]
    Anchor {
        /// File being patched.
        target: PathBuf,
        /// File supplying the replacement text.
        patched: PathBuf,
        /// Underlying failure.
        #[source]
        source: AnchorError,
    },

    /// Reading or writing a file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A JSON configuration document was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Builds a closure attaching `path` to an I/O failure, for use with `map_err`.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result type used by file-level operations.
pub type Result<T> = std::result::Result<T, Error>;
