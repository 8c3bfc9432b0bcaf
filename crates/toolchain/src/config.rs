//! Configuration system for the extension generator.
//!
//! This module defines the knobs that shape generated text without changing its meaning.
//! It provides:
//! 1. **Defaults:** Column widths and symbol spellings of the existing generated files.
//! 2. **Structures:** Per-emitter configuration for tables, backend definitions, and patching.
//!
//! The CLI always uses `Config::default()`. Library callers may deserialize a JSON
//! document with [`Config::from_json`]; every field is optional.

use serde::Deserialize;

use crate::common::error::Result;
use crate::patch::anchor::AnchorPredicate;
use crate::patch::splice::AnchorPair;

/// Default configuration constants.
///
/// Widths and spellings match the files already checked into the target toolchains,
/// so regenerating them produces no diff.
mod defaults {
    /// Column width of the quoted mnemonic in assembler table lines.
    pub const MNEMONIC_WIDTH: usize = 16;

    /// Column width of the quoted operand string in assembler table lines.
    pub const OPERANDS_WIDTH: usize = 8;

    /// Column width of the match and mask symbols in assembler table lines.
    pub const SYMBOL_WIDTH: usize = 24;

    /// Instruction class column of assembler table lines.
    pub const INSN_CLASS: &str = "INSN_CLASS_I";

    /// Match function column of assembler table lines.
    pub const MATCH_FUNC: &str = "match_opcode";

    /// Prefix of match constants.
    pub const MATCH_PREFIX: &str = "MATCH_";

    /// Prefix of mask constants.
    pub const MASK_PREFIX: &str = "MASK_";

    /// Scheduling read resource of backend definitions.
    pub const SCHED_READ: &str = "SSRead";

    /// Scheduling write resource of backend definitions.
    pub const SCHED_WRITE: &str = "SSWrite";

    /// Namespace tag carried by freshly generated header lines.
    pub const PATCHED_TAG: &str = "_SS_";

    /// Namespace tag of the placeholder lines in the target header.
    pub const TARGET_TAG: &str = "_CUSTOM";

    /// Keyword identifying the constants region.
    pub const DEFINE_KEYWORD: &str = "#define";

    /// Keyword identifying the declarations region.
    pub const DECLARE_KEYWORD: &str = "DECLARE_INSN";

    /// Marker of the assembler opcode table initializer.
    pub const TABLE_MARKER: &str = "riscv_opcodes[]";
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvext_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.emit.mnemonic_width, 16);
/// assert_eq!(config.patch.target_tag, "_CUSTOM");
/// ```
///
/// Deserializing a partial document:
///
/// ```
/// use rvext_core::config::Config;
///
/// let config = Config::from_json(r#"{ "patch": { "patched_tag": "_XV_" } }"#).unwrap();
/// assert_eq!(config.patch.patched_tag, "_XV_");
/// assert_eq!(config.patch.target_tag, "_CUSTOM");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Assembler table and header text settings.
    #[serde(default)]
    pub emit: EmitConfig,
    /// Backend definition settings.
    #[serde(default)]
    pub tablegen: TableGenConfig,
    /// Anchor markers used when patching toolchain sources.
    #[serde(default)]
    pub patch: PatchConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// [`Error::Config`](crate::Error::Config) if the document is not valid JSON or has
    /// fields of the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Settings for assembler table lines and encoding headers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmitConfig {
    /// Padding width of the quoted mnemonic.
    #[serde(default = "EmitConfig::default_mnemonic_width")]
    pub mnemonic_width: usize,

    /// Padding width of the quoted operand string.
    #[serde(default = "EmitConfig::default_operands_width")]
    pub operands_width: usize,

    /// Padding width of the match and mask symbols.
    #[serde(default = "EmitConfig::default_symbol_width")]
    pub symbol_width: usize,

    /// Instruction class column; an empty string drops the column.
    #[serde(default = "EmitConfig::default_insn_class")]
    pub insn_class: String,

    /// Match function column.
    #[serde(default = "EmitConfig::default_match_func")]
    pub match_func: String,

    /// Prefix of match constants.
    #[serde(default = "EmitConfig::default_match_prefix")]
    pub match_prefix: String,

    /// Prefix of mask constants.
    #[serde(default = "EmitConfig::default_mask_prefix")]
    pub mask_prefix: String,
}

impl EmitConfig {
    fn default_mnemonic_width() -> usize {
        defaults::MNEMONIC_WIDTH
    }

    fn default_operands_width() -> usize {
        defaults::OPERANDS_WIDTH
    }

    fn default_symbol_width() -> usize {
        defaults::SYMBOL_WIDTH
    }

    fn default_insn_class() -> String {
        defaults::INSN_CLASS.to_string()
    }

    fn default_match_func() -> String {
        defaults::MATCH_FUNC.to_string()
    }

    fn default_match_prefix() -> String {
        defaults::MATCH_PREFIX.to_string()
    }

    fn default_mask_prefix() -> String {
        defaults::MASK_PREFIX.to_string()
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            mnemonic_width: defaults::MNEMONIC_WIDTH,
            operands_width: defaults::OPERANDS_WIDTH,
            symbol_width: defaults::SYMBOL_WIDTH,
            insn_class: defaults::INSN_CLASS.to_string(),
            match_func: defaults::MATCH_FUNC.to_string(),
            match_prefix: defaults::MATCH_PREFIX.to_string(),
            mask_prefix: defaults::MASK_PREFIX.to_string(),
        }
    }
}

/// Settings for backend (TableGen) definitions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableGenConfig {
    /// Scheduling read resource attached to every definition.
    #[serde(default = "TableGenConfig::default_sched_read")]
    pub sched_read: String,

    /// Scheduling write resource attached to every definition.
    #[serde(default = "TableGenConfig::default_sched_write")]
    pub sched_write: String,
}

impl TableGenConfig {
    fn default_sched_read() -> String {
        defaults::SCHED_READ.to_string()
    }

    fn default_sched_write() -> String {
        defaults::SCHED_WRITE.to_string()
    }
}

impl Default for TableGenConfig {
    fn default() -> Self {
        Self {
            sched_read: defaults::SCHED_READ.to_string(),
            sched_write: defaults::SCHED_WRITE.to_string(),
        }
    }
}

/// Anchor markers used by the splicer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchConfig {
    /// Tag found on every replacement line of the generated header.
    #[serde(default = "PatchConfig::default_patched_tag")]
    pub patched_tag: String,

    /// Tag found on every placeholder line of the target header.
    #[serde(default = "PatchConfig::default_target_tag")]
    pub target_tag: String,

    /// Keyword of the constants region.
    #[serde(default = "PatchConfig::default_define_keyword")]
    pub define_keyword: String,

    /// Keyword of the declarations region.
    #[serde(default = "PatchConfig::default_declare_keyword")]
    pub declare_keyword: String,

    /// Marker of the line declaring the assembler opcode table.
    #[serde(default = "PatchConfig::default_table_marker")]
    pub table_marker: String,
}

impl PatchConfig {
    fn default_patched_tag() -> String {
        defaults::PATCHED_TAG.to_string()
    }

    fn default_target_tag() -> String {
        defaults::TARGET_TAG.to_string()
    }

    fn default_define_keyword() -> String {
        defaults::DEFINE_KEYWORD.to_string()
    }

    fn default_declare_keyword() -> String {
        defaults::DECLARE_KEYWORD.to_string()
    }

    fn default_table_marker() -> String {
        defaults::TABLE_MARKER.to_string()
    }

    /// Anchor pair of the constants (`#define`) region.
    pub fn constants_anchor(&self) -> AnchorPair {
        self.anchor_pair(&self.define_keyword)
    }

    /// Anchor pair of the declarations (`DECLARE_INSN`) region.
    pub fn declarations_anchor(&self) -> AnchorPair {
        self.anchor_pair(&self.declare_keyword)
    }

    fn anchor_pair(&self, keyword: &str) -> AnchorPair {
        AnchorPair {
            patched: AnchorPredicate::new(&self.patched_tag, keyword),
            target: AnchorPredicate::new(&self.target_tag, keyword),
        }
    }
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            patched_tag: defaults::PATCHED_TAG.to_string(),
            target_tag: defaults::TARGET_TAG.to_string(),
            define_keyword: defaults::DEFINE_KEYWORD.to_string(),
            declare_keyword: defaults::DECLARE_KEYWORD.to_string(),
            table_marker: defaults::TABLE_MARKER.to_string(),
        }
    }
}
