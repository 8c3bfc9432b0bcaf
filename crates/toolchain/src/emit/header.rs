//! Encoding Header Emitter.
//!
//! Produces the C header the splicer consumes: one `#define` pair per instruction,
//! followed by a `DECLARE_INSN` block guarded by `#ifdef DECLARE_INSN`.
//!
//! ```text
//! #define MATCH_SS_CFG 0x302b
//! #define MASK_SS_CFG 0x707f
//!
//! #ifdef DECLARE_INSN
//! DECLARE_INSN(ss_cfg, MATCH_SS_CFG, MASK_SS_CFG)
//! #endif
//! ```
//!
//! With the default tags every `#define` line and every `DECLARE_INSN` line carries the
//! patched tag, and the two groups are each contiguous, so the output is a valid splice
//! source as long as the mnemonics start with `ss_`. The splicer rejects a header with
//! any other mnemonic instead of dropping its lines.

use std::path::Path;

use crate::common::error::Result;
use crate::common::files;
use crate::config::EmitConfig;
use crate::emit::batch;
use crate::emit::compile::Compiled;

/// Renders the header for already compiled instructions.
pub fn render_header(compiled: &[Compiled], config: &EmitConfig) -> String {
    let mut out = String::new();

    for instruction in compiled {
        let asm = &instruction.asm;
        out.push_str(&format!(
            "#define {} {:#x}\n",
            asm.match_symbol(config),
            asm.match_value
        ));
        out.push_str(&format!(
            "#define {} {:#x}\n",
            asm.mask_symbol(config),
            asm.mask
        ));
    }

    out.push_str("\n#ifdef DECLARE_INSN\n");
    for instruction in compiled {
        let asm = &instruction.asm;
        out.push_str(&format!(
            "DECLARE_INSN({}, {}, {})\n",
            asm.mnemonic.replace('.', "_"),
            asm.match_symbol(config),
            asm.mask_symbol(config)
        ));
    }
    out.push_str("#endif\n");

    out
}

/// Produces the header from the text of an extension description.
///
/// # Errors
///
/// [`Error::Line`](crate::Error::Line) for the first line that fails to parse or compile.
pub fn emit_header(text: &str, origin: &Path, config: &EmitConfig) -> Result<String> {
    let entries = batch::parse_extension(text, origin)?;
    let compiled = batch::compile_entries(&entries, origin)?;
    Ok(render_header(&compiled, config))
}

/// Generates the header for `extension` and writes it to `out`.
///
/// # Errors
///
/// [`Error::Line`](crate::Error::Line) for a bad descriptor, or
/// [`Error::Io`](crate::Error::Io) if a file cannot be read or written.
pub fn write_header(extension: &Path, out: &Path, config: &EmitConfig) -> Result<String> {
    let text = files::read_text(extension)?;
    let header = emit_header(&text, extension, config)?;
    files::write_atomic(out, &header)?;
    tracing::info!(
        extension = %extension.display(),
        header = %out.display(),
        "wrote encoding header"
    );
    Ok(header)
}
