//! Extension Batch Emitter.
//!
//! Reads a whole extension description and produces the encoding table and the
//! assembler table, one output line per non-blank, non-comment descriptor line, in
//! input order. The first bad line aborts the batch and no output file is touched.

use std::path::Path;

use crate::common::error::{Error, Result};
use crate::common::files;
use crate::config::EmitConfig;
use crate::emit::compile::{self, Compiled};
use crate::isa::descriptor::{self, Descriptor};

/// A descriptor together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// One-based line number in the description.
    pub line: usize,
    /// Parsed descriptor.
    pub descriptor: Descriptor,
}

/// Text of both generated tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    /// Encoding constraint lines.
    pub encoding: String,
    /// `riscv_opcodes[]` initializer lines.
    pub asm: String,
}

/// Parses every descriptor of an extension description.
///
/// # Arguments
///
/// * `text` - Contents of the description.
/// * `origin` - Path reported in errors.
///
/// # Errors
///
/// [`Error::Line`] for the first line that does not parse.
pub fn parse_extension(text: &str, origin: &Path) -> Result<Vec<Entry>> {
    text.lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let code = descriptor::strip_comment(raw);
            (!code.is_empty()).then(|| {
                let line = index + 1;
                code.parse::<Descriptor>()
                    .map(|descriptor| Entry { line, descriptor })
                    .map_err(|source| Error::Line {
                        path: origin.to_path_buf(),
                        line,
                        source,
                    })
            })
        })
        .collect()
}

/// Reads and parses an extension description file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read, or [`Error::Line`] for a bad line.
pub fn read_extension(path: &Path) -> Result<Vec<Entry>> {
    let text = files::read_text(path)?;
    parse_extension(&text, path)
}

/// Compiles every entry, attributing failures to their source line.
///
/// # Errors
///
/// [`Error::Line`] for the first entry that does not compile.
pub fn compile_entries(entries: &[Entry], origin: &Path) -> Result<Vec<Compiled>> {
    entries
        .iter()
        .map(|entry| {
            compile::compile(&entry.descriptor).map_err(|source| Error::Line {
                path: origin.to_path_buf(),
                line: entry.line,
                source,
            })
        })
        .collect()
}

/// Renders both tables from already compiled instructions.
pub fn render_tables(compiled: &[Compiled], config: &EmitConfig) -> Tables {
    compiled
        .iter()
        .fold(Tables::default(), |mut tables, instruction| {
            tables.encoding.push_str(&instruction.encoding.to_string());
            tables.encoding.push('\n');
            tables.asm.push_str(&instruction.asm.render(config));
            tables.asm.push('\n');
            tables
        })
}

/// Produces both tables from the text of an extension description.
///
/// # Errors
///
/// [`Error::Line`] for the first line that fails to parse or compile.
pub fn emit_tables(text: &str, origin: &Path, config: &EmitConfig) -> Result<Tables> {
    let entries = parse_extension(text, origin)?;
    let compiled = compile_entries(&entries, origin)?;
    tracing::debug!(
        origin = %origin.display(),
        instructions = compiled.len(),
        "compiled extension"
    );
    Ok(render_tables(&compiled, config))
}

/// Produces both tables from an extension description file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read, or [`Error::Line`] for a bad line.
pub fn emit(path: &Path, config: &EmitConfig) -> Result<Tables> {
    let text = files::read_text(path)?;
    emit_tables(&text, path, config)
}

/// Generates both tables and writes them to `encoding_out` and `asm_out`.
///
/// Both tables are built in memory before either file is written.
///
/// # Arguments
///
/// * `extension` - Extension description file.
/// * `encoding_out` - Destination of the encoding table.
/// * `asm_out` - Destination of the assembler table.
/// * `config` - Emission settings.
///
/// # Errors
///
/// [`Error::Line`] for a bad descriptor, or [`Error::Io`] if a file cannot be read
/// or written.
pub fn write_tables(
    extension: &Path,
    encoding_out: &Path,
    asm_out: &Path,
    config: &EmitConfig,
) -> Result<Tables> {
    let tables = emit(extension, config)?;
    files::write_atomic(encoding_out, &tables.encoding)?;
    files::write_atomic(asm_out, &tables.asm)?;
    tracing::info!(
        extension = %extension.display(),
        encoding = %encoding_out.display(),
        asm = %asm_out.display(),
        "wrote opcode tables"
    );
    Ok(tables)
}
