//! Anchor Splicer.
//!
//! Patches generated text into a binutils tree:
//! 1. **Header:** the placeholder `#define` region and the placeholder `DECLARE_INSN`
//!    region of `riscv-opc.h` are each replaced by the matching region of the generated
//!    header.
//! 2. **Opcode table:** the generated `riscv_opcodes[]` lines are inserted at the top of
//!    the table initializer in `riscv-opc.c`.
//!
//! Both results are computed in memory. Only when every anchor resolved are the two
//! targets rewritten, so an ambiguous anchor leaves the tree untouched.

use std::path::{Path, PathBuf};

use crate::common::error::{AnchorError, Error, Result};
use crate::common::files;
use crate::config::PatchConfig;

/// Anchor predicates and region lookup.
pub mod anchor;

/// Region replacement and marker insertion over lines.
pub mod splice;

pub use anchor::{AnchorPredicate, AnchorRegion};
pub use splice::AnchorPair;

/// Replaces both placeholder regions of a target header.
///
/// The constants region is spliced first and the declarations region is located in
/// the result, so the two regions may sit anywhere relative to each other.
///
/// Every `#define` and `DECLARE_INSN` entry of the patched header must lie inside its
/// region. An entry without the patched tag would otherwise be dropped silently while
/// the opcode table still references its symbols.
///
/// # Errors
///
/// * [`AnchorError::Unanchored`] if a patched entry lies outside its region.
/// * Any other [`AnchorError`] if one of the four regions is empty or not contiguous.
pub fn patch_header(
    patched: &str,
    target: &str,
    config: &PatchConfig,
) -> std::result::Result<String, AnchorError> {
    let patched = splice::terminated(patched);
    let patched_lines = splice::split_lines(&patched);
    let target_lines = splice::split_lines(target);

    let constants = config.constants_anchor();
    let declarations = config.declarations_anchor();
    for pair in [&constants, &declarations] {
        let region = anchor::locate(&patched_lines, &pair.patched)?;
        anchor::ensure_complete(&patched_lines, &pair.patched, region)?;
    }

    let defined = splice::splice_lines(&patched_lines, &target_lines, &constants)?;
    let declared = splice::splice_lines(&patched_lines, &defined, &declarations)?;
    Ok(declared.concat())
}

/// Inserts the generated opcode table lines into a target source file.
///
/// # Errors
///
/// [`AnchorError::MarkerNotFound`] or [`AnchorError::MissingBrace`] if the table
/// initializer cannot be found.
pub fn patch_source(
    table: &str,
    target: &str,
    config: &PatchConfig,
) -> std::result::Result<String, AnchorError> {
    splice::insert_block(target, &config.table_marker, table)
}

/// Files taking part in a toolchain patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainPatch {
    /// Generated header supplying the replacement regions.
    pub patched_header: PathBuf,
    /// Header to patch in place.
    pub target_header: PathBuf,
    /// Generated `riscv_opcodes[]` lines.
    pub patched_source: PathBuf,
    /// Source file to patch in place.
    pub target_source: PathBuf,
}

impl ToolchainPatch {
    /// Groups the four paths of a patch.
    pub fn new(
        patched_header: impl Into<PathBuf>,
        target_header: impl Into<PathBuf>,
        patched_source: impl Into<PathBuf>,
        target_source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            patched_header: patched_header.into(),
            target_header: target_header.into(),
            patched_source: patched_source.into(),
            target_source: target_source.into(),
        }
    }
}

/// Patches the target header and source in place.
///
/// Both new files are staged on disk before either target is replaced, then renamed
/// back to back. Only a failure of the second rename can leave the header patched and
/// the source unpatched.
///
/// # Arguments
///
/// * `patch` - Generated and target files.
/// * `config` - Anchor markers.
///
/// # Errors
///
/// * [`Error::Io`] if a file cannot be read or written.
/// * [`Error::Anchor`] if an anchor cannot be resolved; no file is written then.
pub fn patch_toolchain(patch: &ToolchainPatch, config: &PatchConfig) -> Result<()> {
    let patched_header = files::read_text(&patch.patched_header)?;
    let target_header = files::read_text(&patch.target_header)?;
    let patched_source = files::read_text(&patch.patched_source)?;
    let target_source = files::read_text(&patch.target_source)?;

    let header = patch_header(&patched_header, &target_header, config)
        .map_err(anchor_error(&patch.target_header, &patch.patched_header))?;
    let source = patch_source(&patched_source, &target_source, config)
        .map_err(anchor_error(&patch.target_source, &patch.patched_source))?;

    let header = files::stage(&patch.target_header, &header)?;
    let source = files::stage(&patch.target_source, &source)?;
    header.commit()?;
    source.commit()?;

    tracing::info!(
        header = %patch.target_header.display(),
        source = %patch.target_source.display(),
        "patched toolchain sources"
    );
    Ok(())
}

fn anchor_error(target: &Path, patched: &Path) -> impl FnOnce(AnchorError) -> Error {
    let target = target.to_path_buf();
    let patched = patched.to_path_buf();
    move |source| Error::Anchor {
        target,
        patched,
        source,
    }
}
