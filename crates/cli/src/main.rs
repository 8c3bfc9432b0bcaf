//! RISC-V custom extension generator CLI.
//!
//! This binary drives every generator stage from one entry point. It performs:
//! 1. **Opcode tables:** Encoding constraints and `riscv_opcodes[]` lines for binutils.
//! 2. **Header:** Match/mask constants and `DECLARE_INSN` lines ready for patching.
//! 3. **Backend definitions:** TableGen records for LLVM, printed to stdout.
//! 4. **Patch:** Splices generated text into `riscv-opc.h` and `riscv-opc.c` in place.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rvext_core::config::Config;
use rvext_core::emit::tablegen::{self, RdMode};
use rvext_core::emit::{batch, header};
use rvext_core::patch::{self, ToolchainPatch};

#[derive(Parser, Debug)]
#[command(
    name = "rvext",
    author,
    version,
    about = "RISC-V custom instruction toolchain generator",
    long_about = "Generate binutils and LLVM sources for a custom RISC-V instruction extension and patch them into a toolchain tree.\n\nExtension descriptions hold one instruction per line:\n  mnemonic format operands opcode_hi opcode_lo funct3\n  ss_cfg I rs1,imm 1 2 3   # comment\n\nExamples:\n  rvext opcodes ext.txt opcodes-ss riscv-opc-ss.c\n  rvext header ext.txt riscv-opc-ss.h\n  rvext tablegen ext.txt implicit > RISCVInstrInfoSS.td\n  rvext patch riscv-opc-ss.h include/opcode/riscv-opc.h riscv-opc-ss.c opcodes/riscv-opc.c"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the encoding table and the assembler opcode table for an extension.
    Opcodes {
        /// Extension description.
        extension: PathBuf,
        /// Destination of the encoding constraint lines.
        encoding_out: PathBuf,
        /// Destination of the `riscv_opcodes[]` lines.
        asm_out: PathBuf,
    },

    /// Write the match/mask header for an extension.
    Header {
        /// Extension description.
        extension: PathBuf,
        /// Destination header.
        header_out: PathBuf,
    },

    /// Print TableGen instruction definitions for an extension.
    Tablegen {
        /// Extension description.
        extension: PathBuf,
        /// How the destination register appears in each definition.
        #[arg(value_enum)]
        rd_mode: RdModeArg,
    },

    /// Patch generated header and table lines into binutils sources in place.
    Patch {
        /// Generated header.
        patched_header: PathBuf,
        /// `riscv-opc.h` to patch.
        target_header: PathBuf,
        /// Generated `riscv_opcodes[]` lines.
        patched_source: PathBuf,
        /// `riscv-opc.c` to patch.
        target_source: PathBuf,
    },
}

/// Destination register mode accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum RdModeArg {
    /// `rd` is pinned to zero and not printed.
    Implicit,
    /// `rd` is an output operand printed first.
    Printed,
}

impl From<RdModeArg> for RdMode {
    fn from(arg: RdModeArg) -> Self {
        match arg {
            RdModeArg::Implicit => Self::Implicit,
            RdModeArg::Printed => Self::Printed,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(cli.command, &Config::default()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber, honouring `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Executes one subcommand.
fn run(command: Commands, config: &Config) -> rvext_core::Result<()> {
    tracing::debug!(?command, "running");
    match command {
        Commands::Opcodes {
            extension,
            encoding_out,
            asm_out,
        } => {
            let _tables = batch::write_tables(&extension, &encoding_out, &asm_out, &config.emit)?;
        }
        Commands::Header {
            extension,
            header_out,
        } => {
            let _header = header::write_header(&extension, &header_out, &config.emit)?;
        }
        Commands::Tablegen { extension, rd_mode } => {
            let definitions =
                tablegen::emit_definitions_file(&extension, rd_mode.into(), &config.tablegen)?;
            io::stdout()
                .lock()
                .write_all(definitions.as_bytes())
                .map_err(|source| rvext_core::Error::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
        Commands::Patch {
            patched_header,
            target_header,
            patched_source,
            target_source,
        } => {
            let files =
                ToolchainPatch::new(patched_header, target_header, patched_source, target_source);
            patch::patch_toolchain(&files, &config.patch)?;
        }
    }
    Ok(())
}
