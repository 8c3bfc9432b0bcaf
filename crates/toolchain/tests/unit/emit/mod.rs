//! Emitter tests.
//!
//! This module contains unit tests for the generated toolchain text: encoding
//! records, assembler table lines, match/mask headers, and backend definitions.

/// Unit tests for extension-wide table generation and file output.
pub mod batch;


/// Unit tests for the match/mask header.
pub mod header;

/// Unit tests for TableGen definitions.
pub mod tablegen;
