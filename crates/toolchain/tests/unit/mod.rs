//! # Unit Components
//!
//! This module organizes the unit tests of every generator component, from
//! descriptor parsing up to in-place patching of toolchain sources.



/// Unit tests for the text emitters.
///
/// This module checks encoding records, assembler table lines, headers, and backend
/// definitions against hand-verified output.
pub mod emit;
