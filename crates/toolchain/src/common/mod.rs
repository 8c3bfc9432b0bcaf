//! Common utilities and types used throughout the extension generator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Instruction width, selector bit ranges, and input syntax markers.
//! 2. **Error Handling:** Descriptor, anchor, and file-attributed error types.
//! 3. **Files:** Whole-file reads and atomic file replacement.

/// Common constants used throughout the generator.
pub mod constants;

/// Error types for descriptors, anchors, and file operations.
pub mod error;

/// Whole-file reads and atomic writes.
pub mod files;

pub use constants::INSTRUCTION_WIDTH;
pub use error::{AnchorError, DescriptorError, Error, Result};
