//! Error types for the WCET analyzer.
//!
//! This module defines the fatal error taxonomy of the analysis pipeline.
//! Non-fatal conditions (an SMT `unknown`, a back-edge cut) are handled
//! conservatively inside the explorer and reported through `tracing`, not
//! through these types.

use thiserror::Error;

/// Primary error type for the WCET analyzer.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Truncated input, including a missing second half of a wide
    /// (16-byte) instruction.
    #[error("Malformed instruction at byte offset {offset}: expected {expected} bytes, got {actual}")]
    MalformedInstruction {
        /// Byte offset of the word that could not be completed.
        offset: usize,
        /// Bytes needed to finish the word.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Instruction opcode not present in either latency catalog.
    #[error("Unknown opcode 0x{opcode:02X} at instruction {index}")]
    UnknownOpcode {
        /// Instruction index within the program.
        index: usize,
        /// The offending opcode byte.
        opcode: u8,
    },

    /// A jump-class instruction the CFG builder does not know how to wire,
    /// or a control transfer that leaves the program.
    #[error("Unwireable control flow at instruction {index}: {message}")]
    UnreachableCfg {
        /// Instruction index within the program.
        index: usize,
        /// Why the builder gave up.
        message: String,
    },
}

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
