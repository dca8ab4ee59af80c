//! Fatal setup error definitions.
//!
//! Everything that can go wrong *before* simulation starts is represented
//! here. Runtime conditions (unimplemented encodings, divide-by-zero,
//! out-of-range memory) are deliberately not errors: the simulator reports
//! them as diagnostics and keeps the pipeline advancing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program file could not be opened or read.
    #[error("cannot read program file {path}: {source}")]
    ProgramFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A program line did not parse as a hexadecimal 32-bit word.
    #[error("program line {line}: '{text}' is not a 32-bit hex word")]
    MalformedWord {
        /// 1-based line number in the program file.
        line: usize,
        /// The offending line content.
        text: String,
    },

    /// The loaded program does not fit in the text region.
    #[error("program of {words} words overflows the text region")]
    ProgramTooLarge {
        /// Number of words read from the program file.
        words: usize,
    },
}
