//! Program loader.
//!
//! Programs are flat text files: one bare hexadecimal 32-bit instruction
//! word per line, loaded sequentially into the text region, four bytes
//! apart, in file order.
//!
//! A missing or unreadable file is a fatal setup error. So is a line that
//! does not parse — a truncated or corrupted program is caught before the
//! machine starts, never mid-run.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::SimError;
use crate::common::constants::WORD_BYTES;
use crate::mem::Memory;

/// A parsed program image, kept around so reset can re-place it without
/// touching the filesystem again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instruction words in file order.
    pub words: Vec<u32>,
}

impl Program {
    /// Parses a program file.
    ///
    /// Blank lines are skipped; an optional `0x` prefix per line is
    /// accepted.
    pub fn read(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::ProgramFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut words = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let digits = trimmed
                .strip_prefix("0x")
                .or_else(|| trimmed.strip_prefix("0X"))
                .unwrap_or(trimmed);
            let word =
                u32::from_str_radix(digits, 16).map_err(|_| SimError::MalformedWord {
                    line: idx + 1,
                    text: trimmed.to_owned(),
                })?;
            words.push(word);
        }

        info!(path = %path.display(), words = words.len(), "program loaded");
        Ok(Self { words })
    }

    /// Number of instruction words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the program is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Places the image into memory starting at `base`.
    ///
    /// Fails only when the program does not fit in the addressable region
    /// budget implied by the word count wrapping the address space.
    pub fn place(&self, mem: &mut Memory, base: u32) -> Result<(), SimError> {
        let bytes = (self.words.len() as u64) * u64::from(WORD_BYTES);
        if u64::from(base) + bytes > u64::from(u32::MAX) {
            return Err(SimError::ProgramTooLarge {
                words: self.words.len(),
            });
        }
        for (i, word) in self.words.iter().enumerate() {
            mem.write32(base + (i as u32) * WORD_BYTES, *word);
        }
        Ok(())
    }
}
