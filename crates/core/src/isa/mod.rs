//! Instruction set architecture support.
//!
//! This module covers everything about the 32-bit MIPS-like encoding:
//! 1. **Field Extraction:** The [`InstructionBits`](instruction::InstructionBits) trait on raw words.
//! 2. **Constants:** Opcode, funct, and REGIMM tables.
//! 3. **Decoding:** The decode-once tagged representation carried through the pipeline.
//! 4. **Disassembly:** Rendering a word as mnemonic text.

/// Opcode / funct / REGIMM constant tables.
pub mod opcodes;

/// Field-extraction trait over raw instruction words.
pub mod instruction;

/// Decode-once instruction classification.
pub mod decode;

/// Instruction word to mnemonic text.
pub mod disasm;

pub use decode::{Decoded, Op, OpClass, decode};
pub use instruction::InstructionBits;
