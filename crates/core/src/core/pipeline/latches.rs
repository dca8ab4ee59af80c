//! Pipeline latch records.
//!
//! The four staging records carried between the five stages:
//! IF/ID -> ID/EX -> EX/MEM -> MEM/WB. Each stage exclusively writes its own
//! output latch; the downstream stage only reads it.
//!
//! An IR of zero encodes a bubble and suppresses all side effects in every
//! consuming stage. When a bubble passes through MEM, the MEM/WB *data*
//! fields are left untouched (only the IR and tag clear); the forwarding
//! unit relies on one-cycle-old results remaining readable there.
//!
//! The latched PC is the fetch-time PC **plus four** — the fetch stage
//! records the incremented value, and the branch arithmetic in EX
//! compensates. Preserved encoding; do not "fix" one side without the
//! other.

use crate::isa::decode::Decoded;

/// IF -> ID latch: the fetched word.
#[derive(Clone, Copy, Debug, Default)]
pub struct IfId {
    /// Raw instruction word (0 = bubble).
    pub ir: u32,
    /// Fetch PC + 4.
    pub pc: u32,
}

/// ID -> EX latch: decoded instruction and latched operands.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdEx {
    /// Raw instruction word (0 = bubble).
    pub ir: u32,
    /// Fetch PC + 4, passed through from IF/ID.
    pub pc: u32,
    /// Operand latched from register rs.
    pub a: u32,
    /// Operand latched from register rt.
    pub b: u32,
    /// Sign-extended 16-bit immediate.
    pub imm: u32,
    /// Decode-once tag (`None` for bubbles and unimplemented encodings).
    pub op: Option<Decoded>,
}

/// EX -> MEM latch: execution results.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExMem {
    /// Raw instruction word (0 = bubble).
    pub ir: u32,
    /// Fetch PC + 4, passed through.
    pub pc: u32,
    /// Resolved operand A (after forwarding).
    pub a: u32,
    /// Resolved operand B; the value stored by store instructions.
    pub b: u32,
    /// ALU result or effective address.
    pub alu_out: u32,
    /// HI copy for HI/LO-writing operations.
    pub hi: u32,
    /// LO copy for HI/LO-writing operations.
    pub lo: u32,
    /// Decode-once tag.
    pub op: Option<Decoded>,
}

/// MEM -> WB latch: values ready to commit.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemWb {
    /// Raw instruction word (0 = bubble).
    pub ir: u32,
    /// ALU result, passed through for non-loads.
    pub alu_out: u32,
    /// Loaded-memory datum, pending writeback.
    pub lmd: u32,
    /// HI copy.
    pub hi: u32,
    /// LO copy.
    pub lo: u32,
    /// Decode-once tag.
    pub op: Option<Decoded>,
}
