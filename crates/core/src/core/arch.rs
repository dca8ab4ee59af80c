//! Architectural state.
//!
//! One generation of the machine's programmer-visible state: 32
//! general-purpose registers, the HI/LO multiply-divide pair, and the
//! program counter. The CPU keeps two generations (`current` and `next`);
//! `current := next` at the end of every cycle is the single commit point
//! for register and HI/LO writes.
//!
//! Register 0 is *not* hardwired to zero. The machine this simulator models
//! leaves r0 fully writable, and programs relying on `$r0 == 0` must simply
//! never write it. The quirk is pinned by a test.

use crate::common::constants::NUM_REGS;

/// One generation of architectural state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchState {
    /// General-purpose registers r0-r31 (r0 writable, see module docs).
    pub regs: [u32; NUM_REGS],
    /// Multiply/divide high result register.
    pub hi: u32,
    /// Multiply/divide low result register.
    pub lo: u32,
    /// Program counter.
    pub pc: u32,
}
