//! Instruction Fetch (IF) stage.
//!
//! Reads the next instruction word from raw memory — instruction fetch does
//! not go through the data cache — and advances the PC. Because IF runs
//! last in the cycle, it observes a PC already redirected by a control
//! transfer that EX resolved earlier in the same cycle.

use crate::common::constants::WORD_BYTES;
use crate::core::Cpu;

/// Executes the fetch stage.
///
/// While the decode stage is stalled (`fetch_hold`), IF/ID is left
/// untouched so the held instruction is re-presented next cycle and the PC
/// does not advance.
pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.fetch_hold {
        return;
    }

    let pc = cpu.current.pc;
    cpu.if_id.ir = cpu.mem.read32(pc);
    cpu.next.pc = pc.wrapping_add(WORD_BYTES);
    // The latch records the incremented PC; EX's branch arithmetic
    // compensates for the extra word.
    cpu.if_id.pc = cpu.next.pc;
}
