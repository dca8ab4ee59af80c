//! Instruction Decode (ID) stage.
//!
//! The busiest stage. In one cycle it:
//! 1. Spends outstanding stall cycles as bubbles (holding fetch).
//! 2. Consumes the one-cycle control flush behind a taken branch.
//! 3. Decodes the fetched word into its tagged representation.
//! 4. Runs the hazard unit against the EX/MEM occupants refreshed earlier
//!    this cycle, possibly arming forwards or a stall.
//! 5. Latches operand snapshots and the sign-extended immediate into ID/EX.
//!
//! Operands are latched from the *staging* register generation: WB has
//! already run this cycle, so a value it staged is visible here without
//! waiting for the end-of-cycle commit (write-before-read register file).

use tracing::debug;

use crate::core::Cpu;
use crate::core::pipeline::latches::IdEx;
use crate::isa::decode::decode;
use crate::isa::instruction::InstructionBits;

/// Executes the decode stage.
pub fn decode_stage(cpu: &mut Cpu) {
    cpu.fetch_hold = false;

    // Outstanding stall: one more bubble, fetch held.
    if cpu.hazards.stall > 0 {
        cpu.hazards.stall -= 1;
        cpu.id_ex = IdEx::default();
        cpu.fetch_hold = true;
        cpu.stats.stalls_data += 1;
        return;
    }

    // Control flush: squash the instruction fetched behind a taken branch.
    if cpu.branch_taken {
        cpu.branch_taken = false;
        cpu.id_ex = IdEx::default();
        cpu.stats.stalls_control += 1;
        debug!(squashed = format_args!("{:#010x}", cpu.if_id.ir), "branch flush");
        return;
    }

    let ir = cpu.if_id.ir;
    if ir == 0 {
        cpu.id_ex = IdEx::default();
        return;
    }

    // Unimplemented encodings decode to None; they carry no hazard sources
    // but still flow down the pipeline so the later stages can report them.
    let decoded = decode(ir);
    if let Some(d) = &decoded {
        cpu.hazards.examine(d);
    }

    // Operands latch from the raw register fields, valid for every format.
    let a = cpu.next.regs[ir.rs()];
    let b = cpu.next.regs[ir.rt()];
    let imm = ir.imm16() as i16 as i32 as u32;

    if cpu.hazards.stall > 0 {
        // The arming cycle is the first stall cycle.
        cpu.hazards.stall -= 1;
        cpu.id_ex = IdEx::default();
        cpu.fetch_hold = true;
        cpu.stats.stalls_data += 1;
        return;
    }

    cpu.id_ex = IdEx {
        ir,
        pc: cpu.if_id.pc,
        a,
        b,
        imm,
        op: decoded,
    };
}
