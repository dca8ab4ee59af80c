//! Execute (EX) stage.
//!
//! This stage performs the following:
//! 1. **Occupant Latch Refresh:** Publishes its occupant's destination and
//!    load-ness for the hazard unit (the decode stage runs later this cycle).
//! 2. **Operand Resolution:** Applies the single-use forwarding selectors
//!    armed by last cycle's decode.
//! 3. **Arithmetic:** ALU, shift, multiply/divide, and comparison dispatch
//!    on the decode-once tag.
//! 4. **Control Transfers:** Writes taken targets directly into the current
//!    PC — IF runs later this same cycle and fetches the redirect — and
//!    raises the branch flag that ID consumes next cycle to squash the one
//!    wrongly fetched instruction.

use tracing::{debug, warn};

use crate::common::constants::{HALT_CODE, LINK_REG, WORD_BYTES};
use crate::core::Cpu;
use crate::core::pipeline::hazards::resolve;
use crate::core::pipeline::latches::ExMem;
use crate::isa::decode::Op;

/// Executes the execute stage.
pub fn execute_stage(cpu: &mut Cpu) {
    let id = cpu.id_ex;

    // Refresh the EX-occupant hazard latches for this cycle's decode.
    cpu.hazards.ex_dest = id.op.as_ref().and_then(|d| d.dest());
    cpu.hazards.ex_is_load = id.op.as_ref().is_some_and(|d| d.is_load());

    if id.ir == 0 {
        // Bubble: clear the IR/tag, keep the stale data fields, and drop any
        // selector that was armed together with a stall so it cannot be
        // applied to a later instruction.
        cpu.ex_mem.ir = 0;
        cpu.ex_mem.op = None;
        cpu.hazards.clear_forwards();
        return;
    }

    let Some(d) = id.op else {
        warn!(ir = format_args!("{:#010x}", id.ir), "EX: instruction not implemented");
        cpu.ex_mem.ir = id.ir;
        cpu.ex_mem.pc = id.pc;
        cpu.ex_mem.op = None;
        cpu.hazards.clear_forwards();
        return;
    };

    let a = resolve(cpu.hazards.forward_a, d.rs, id.a, &cpu.mem_wb, &cpu.next);
    let b = resolve(cpu.hazards.forward_b, d.rt, id.b, &cpu.mem_wb, &cpu.next);
    cpu.hazards.clear_forwards();

    let mut out = ExMem {
        ir: id.ir,
        pc: id.pc,
        a,
        b,
        alu_out: 0,
        hi: 0,
        lo: 0,
        op: Some(d),
    };

    // Branch target relative to the latched PC (fetch PC + 4): the -4
    // compensates for the increment recorded at fetch.
    let branch_target =
        |pc: u32, imm: u32| pc.wrapping_add(imm << 2).wrapping_sub(WORD_BYTES);
    // J-format target: upper nibble of the latched PC, 26-bit field << 2.
    let jump_target = (id.pc & 0xF000_0000) | (d.target << 2);

    let mut taken: Option<u32> = None;

    match d.op {
        Op::Sll => out.alu_out = b << d.shamt,
        Op::Srl => out.alu_out = b >> d.shamt,
        Op::Sra => out.alu_out = ((b as i32) >> d.shamt) as u32,
        Op::Syscall => out.alu_out = HALT_CODE,
        Op::Mfhi => {
            // Mirror HI into the ALU channel so a dependent consumer
            // forwards the real value.
            out.hi = cpu.current.hi;
            out.alu_out = cpu.current.hi;
        }
        Op::Mflo => {
            out.lo = cpu.current.lo;
            out.alu_out = cpu.current.lo;
        }
        Op::Mthi | Op::Mtlo => out.alu_out = a,
        Op::Mult => {
            let product = i64::from(a as i32) * i64::from(b as i32);
            out.lo = product as u32;
            out.hi = (product as u64 >> 32) as u32;
        }
        Op::Multu => {
            let product = u64::from(a) * u64::from(b);
            out.lo = product as u32;
            out.hi = (product >> 32) as u32;
        }
        Op::Div => {
            if b != 0 {
                out.lo = (a as i32).wrapping_div(b as i32) as u32;
                out.hi = (a as i32).wrapping_rem(b as i32) as u32;
            } else {
                // Divide-by-zero is not a fault: HI/LO stay as they are.
                out.hi = cpu.current.hi;
                out.lo = cpu.current.lo;
            }
        }
        Op::Divu => {
            if b != 0 {
                out.lo = a / b;
                out.hi = a % b;
            } else {
                out.hi = cpu.current.hi;
                out.lo = cpu.current.lo;
            }
        }
        Op::Add | Op::Addu => out.alu_out = a.wrapping_add(b),
        Op::Sub | Op::Subu => out.alu_out = a.wrapping_sub(b),
        Op::And => out.alu_out = a & b,
        Op::Or => out.alu_out = a | b,
        Op::Xor => out.alu_out = a ^ b,
        Op::Nor => out.alu_out = !(a | b),
        Op::Slt => out.alu_out = u32::from((a as i32) < (b as i32)),
        Op::Jr => taken = Some(a),
        Op::Jalr => {
            cpu.next.regs[LINK_REG] = id.pc;
            taken = Some(a);
        }
        Op::J => taken = Some(jump_target),
        Op::Jal => {
            cpu.next.regs[LINK_REG] = id.pc;
            taken = Some(jump_target);
        }
        Op::Bltz => {
            if (a as i32) < 0 {
                taken = Some(branch_target(id.pc, id.imm));
            }
        }
        Op::Bgez => {
            if (a as i32) >= 0 {
                taken = Some(branch_target(id.pc, id.imm));
            }
        }
        Op::Beq => {
            if a == b {
                taken = Some(branch_target(id.pc, id.imm));
            }
        }
        Op::Bne => {
            if a != b {
                taken = Some(branch_target(id.pc, id.imm));
            }
        }
        Op::Blez => {
            if (a as i32) <= 0 {
                taken = Some(branch_target(id.pc, id.imm));
            }
        }
        Op::Bgtz => {
            if (a as i32) > 0 {
                taken = Some(branch_target(id.pc, id.imm));
            }
        }
        Op::Addi | Op::Addiu => out.alu_out = a.wrapping_add(id.imm),
        Op::Slti => out.alu_out = u32::from((a as i32) < (id.imm as i32)),
        Op::Andi => out.alu_out = a & d.imm_zext(),
        Op::Ori => out.alu_out = a | d.imm_zext(),
        Op::Xori => out.alu_out = a ^ d.imm_zext(),
        Op::Lui => out.alu_out = d.imm_zext() << 16,
        Op::Lb | Op::Lh | Op::Lw | Op::Sb | Op::Sh | Op::Sw => {
            out.alu_out = a.wrapping_add(id.imm);
        }
    }

    if let Some(target) = taken {
        // Same-cycle redirect: IF runs after EX and fetches the target this
        // cycle; ID squashes the one instruction fetched behind us next
        // cycle.
        cpu.current.pc = target;
        cpu.branch_taken = true;
        debug!(target = format_args!("{:#010x}", target), "control transfer taken");
    }

    cpu.ex_mem = out;
}
